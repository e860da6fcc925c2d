// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Page controller of the Default Capacity screen.
//!
//! The controller owns the reference data, the filter, the edit session and
//! the bulk selection. It sequences service calls and maps their outcomes
//! onto the three failure classes:
//!
//! - transport failures set [`PageStatus::Failure`] with a generic message
//! - business failures surface the service's message verbatim
//! - validation failures are reported per field and never reach the network
//!
//! Service calls are awaited one at a time. Responses are applied as they
//! arrive.

use crate::client::{CapacityService, ClientConfig};
use crate::convert::{
    calendarizations_from_dto, changes_to_dto, locations_from_dto, outcomes_from_dto,
    slot_catalog_from_dto, streams_from_dto, table_response_from_dto,
};
use crate::error::{
    ApiError, ClientError, FETCH_FAILED_MESSAGE, SUBMIT_FAILED_MESSAGE, UNKNOWN_TERRITORY,
    service_message, translate_core_error, translate_domain_error,
};
use crate::request_response::{
    BaseResponse, HoursDto, ResponseStatus, SlotUpdateDto, UpdateCapacityRequest,
};
use capacity_domain::{
    Calendarization, CalendarizationMode, CapacityStream, DateRange, DayName, FieldError,
    FilterSelection, LocationNode, NodeId, State, TerritorySlots, conflict_message, enabled_days,
    find_conflict, find_territory_id, format_service_date, validate_filter,
};
use default_capacity::{
    CapacitySession, EditEvent, FailureNode, PendingChanges, Selection, SessionEdit, TableData,
    TableResponse, TerritoryOutcome, bulk_territory_ids, failure_tree, initial_selection,
    is_node_disabled, merge_server_response, toggle,
};
use std::collections::BTreeSet;
use time::Date;
use tracing::{debug, info, warn};

/// Request status of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// The last request completed.
    Ready,
    /// The last request failed in transport.
    Failure,
}

/// The result of a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every territory was updated.
    Success {
        /// The name of the updated territory.
        territory: String,
    },
    /// Some territories were rejected; the rest were updated.
    PartialSuccess {
        /// Drill-down of the rejected territories.
        failures: Vec<FailureNode>,
    },
    /// The service rejected the submit.
    Failed {
        /// The service's message.
        message: String,
    },
}

/// Controller state of the capacity page.
pub struct CapacityPage<S: CapacityService> {
    service: S,
    config: ClientConfig,
    locations: Vec<State>,
    streams: Vec<CapacityStream>,
    slot_catalog: Vec<TerritorySlots>,
    filter: FilterSelection,
    calendarizations: Vec<Calendarization>,
    default_cust_date_id: Option<i64>,
    session: CapacitySession,
    bulk_selection: Selection,
    response_view: bool,
    outcomes: Vec<TerritoryOutcome>,
    field_errors: Vec<FieldError>,
    status: PageStatus,
    last_error: Option<String>,
    table_visible: bool,
}

impl<S: CapacityService> CapacityPage<S> {
    /// Creates a page over a service.
    #[must_use]
    pub fn new(service: S, config: ClientConfig) -> Self {
        Self {
            service,
            config,
            locations: Vec::new(),
            streams: Vec::new(),
            slot_catalog: Vec::new(),
            filter: FilterSelection::default(),
            calendarizations: Vec::new(),
            default_cust_date_id: None,
            session: CapacitySession::default(),
            bulk_selection: Selection::new(),
            response_view: false,
            outcomes: Vec::new(),
            field_errors: Vec::new(),
            status: PageStatus::Idle,
            last_error: None,
            table_visible: false,
        }
    }

    #[must_use]
    pub fn locations(&self) -> &[State] {
        &self.locations
    }

    #[must_use]
    pub fn streams(&self) -> &[CapacityStream] {
        &self.streams
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterSelection {
        &self.filter
    }

    #[must_use]
    pub fn calendarizations(&self) -> &[Calendarization] {
        &self.calendarizations
    }

    #[must_use]
    pub const fn default_cust_date_id(&self) -> Option<i64> {
        self.default_cust_date_id
    }

    #[must_use]
    pub const fn session(&self) -> &CapacitySession {
        &self.session
    }

    #[must_use]
    pub const fn bulk_selection(&self) -> &Selection {
        &self.bulk_selection
    }

    /// Returns whether the bulk drawer shows submit outcomes.
    #[must_use]
    pub const fn is_response_view(&self) -> bool {
        self.response_view
    }

    #[must_use]
    pub fn outcomes(&self) -> &[TerritoryOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    #[must_use]
    pub const fn status(&self) -> PageStatus {
        self.status
    }

    /// Returns the message of the last failed request.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub const fn is_table_visible(&self) -> bool {
        self.table_visible
    }

    fn transport_failure(&mut self, err: &ClientError, message: &str) -> ApiError {
        warn!(error = %err, "Capacity service request failed");
        self.status = PageStatus::Failure;
        self.last_error = Some(message.to_string());
        ApiError::Transport {
            message: message.to_string(),
        }
    }

    fn check_envelope(&mut self, envelope: &BaseResponse) -> Result<(), ApiError> {
        self.status = PageStatus::Ready;
        if envelope.is_success() {
            return Ok(());
        }
        let message: String = service_message(&envelope.message);
        warn!(status = %envelope.response_status, %message, "Capacity service reported failure");
        self.last_error = Some(message.clone());
        Err(ApiError::ServiceFailure { message })
    }

    fn reseed_table(&mut self) {
        self.session.load(TableData::seed(
            &self.streams,
            &self.slot_catalog,
            self.filter.territory_id,
        ));
    }

    /// Loads the hierarchy and catalogs and seeds the tables.
    ///
    /// # Errors
    ///
    /// Returns an error if any request fails or reports a failure.
    pub async fn bootstrap(&mut self) -> Result<(), ApiError> {
        let hierarchy = match self.service.get_hierarchy().await {
            Ok(response) => response,
            Err(err) => return Err(self.transport_failure(&err, FETCH_FAILED_MESSAGE)),
        };
        self.check_envelope(&hierarchy.base_response)?;

        let streams = match self.service.get_capacity_streams().await {
            Ok(response) => response,
            Err(err) => return Err(self.transport_failure(&err, FETCH_FAILED_MESSAGE)),
        };
        self.check_envelope(&streams.base_response)?;

        let slots = match self.service.get_appointment_slots().await {
            Ok(response) => response,
            Err(err) => return Err(self.transport_failure(&err, FETCH_FAILED_MESSAGE)),
        };
        self.check_envelope(&slots.base_response)?;

        self.locations = locations_from_dto(&hierarchy.state_data);
        self.streams = streams_from_dto(&streams.capacity_stream);
        self.slot_catalog = slot_catalog_from_dto(&slots.service_territories);
        self.reseed_table();
        self.last_error = None;

        info!(
            states = self.locations.len(),
            streams = self.streams.len(),
            "Capacity page bootstrapped"
        );
        Ok(())
    }

    /// Selects a territory and loads its calendarizations.
    ///
    /// The default view becomes active and the tables are reseeded for the
    /// territory.
    ///
    /// # Errors
    ///
    /// Returns an error if the territory is unknown, the request fails, or a
    /// calendarization from the service is malformed.
    pub async fn select_territory(
        &mut self,
        state: &str,
        market: &str,
        territory: &str,
    ) -> Result<(), ApiError> {
        let territory_id: i64 = find_territory_id(&self.locations, state, market, territory)
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Service territory"),
                message: format!("'{territory}' is not in market '{market}' of '{state}'"),
            })?;

        let ranges = match self.service.get_date_ranges(territory_id).await {
            Ok(response) => response,
            Err(err) => return Err(self.transport_failure(&err, FETCH_FAILED_MESSAGE)),
        };
        self.check_envelope(&ranges.base_response)?;
        let calendarizations: Vec<Calendarization> =
            calendarizations_from_dto(&ranges.date_range_list).map_err(translate_domain_error)?;

        self.filter = FilterSelection {
            state: state.to_string(),
            market: market.to_string(),
            territory: territory.to_string(),
            territory_id: Some(territory_id),
            mode: CalendarizationMode::DefaultView,
            start_date: None,
            end_date: None,
        };
        self.default_cust_date_id = calendarizations
            .iter()
            .find(|c| c.is_default())
            .map(|c| c.cust_date_id);
        self.calendarizations = calendarizations;
        self.field_errors.clear();
        self.table_visible = false;
        self.reseed_table();

        debug!(
            territory_id,
            calendarizations = self.calendarizations.len(),
            "Territory selected"
        );
        Ok(())
    }

    /// Switches the active calendarization and reseeds the tables.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing calendarization id is unknown.
    pub fn select_mode(&mut self, mode: CalendarizationMode) -> Result<(), ApiError> {
        let (start_date, end_date): (Option<Date>, Option<Date>) = match mode {
            CalendarizationMode::Existing(id) => {
                let calendarization: &Calendarization = self
                    .calendarizations
                    .iter()
                    .find(|c| c.cust_date_id == id)
                    .ok_or_else(|| ApiError::ResourceNotFound {
                        resource_type: String::from("Calendarization"),
                        message: format!("custDateId {id} does not exist"),
                    })?;
                (
                    calendarization.range.map(|r| r.start()),
                    calendarization.range.map(|r| r.end()),
                )
            }
            CalendarizationMode::DefaultView | CalendarizationMode::AddCalendarization => {
                (None, None)
            }
        };

        self.filter.mode = mode;
        self.filter.start_date = start_date;
        self.filter.end_date = end_date;
        self.table_visible = false;
        self.reseed_table();
        debug!(%mode, "Calendarization selected");
        Ok(())
    }

    /// Sets the window of a new calendarization.
    ///
    /// When both dates are set the window is checked against the territory's
    /// existing calendarizations. A conflicting window is cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the window is inverted or overlaps an existing
    /// calendarization.
    pub fn set_dates(&mut self, start: Option<Date>, end: Option<Date>) -> Result<(), ApiError> {
        self.filter.start_date = start;
        self.filter.end_date = end;

        let (Some(start), Some(end)) = (start, end) else {
            return Ok(());
        };
        if self.filter.mode != CalendarizationMode::AddCalendarization {
            return Ok(());
        }

        let candidate: DateRange = DateRange::new(start, end).map_err(translate_domain_error)?;
        if let Some(range) =
            find_conflict(&candidate, &self.calendarizations).and_then(|c| c.range)
        {
            self.filter.start_date = None;
            self.filter.end_date = None;
            return Err(ApiError::DomainRuleViolation {
                rule: String::from("calendarization_overlap"),
                message: conflict_message(&range),
            });
        }
        Ok(())
    }

    /// Returns the calendarization id the tables are bound to.
    #[must_use]
    pub const fn active_cust_date_id(&self) -> Option<i64> {
        match self.filter.mode {
            CalendarizationMode::Existing(id) => Some(id),
            CalendarizationMode::DefaultView => self.default_cust_date_id,
            CalendarizationMode::AddCalendarization => None,
        }
    }

    /// Returns the date window of the active calendarization.
    #[must_use]
    pub fn active_window(&self) -> Option<DateRange> {
        match (self.filter.mode, self.filter.start_date, self.filter.end_date) {
            (CalendarizationMode::DefaultView, _, _) => None,
            (_, Some(start), Some(end)) => DateRange::new(start, end).ok(),
            _ => None,
        }
    }

    /// Returns the editable day columns of the active calendarization.
    #[must_use]
    pub fn enabled_days(&self) -> BTreeSet<DayName> {
        enabled_days(self.active_window().as_ref())
    }

    /// Validates the filter and loads stored table data.
    ///
    /// A new calendarization has no stored data and shows the seeded tables.
    ///
    /// # Errors
    ///
    /// Returns the first field error if validation fails, or an error if the
    /// request fails or reports a failure.
    pub async fn search(&mut self) -> Result<(), ApiError> {
        if let Err(errors) = validate_filter(&self.filter) {
            self.field_errors.clone_from(&errors);
            return Err(errors.into_iter().next().map_or_else(
                || ApiError::InvalidInput {
                    field: String::from("filter"),
                    message: String::from("Invalid filter"),
                },
                ApiError::from,
            ));
        }
        self.field_errors.clear();

        let territory_id: i64 = self.require_territory()?;
        let Some(cust_date_id) = self.active_cust_date_id() else {
            self.reseed_table();
            self.table_visible = true;
            return Ok(());
        };

        let data = match self
            .service
            .get_table_data(territory_id, Some(cust_date_id))
            .await
        {
            Ok(response) => response,
            Err(err) => return Err(self.transport_failure(&err, FETCH_FAILED_MESSAGE)),
        };
        self.check_envelope(&data.base_response)?;

        let response: TableResponse =
            table_response_from_dto(&data.capacity_appointment_slot_response);
        // Unsaved edits are not carried into the new baseline.
        let seeded: TableData =
            TableData::seed(&self.streams, &self.slot_catalog, Some(territory_id));
        let merged: TableData = merge_server_response(
            &seeded,
            &response,
            &self.slot_catalog,
            Some(territory_id),
        );
        self.session.load(merged);
        self.table_visible = true;
        self.last_error = None;

        debug!(territory_id, cust_date_id, "Table data loaded");
        Ok(())
    }

    fn require_territory(&self) -> Result<i64, ApiError> {
        self.filter
            .territory_id
            .ok_or_else(|| ApiError::InvalidInput {
                field: String::from("territory"),
                message: String::from("Service Territory is required"),
            })
    }

    /// Applies a cell edit.
    ///
    /// # Errors
    ///
    /// Returns an error if the day lies outside the active window, or the row
    /// does not exist or is read-only.
    pub fn edit(&mut self, event: &EditEvent) -> Result<SessionEdit, ApiError> {
        let day: DayName = match event {
            EditEvent::SetHours { day, .. } | EditEvent::SetFreeze { day, .. } => *day,
        };
        if !self.enabled_days().contains(&day) {
            return Err(ApiError::InvalidInput {
                field: String::from("day"),
                message: format!("{day} is outside the selected date range"),
            });
        }
        self.session.apply(event).map_err(translate_core_error)
    }

    /// Discards unsaved edits.
    pub fn reset(&mut self) {
        self.session.reset_to_baseline();
    }

    /// Opens the bulk drawer with the active location preselected.
    pub fn open_bulk(&mut self) {
        self.bulk_selection = initial_selection(&self.locations, &self.filter);
        self.response_view = false;
        self.outcomes.clear();
    }

    /// Toggles a node of the bulk selection.
    ///
    /// Toggles are ignored in response view and on locked nodes.
    pub fn toggle_bulk(&mut self, node_id: &NodeId, checked: bool) {
        if self.is_locked(node_id) {
            debug!(%node_id, "Ignoring toggle of locked node");
            return;
        }
        self.bulk_selection = toggle(node_id, checked, &self.locations, &self.bulk_selection);
    }

    fn is_locked(&self, node_id: &NodeId) -> bool {
        let mut stack: Vec<LocationNode<'_>> =
            self.locations.iter().map(LocationNode::State).collect();
        while let Some(node) = stack.pop() {
            if node.id() == *node_id {
                return is_node_disabled(node, &self.filter, self.response_view);
            }
            stack.extend(node.children());
        }
        self.response_view
    }

    /// Returns the additional territory ids of a bulk submit.
    #[must_use]
    pub fn bulk_ids(&self) -> Vec<i64> {
        bulk_territory_ids(&self.locations, &self.bulk_selection, self.filter.territory_id)
    }

    /// Builds the update request for the current state.
    ///
    /// Existing calendarizations send only the pending diff. The default view
    /// and new calendarizations send every row.
    ///
    /// # Errors
    ///
    /// Returns an error if no territory is selected.
    pub fn build_request(&self, bulk: bool) -> Result<UpdateCapacityRequest, ApiError> {
        let territory_id: i64 = self.require_territory()?;
        let changes: PendingChanges = match self.filter.mode {
            CalendarizationMode::Existing(_) => self.session.pending().clone(),
            CalendarizationMode::DefaultView | CalendarizationMode::AddCalendarization => {
                self.session.full_rows_payload()
            }
        };
        let (base_capacity_hours, appointment_slots): (Vec<HoursDto>, Vec<SlotUpdateDto>) =
            changes_to_dto(&changes);

        Ok(UpdateCapacityRequest {
            service_territory: territory_id,
            custom_date_id: self.active_cust_date_id(),
            calendarization: self.filter.mode.as_request_str().to_string(),
            start_date: self.filter.start_date.map(format_service_date),
            end_date: self.filter.end_date.map(format_service_date),
            username: self.config.username.clone(),
            bulk_territories: if bulk { self.bulk_ids() } else { Vec::new() },
            base_capacity_hours,
            appointment_slots,
        })
    }

    /// Submits the current changes, optionally to the bulk selection too.
    ///
    /// On success or partial success the current table becomes the new
    /// baseline. A partial success switches the bulk drawer to response view.
    ///
    /// # Errors
    ///
    /// Returns an error if no territory is selected or the request fails in
    /// transport. Business failures are returned as [`SubmitOutcome::Failed`].
    pub async fn submit(&mut self, bulk: bool) -> Result<SubmitOutcome, ApiError> {
        let request: UpdateCapacityRequest = self.build_request(bulk)?;

        let response = match self.service.update_capacity(&request).await {
            Ok(response) => response,
            Err(err) => return Err(self.transport_failure(&err, SUBMIT_FAILED_MESSAGE)),
        };
        self.status = PageStatus::Ready;
        self.outcomes = outcomes_from_dto(&response.default_capacity_view_responses);

        let outcome: SubmitOutcome = match &response.base_response.response_status {
            ResponseStatus::Success => {
                self.session.mark_submitted();
                self.last_error = None;
                SubmitOutcome::Success {
                    territory: self.outcomes.first().map_or_else(
                        || String::from(UNKNOWN_TERRITORY),
                        |o| o.service_territory.clone(),
                    ),
                }
            }
            ResponseStatus::PartialSuccess => {
                self.session.mark_submitted();
                self.last_error = None;
                self.response_view = true;
                SubmitOutcome::PartialSuccess {
                    failures: failure_tree(&self.locations, &self.outcomes),
                }
            }
            ResponseStatus::Failure | ResponseStatus::Other(_) => {
                let message: String = service_message(&response.base_response.message);
                self.last_error = Some(message.clone());
                SubmitOutcome::Failed { message }
            }
        };

        info!(
            territory = request.service_territory,
            bulk = request.bulk_territories.len(),
            status = %response.base_response.response_status,
            "Capacity changes submitted"
        );
        Ok(outcome)
    }

    /// Deletes the active calendarization and returns the service's message.
    ///
    /// The page returns to the default view with tables reseeded from the
    /// catalogs.
    ///
    /// # Errors
    ///
    /// Returns an error if the active calendarization cannot be deleted, the
    /// request fails, or the service reports a failure.
    pub async fn delete(&mut self) -> Result<String, ApiError> {
        let CalendarizationMode::Existing(cust_date_id) = self.filter.mode else {
            return Err(ApiError::InvalidInput {
                field: String::from("calendarization"),
                message: String::from("Only saved calendarizations can be deleted"),
            });
        };

        let response = match self.service.delete_capacity(cust_date_id).await {
            Ok(response) => response,
            Err(err) => return Err(self.transport_failure(&err, SUBMIT_FAILED_MESSAGE)),
        };
        self.check_envelope(&response.base_response)?;

        self.calendarizations
            .retain(|c| c.cust_date_id != cust_date_id);
        self.filter.mode = CalendarizationMode::DefaultView;
        self.filter.start_date = None;
        self.filter.end_date = None;
        self.reseed_table();
        self.last_error = None;

        info!(cust_date_id, "Calendarization deleted");
        Ok(response.base_response.message)
    }
}
