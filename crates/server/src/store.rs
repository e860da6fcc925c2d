// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory store behind the fixture backend.
//!
//! The store holds the location hierarchy, the stream and slot catalogs, and
//! every calendarization with its stored table data. Each operation answers
//! with the same envelopes the capacity service uses: business failures are
//! reported through `baseResponse`, never as HTTP errors.
//!
//! ## Invariants
//!
//! - Every territory has at most one undated (default) calendarization
//! - Dated calendarizations of one territory never overlap
//! - Custom date ids are unique across territories

use capacity_api::{
    AppointmentSlotsResponse, BaseResponse, CapacityAppointmentSlotResponse, CapacityStreamDto,
    CapacityStreamResponse, DateRangeDto, DateRangeListResponse, DeleteCapacityResponse,
    HierarchyResponse, HoursDto, ResponseStatus, SlotDaysDto, SlotUpdateDto, StateDto,
    TableDataResponse, TerritoryResultDto, TerritorySlotsDto, UpdateCapacityRequest,
    UpdateCapacityResponse,
};
use capacity_domain::{DateRange, format_service_date, is_hours_in_range};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// Message of a territory whose window collides with a stored one.
pub const OVERLAP_FAILURE: &str = "Failure: date range overlaps existing calendarization";

const SUCCESS_MESSAGE: &str = "Success";
const SAMPLE_FIXTURE: &str = include_str!("../fixtures/sample.json");

/// Errors raised while loading a fixture.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The fixture file could not be read.
    #[error("Failed to read fixture '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The fixture is not valid JSON for the fixture schema.
    #[error("Failed to parse fixture '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A stored calendarization and its table data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCalendarization {
    pub service_territory_id: i64,
    pub cust_date_id: i64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub base_capacity_hours: Vec<HoursDto>,
    #[serde(default)]
    pub appointment_slots: Vec<SlotDaysDto>,
}

impl StoredCalendarization {
    fn new(service_territory_id: i64, cust_date_id: i64, window: Option<&DateRange>) -> Self {
        Self {
            service_territory_id,
            cust_date_id,
            start_date: window.map(|w| format_service_date(w.start())),
            end_date: window.map(|w| format_service_date(w.end())),
            base_capacity_hours: Vec::new(),
            appointment_slots: Vec::new(),
        }
    }

    const fn is_default(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }

    fn range(&self) -> Option<DateRange> {
        match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) => DateRange::parse(start, end).ok(),
            _ => None,
        }
    }

    /// `MM/DD/YYYY–MM/DD/YYYY`, as reported in overlap failures.
    fn label(&self) -> String {
        format!(
            "{}–{}",
            self.start_date.as_deref().unwrap_or_default(),
            self.end_date.as_deref().unwrap_or_default()
        )
    }
}

/// Seed data of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub hierarchy: Vec<StateDto>,
    pub capacity_streams: Vec<CapacityStreamDto>,
    pub appointment_slots: Vec<TerritorySlotsDto>,
    #[serde(default)]
    pub calendarizations: Vec<StoredCalendarization>,
}

impl Fixture {
    /// Parses a fixture from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not match the fixture schema.
    pub fn from_json(origin: &str, text: &str) -> Result<Self, StoreError> {
        serde_json::from_str(text).map_err(|source| StoreError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Reads a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let origin: String = path.display().to_string();
        let text: String = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: origin.clone(),
            source,
        })?;
        Self::from_json(&origin, &text)
    }

    /// The built-in sample data set.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded sample is malformed.
    pub fn sample() -> Result<Self, StoreError> {
        Self::from_json("<built-in sample>", SAMPLE_FIXTURE)
    }
}

/// How an update request addresses calendarizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpdateMode {
    DefaultView,
    Add,
    Update,
}

impl UpdateMode {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "defaultView" => Some(Self::DefaultView),
            "addCalendarization" => Some(Self::Add),
            "updateCalendarization" => Some(Self::Update),
            _ => None,
        }
    }
}

/// A territory-level rejection of an update.
struct Rejection {
    message: String,
    date_ranges: Vec<String>,
}

impl Rejection {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            date_ranges: Vec::new(),
        }
    }
}

/// The in-memory capacity service.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    fixture: Fixture,
    next_cust_date_id: i64,
    last_updated_date: Option<String>,
}

impl FixtureStore {
    /// Creates a store over a fixture.
    #[must_use]
    pub fn new(fixture: Fixture) -> Self {
        let next_cust_date_id: i64 = fixture
            .calendarizations
            .iter()
            .map(|c| c.cust_date_id)
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            fixture,
            next_cust_date_id,
            last_updated_date: None,
        }
    }

    /// Returns the stored calendarizations.
    #[must_use]
    pub fn calendarizations(&self) -> &[StoredCalendarization] {
        &self.fixture.calendarizations
    }

    fn territory_name(&self, territory_id: i64) -> Option<&str> {
        self.fixture
            .hierarchy
            .iter()
            .flat_map(|state| state.markets.iter())
            .flat_map(|market| market.service_territories.iter())
            .find(|territory| territory.id == territory_id)
            .map(|territory| territory.territory.as_str())
    }

    fn territory_calendarizations(
        &self,
        territory_id: i64,
    ) -> impl Iterator<Item = &StoredCalendarization> {
        self.fixture
            .calendarizations
            .iter()
            .filter(move |c| c.service_territory_id == territory_id)
    }

    fn find_mut(&mut self, cust_date_id: i64) -> Option<&mut StoredCalendarization> {
        self.fixture
            .calendarizations
            .iter_mut()
            .find(|c| c.cust_date_id == cust_date_id)
    }

    fn create(&mut self, territory_id: i64, window: Option<&DateRange>) -> i64 {
        let cust_date_id: i64 = self.next_cust_date_id;
        self.next_cust_date_id += 1;
        self.fixture
            .calendarizations
            .push(StoredCalendarization::new(territory_id, cust_date_id, window));
        debug!(territory_id, cust_date_id, "Calendarization created");
        cust_date_id
    }

    /// Answers the hierarchy endpoint.
    #[must_use]
    pub fn hierarchy(&self) -> HierarchyResponse {
        HierarchyResponse {
            state_data: self.fixture.hierarchy.clone(),
            last_updated_date: self.last_updated_date.clone(),
            base_response: BaseResponse::success(SUCCESS_MESSAGE),
        }
    }

    /// Answers the capacity stream catalog endpoint.
    #[must_use]
    pub fn capacity_streams(&self) -> CapacityStreamResponse {
        CapacityStreamResponse {
            capacity_stream: self.fixture.capacity_streams.clone(),
            last_updated_date: self.last_updated_date.clone(),
            base_response: BaseResponse::success(SUCCESS_MESSAGE),
        }
    }

    /// Answers the appointment slot catalog endpoint.
    #[must_use]
    pub fn appointment_slots(&self) -> AppointmentSlotsResponse {
        AppointmentSlotsResponse {
            service_territories: self.fixture.appointment_slots.clone(),
            last_updated_date: self.last_updated_date.clone(),
            base_response: BaseResponse::success(SUCCESS_MESSAGE),
        }
    }

    /// Lists the calendarizations of a territory.
    #[must_use]
    pub fn date_ranges(&self, territory_id: i64) -> DateRangeListResponse {
        if self.territory_name(territory_id).is_none() {
            return DateRangeListResponse {
                date_range_list: Vec::new(),
                base_response: BaseResponse::failure(&format!(
                    "Unknown service territory {territory_id}"
                )),
            };
        }
        DateRangeListResponse {
            date_range_list: self
                .territory_calendarizations(territory_id)
                .map(|c| DateRangeDto {
                    cust_date_id: c.cust_date_id,
                    start_date: c.start_date.clone(),
                    end_date: c.end_date.clone(),
                })
                .collect(),
            base_response: BaseResponse::success(SUCCESS_MESSAGE),
        }
    }

    /// Returns the stored table data of a calendarization.
    ///
    /// Without a custom date id the territory's default schedule is returned.
    /// A territory without stored data answers with empty tables.
    #[must_use]
    pub fn table_data(&self, territory_id: i64, cust_date_id: Option<i64>) -> TableDataResponse {
        let failure = |message: String| TableDataResponse {
            capacity_appointment_slot_response: CapacityAppointmentSlotResponse::default(),
            last_updated_date: None,
            base_response: BaseResponse::failure(&message),
        };

        if self.territory_name(territory_id).is_none() {
            return failure(format!("Unknown service territory {territory_id}"));
        }

        let stored: Option<&StoredCalendarization> = match cust_date_id {
            Some(id) => {
                let Some(found) = self
                    .territory_calendarizations(territory_id)
                    .find(|c| c.cust_date_id == id)
                else {
                    return failure(format!(
                        "Unknown custDateId {id} for service territory {territory_id}"
                    ));
                };
                Some(found)
            }
            None => self
                .territory_calendarizations(territory_id)
                .find(|c| c.is_default()),
        };

        TableDataResponse {
            capacity_appointment_slot_response: stored.map_or_else(
                CapacityAppointmentSlotResponse::default,
                |c| CapacityAppointmentSlotResponse {
                    base_capacity_hours: c.base_capacity_hours.clone(),
                    appointment_slots: c.appointment_slots.clone(),
                },
            ),
            last_updated_date: self.last_updated_date.clone(),
            base_response: BaseResponse::success(SUCCESS_MESSAGE),
        }
    }

    /// Applies an update to the primary territory and every bulk territory.
    ///
    /// Territories are processed independently: a rejected territory does not
    /// roll back the others.
    pub fn update(&mut self, request: &UpdateCapacityRequest) -> UpdateCapacityResponse {
        let rejected = |message: String| UpdateCapacityResponse {
            default_capacity_view_responses: Vec::new(),
            base_response: BaseResponse::failure(&message),
        };

        let Some(mode) = UpdateMode::parse(&request.calendarization) else {
            return rejected(format!(
                "Unknown calendarization '{}'",
                request.calendarization
            ));
        };

        let window: Option<DateRange> = match (&request.start_date, &request.end_date) {
            (Some(start), Some(end)) => match DateRange::parse(start, end) {
                Ok(range) => Some(range),
                Err(err) => return rejected(err.to_string()),
            },
            _ => None,
        };
        if mode != UpdateMode::DefaultView && window.is_none() {
            return rejected(String::from("Start Date and End Date are required"));
        }

        if request
            .base_capacity_hours
            .iter()
            .flat_map(|row| row.days.values())
            .any(|hours| !is_hours_in_range(*hours))
        {
            return rejected(String::from("Capacity hours are out of range"));
        }

        if self.territory_name(request.service_territory).is_none() {
            return rejected(format!(
                "Unknown service territory {}",
                request.service_territory
            ));
        }

        let mut targets: Vec<i64> = vec![request.service_territory];
        for id in &request.bulk_territories {
            if !targets.contains(id) {
                targets.push(*id);
            }
        }

        let outcomes: Vec<TerritoryResultDto> = targets
            .iter()
            .map(|territory_id| {
                let name: String = self
                    .territory_name(*territory_id)
                    .map_or_else(|| territory_id.to_string(), str::to_string);
                match self.apply_to_territory(*territory_id, mode, window.as_ref(), request) {
                    Ok(()) => TerritoryResultDto {
                        service_territory: name,
                        message: String::from(SUCCESS_MESSAGE),
                        date_ranges: Vec::new(),
                    },
                    Err(rejection) => {
                        warn!(
                            territory_id,
                            message = %rejection.message,
                            "Territory update rejected"
                        );
                        TerritoryResultDto {
                            service_territory: name,
                            message: rejection.message,
                            date_ranges: rejection.date_ranges,
                        }
                    }
                }
            })
            .collect();

        let failures: usize = outcomes
            .iter()
            .filter(|o| o.message.starts_with("Failure"))
            .count();
        let base_response: BaseResponse = if failures == 0 {
            BaseResponse::success("Capacity updated successfully")
        } else if failures < outcomes.len() {
            BaseResponse {
                message: format!("{failures} of {} territories failed", outcomes.len()),
                response_status: ResponseStatus::PartialSuccess,
                reason_code: String::from("0"),
            }
        } else {
            BaseResponse::failure("No territories were updated")
        };

        if failures < outcomes.len() {
            self.last_updated_date = Some(format_service_date(
                OffsetDateTime::now_utc().date(),
            ));
        }

        info!(
            territory = request.service_territory,
            calendarization = %request.calendarization,
            territories = outcomes.len(),
            failures,
            "Capacity update processed"
        );

        UpdateCapacityResponse {
            default_capacity_view_responses: outcomes,
            base_response,
        }
    }

    fn apply_to_territory(
        &mut self,
        territory_id: i64,
        mode: UpdateMode,
        window: Option<&DateRange>,
        request: &UpdateCapacityRequest,
    ) -> Result<(), Rejection> {
        if self.territory_name(territory_id).is_none() {
            return Err(Rejection::new("Failure: unknown service territory"));
        }

        let is_primary: bool = territory_id == request.service_territory;
        let cust_date_id: i64 = match mode {
            UpdateMode::DefaultView => {
                let existing: Option<i64> = self
                    .territory_calendarizations(territory_id)
                    .find(|c| c.is_default())
                    .map(|c| c.cust_date_id);
                match existing {
                    Some(id) => id,
                    None => self.create(territory_id, None),
                }
            }
            UpdateMode::Update if is_primary => request
                .custom_date_id
                .filter(|id| {
                    self.territory_calendarizations(territory_id)
                        .any(|c| c.cust_date_id == *id)
                })
                .ok_or_else(|| Rejection::new("Failure: unknown calendarization"))?,
            UpdateMode::Update | UpdateMode::Add => {
                self.resolve_window(territory_id, mode, window)?
            }
        };

        let slots: Vec<SlotDaysDto> = request
            .appointment_slots
            .iter()
            .filter_map(|slot| self.resolve_slot(territory_id, slot))
            .collect();

        let Some(stored) = self.find_mut(cust_date_id) else {
            return Err(Rejection::new("Failure: unknown calendarization"));
        };
        for row in &request.base_capacity_hours {
            merge_hours(&mut stored.base_capacity_hours, row);
        }
        for row in slots {
            merge_slot(&mut stored.appointment_slots, row);
        }
        Ok(())
    }

    /// Finds or creates the dated calendarization of a bulk territory.
    fn resolve_window(
        &mut self,
        territory_id: i64,
        mode: UpdateMode,
        window: Option<&DateRange>,
    ) -> Result<i64, Rejection> {
        let Some(window) = window else {
            return Err(Rejection::new("Failure: missing date range"));
        };

        let same_window: Option<i64> = self
            .territory_calendarizations(territory_id)
            .find(|c| mode == UpdateMode::Update && c.range().as_ref() == Some(window))
            .map(|c| c.cust_date_id);
        if let Some(id) = same_window {
            return Ok(id);
        }

        let conflicts: Vec<String> = self
            .territory_calendarizations(territory_id)
            .filter(|c| c.range().is_some_and(|range| range.overlaps(window)))
            .map(StoredCalendarization::label)
            .collect();
        if !conflicts.is_empty() {
            return Err(Rejection {
                message: String::from(OVERLAP_FAILURE),
                date_ranges: conflicts,
            });
        }

        Ok(self.create(territory_id, Some(window)))
    }

    /// Resolves a window-addressed slot update to the territory's slot id.
    fn resolve_slot(&self, territory_id: i64, slot: &SlotUpdateDto) -> Option<SlotDaysDto> {
        let stream_name: &str = self
            .fixture
            .capacity_streams
            .iter()
            .find(|s| s.cs_id == slot.capacity_stream_id)
            .map(|s| s.capacity_stream.as_str())?;
        let resolved: Option<i64> = self
            .fixture
            .appointment_slots
            .iter()
            .filter(|t| t.service_territory_id == territory_id)
            .flat_map(|t| t.capacity_stream_slots.iter())
            .filter(|s| s.capacity_stream == stream_name)
            .flat_map(|s| s.appointment_slots.iter())
            .find(|w| w.apt_slot_start == slot.start_time && w.apt_slot_end == slot.end_time)
            .map(|w| w.apt_slot_id);

        if resolved.is_none() {
            warn!(
                territory_id,
                stream = stream_name,
                start = %slot.start_time,
                end = %slot.end_time,
                "No appointment slot matches update"
            );
        }
        resolved.map(|appt_slot_id| SlotDaysDto {
            appt_slot_id,
            capacity_stream_id: slot.capacity_stream_id,
            days: slot.days.clone(),
        })
    }

    /// Deletes a dated calendarization.
    pub fn delete(&mut self, cust_date_id: i64) -> DeleteCapacityResponse {
        let Some(index) = self
            .fixture
            .calendarizations
            .iter()
            .position(|c| c.cust_date_id == cust_date_id)
        else {
            return DeleteCapacityResponse {
                base_response: BaseResponse::failure(&format!(
                    "Unknown custDateId {cust_date_id}"
                )),
            };
        };

        if self.fixture.calendarizations[index].is_default() {
            return DeleteCapacityResponse {
                base_response: BaseResponse::failure("The default schedule cannot be deleted"),
            };
        }

        let removed: StoredCalendarization = self.fixture.calendarizations.remove(index);
        info!(
            cust_date_id,
            territory_id = removed.service_territory_id,
            "Calendarization deleted"
        );
        DeleteCapacityResponse {
            base_response: BaseResponse::success("Calendarization deleted successfully"),
        }
    }
}

fn merge_hours(stored: &mut Vec<HoursDto>, row: &HoursDto) {
    match stored
        .iter_mut()
        .find(|s| s.capacity_stream_id == row.capacity_stream_id)
    {
        Some(existing) => existing
            .days
            .extend(row.days.iter().map(|(day, hours)| (*day, *hours))),
        None => stored.push(row.clone()),
    }
}

fn merge_slot(stored: &mut Vec<SlotDaysDto>, row: SlotDaysDto) {
    match stored
        .iter_mut()
        .find(|s| s.appt_slot_id == row.appt_slot_id && s.capacity_stream_id == row.capacity_stream_id)
    {
        Some(existing) => existing.days.extend(row.days),
        None => stored.push(row),
    }
}
