// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire data transfer objects of the capacity service.
//!
//! Field names follow the service's camelCase JSON. A few keys were
//! historically misspelled by the service; those spellings are accepted as
//! aliases on input.

use capacity_domain::DayName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Path of the location hierarchy endpoint.
pub const HIERARCHY_PATH: &str = "getServiceTerritoryHierarchy";
/// Path of the capacity stream catalog endpoint.
pub const CAPACITY_STREAMS_PATH: &str = "getCapacityStreamHierarchy";
/// Path of the appointment slot catalog endpoint.
pub const APPOINTMENT_SLOTS_PATH: &str = "getAppointmentSlotsHierarchy";
/// Path of the calendarization list endpoint.
pub const DATE_RANGES_PATH: &str = "getCalendarizedDateRangeForTerritory";
/// Path of the table data endpoint.
pub const TABLE_DATA_PATH: &str = "getCapacityTableData";
/// Path of the update endpoint.
pub const UPDATE_PATH: &str = "updateServiceTerritoryCapacityHours";
/// Path of the delete endpoint.
pub const DELETE_PATH: &str = "deleteCapacityData";

/// Top-level status of a service response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResponseStatus {
    Success,
    PartialSuccess,
    Failure,
    /// Any status the client does not know.
    Other(String),
}

impl ResponseStatus {
    /// Returns the wire form of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "Success",
            Self::PartialSuccess => "Partial Success",
            Self::Failure => "Failure",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for ResponseStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Success" => Self::Success,
            "Partial Success" => Self::PartialSuccess,
            "Failure" => Self::Failure,
            _ => Self::Other(value),
        }
    }
}

impl From<ResponseStatus> for String {
    fn from(status: ResponseStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status envelope carried by every response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse {
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// The response status.
    pub response_status: ResponseStatus,
    /// Service reason code.
    #[serde(default)]
    pub reason_code: String,
}

impl BaseResponse {
    /// Creates a successful envelope.
    #[must_use]
    pub fn success(message: &str) -> Self {
        Self {
            message: message.to_string(),
            response_status: ResponseStatus::Success,
            reason_code: String::from("0"),
        }
    }

    /// Creates a failed envelope.
    #[must_use]
    pub fn failure(message: &str) -> Self {
        Self {
            message: message.to_string(),
            response_status: ResponseStatus::Failure,
            reason_code: String::from("1"),
        }
    }

    /// Returns whether the status is `Success`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.response_status == ResponseStatus::Success
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryDto {
    pub id: i64,
    pub territory: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDto {
    pub market: String,
    pub service_territories: Vec<TerritoryDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDto {
    pub state: String,
    pub markets: Vec<MarketDto>,
}

/// Response of the location hierarchy endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyResponse {
    #[serde(default)]
    pub state_data: Vec<StateDto>,
    #[serde(default)]
    pub last_updated_date: Option<String>,
    pub base_response: BaseResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityStreamDto {
    pub cs_id: i64,
    pub capacity_stream: String,
}

/// Response of the capacity stream catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityStreamResponse {
    #[serde(default, alias = "capacityStraem")]
    pub capacity_stream: Vec<CapacityStreamDto>,
    #[serde(default)]
    pub last_updated_date: Option<String>,
    pub base_response: BaseResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSlotDto {
    pub apt_slot_id: i64,
    pub apt_slot_start: String,
    pub apt_slot_end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityStreamSlotsDto {
    pub capacity_stream: String,
    #[serde(default)]
    pub appointment_slots: Vec<AppointmentSlotDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerritorySlotsDto {
    pub service_territory_id: i64,
    pub service_territory: String,
    #[serde(default)]
    pub capacity_stream_slots: Vec<CapacityStreamSlotsDto>,
}

/// Response of the appointment slot catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSlotsResponse {
    #[serde(default)]
    pub service_territories: Vec<TerritorySlotsDto>,
    #[serde(default)]
    pub last_updated_date: Option<String>,
    pub base_response: BaseResponse,
}

/// A calendarization entry. Both dates are absent for the default schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeDto {
    pub cust_date_id: i64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Response of the calendarization list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeListResponse {
    #[serde(default)]
    pub date_range_list: Vec<DateRangeDto>,
    pub base_response: BaseResponse,
}

/// Hours of one capacity stream, sparse by day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoursDto {
    pub capacity_stream_id: i64,
    pub days: BTreeMap<DayName, f64>,
}

/// Freeze flags of one stored appointment slot, sparse by day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDaysDto {
    pub appt_slot_id: i64,
    pub capacity_stream_id: i64,
    pub days: BTreeMap<DayName, bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityAppointmentSlotResponse {
    #[serde(default)]
    pub base_capacity_hours: Vec<HoursDto>,
    #[serde(default)]
    pub appointment_slots: Vec<SlotDaysDto>,
}

/// Response of the table data endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDataResponse {
    #[serde(default)]
    pub capacity_appointment_slot_response: CapacityAppointmentSlotResponse,
    #[serde(default)]
    pub last_updated_date: Option<String>,
    pub base_response: BaseResponse,
}

/// Freeze flags of one slot in an update request, addressed by time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotUpdateDto {
    pub capacity_stream_id: i64,
    pub start_time: String,
    pub end_time: String,
    pub days: BTreeMap<DayName, bool>,
}

/// Body of the update endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCapacityRequest {
    /// The primary territory id.
    pub service_territory: i64,
    /// The calendarization being updated, if any.
    pub custom_date_id: Option<i64>,
    /// `defaultView`, `addCalendarization` or `updateCalendarization`.
    pub calendarization: String,
    /// Window start in `MM/DD/YYYY` form.
    pub start_date: Option<String>,
    /// Window end in `MM/DD/YYYY` form.
    pub end_date: Option<String>,
    /// The submitting user.
    pub username: String,
    /// Additional territories the change applies to.
    #[serde(default)]
    pub bulk_territories: Vec<i64>,
    #[serde(default)]
    pub base_capacity_hours: Vec<HoursDto>,
    #[serde(default)]
    pub appointment_slots: Vec<SlotUpdateDto>,
}

/// Outcome of an update for one territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerritoryResultDto {
    pub service_territory: String,
    pub message: String,
    #[serde(default)]
    pub date_ranges: Vec<String>,
}

/// Response of the update endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCapacityResponse {
    #[serde(default, alias = "defaultCapcaityViewResponses")]
    pub default_capacity_view_responses: Vec<TerritoryResultDto>,
    pub base_response: BaseResponse,
}

/// Response of the delete endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCapacityResponse {
    pub base_response: BaseResponse,
}

/// Query of the calendarization list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerritoryQuery {
    pub service_territory_id: i64,
}

/// Query of the table data endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDataQuery {
    pub service_territory_id: i64,
    #[serde(default)]
    pub cust_date_id: Option<i64>,
}

/// Query of the delete endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuery {
    pub cust_date_id: i64,
}
