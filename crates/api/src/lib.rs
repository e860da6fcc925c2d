// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service boundary of the Default Capacity manager.
//!
//! This crate holds the wire model of the capacity service, a client for its
//! REST endpoints, and the page controller that drives the hierarchy
//! selection and capacity edit engines against that service.
//!
//! ## Invariants
//!
//! - Domain and core errors are translated before they leave this crate
//! - Business failures are reported through the response envelope, never as
//!   transport errors
//! - Validation failures never reach the network

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod client;
mod convert;
mod error;
mod page;
mod request_response;

#[cfg(test)]
mod tests;

pub use client::{
    BASE_URL_ENV, CapacityService, ClientConfig, DEFAULT_BASE_URL, DEFAULT_USERNAME,
    HttpCapacityClient, USERNAME_ENV,
};
pub use convert::{
    calendarization_from_dto, calendarization_to_dto, calendarizations_from_dto, changes_to_dto,
    locations_from_dto, locations_to_dto, outcomes_from_dto, slot_catalog_from_dto,
    slot_catalog_to_dto, streams_from_dto, streams_to_dto, table_response_from_dto,
    table_response_to_dto,
};
pub use error::{
    ApiError, ClientError, FETCH_FAILED_MESSAGE, SUBMIT_FAILED_MESSAGE, SUBMIT_SUCCESS_MESSAGE,
    UNKNOWN_ERROR_MESSAGE, UNKNOWN_TERRITORY, service_message, translate_core_error,
    translate_domain_error,
};
pub use page::{CapacityPage, PageStatus, SubmitOutcome};
pub use request_response::{
    APPOINTMENT_SLOTS_PATH, AppointmentSlotDto, AppointmentSlotsResponse, BaseResponse,
    CAPACITY_STREAMS_PATH, CapacityAppointmentSlotResponse, CapacityStreamDto,
    CapacityStreamResponse, CapacityStreamSlotsDto, DATE_RANGES_PATH, DELETE_PATH,
    DateRangeDto, DateRangeListResponse, DeleteCapacityResponse, DeleteQuery, HIERARCHY_PATH,
    HierarchyResponse, HoursDto, MarketDto, ResponseStatus, SlotDaysDto, SlotUpdateDto, StateDto,
    TABLE_DATA_PATH, TableDataQuery, TableDataResponse, TerritoryDto, TerritoryQuery,
    TerritoryResultDto, TerritorySlotsDto, UPDATE_PATH, UpdateCapacityRequest,
    UpdateCapacityResponse,
};
