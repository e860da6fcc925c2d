// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_sample_update, create_test_store};
use crate::store::{Fixture, FixtureStore, OVERLAP_FAILURE, StoreError};
use capacity_api::{
    DateRangeListResponse, HoursDto, ResponseStatus, SlotUpdateDto, TableDataResponse,
    UpdateCapacityRequest, UpdateCapacityResponse,
};
use capacity_domain::DayName;
use std::collections::BTreeMap;

#[test]
fn test_sample_fixture_loads() {
    let store: FixtureStore = create_test_store();
    let hierarchy = store.hierarchy();

    assert!(hierarchy.base_response.is_success());
    assert_eq!(hierarchy.state_data.len(), 2);
    assert_eq!(store.capacity_streams().capacity_stream.len(), 3);
    assert_eq!(store.appointment_slots().service_territories.len(), 8);
}

#[test]
fn test_malformed_fixture_is_reported() {
    let err: StoreError = Fixture::from_json("inline", "{\"hierarchy\": 3}").unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse fixture 'inline'"));
}

#[test]
fn test_date_ranges_of_territory() {
    let store: FixtureStore = create_test_store();
    let response: DateRangeListResponse = store.date_ranges(14);

    assert!(response.base_response.is_success());
    assert_eq!(response.date_range_list.len(), 2);
    assert_eq!(response.date_range_list[0].cust_date_id, 140);
    assert_eq!(response.date_range_list[0].start_date, None);
    assert_eq!(response.date_range_list[1].cust_date_id, 144);
    assert_eq!(
        response.date_range_list[1].start_date.as_deref(),
        Some("03/11/2025")
    );
}

#[test]
fn test_date_ranges_of_unknown_territory_fail() {
    let store: FixtureStore = create_test_store();
    let response: DateRangeListResponse = store.date_ranges(999);

    assert_eq!(response.base_response.response_status, ResponseStatus::Failure);
    assert_eq!(
        response.base_response.message,
        "Unknown service territory 999"
    );
}

#[test]
fn test_table_data_defaults_to_undated_schedule() {
    let store: FixtureStore = create_test_store();
    let response: TableDataResponse = store.table_data(14, None);
    let payload = response.capacity_appointment_slot_response;

    assert!(response.base_response.is_success());
    assert_eq!(payload.base_capacity_hours.len(), 3);
    assert_eq!(payload.base_capacity_hours[0].days[&DayName::Monday], 8.0);
    assert_eq!(payload.appointment_slots[0].appt_slot_id, 1401);
}

#[test]
fn test_table_data_of_territory_without_data_is_empty() {
    let store: FixtureStore = create_test_store();
    let response: TableDataResponse = store.table_data(42, None);

    assert!(response.base_response.is_success());
    assert!(
        response
            .capacity_appointment_slot_response
            .base_capacity_hours
            .is_empty()
    );
}

#[test]
fn test_table_data_rejects_foreign_calendarization() {
    let store: FixtureStore = create_test_store();
    // 33 belongs to territory 3.
    let response: TableDataResponse = store.table_data(14, Some(33));

    assert_eq!(response.base_response.response_status, ResponseStatus::Failure);
}

#[test]
fn test_bulk_update_reports_overlapping_territory() {
    let mut store: FixtureStore = create_test_store();

    let response: UpdateCapacityResponse = store.update(&create_sample_update());

    assert_eq!(
        response.base_response.response_status,
        ResponseStatus::PartialSuccess
    );
    let outcomes = &response.default_capacity_view_responses;
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].service_territory, "Columbus Central");
    assert_eq!(outcomes[0].message, "Success");
    assert_eq!(outcomes[1].service_territory, "Columbus North");
    assert_eq!(outcomes[1].message, "Success");
    assert_eq!(outcomes[2].service_territory, "Columbus South");
    assert_eq!(outcomes[2].message, OVERLAP_FAILURE);
    assert_eq!(outcomes[2].date_ranges, vec![String::from("03/10/2025–03/14/2025")]);
}

#[test]
fn test_update_merges_into_existing_calendarization() {
    let mut store: FixtureStore = create_test_store();
    store.update(&create_sample_update());

    let payload = store
        .table_data(14, Some(144))
        .capacity_appointment_slot_response;
    let install: &HoursDto = &payload.base_capacity_hours[0];

    assert_eq!(install.days[&DayName::Tuesday], 12.0);
    // Untouched days keep their stored values.
    assert_eq!(install.days[&DayName::Wednesday], 10.0);
}

#[test]
fn test_bulk_update_creates_window_for_other_territory() {
    let mut store: FixtureStore = create_test_store();
    store.update(&create_sample_update());

    let ranges: DateRangeListResponse = store.date_ranges(2);

    assert_eq!(ranges.date_range_list.len(), 2);
    assert_eq!(ranges.date_range_list[1].cust_date_id, 211);
    assert_eq!(
        ranges.date_range_list[1].end_date.as_deref(),
        Some("03/16/2025")
    );
    let payload = store
        .table_data(2, Some(211))
        .capacity_appointment_slot_response;
    assert_eq!(payload.base_capacity_hours[0].days[&DayName::Tuesday], 12.0);
}

#[test]
fn test_adding_overlapping_calendarization_fails() {
    let mut store: FixtureStore = create_test_store();
    let request: UpdateCapacityRequest = UpdateCapacityRequest {
        custom_date_id: None,
        calendarization: String::from("addCalendarization"),
        start_date: Some(String::from("03/15/2025")),
        end_date: Some(String::from("03/20/2025")),
        bulk_territories: Vec::new(),
        ..create_sample_update()
    };

    let response: UpdateCapacityResponse = store.update(&request);

    assert_eq!(response.base_response.response_status, ResponseStatus::Failure);
    assert_eq!(
        response.default_capacity_view_responses[0].date_ranges,
        vec![String::from("03/11/2025–03/16/2025")]
    );
    assert_eq!(store.date_ranges(14).date_range_list.len(), 2);
}

#[test]
fn test_adding_calendarization_creates_entry() {
    let mut store: FixtureStore = create_test_store();
    let request: UpdateCapacityRequest = UpdateCapacityRequest {
        custom_date_id: None,
        calendarization: String::from("addCalendarization"),
        start_date: Some(String::from("04/01/2025")),
        end_date: Some(String::from("04/07/2025")),
        bulk_territories: Vec::new(),
        ..create_sample_update()
    };

    let response: UpdateCapacityResponse = store.update(&request);

    assert!(response.base_response.is_success());
    assert_eq!(store.date_ranges(14).date_range_list.len(), 3);
}

#[test]
fn test_default_view_update_resolves_slots_by_window() {
    let mut store: FixtureStore = create_test_store();
    let request: UpdateCapacityRequest = UpdateCapacityRequest {
        service_territory: 22,
        custom_date_id: None,
        calendarization: String::from("defaultView"),
        start_date: None,
        end_date: None,
        bulk_territories: Vec::new(),
        base_capacity_hours: Vec::new(),
        appointment_slots: vec![
            SlotUpdateDto {
                capacity_stream_id: 1,
                start_time: String::from("08:00"),
                end_time: String::from("12:00"),
                days: BTreeMap::from([(DayName::Sunday, true)]),
            },
            SlotUpdateDto {
                capacity_stream_id: 1,
                start_time: String::from("06:00"),
                end_time: String::from("07:00"),
                days: BTreeMap::from([(DayName::Sunday, true)]),
            },
        ],
        ..create_sample_update()
    };

    let response: UpdateCapacityResponse = store.update(&request);

    assert!(response.base_response.is_success());
    let payload = store.table_data(22, None).capacity_appointment_slot_response;
    // The unknown window is dropped.
    assert_eq!(payload.appointment_slots.len(), 1);
    assert_eq!(payload.appointment_slots[0].appt_slot_id, 2201);
    assert!(payload.appointment_slots[0].days[&DayName::Sunday]);
}

#[test]
fn test_update_with_out_of_range_hours_fails() {
    let mut store: FixtureStore = create_test_store();
    let request: UpdateCapacityRequest = UpdateCapacityRequest {
        base_capacity_hours: vec![HoursDto {
            capacity_stream_id: 1,
            days: BTreeMap::from([(DayName::Monday, 1000.0)]),
        }],
        ..create_sample_update()
    };

    let response: UpdateCapacityResponse = store.update(&request);

    assert_eq!(response.base_response.response_status, ResponseStatus::Failure);
    assert!(response.default_capacity_view_responses.is_empty());
}

#[test]
fn test_update_of_unknown_primary_territory_fails() {
    let mut store: FixtureStore = create_test_store();
    let request: UpdateCapacityRequest = UpdateCapacityRequest {
        service_territory: 999,
        ..create_sample_update()
    };

    let response: UpdateCapacityResponse = store.update(&request);

    assert_eq!(response.base_response.response_status, ResponseStatus::Failure);
    assert_eq!(
        response.base_response.message,
        "Unknown service territory 999"
    );
}

#[test]
fn test_unknown_bulk_territory_fails_alone() {
    let mut store: FixtureStore = create_test_store();
    let request: UpdateCapacityRequest = UpdateCapacityRequest {
        bulk_territories: vec![999],
        ..create_sample_update()
    };

    let response: UpdateCapacityResponse = store.update(&request);

    assert_eq!(
        response.base_response.response_status,
        ResponseStatus::PartialSuccess
    );
    assert_eq!(response.default_capacity_view_responses[1].service_territory, "999");
    assert!(
        response.default_capacity_view_responses[1]
            .message
            .starts_with("Failure")
    );
}

#[test]
fn test_delete_calendarization() {
    let mut store: FixtureStore = create_test_store();

    assert!(store.delete(144).base_response.is_success());
    assert_eq!(store.date_ranges(14).date_range_list.len(), 1);

    let again = store.delete(144);
    assert_eq!(again.base_response.message, "Unknown custDateId 144");
}

#[test]
fn test_default_schedule_cannot_be_deleted() {
    let mut store: FixtureStore = create_test_store();

    let response = store.delete(140);

    assert_eq!(response.base_response.response_status, ResponseStatus::Failure);
    assert_eq!(store.calendarizations().len(), 6);
}
