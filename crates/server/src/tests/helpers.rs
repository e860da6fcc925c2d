// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::AppState;
use crate::store::{Fixture, FixtureStore};
use capacity_api::{HoursDto, UpdateCapacityRequest};
use capacity_domain::DayName;
use std::collections::BTreeMap;

pub fn create_test_store() -> FixtureStore {
    FixtureStore::new(Fixture::sample().expect("built-in sample parses"))
}

pub fn create_test_app_state() -> AppState {
    AppState::new(create_test_store())
}

/// Install at 12h on Tuesday for calendarization 144 of territory 14,
/// bulk-applied to territories 2 and 3.
pub fn create_sample_update() -> UpdateCapacityRequest {
    UpdateCapacityRequest {
        service_territory: 14,
        custom_date_id: Some(144),
        calendarization: String::from("updateCalendarization"),
        start_date: Some(String::from("03/11/2025")),
        end_date: Some(String::from("03/16/2025")),
        username: String::from("planner-1"),
        bulk_territories: vec![2, 3],
        base_capacity_hours: vec![HoursDto {
            capacity_stream_id: 1,
            days: BTreeMap::from([(DayName::Tuesday, 12.0)]),
        }],
        appointment_slots: Vec::new(),
    }
}
