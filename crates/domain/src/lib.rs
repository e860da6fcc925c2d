// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod calendar;
mod error;
mod hours;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::{
    Calendarization, CalendarizationMode, DateRange, conflict_message, enabled_days,
    find_conflict, format_service_date, parse_service_date,
};
pub use error::DomainError;
pub use hours::{
    HoursInput, MAX_HOURS, MIN_HOURS, is_hours_in_range, parse_hours, round2, truncate2,
};
pub use types::{
    AppointmentSlotRow, CapacityStream, CapacityStreamRow, DayName, LocationNode, Market, NodeId,
    ServiceTerritory, SlotKey, SlotWindow, State, StreamSlots, TERRITORY_LEVEL, TerritorySlots,
    find_territory_id, full_week,
};
pub use validation::{FieldError, FilterField, FilterSelection, validate_filter};
