// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Calendarization, CalendarizationMode, DateRange, DayName, DomainError, conflict_message,
    enabled_days, find_conflict, format_service_date, parse_service_date,
};
use std::collections::BTreeSet;
use time::macros::date;

fn range(start: &str, end: &str) -> DateRange {
    DateRange::parse(start, end).unwrap()
}

#[test]
fn test_parse_service_date_us_format() {
    assert_eq!(parse_service_date("03/11/2025").unwrap(), date!(2025 - 03 - 11));
}

#[test]
fn test_parse_service_date_iso_format_with_time() {
    assert_eq!(
        parse_service_date("2025-03-11T00:00:00.000+00:00").unwrap(),
        date!(2025 - 03 - 11)
    );
}

#[test]
fn test_parse_service_date_rejects_garbage() {
    let result: Result<time::Date, DomainError> = parse_service_date("next tuesday");
    assert!(matches!(result, Err(DomainError::DateParseError { .. })));
}

#[test]
fn test_format_service_date_pads() {
    assert_eq!(format_service_date(date!(2025 - 03 - 01)), "03/01/2025");
}

#[test]
fn test_date_range_rejects_inverted_range() {
    let result: Result<DateRange, DomainError> =
        DateRange::new(date!(2025 - 03 - 16), date!(2025 - 03 - 11));
    assert!(matches!(result, Err(DomainError::InvalidDateRange { .. })));
}

#[test]
fn test_date_range_display() {
    assert_eq!(
        range("03/11/2025", "03/16/2025").to_string(),
        "03/11/2025 - 03/16/2025"
    );
}

#[test]
fn test_single_day_range_is_valid() {
    let single: DateRange = range("03/11/2025", "03/11/2025");
    assert_eq!(single.start(), single.end());
}

#[test]
fn test_enabled_days_without_window_is_full_week() {
    let days: BTreeSet<DayName> = enabled_days(None);
    assert_eq!(days.len(), 7);
}

#[test]
fn test_enabled_days_for_partial_week() {
    // 2025-03-11 is a Tuesday, 2025-03-16 a Sunday.
    let window: DateRange = range("03/11/2025", "03/16/2025");
    let days: BTreeSet<DayName> = enabled_days(Some(&window));

    assert_eq!(days.len(), 6);
    assert!(!days.contains(&DayName::Monday));
    assert!(days.contains(&DayName::Tuesday));
    assert!(days.contains(&DayName::Sunday));
}

#[test]
fn test_enabled_days_for_single_day() {
    let window: DateRange = range("03/14/2025", "03/14/2025");
    let days: BTreeSet<DayName> = enabled_days(Some(&window));
    assert_eq!(days.into_iter().collect::<Vec<_>>(), vec![DayName::Friday]);
}

#[test]
fn test_enabled_days_for_long_range_is_full_week() {
    let window: DateRange = range("01/01/2025", "12/31/2025");
    assert_eq!(enabled_days(Some(&window)).len(), 7);
}

#[test]
fn test_find_conflict_detects_overlap() {
    let existing: Vec<Calendarization> = vec![
        Calendarization {
            cust_date_id: 1,
            range: None,
        },
        Calendarization {
            cust_date_id: 144,
            range: Some(range("03/11/2025", "03/16/2025")),
        },
    ];

    let candidate: DateRange = range("03/16/2025", "03/20/2025");
    let conflict: Option<&Calendarization> = find_conflict(&candidate, &existing);
    assert_eq!(conflict.map(|c| c.cust_date_id), Some(144));
}

#[test]
fn test_find_conflict_ignores_adjacent_and_undated() {
    let existing: Vec<Calendarization> = vec![
        Calendarization {
            cust_date_id: 1,
            range: None,
        },
        Calendarization {
            cust_date_id: 144,
            range: Some(range("03/11/2025", "03/16/2025")),
        },
    ];

    let candidate: DateRange = range("03/17/2025", "03/20/2025");
    assert!(find_conflict(&candidate, &existing).is_none());
}

#[test]
fn test_conflict_message() {
    assert_eq!(
        conflict_message(&range("03/11/2025", "03/16/2025")),
        "The selected date range conflicts with \"03/11/2025 - 03/16/2025\"."
    );
}

#[test]
fn test_calendarization_mode_round_trip() {
    assert_eq!(
        "defaultView".parse::<CalendarizationMode>().unwrap(),
        CalendarizationMode::DefaultView
    );
    assert_eq!(
        "addCalendarization".parse::<CalendarizationMode>().unwrap(),
        CalendarizationMode::AddCalendarization
    );
    assert_eq!(
        "144".parse::<CalendarizationMode>().unwrap(),
        CalendarizationMode::Existing(144)
    );
    assert!("weekly".parse::<CalendarizationMode>().is_err());
    assert_eq!(CalendarizationMode::Existing(144).to_string(), "144");
}

#[test]
fn test_calendarization_mode_request_values() {
    assert_eq!(
        CalendarizationMode::DefaultView.as_request_str(),
        "defaultView"
    );
    assert_eq!(
        CalendarizationMode::Existing(7).as_request_str(),
        "updateCalendarization"
    );
    assert!(CalendarizationMode::Existing(7).is_deletable());
    assert!(!CalendarizationMode::AddCalendarization.is_deletable());
    assert!(!CalendarizationMode::DefaultView.is_deletable());
}
