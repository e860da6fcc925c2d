// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendarization date ranges and the weekday columns they enable.
//!
//! A calendarization is a date-bounded override of a territory's default
//! weekly schedule. The territory's default schedule is itself represented
//! as a calendarization without a date range.
//!
//! ## Invariants
//!
//! - A `DateRange` never ends before it starts
//! - Two dated calendarizations of one territory conflict when their
//!   inclusive ranges share at least one day

use crate::error::DomainError;
use crate::types::DayName;
use std::collections::BTreeSet;
use std::str::FromStr;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Wire date format used by the capacity service (`MM/DD/YYYY`).
const US_DATE: &[BorrowedFormatItem<'static>] = format_description!("[month]/[day]/[year]");

/// ISO date format, also accepted from the service.
const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a service date in `MM/DD/YYYY` or `YYYY-MM-DD` form.
///
/// A trailing time component after `T` is ignored.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if neither format matches.
pub fn parse_service_date(value: &str) -> Result<Date, DomainError> {
    let trimmed: &str = value.trim();
    let date_part: &str = trimmed.split('T').next().unwrap_or(trimmed);

    Date::parse(date_part, US_DATE)
        .or_else(|_| Date::parse(date_part, ISO_DATE))
        .map_err(|e| DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        })
}

/// Formats a date in the service's `MM/DD/YYYY` form.
#[must_use]
pub fn format_service_date(date: Date) -> String {
    format!(
        "{:02}/{:02}/{:04}",
        u8::from(date.month()),
        date.day(),
        date.year()
    )
}

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Creates a new `DateRange`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `end` is before `start`.
    pub fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a range from two service date strings.
    ///
    /// # Errors
    ///
    /// Returns an error if either date fails to parse or the range is inverted.
    pub fn parse(start: &str, end: &str) -> Result<Self, DomainError> {
        Self::new(parse_service_date(start)?, parse_service_date(end)?)
    }

    /// Returns the first day of the range.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the last day of the range.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns whether two inclusive ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            format_service_date(self.start),
            format_service_date(self.end)
        )
    }
}

/// A calendarization entry of a territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendarization {
    /// The server-assigned custom date id.
    pub cust_date_id: i64,
    /// The override window. `None` marks the territory's default schedule.
    pub range: Option<DateRange>,
}

impl Calendarization {
    /// Returns whether this entry is the undated default schedule.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.range.is_none()
    }
}

/// Which calendarization the capacity tables are showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CalendarizationMode {
    /// The territory's default weekly schedule.
    #[default]
    DefaultView,
    /// A new calendarization is being created.
    AddCalendarization,
    /// An existing dated calendarization.
    Existing(i64),
}

impl CalendarizationMode {
    /// Returns the `calendarization` value sent with an update request.
    #[must_use]
    pub const fn as_request_str(&self) -> &'static str {
        match self {
            Self::DefaultView => "defaultView",
            Self::AddCalendarization => "addCalendarization",
            Self::Existing(_) => "updateCalendarization",
        }
    }

    /// Returns whether the selected calendarization can be deleted.
    #[must_use]
    pub const fn is_deletable(&self) -> bool {
        matches!(self, Self::Existing(_))
    }
}

impl std::fmt::Display for CalendarizationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DefaultView => write!(f, "defaultView"),
            Self::AddCalendarization => write!(f, "addCalendarization"),
            Self::Existing(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for CalendarizationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "defaultView" => Ok(Self::DefaultView),
            "addCalendarization" => Ok(Self::AddCalendarization),
            other => other
                .parse::<i64>()
                .map(Self::Existing)
                .map_err(|_| DomainError::InvalidCalendarization(other.to_string())),
        }
    }
}

/// Returns the weekday columns editable for a calendarization window.
///
/// Walks every date from start to end inclusive and collects the distinct
/// weekdays. Without a window all seven days are enabled.
#[must_use]
pub fn enabled_days(window: Option<&DateRange>) -> BTreeSet<DayName> {
    let Some(range) = window else {
        return DayName::ALL.into_iter().collect();
    };

    let mut days: BTreeSet<DayName> = BTreeSet::new();
    let mut current: Date = range.start();
    loop {
        days.insert(DayName::from(current.weekday()));
        if current >= range.end() || days.len() == DayName::ALL.len() {
            break;
        }
        match current.next_day() {
            Some(next) => current = next,
            None => break,
        }
    }
    days
}

/// Finds the first existing dated calendarization overlapping `candidate`.
#[must_use]
pub fn find_conflict<'a>(
    candidate: &DateRange,
    existing: &'a [Calendarization],
) -> Option<&'a Calendarization> {
    existing.iter().find(|calendarization| {
        calendarization
            .range
            .is_some_and(|range| range.overlaps(candidate))
    })
}

/// Builds the user-facing message for a date range conflict.
#[must_use]
pub fn conflict_message(conflicting: &DateRange) -> String {
    format!("The selected date range conflicts with \"{conflicting}\".")
}
