// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A date range ends before it starts.
    InvalidDateRange {
        /// The start date as supplied.
        start: time::Date,
        /// The end date as supplied.
        end: time::Date,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A weekday name was not one of `MONDAY`..`SUNDAY`.
    InvalidDayName(String),
    /// A calendarization selector was not recognized.
    InvalidCalendarization(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateRange { start, end } => {
                write!(
                    f,
                    "Invalid date range: end date {end} is before start date {start}"
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidDayName(name) => write!(f, "Invalid day name: {name}"),
            Self::InvalidCalendarization(value) => {
                write!(f, "Invalid calendarization selection: {value}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
