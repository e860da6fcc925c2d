// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::CalendarizationMode;
use time::Date;

/// The main (non-bulk) filter selection of the capacity page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    /// Selected state name (empty when unset).
    pub state: String,
    /// Selected market name (empty when unset).
    pub market: String,
    /// Selected territory name (empty when unset).
    pub territory: String,
    /// Resolved id of the selected territory.
    pub territory_id: Option<i64>,
    /// Selected calendarization.
    pub mode: CalendarizationMode,
    /// Calendarization start date.
    pub start_date: Option<Date>,
    /// Calendarization end date.
    pub end_date: Option<Date>,
}

/// A filter form field that can carry an inline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    State,
    Market,
    Territory,
    StartDate,
    EndDate,
}

impl FilterField {
    /// Returns the form field name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Market => "market",
            Self::Territory => "territory",
            Self::StartDate => "startDate",
            Self::EndDate => "endDate",
        }
    }
}

impl std::fmt::Display for FilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An inline, field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The field the error belongs to.
    pub field: FilterField,
    /// The message shown next to the field.
    pub message: String,
}

impl FieldError {
    fn new(field: FilterField, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Validates the filter selection before a table search.
///
/// Fields are validated only once the preceding field is set, mirroring how
/// the form enables them: market after state, territory after market.
///
/// # Errors
///
/// Returns every field error found, in form order.
pub fn validate_filter(filter: &FilterSelection) -> Result<(), Vec<FieldError>> {
    let mut errors: Vec<FieldError> = Vec::new();

    if filter.state.is_empty() {
        errors.push(FieldError::new(FilterField::State, "State is required"));
    }

    if !filter.state.is_empty() && filter.market.is_empty() {
        errors.push(FieldError::new(FilterField::Market, "Market is required"));
    }

    if !filter.market.is_empty() && filter.territory.is_empty() {
        errors.push(FieldError::new(
            FilterField::Territory,
            "Service Territory is required",
        ));
    }

    if filter.mode == CalendarizationMode::AddCalendarization {
        if filter.start_date.is_none() {
            errors.push(FieldError::new(
                FilterField::StartDate,
                "Start Date is required",
            ));
        }
        if filter.end_date.is_none() {
            errors.push(FieldError::new(FilterField::EndDate, "End Date is required"));
        }
        if matches!(
            (filter.start_date, filter.end_date),
            (Some(start), Some(end)) if start > end
        ) {
            errors.push(FieldError::new(
                FilterField::EndDate,
                "End Date must be after Start Date",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
