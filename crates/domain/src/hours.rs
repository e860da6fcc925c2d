// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hour value parsing and precision rules for the base capacity table.
//!
//! ## Invariants
//!
//! - Accepted hour values lie in `[MIN_HOURS, MAX_HOURS]`
//! - Accepted hour values carry at most two decimal places, truncated
//!   (never rounded up)
//! - Rejected input never mutates table data or the pending diff

/// Smallest accepted hour value.
pub const MIN_HOURS: f64 = 0.0;

/// Largest accepted hour value.
pub const MAX_HOURS: f64 = 999.0;

/// Tolerance absorbing binary representation error before flooring.
const TRUNCATION_EPSILON: f64 = 1e-9;

/// Outcome of parsing raw cell input for an hours cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoursInput {
    /// Input was empty or not a decimal number. The cell reverts to `previous`.
    Unparseable {
        /// The value the cell held before the edit.
        previous: f64,
    },
    /// Input parsed but lies outside `[MIN_HOURS, MAX_HOURS]`. The cell
    /// silently reverts to `previous`.
    OutOfRange {
        /// The value the cell held before the edit.
        previous: f64,
    },
    /// Input accepted, already truncated to two decimals.
    Accepted(f64),
}

/// Truncates a value to two decimal places.
///
/// `truncate2(12.399) == 12.39`. Values whose decimal form has at most two
/// places are returned unchanged even when their binary form sits just below
/// it (e.g. `0.29`).
#[must_use]
pub fn truncate2(value: f64) -> f64 {
    (value.mul_add(100.0, TRUNCATION_EPSILON)).floor() / 100.0
}

/// Rounds a value to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Returns whether `value` is within the accepted hour range.
#[must_use]
pub fn is_hours_in_range(value: f64) -> bool {
    (MIN_HOURS..=MAX_HOURS).contains(&value)
}

/// Parses raw cell input for an hours cell.
///
/// # Arguments
///
/// * `raw` - The text entered in the cell
/// * `previous` - The value the cell held before the edit
#[must_use]
pub fn parse_hours(raw: &str, previous: f64) -> HoursInput {
    let trimmed: &str = raw.trim();
    if trimmed.is_empty() {
        return HoursInput::Unparseable { previous };
    }

    let Ok(value) = trimmed.parse::<f64>() else {
        return HoursInput::Unparseable { previous };
    };

    if !value.is_finite() {
        return HoursInput::Unparseable { previous };
    }

    if !is_hours_in_range(value) {
        return HoursInput::OutOfRange { previous };
    }

    HoursInput::Accepted(truncate2(value))
}
