// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cell edit reducer for the hours and freeze tables.
//!
//! Edits are data ([`EditEvent`]) applied by a pure function to the current
//! table and pending diff, producing new values.
//!
//! ## Invariants
//!
//! - Rejected hour input changes neither the table nor the diff
//! - The diff only holds day entries that were edited, in first-edit order
//! - The aggregate row is never edited directly

use crate::error::CoreError;
use crate::state::TableData;
use capacity_domain::{
    AppointmentSlotRow, CapacityStreamRow, DayName, HoursInput, SlotKey, parse_hours, truncate2,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single cell edit.
#[derive(Debug, Clone, PartialEq)]
pub enum EditEvent {
    /// Raw text entered in an hours cell.
    SetHours {
        /// The edited stream row.
        stream_id: i64,
        /// The edited day column.
        day: DayName,
        /// The text entered.
        raw: String,
        /// The value the cell held before the edit.
        previous: f64,
    },
    /// A freeze checkbox toggled.
    SetFreeze {
        /// The edited slot row.
        key: SlotKey,
        /// The edited day column.
        day: DayName,
        /// Whether the slot is now frozen.
        frozen: bool,
    },
}

/// Pending hour changes for one stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursChange {
    /// The capacity stream id.
    pub stream_id: i64,
    /// Changed days only.
    pub days: BTreeMap<DayName, f64>,
}

/// Pending freeze changes for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotChange {
    /// The slot row key.
    pub key: SlotKey,
    /// Changed days only.
    pub days: BTreeMap<DayName, bool>,
}

/// The diff accumulated since the last load, submit or reset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PendingChanges {
    /// Hour changes in first-edit order.
    pub hours: Vec<HoursChange>,
    /// Freeze changes in first-edit order.
    pub slots: Vec<SlotChange>,
}

impl PendingChanges {
    /// Returns whether no change is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hours.is_empty() && self.slots.is_empty()
    }
}

/// The result of applying an edit.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The edit was accepted.
    Applied {
        /// The table after the edit.
        table: TableData,
        /// The diff after the edit.
        pending: PendingChanges,
    },
    /// The input was rejected and the cell reverts to `previous`.
    Reverted {
        /// The value the cell should show again.
        previous: f64,
    },
}

/// Records an hour change, merging into the stream's existing entry.
#[must_use]
pub fn record_hours(
    pending: &PendingChanges,
    stream_id: i64,
    day: DayName,
    value: f64,
) -> PendingChanges {
    let mut next: PendingChanges = pending.clone();
    match next.hours.iter_mut().find(|c| c.stream_id == stream_id) {
        Some(change) => {
            change.days.insert(day, value);
        }
        None => next.hours.push(HoursChange {
            stream_id,
            days: BTreeMap::from([(day, value)]),
        }),
    }
    next
}

/// Records a freeze change, merging into the slot's existing entry.
#[must_use]
pub fn record_freeze(
    pending: &PendingChanges,
    key: &SlotKey,
    day: DayName,
    frozen: bool,
) -> PendingChanges {
    let mut next: PendingChanges = pending.clone();
    match next.slots.iter_mut().find(|c| c.key == *key) {
        Some(change) => {
            change.days.insert(day, frozen);
        }
        None => next.slots.push(SlotChange {
            key: key.clone(),
            days: BTreeMap::from([(day, frozen)]),
        }),
    }
    next
}

/// Applies a cell edit to the table and diff.
///
/// # Arguments
///
/// * `table` - The current table (unchanged)
/// * `pending` - The current diff (unchanged)
/// * `event` - The edit to apply
///
/// # Errors
///
/// Returns an error if:
/// - No row matches the edited stream id or slot key
/// - The matched row is disabled (including the aggregate row)
pub fn apply_edit(
    table: &TableData,
    pending: &PendingChanges,
    event: &EditEvent,
) -> Result<EditOutcome, CoreError> {
    match event {
        EditEvent::SetHours {
            stream_id,
            day,
            raw,
            previous,
        } => {
            let index: usize = find_hours_row(&table.hours, *stream_id)?;

            let value: f64 = match parse_hours(raw, *previous) {
                HoursInput::Accepted(value) => value,
                HoursInput::Unparseable { previous } | HoursInput::OutOfRange { previous } => {
                    return Ok(EditOutcome::Reverted { previous });
                }
            };

            let mut next: TableData = table.clone();
            next.hours[index].days.insert(*day, value);
            update_aggregate_day(&mut next.hours, *day);

            Ok(EditOutcome::Applied {
                table: next,
                pending: record_hours(pending, *stream_id, *day, value),
            })
        }
        EditEvent::SetFreeze { key, day, frozen } => {
            let index: usize = find_slot_row(&table.slots, key)?;

            let mut next: TableData = table.clone();
            next.slots[index].days.insert(*day, *frozen);

            Ok(EditOutcome::Applied {
                table: next,
                pending: record_freeze(pending, key, *day, *frozen),
            })
        }
    }
}

fn find_hours_row(rows: &[CapacityStreamRow], stream_id: i64) -> Result<usize, CoreError> {
    let index: usize = rows
        .iter()
        .position(|row| row.stream_id == stream_id)
        .ok_or_else(|| CoreError::RowNotFound {
            key: format!("stream {stream_id}"),
        })?;
    let row: &CapacityStreamRow = &rows[index];
    if row.disabled || row.is_territory_level() {
        return Err(CoreError::RowDisabled {
            name: row.name.clone(),
        });
    }
    Ok(index)
}

fn find_slot_row(rows: &[AppointmentSlotRow], key: &SlotKey) -> Result<usize, CoreError> {
    let index: usize = rows
        .iter()
        .position(|row| row.key() == *key)
        .ok_or_else(|| CoreError::RowNotFound {
            key: key.to_string(),
        })?;
    if rows[index].disabled {
        return Err(CoreError::RowDisabled {
            name: rows[index].name.clone(),
        });
    }
    Ok(index)
}

/// Recomputes one day of the aggregate row from truncated stream values.
fn update_aggregate_day(rows: &mut [CapacityStreamRow], day: DayName) {
    let sum: f64 = rows
        .iter()
        .filter(|row| !row.disabled && !row.is_territory_level())
        .map(|row| truncate2(row.hours(day)))
        .sum();
    if let Some(aggregate) = rows.iter_mut().find(|row| row.is_territory_level()) {
        aggregate.days.insert(day, truncate2(sum));
    }
}
