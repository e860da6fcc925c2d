// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::edit::{EditEvent, EditOutcome, HoursChange, PendingChanges, SlotChange, apply_edit};
use crate::error::CoreError;
use crate::transform::{
    recalculate_territory_level, transform_appointment_slots, transform_base_capacity_hours,
};
use capacity_domain::{
    AppointmentSlotRow, CapacityStream, CapacityStreamRow, TerritorySlots,
};
use serde::{Deserialize, Serialize};

/// The two capacity tables of the page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableData {
    /// Base capacity hours rows, aggregate first.
    pub hours: Vec<CapacityStreamRow>,
    /// Appointment freeze rows.
    pub slots: Vec<AppointmentSlotRow>,
}

impl TableData {
    /// Seeds empty tables from the reference catalogs.
    ///
    /// # Arguments
    ///
    /// * `streams` - The capacity stream catalog
    /// * `slot_catalog` - The appointment slot catalog
    /// * `territory_id` - Restricts slot rows to one territory when given
    #[must_use]
    pub fn seed(
        streams: &[CapacityStream],
        slot_catalog: &[TerritorySlots],
        territory_id: Option<i64>,
    ) -> Self {
        Self {
            hours: transform_base_capacity_hours(streams),
            slots: transform_appointment_slots(slot_catalog, streams, territory_id),
        }
    }
}

/// The result of applying an edit to a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEdit {
    /// The edit was accepted and the session updated.
    Applied,
    /// The input was rejected and the cell reverts to `previous`.
    Reverted {
        /// The value the cell should show again.
        previous: f64,
    },
}

/// The editable table state of a page: current table, baseline and diff.
///
/// The baseline is an explicit copy taken on load and on successful submit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CapacitySession {
    table: TableData,
    baseline: TableData,
    pending: PendingChanges,
}

impl CapacitySession {
    /// Creates a session with `table` loaded as its baseline.
    #[must_use]
    pub fn new(table: TableData) -> Self {
        let mut session: Self = Self::default();
        session.load(table);
        session
    }

    /// Replaces the table, snapshots it as the baseline and clears the diff.
    pub fn load(&mut self, table: TableData) {
        self.baseline = table.clone();
        self.table = table;
        self.pending = PendingChanges::default();
    }

    /// Returns the current table.
    #[must_use]
    pub const fn table(&self) -> &TableData {
        &self.table
    }

    /// Returns the baseline snapshot.
    #[must_use]
    pub const fn baseline(&self) -> &TableData {
        &self.baseline
    }

    /// Returns the pending diff.
    #[must_use]
    pub const fn pending(&self) -> &PendingChanges {
        &self.pending
    }

    /// Applies a cell edit.
    ///
    /// # Errors
    ///
    /// Returns an error if the edited row does not exist or is disabled.
    pub fn apply(&mut self, event: &EditEvent) -> Result<SessionEdit, CoreError> {
        match apply_edit(&self.table, &self.pending, event)? {
            EditOutcome::Applied { table, pending } => {
                self.table = table;
                self.pending = pending;
                Ok(SessionEdit::Applied)
            }
            EditOutcome::Reverted { previous } => Ok(SessionEdit::Reverted { previous }),
        }
    }

    /// Returns whether the table differs from the baseline.
    #[must_use]
    pub fn is_edited(&self) -> bool {
        self.table != self.baseline
    }

    /// Restores the baseline and clears the diff.
    pub fn reset_to_baseline(&mut self) {
        self.table = TableData {
            hours: recalculate_territory_level(&self.baseline.hours),
            slots: self.baseline.slots.clone(),
        };
        self.pending = PendingChanges::default();
    }

    /// Accepts the current table as the new baseline after a submit.
    pub fn mark_submitted(&mut self) {
        self.baseline = self.table.clone();
        self.pending = PendingChanges::default();
    }

    /// Returns every non-aggregate row as a change, for full-table submits.
    #[must_use]
    pub fn full_rows_payload(&self) -> PendingChanges {
        PendingChanges {
            hours: self
                .table
                .hours
                .iter()
                .filter(|row| !row.is_territory_level())
                .map(|row| HoursChange {
                    stream_id: row.stream_id,
                    days: row.days.clone(),
                })
                .collect(),
            slots: self
                .table
                .slots
                .iter()
                .map(|row| SlotChange {
                    key: row.key(),
                    days: row.days.clone(),
                })
                .collect(),
        }
    }
}
