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

mod edit;
mod error;
mod report;
mod selection;
mod state;
mod transform;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use edit::{
    EditEvent, EditOutcome, HoursChange, PendingChanges, SlotChange, apply_edit, record_freeze,
    record_hours,
};
pub use error::CoreError;
pub use report::{
    FAILURE_PREFIX, FailureLevel, FailureNode, FailureRow, OverlapInfo, TerritoryOutcome,
    failure_rows, failure_tree, overlap_info,
};
pub use selection::{
    CheckboxState, Selection, bulk_territory_ids, checkbox_state, extract_territory_ids,
    initial_selection, is_indeterminate, is_node_disabled, selected_locations, toggle,
};
pub use state::{CapacitySession, SessionEdit, TableData};
pub use transform::{
    HoursRecord, SlotRecord, TableResponse, merge_hours, merge_server_response, merge_slots,
    recalculate_territory_level, transform_appointment_slots, transform_base_capacity_hours,
};
