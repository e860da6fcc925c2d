// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Table seeding from the reference catalogs and merging of server data.
//!
//! ## Invariants
//!
//! - The "Territory Level" row, when present, is the first hours row
//! - After every transform that returns hours rows, the aggregate row holds
//!   `round2` of the per-day sum of the enabled stream rows

use crate::state::TableData;
use capacity_domain::{
    AppointmentSlotRow, CapacityStream, CapacityStreamRow, DayName, TerritorySlots, round2,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stored hours for one capacity stream, as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursRecord {
    /// The capacity stream id.
    pub stream_id: i64,
    /// Sparse per-day hours.
    pub days: BTreeMap<DayName, f64>,
}

/// Stored freeze flags for one appointment slot, as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    /// Server-assigned slot id.
    pub slot_id: i64,
    /// The capacity stream id.
    pub stream_id: i64,
    /// Sparse per-day freeze flags.
    pub days: BTreeMap<DayName, bool>,
}

/// Stored table data for one territory and calendarization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableResponse {
    /// Hours per stream.
    pub hours: Vec<HoursRecord>,
    /// Freeze flags per slot.
    pub slots: Vec<SlotRecord>,
}

/// Builds the base capacity hours table from the stream catalog.
///
/// The aggregate row comes first, followed by one zeroed row per stream.
#[must_use]
pub fn transform_base_capacity_hours(catalog: &[CapacityStream]) -> Vec<CapacityStreamRow> {
    std::iter::once(CapacityStreamRow::territory_level())
        .chain(
            catalog
                .iter()
                .map(|stream| CapacityStreamRow::new(stream.stream_id, &stream.name)),
        )
        .collect()
}

/// Builds the appointment freeze table from the slot catalog.
///
/// # Arguments
///
/// * `catalog` - The slot catalog of every territory
/// * `streams` - The capacity stream catalog, used to resolve stream ids
/// * `territory_id` - Restricts the rows to one territory when given
#[must_use]
pub fn transform_appointment_slots(
    catalog: &[TerritorySlots],
    streams: &[CapacityStream],
    territory_id: Option<i64>,
) -> Vec<AppointmentSlotRow> {
    catalog
        .iter()
        .filter(|territory| territory_id.is_none_or(|id| territory.territory_id == id))
        .flat_map(|territory| territory.streams.iter())
        .flat_map(|stream_slots| {
            let stream_id: i64 = streams
                .iter()
                .find(|stream| stream.name == stream_slots.stream_name)
                .map_or(0, |stream| stream.stream_id);
            stream_slots.slots.iter().map(move |window| {
                let mut row: AppointmentSlotRow = AppointmentSlotRow::new(
                    stream_id,
                    &stream_slots.stream_name,
                    &window.start,
                    &window.end,
                );
                row.slot_id = Some(window.slot_id);
                row
            })
        })
        .collect()
}

/// Recomputes the aggregate row from the enabled stream rows.
///
/// Rows are returned unchanged when no aggregate row exists.
#[must_use]
pub fn recalculate_territory_level(rows: &[CapacityStreamRow]) -> Vec<CapacityStreamRow> {
    if !rows.iter().any(CapacityStreamRow::is_territory_level) {
        return rows.to_vec();
    }

    let totals: BTreeMap<DayName, f64> = DayName::ALL
        .into_iter()
        .map(|day| {
            let sum: f64 = rows
                .iter()
                .filter(|row| !row.disabled && !row.is_territory_level())
                .map(|row| row.hours(day))
                .sum();
            (day, round2(sum))
        })
        .collect();

    rows.iter()
        .map(|row| {
            if row.is_territory_level() {
                CapacityStreamRow {
                    days: totals.clone(),
                    ..row.clone()
                }
            } else {
                row.clone()
            }
        })
        .collect()
}

/// Merges stored hours into the table rows.
///
/// Each row takes the service's values for the days the service returned.
/// Rows the service does not mention pass through unchanged. The aggregate is
/// recomputed afterwards.
#[must_use]
pub fn merge_hours(existing: &[CapacityStreamRow], api: &[HoursRecord]) -> Vec<CapacityStreamRow> {
    let merged: Vec<CapacityStreamRow> = existing
        .iter()
        .map(|row| {
            let Some(record) = api.iter().find(|record| record.stream_id == row.stream_id) else {
                return row.clone();
            };
            if row.is_territory_level() {
                return row.clone();
            }
            let mut days: BTreeMap<DayName, f64> = row.days.clone();
            days.extend(record.days.iter().map(|(day, hours)| (*day, *hours)));
            CapacityStreamRow {
                days,
                ..row.clone()
            }
        })
        .collect();
    recalculate_territory_level(&merged)
}

/// Merges stored freeze flags into the slot rows.
///
/// The service addresses slots by their server-assigned id. Each row's id is
/// resolved from the catalog by stream name and time window, falling back to
/// the id the row already carries.
#[must_use]
pub fn merge_slots(
    existing: &[AppointmentSlotRow],
    api: &[SlotRecord],
    catalog: &[TerritorySlots],
    territory_id: Option<i64>,
) -> Vec<AppointmentSlotRow> {
    existing
        .iter()
        .map(|row| {
            let slot_id: Option<i64> = catalog_slot_id(catalog, territory_id, row).or(row.slot_id);
            let Some(record) = slot_id.and_then(|id| {
                api.iter()
                    .find(|record| record.slot_id == id && record.stream_id == row.stream_id)
            }) else {
                return row.clone();
            };
            let mut days: BTreeMap<DayName, bool> = row.days.clone();
            days.extend(record.days.iter().map(|(day, frozen)| (*day, *frozen)));
            AppointmentSlotRow {
                slot_id: Some(record.slot_id),
                days,
                ..row.clone()
            }
        })
        .collect()
}

fn catalog_slot_id(
    catalog: &[TerritorySlots],
    territory_id: Option<i64>,
    row: &AppointmentSlotRow,
) -> Option<i64> {
    catalog
        .iter()
        .filter(|territory| territory_id.is_none_or(|id| territory.territory_id == id))
        .flat_map(|territory| territory.streams.iter())
        .filter(|stream| stream.stream_name == row.name)
        .flat_map(|stream| stream.slots.iter())
        .find(|window| window.start == row.start_time && window.end == row.end_time)
        .map(|window| window.slot_id)
}

/// Merges a table data response into the current table.
#[must_use]
pub fn merge_server_response(
    existing: &TableData,
    response: &TableResponse,
    catalog: &[TerritorySlots],
    territory_id: Option<i64>,
) -> TableData {
    TableData {
        hours: merge_hours(&existing.hours, &response.hours),
        slots: merge_slots(&existing.slots, &response.slots, catalog, territory_id),
    }
}
