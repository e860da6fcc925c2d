// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conversions between wire DTOs and domain types.

use crate::request_response::{
    AppointmentSlotDto, CapacityAppointmentSlotResponse, CapacityStreamDto,
    CapacityStreamSlotsDto, DateRangeDto, HoursDto, MarketDto, SlotDaysDto, SlotUpdateDto,
    StateDto, TerritoryDto, TerritoryResultDto, TerritorySlotsDto,
};
use capacity_domain::{
    Calendarization, CapacityStream, DateRange, DomainError, Market, ServiceTerritory, SlotWindow,
    State, StreamSlots, TerritorySlots, format_service_date,
};
use default_capacity::{HoursRecord, PendingChanges, SlotRecord, TableResponse, TerritoryOutcome};

/// Converts the wire hierarchy into the location tree.
#[must_use]
pub fn locations_from_dto(states: &[StateDto]) -> Vec<State> {
    states
        .iter()
        .map(|state| State {
            name: state.state.clone(),
            markets: state
                .markets
                .iter()
                .map(|market| Market {
                    name: market.market.clone(),
                    service_territories: market
                        .service_territories
                        .iter()
                        .map(|t| ServiceTerritory::new(t.id, &t.territory))
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

/// Converts the location tree into its wire form.
#[must_use]
pub fn locations_to_dto(states: &[State]) -> Vec<StateDto> {
    states
        .iter()
        .map(|state| StateDto {
            state: state.name.clone(),
            markets: state
                .markets
                .iter()
                .map(|market| MarketDto {
                    market: market.name.clone(),
                    service_territories: market
                        .service_territories
                        .iter()
                        .map(|t| TerritoryDto {
                            id: t.id,
                            territory: t.name.clone(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

#[must_use]
pub fn streams_from_dto(streams: &[CapacityStreamDto]) -> Vec<CapacityStream> {
    streams
        .iter()
        .map(|s| CapacityStream::new(s.cs_id, &s.capacity_stream))
        .collect()
}

#[must_use]
pub fn streams_to_dto(streams: &[CapacityStream]) -> Vec<CapacityStreamDto> {
    streams
        .iter()
        .map(|s| CapacityStreamDto {
            cs_id: s.stream_id,
            capacity_stream: s.name.clone(),
        })
        .collect()
}

#[must_use]
pub fn slot_catalog_from_dto(territories: &[TerritorySlotsDto]) -> Vec<TerritorySlots> {
    territories
        .iter()
        .map(|territory| TerritorySlots {
            territory_id: territory.service_territory_id,
            territory_name: territory.service_territory.clone(),
            streams: territory
                .capacity_stream_slots
                .iter()
                .map(|stream| StreamSlots {
                    stream_name: stream.capacity_stream.clone(),
                    slots: stream
                        .appointment_slots
                        .iter()
                        .map(|slot| SlotWindow {
                            slot_id: slot.apt_slot_id,
                            start: slot.apt_slot_start.clone(),
                            end: slot.apt_slot_end.clone(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

#[must_use]
pub fn slot_catalog_to_dto(territories: &[TerritorySlots]) -> Vec<TerritorySlotsDto> {
    territories
        .iter()
        .map(|territory| TerritorySlotsDto {
            service_territory_id: territory.territory_id,
            service_territory: territory.territory_name.clone(),
            capacity_stream_slots: territory
                .streams
                .iter()
                .map(|stream| CapacityStreamSlotsDto {
                    capacity_stream: stream.stream_name.clone(),
                    appointment_slots: stream
                        .slots
                        .iter()
                        .map(|slot| AppointmentSlotDto {
                            apt_slot_id: slot.slot_id,
                            apt_slot_start: slot.start.clone(),
                            apt_slot_end: slot.end.clone(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

/// Converts one wire calendarization.
///
/// # Errors
///
/// Returns an error if a date fails to parse, if only one of the two dates
/// is present, or if the range is inverted.
pub fn calendarization_from_dto(dto: &DateRangeDto) -> Result<Calendarization, DomainError> {
    let range: Option<DateRange> = match (&dto.start_date, &dto.end_date) {
        (None, None) => None,
        (Some(start), Some(end)) => Some(DateRange::parse(start, end)?),
        _ => {
            return Err(DomainError::InvalidCalendarization(format!(
                "custDateId {} has an incomplete date range",
                dto.cust_date_id
            )));
        }
    };
    Ok(Calendarization {
        cust_date_id: dto.cust_date_id,
        range,
    })
}

/// Converts a wire calendarization list.
///
/// # Errors
///
/// Returns the first conversion error.
pub fn calendarizations_from_dto(
    list: &[DateRangeDto],
) -> Result<Vec<Calendarization>, DomainError> {
    list.iter().map(calendarization_from_dto).collect()
}

#[must_use]
pub fn calendarization_to_dto(calendarization: &Calendarization) -> DateRangeDto {
    DateRangeDto {
        cust_date_id: calendarization.cust_date_id,
        start_date: calendarization
            .range
            .map(|range| format_service_date(range.start())),
        end_date: calendarization
            .range
            .map(|range| format_service_date(range.end())),
    }
}

/// Converts a table data payload into merge input.
#[must_use]
pub fn table_response_from_dto(dto: &CapacityAppointmentSlotResponse) -> TableResponse {
    TableResponse {
        hours: dto
            .base_capacity_hours
            .iter()
            .map(|h| HoursRecord {
                stream_id: h.capacity_stream_id,
                days: h.days.clone(),
            })
            .collect(),
        slots: dto
            .appointment_slots
            .iter()
            .map(|s| SlotRecord {
                slot_id: s.appt_slot_id,
                stream_id: s.capacity_stream_id,
                days: s.days.clone(),
            })
            .collect(),
    }
}

#[must_use]
pub fn table_response_to_dto(response: &TableResponse) -> CapacityAppointmentSlotResponse {
    CapacityAppointmentSlotResponse {
        base_capacity_hours: response
            .hours
            .iter()
            .map(|h| HoursDto {
                capacity_stream_id: h.stream_id,
                days: h.days.clone(),
            })
            .collect(),
        appointment_slots: response
            .slots
            .iter()
            .map(|s| SlotDaysDto {
                appt_slot_id: s.slot_id,
                capacity_stream_id: s.stream_id,
                days: s.days.clone(),
            })
            .collect(),
    }
}

/// Converts pending changes into the update request's row lists.
#[must_use]
pub fn changes_to_dto(changes: &PendingChanges) -> (Vec<HoursDto>, Vec<SlotUpdateDto>) {
    let hours: Vec<HoursDto> = changes
        .hours
        .iter()
        .map(|change| HoursDto {
            capacity_stream_id: change.stream_id,
            days: change.days.clone(),
        })
        .collect();
    let slots: Vec<SlotUpdateDto> = changes
        .slots
        .iter()
        .map(|change| SlotUpdateDto {
            capacity_stream_id: change.key.stream_id,
            start_time: change.key.start_time.clone(),
            end_time: change.key.end_time.clone(),
            days: change.days.clone(),
        })
        .collect();
    (hours, slots)
}

#[must_use]
pub fn outcomes_from_dto(results: &[TerritoryResultDto]) -> Vec<TerritoryOutcome> {
    results
        .iter()
        .map(|r| TerritoryOutcome {
            service_territory: r.service_territory.clone(),
            message: r.message.clone(),
            date_ranges: r.date_ranges.clone(),
        })
        .collect()
}
