// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::TableData;
use capacity_domain::{
    AppointmentSlotRow, CapacityStream, CapacityStreamRow, DayName, Market, ServiceTerritory,
    SlotWindow, State, StreamSlots, TERRITORY_LEVEL, TerritorySlots,
};

/// `State A { Market M1 { T1, T2 } }`
pub fn create_single_market_tree() -> Vec<State> {
    vec![State::new(
        "A",
        vec![Market::new(
            "M1",
            vec![
                ServiceTerritory::new(1, "T1"),
                ServiceTerritory::new(2, "T2"),
            ],
        )],
    )]
}

/// Two states, three markets, five territories.
pub fn create_test_tree() -> Vec<State> {
    vec![
        State::new(
            "Ohio",
            vec![
                Market::new(
                    "Columbus",
                    vec![
                        ServiceTerritory::new(1, "Columbus North"),
                        ServiceTerritory::new(2, "Columbus South"),
                    ],
                ),
                Market::new(
                    "Dayton",
                    vec![
                        ServiceTerritory::new(3, "Dayton Metro"),
                        ServiceTerritory::new(4, "Dayton East"),
                    ],
                ),
            ],
        ),
        State::new(
            "Texas",
            vec![Market::new(
                "Austin",
                vec![ServiceTerritory::new(5, "Austin Central")],
            )],
        ),
    ]
}

pub fn create_test_streams() -> Vec<CapacityStream> {
    vec![
        CapacityStream::new(1, "Install"),
        CapacityStream::new(2, "Repair"),
    ]
}

pub fn create_test_slot_catalog() -> Vec<TerritorySlots> {
    vec![
        TerritorySlots {
            territory_id: 1,
            territory_name: String::from("Columbus North"),
            streams: vec![
                StreamSlots {
                    stream_name: String::from("Install"),
                    slots: vec![
                        SlotWindow {
                            slot_id: 11,
                            start: String::from("08:00"),
                            end: String::from("12:00"),
                        },
                        SlotWindow {
                            slot_id: 12,
                            start: String::from("12:00"),
                            end: String::from("16:00"),
                        },
                    ],
                },
                StreamSlots {
                    stream_name: String::from("Repair"),
                    slots: vec![SlotWindow {
                        slot_id: 21,
                        start: String::from("08:00"),
                        end: String::from("12:00"),
                    }],
                },
            ],
        },
        TerritorySlots {
            territory_id: 2,
            territory_name: String::from("Columbus South"),
            streams: vec![StreamSlots {
                stream_name: String::from("Install"),
                slots: vec![SlotWindow {
                    slot_id: 31,
                    start: String::from("09:00"),
                    end: String::from("13:00"),
                }],
            }],
        },
    ]
}

/// Seeded table for territory 1.
pub fn create_test_table() -> TableData {
    TableData::seed(&create_test_streams(), &create_test_slot_catalog(), Some(1))
}

pub fn hours_row(stream_id: i64, name: &str, days: &[(DayName, f64)]) -> CapacityStreamRow {
    let mut row: CapacityStreamRow = CapacityStreamRow::new(stream_id, name);
    row.days.extend(days.iter().copied());
    row
}

pub fn aggregate(rows: &[CapacityStreamRow]) -> &CapacityStreamRow {
    rows.iter()
        .find(|row| row.name == TERRITORY_LEVEL)
        .expect("aggregate row present")
}

pub fn slot_row<'a>(rows: &'a [AppointmentSlotRow], name: &str, start: &str) -> &'a AppointmentSlotRow {
    rows.iter()
        .find(|row| row.name == name && row.start_time == start)
        .expect("slot row present")
}
