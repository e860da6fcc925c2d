// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Name of the synthetic aggregate row in the base capacity hours table.
pub const TERRITORY_LEVEL: &str = "Territory Level";

/// A day column of the weekly capacity tables.
///
/// Ordering is Monday first, matching the column order of the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayName {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayName {
    /// All seven days in column order.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Converts this day to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "MONDAY",
            Self::Tuesday => "TUESDAY",
            Self::Wednesday => "WEDNESDAY",
            Self::Thursday => "THURSDAY",
            Self::Friday => "FRIDAY",
            Self::Saturday => "SATURDAY",
            Self::Sunday => "SUNDAY",
        }
    }
}

impl std::fmt::Display for DayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DayName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidDayName(s.to_string()))
    }
}

impl From<time::Weekday> for DayName {
    fn from(weekday: time::Weekday) -> Self {
        match weekday {
            time::Weekday::Monday => Self::Monday,
            time::Weekday::Tuesday => Self::Tuesday,
            time::Weekday::Wednesday => Self::Wednesday,
            time::Weekday::Thursday => Self::Thursday,
            time::Weekday::Friday => Self::Friday,
            time::Weekday::Saturday => Self::Saturday,
            time::Weekday::Sunday => Self::Sunday,
        }
    }
}

/// Builds a full week map with every day set to `value`.
#[must_use]
pub fn full_week<T: Copy>(value: T) -> BTreeMap<DayName, T> {
    DayName::ALL.into_iter().map(|day| (day, value)).collect()
}

/// A service territory, the leaf of the location hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTerritory {
    /// Globally unique territory identifier.
    pub id: i64,
    /// Display name, unique within its market.
    pub name: String,
}

impl ServiceTerritory {
    /// Creates a new `ServiceTerritory`.
    #[must_use]
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// A market groups service territories within a state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    /// Market name, unique within its state.
    pub name: String,
    /// The territories of this market.
    pub service_territories: Vec<ServiceTerritory>,
}

impl Market {
    /// Creates a new `Market`.
    #[must_use]
    pub fn new(name: &str, service_territories: Vec<ServiceTerritory>) -> Self {
        Self {
            name: name.to_string(),
            service_territories,
        }
    }
}

/// A state, the root level of the location hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// State name, unique among states.
    pub name: String,
    /// The markets of this state.
    pub markets: Vec<Market>,
}

impl State {
    /// Creates a new `State`.
    #[must_use]
    pub fn new(name: &str, markets: Vec<Market>) -> Self {
        Self {
            name: name.to_string(),
            markets,
        }
    }
}

/// Identifier of a node in the location hierarchy.
///
/// States and markets are addressed by name, territories by their numeric id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeId {
    /// A state or market name.
    Name(String),
    /// A service territory id.
    Territory(i64),
}

impl NodeId {
    /// Creates a name-based identifier.
    #[must_use]
    pub fn name(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Territory(id) => write!(f, "{id}"),
        }
    }
}

/// A borrowed node of the location hierarchy, discriminated by level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationNode<'a> {
    State(&'a State),
    Market(&'a Market),
    Territory(&'a ServiceTerritory),
}

impl<'a> LocationNode<'a> {
    /// Returns the identifier used for selection membership.
    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Self::State(state) => NodeId::name(&state.name),
            Self::Market(market) => NodeId::name(&market.name),
            Self::Territory(territory) => NodeId::Territory(territory.id),
        }
    }

    /// Returns the display name of the node.
    #[must_use]
    pub fn name(&self) -> &'a str {
        match *self {
            Self::State(state) => &state.name,
            Self::Market(market) => &market.name,
            Self::Territory(territory) => &territory.name,
        }
    }

    /// Returns the direct children of the node. Territories have none.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        match *self {
            Self::State(state) => state.markets.iter().map(Self::Market).collect(),
            Self::Market(market) => market
                .service_territories
                .iter()
                .map(Self::Territory)
                .collect(),
            Self::Territory(_) => Vec::new(),
        }
    }
}

/// Resolves a `(state, market, territory)` name triple to a territory id.
#[must_use]
pub fn find_territory_id(
    locations: &[State],
    state_name: &str,
    market_name: &str,
    territory_name: &str,
) -> Option<i64> {
    locations
        .iter()
        .find(|state| state.name == state_name)?
        .markets
        .iter()
        .find(|market| market.name == market_name)?
        .service_territories
        .iter()
        .find(|territory| territory.name == territory_name)
        .map(|territory| territory.id)
}

/// A capacity stream from the reference catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityStream {
    /// The stream identifier.
    pub stream_id: i64,
    /// The stream name.
    pub name: String,
}

impl CapacityStream {
    /// Creates a new `CapacityStream`.
    #[must_use]
    pub fn new(stream_id: i64, name: &str) -> Self {
        Self {
            stream_id,
            name: name.to_string(),
        }
    }
}

/// One row of the base capacity hours table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityStreamRow {
    /// The capacity stream id (0 for the aggregate row).
    pub stream_id: i64,
    /// The capacity stream name.
    pub name: String,
    /// Weekly hours per day.
    pub days: BTreeMap<DayName, f64>,
    /// Disabled rows are read-only and excluded from the aggregate.
    pub disabled: bool,
}

impl CapacityStreamRow {
    /// Creates an enabled row with zero hours on every day.
    #[must_use]
    pub fn new(stream_id: i64, name: &str) -> Self {
        Self {
            stream_id,
            name: name.to_string(),
            days: full_week(0.0),
            disabled: false,
        }
    }

    /// Creates the zeroed "Territory Level" aggregate row.
    #[must_use]
    pub fn territory_level() -> Self {
        Self {
            stream_id: 0,
            name: String::from(TERRITORY_LEVEL),
            days: full_week(0.0),
            disabled: true,
        }
    }

    /// Returns whether this row is the aggregate row.
    #[must_use]
    pub fn is_territory_level(&self) -> bool {
        self.name == TERRITORY_LEVEL
    }

    /// Returns the hours for a day, treating a missing entry as zero.
    #[must_use]
    pub fn hours(&self, day: DayName) -> f64 {
        self.days.get(&day).copied().unwrap_or(0.0)
    }
}

/// Composite key of an appointment slot row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    /// The capacity stream id.
    pub stream_id: i64,
    /// Slot start time of day (e.g. `08:00`).
    pub start_time: String,
    /// Slot end time of day (e.g. `12:00`).
    pub end_time: String,
}

impl SlotKey {
    /// Creates a new `SlotKey`.
    #[must_use]
    pub fn new(stream_id: i64, start_time: &str, end_time: &str) -> Self {
        Self {
            stream_id,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "stream {} {}-{}",
            self.stream_id, self.start_time, self.end_time
        )
    }
}

/// One row of the appointment freeze table.
///
/// `days[d] == true` means the slot is frozen (unavailable) on `d`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSlotRow {
    /// The capacity stream id.
    pub stream_id: i64,
    /// The capacity stream name.
    pub name: String,
    /// Slot start time of day.
    pub start_time: String,
    /// Slot end time of day.
    pub end_time: String,
    /// Server-assigned slot id, once known.
    pub slot_id: Option<i64>,
    /// Frozen flag per day.
    pub days: BTreeMap<DayName, bool>,
    /// Disabled rows are read-only.
    pub disabled: bool,
}

impl AppointmentSlotRow {
    /// Creates an enabled, unfrozen row.
    #[must_use]
    pub fn new(stream_id: i64, name: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            stream_id,
            name: name.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            slot_id: None,
            days: full_week(false),
            disabled: false,
        }
    }

    /// Returns the composite key of this row.
    #[must_use]
    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.stream_id, &self.start_time, &self.end_time)
    }

    /// Returns whether the slot is frozen on `day`.
    #[must_use]
    pub fn is_frozen(&self, day: DayName) -> bool {
        self.days.get(&day).copied().unwrap_or(false)
    }
}

/// A configured appointment time window from the slot catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotWindow {
    /// Server-assigned slot id.
    pub slot_id: i64,
    /// Start time of day.
    pub start: String,
    /// End time of day.
    pub end: String,
}

/// The slot windows configured for one capacity stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSlots {
    /// The capacity stream name.
    pub stream_name: String,
    /// The slot windows.
    pub slots: Vec<SlotWindow>,
}

/// The slot catalog for one service territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritorySlots {
    /// The service territory id.
    pub territory_id: i64,
    /// The service territory name.
    pub territory_name: String,
    /// Slot windows per capacity stream.
    pub streams: Vec<StreamSlots>,
}
