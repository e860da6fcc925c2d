// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-territory outcome reporting after a bulk submit.
//!
//! Outcomes are matched to hierarchy territories by name. A territory failed
//! when its outcome message starts with `"Failure"`.

use capacity_domain::{LocationNode, State};
use serde::{Deserialize, Serialize};

/// Prefix marking a failed territory outcome.
pub const FAILURE_PREFIX: &str = "Failure";

/// The outcome of a submit for one territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryOutcome {
    /// The territory name.
    pub service_territory: String,
    /// The outcome message.
    pub message: String,
    /// The conflicting date ranges, if any.
    pub date_ranges: Vec<String>,
}

impl TerritoryOutcome {
    /// Returns whether this outcome is a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.message.starts_with(FAILURE_PREFIX)
    }
}

/// Overlap summary of a hierarchy node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlapInfo {
    /// Failed outcomes (territory) or failed territories (market, state).
    pub count: usize,
    /// Every conflicting date range below the node.
    pub date_ranges: Vec<String>,
}

/// Computes the overlap summary of a node.
///
/// For a territory, `count` is the number of failed outcomes with its name.
/// For a market, it is the number of failed territories. For a state, it is
/// the sum over its markets.
#[must_use]
pub fn overlap_info(node: LocationNode<'_>, outcomes: &[TerritoryOutcome]) -> OverlapInfo {
    match node {
        LocationNode::Territory(territory) => {
            let failed: Vec<&TerritoryOutcome> = outcomes
                .iter()
                .filter(|o| o.service_territory == territory.name && o.is_failure())
                .collect();
            OverlapInfo {
                count: failed.len(),
                date_ranges: failed
                    .iter()
                    .flat_map(|o| o.date_ranges.iter().cloned())
                    .collect(),
            }
        }
        LocationNode::Market(_) => node
            .children()
            .into_iter()
            .map(|child| overlap_info(child, outcomes))
            .filter(|info| info.count > 0)
            .fold(OverlapInfo::default(), |mut acc, info| {
                acc.count += 1;
                acc.date_ranges.extend(info.date_ranges);
                acc
            }),
        LocationNode::State(_) => node
            .children()
            .into_iter()
            .map(|child| overlap_info(child, outcomes))
            .fold(OverlapInfo::default(), |mut acc, info| {
                acc.count += info.count;
                acc.date_ranges.extend(info.date_ranges);
                acc
            }),
    }
}

/// Level of a node in the failure drill-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureLevel {
    State,
    Market,
    Territory,
    DateRange,
}

/// A node of the failure drill-down tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNode {
    /// Unique item id within the tree.
    pub id: String,
    /// The node level.
    pub level: FailureLevel,
    /// Display name (location name or date range).
    pub name: String,
    /// Summary label, empty for date ranges.
    pub label: String,
    /// Child nodes.
    pub children: Vec<Self>,
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

fn failure_node(node: LocationNode<'_>, outcomes: &[TerritoryOutcome]) -> Option<FailureNode> {
    let info: OverlapInfo = overlap_info(node, outcomes);
    if info.count == 0 {
        return None;
    }

    let id: String = node.id().to_string();
    let (level, label, children): (FailureLevel, String, Vec<FailureNode>) = match node {
        LocationNode::Territory(_) => (
            FailureLevel::Territory,
            format!(
                "{} with Overlap",
                plural(info.date_ranges.len(), "Date Range", "Date Ranges")
            ),
            info.date_ranges
                .iter()
                .enumerate()
                .map(|(index, range)| FailureNode {
                    id: format!("{id}-date-{index}"),
                    level: FailureLevel::DateRange,
                    name: range.clone(),
                    label: String::new(),
                    children: Vec::new(),
                })
                .collect(),
        ),
        LocationNode::Market(_) | LocationNode::State(_) => (
            match node {
                LocationNode::State(_) => FailureLevel::State,
                _ => FailureLevel::Market,
            },
            format!(
                "{} with Overlap",
                plural(info.count, "Territory", "Territories")
            ),
            node.children()
                .into_iter()
                .filter_map(|child| failure_node(child, outcomes))
                .collect(),
        ),
    };

    Some(FailureNode {
        id,
        level,
        name: node.name().to_string(),
        label,
        children,
    })
}

/// Builds the failure drill-down tree, keeping only nodes with failures.
#[must_use]
pub fn failure_tree(tree: &[State], outcomes: &[TerritoryOutcome]) -> Vec<FailureNode> {
    tree.iter()
        .filter_map(|state| failure_node(LocationNode::State(state), outcomes))
        .collect()
}

/// One row of the flattened failure report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRow {
    pub state: String,
    pub market: String,
    pub territory: String,
    pub date_range: String,
}

/// Flattens failures into one row per conflicting date range.
#[must_use]
pub fn failure_rows(tree: &[State], outcomes: &[TerritoryOutcome]) -> Vec<FailureRow> {
    let mut rows: Vec<FailureRow> = Vec::new();
    for state in tree {
        for market in &state.markets {
            for territory in &market.service_territories {
                for outcome in outcomes
                    .iter()
                    .filter(|o| o.service_territory == territory.name && o.is_failure())
                {
                    rows.extend(outcome.date_ranges.iter().map(|range| FailureRow {
                        state: state.name.clone(),
                        market: market.name.clone(),
                        territory: territory.name.clone(),
                        date_range: range.clone(),
                    }));
                }
            }
        }
    }
    rows
}
