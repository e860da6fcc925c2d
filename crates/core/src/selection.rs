// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hierarchy selection over the State → Market → Territory tree.
//!
//! A selection is a flat set of node ids. Full selection of a parent is
//! recorded explicitly: the parent id plus every descendant id. Partial
//! selection is never stored; it is derived by [`is_indeterminate`].
//!
//! ## Invariants
//!
//! - An indeterminate node is never a member of the selection
//! - After [`toggle`], a state or market is a member exactly when all of its
//!   children are members

use capacity_domain::{FilterSelection, LocationNode, NodeId, State};
use std::collections::BTreeSet;

/// A set of selected hierarchy nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    nodes: BTreeSet<NodeId>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: BTreeSet::new(),
        }
    }

    /// Returns whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains(id)
    }

    /// Adds `id` to the selection.
    pub fn insert(&mut self, id: NodeId) {
        self.nodes.insert(id);
    }

    /// Removes `id` from the selection.
    pub fn remove(&mut self, id: &NodeId) {
        self.nodes.remove(id);
    }

    /// Returns the number of selected nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates the selected ids in order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter()
    }
}

impl FromIterator<NodeId> for Selection {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

/// Tri-state checkbox value of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxState {
    Checked,
    Indeterminate,
    Unchecked,
}

/// Returns whether a node is partially selected.
///
/// A market is indeterminate when some but not all of its territories are
/// selected. A state is indeterminate when some but not all of its markets are
/// selected, or when any of its markets is itself indeterminate. Territories
/// are never indeterminate.
#[must_use]
pub fn is_indeterminate(node: LocationNode<'_>, selection: &Selection) -> bool {
    match node {
        LocationNode::State(state) => {
            let total: usize = state.markets.len();
            let selected: usize = state
                .markets
                .iter()
                .filter(|market| selection.contains(&NodeId::name(&market.name)))
                .count();
            let partial: bool = selected > 0 && selected < total;
            partial
                || state
                    .markets
                    .iter()
                    .any(|market| is_indeterminate(LocationNode::Market(market), selection))
        }
        LocationNode::Market(market) => {
            let total: usize = market.service_territories.len();
            let selected: usize = market
                .service_territories
                .iter()
                .filter(|territory| selection.contains(&NodeId::Territory(territory.id)))
                .count();
            selected > 0 && selected < total
        }
        LocationNode::Territory(_) => false,
    }
}

/// Computes the checkbox state of a node.
#[must_use]
pub fn checkbox_state(node: LocationNode<'_>, selection: &Selection) -> CheckboxState {
    if selection.contains(&node.id()) {
        CheckboxState::Checked
    } else if is_indeterminate(node, selection) {
        CheckboxState::Indeterminate
    } else {
        CheckboxState::Unchecked
    }
}

/// Checks or unchecks a node and propagates the change through the tree.
///
/// The matched node and all of its descendants take the new value. Every
/// ancestor then re-derives its own membership: it is selected when all of its
/// children are selected and deselected otherwise.
///
/// # Arguments
///
/// * `target` - The id of the toggled node
/// * `checked` - The new checkbox value
/// * `tree` - The location hierarchy
/// * `selection` - The current selection (unchanged)
#[must_use]
pub fn toggle(target: &NodeId, checked: bool, tree: &[State], selection: &Selection) -> Selection {
    let mut next: Selection = selection.clone();
    for state in tree {
        toggle_node(LocationNode::State(state), target, checked, &mut next);
    }
    next
}

fn toggle_node(node: LocationNode<'_>, target: &NodeId, checked: bool, selection: &mut Selection) {
    if node.id() == *target {
        set_subtree(node, checked, selection);
        return;
    }

    let children: Vec<LocationNode<'_>> = node.children();
    if children.is_empty() {
        return;
    }

    for child in &children {
        toggle_node(*child, target, checked, selection);
    }

    let all_selected: bool = children
        .iter()
        .all(|child| selection.contains(&child.id()));
    if all_selected {
        selection.insert(node.id());
    } else {
        selection.remove(&node.id());
    }
}

fn set_subtree(node: LocationNode<'_>, checked: bool, selection: &mut Selection) {
    if checked {
        selection.insert(node.id());
    } else {
        selection.remove(&node.id());
    }
    for child in node.children() {
        set_subtree(child, checked, selection);
    }
}

/// Builds the selection shown when the bulk drawer opens.
///
/// The active filter location is preselected: its state, its market within
/// that state, and its territory within that market.
#[must_use]
pub fn initial_selection(tree: &[State], filter: &FilterSelection) -> Selection {
    let mut selection: Selection = Selection::new();
    for state in tree.iter().filter(|state| state.name == filter.state) {
        selection.insert(NodeId::name(&state.name));
        for market in state.markets.iter().filter(|m| m.name == filter.market) {
            selection.insert(NodeId::name(&market.name));
            for territory in market
                .service_territories
                .iter()
                .filter(|t| t.name == filter.territory)
            {
                selection.insert(NodeId::Territory(territory.id));
            }
        }
    }
    selection
}

/// Returns whether a node's checkbox is read-only.
///
/// Everything is read-only in response view. Otherwise the active state,
/// market and territory of the main filter are locked.
#[must_use]
pub fn is_node_disabled(
    node: LocationNode<'_>,
    filter: &FilterSelection,
    response_view: bool,
) -> bool {
    if response_view {
        return true;
    }
    match node {
        LocationNode::State(state) => state.name == filter.state,
        LocationNode::Market(market) => market.name == filter.market,
        LocationNode::Territory(territory) => territory.name == filter.territory,
    }
}

/// Filters the tree down to the selected territories.
///
/// A territory is kept when it is selected, a market when any of its
/// territories is kept, a state when any of its markets is kept. Market and
/// state membership alone keeps nothing.
#[must_use]
pub fn selected_locations(tree: &[State], selection: &Selection) -> Vec<State> {
    tree.iter()
        .map(|state| State {
            name: state.name.clone(),
            markets: state
                .markets
                .iter()
                .map(|market| capacity_domain::Market {
                    name: market.name.clone(),
                    service_territories: market
                        .service_territories
                        .iter()
                        .filter(|t| selection.contains(&NodeId::Territory(t.id)))
                        .cloned()
                        .collect(),
                })
                .filter(|market| !market.service_territories.is_empty())
                .collect(),
        })
        .filter(|state| !state.markets.is_empty())
        .collect()
}

/// Collects every territory id in traversal order, skipping `exclude`.
#[must_use]
pub fn extract_territory_ids(tree: &[State], exclude: Option<i64>) -> Vec<i64> {
    tree.iter()
        .flat_map(|state| state.markets.iter())
        .flat_map(|market| market.service_territories.iter())
        .map(|territory| territory.id)
        .filter(|id| Some(*id) != exclude)
        .collect()
}

/// Returns the territory ids a bulk submit applies to, excluding `home`.
#[must_use]
pub fn bulk_territory_ids(tree: &[State], selection: &Selection, home: Option<i64>) -> Vec<i64> {
    extract_territory_ids(&selected_locations(tree, selection), home)
}
