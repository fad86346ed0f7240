//! Per-screen edge occupancy.
//!
//! Every screen has four edges and each edge can hold at most one view.  The
//! [`OccupancyMap`] records which view claimed which edge while a placement
//! pass is running; [`free_edges`] and [`available_edges_for_view`] answer the
//! same question for an already placed set of views.
//!
//! Results are always returned in [`EDGE_PRIORITY`] order so callers can take
//! the first free edge as "the best one left".

use std::collections::BTreeMap;

use super::edge::{Edge, EDGE_PRIORITY};
use super::view::{PlacedView, ViewId};

/// Screen connector → edge → the view that claimed it.
///
/// A `(connector, edge)` pair is claimed at most once: [`OccupancyMap::claim`]
/// refuses to overwrite an existing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyMap {
    screens: BTreeMap<String, BTreeMap<Edge, ViewId>>,
}

impl OccupancyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `(connector, edge)` for `view`.
    ///
    /// Returns `false` and leaves the map untouched when the edge is already
    /// claimed.
    pub fn claim(&mut self, connector: &str, edge: Edge, view: ViewId) -> bool {
        let edges = self.screens.entry(connector.to_string()).or_default();
        if edges.contains_key(&edge) {
            return false;
        }
        edges.insert(edge, view);
        true
    }

    pub fn is_claimed(&self, connector: &str, edge: Edge) -> bool {
        self.occupant(connector, edge).is_some()
    }

    /// The view holding `(connector, edge)`, if any.
    pub fn occupant(&self, connector: &str, edge: Edge) -> Option<ViewId> {
        self.screens.get(connector).and_then(|edges| edges.get(&edge)).copied()
    }

    /// Returns `true` if `view` holds any edge on any screen.
    pub fn contains_view(&self, view: ViewId) -> bool {
        self.screens.values().any(|edges| edges.values().any(|v| *v == view))
    }

    /// The `(connector, edge)` held by `view`.
    pub fn placement_of(&self, view: ViewId) -> Option<(&str, Edge)> {
        self.screens.iter().find_map(|(connector, edges)| {
            edges
                .iter()
                .find(|(_, v)| **v == view)
                .map(|(edge, _)| (connector.as_str(), *edge))
        })
    }

    /// Every claimed `(connector, edge, view)` triple.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Edge, ViewId)> + '_ {
        self.screens.iter().flat_map(|(connector, edges)| {
            edges.iter().map(move |(edge, view)| (connector.as_str(), *edge, *view))
        })
    }

    /// Number of claimed edges across all screens.
    pub fn len(&self) -> usize {
        self.screens.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Edges of `connector` not held by any view in `views`.
pub fn free_edges<'a, I>(views: I, connector: &str) -> Vec<Edge>
where
    I: IntoIterator<Item = &'a PlacedView>,
{
    edges_left(views, connector, None)
}

/// Edges of `connector` that `exclude` could move to.
///
/// Same as [`free_edges`] but the view's own edge counts as free.
pub fn available_edges_for_view<'a, I>(views: I, connector: &str, exclude: ViewId) -> Vec<Edge>
where
    I: IntoIterator<Item = &'a PlacedView>,
{
    edges_left(views, connector, Some(exclude))
}

fn edges_left<'a, I>(views: I, connector: &str, exclude: Option<ViewId>) -> Vec<Edge>
where
    I: IntoIterator<Item = &'a PlacedView>,
{
    let mut edges = EDGE_PRIORITY.to_vec();
    for view in views {
        if view.connector == connector && Some(view.id) != exclude {
            edges.retain(|edge| *edge != view.edge);
        }
    }
    edges
}
