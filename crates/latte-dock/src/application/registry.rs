//! The view registry.
//!
//! Every view the layout knows about lives in exactly one entry, keyed by its
//! [`ViewId`], and carries an explicit [`ViewState`] tag.  Moving a view from
//! "active" to "waiting" is a tag change, never a remove-from-one-list,
//! insert-into-another dance, so a view can never be in two states at once.
//!
//! # View lifecycle (for beginners)
//!
//! ```text
//!            destroyed_changed(true)
//!   Active ─────────────────────────► Waiting
//!     │  ◄─────────────────────────────
//!     │      destroyed_changed(false)
//!     │
//!     │ recreate_view
//!     ▼
//!   Scheduled ──► Destroying ──► Recreating ──► (removed, placed again)
//! ```
//!
//! - `Active`: the window exists and counts for edge occupancy.
//! - `Waiting`: the containment was marked destroyed but can still be
//!   restored (undo); its window is kept but ignored.
//! - `Scheduled` / `Destroying`: a recreation was requested; the old window
//!   still exists and still holds its edge.
//! - `Recreating`: the old window is gone and the layout waits for the
//!   settle delay before placing the view again.

use std::collections::BTreeMap;

use latte_core::{Edge, PlacedView, ViewId};

/// Step of a pending view recreation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecreatePhase {
    Scheduled,
    Destroying,
    Recreating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Active,
    Waiting,
    PendingRecreate(RecreatePhase),
}

impl ViewState {
    /// The view has a window that occupies its edge.
    pub fn is_live(self) -> bool {
        matches!(
            self,
            ViewState::Active
                | ViewState::PendingRecreate(RecreatePhase::Scheduled)
                | ViewState::PendingRecreate(RecreatePhase::Destroying)
        )
    }

    /// The host still holds a window for the view.
    pub fn has_window(self) -> bool {
        self != ViewState::PendingRecreate(RecreatePhase::Recreating)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub view: PlacedView,
    pub state: ViewState,
}

/// Owned registry of every view of a layout.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    entries: BTreeMap<ViewId, ViewEntry>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `view` in `state`.
    ///
    /// Returns `false` and leaves the registry untouched if the id is already
    /// registered.
    pub fn insert(&mut self, view: PlacedView, state: ViewState) -> bool {
        if self.entries.contains_key(&view.id) {
            return false;
        }
        self.entries.insert(view.id, ViewEntry { view, state });
        true
    }

    pub fn remove(&mut self, id: ViewId) -> Option<ViewEntry> {
        self.entries.remove(&id)
    }

    pub fn get(&self, id: ViewId) -> Option<&ViewEntry> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut ViewEntry> {
        self.entries.get_mut(&id)
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn state(&self, id: ViewId) -> Option<ViewState> {
        self.entries.get(&id).map(|entry| entry.state)
    }

    /// Changes the state of `id`.  Returns `false` if `id` is unknown.
    pub fn set_state(&mut self, id: ViewId, state: ViewState) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.state = state;
                true
            }
            None => false,
        }
    }

    /// The placed view of `id`, if it is live.
    pub fn live(&self, id: ViewId) -> Option<&PlacedView> {
        self.entries
            .get(&id)
            .filter(|entry| entry.state.is_live())
            .map(|entry| &entry.view)
    }

    pub fn live_views(&self) -> impl Iterator<Item = &PlacedView> + '_ {
        self.entries
            .values()
            .filter(|entry| entry.state.is_live())
            .map(|entry| &entry.view)
    }

    pub fn live_ids(&self) -> Vec<ViewId> {
        self.live_views().map(|view| view.id).collect()
    }

    pub fn waiting_ids(&self) -> Vec<ViewId> {
        self.entries
            .values()
            .filter(|entry| entry.state == ViewState::Waiting)
            .map(|entry| entry.view.id)
            .collect()
    }

    /// The live view holding `(connector, edge)`.
    pub fn occupant(&self, connector: &str, edge: Edge) -> Option<ViewId> {
        self.live_views()
            .find(|view| view.connector == connector && view.edge == edge)
            .map(|view| view.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewEntry> + '_ {
        self.entries.values()
    }

    /// Removes every entry and returns them.
    pub fn drain(&mut self) -> Vec<ViewEntry> {
        std::mem::take(&mut self.entries).into_values().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use latte_core::{ScreenId, ViewSpec};

    fn placed(id: u32, edge: Edge) -> PlacedView {
        PlacedView::bind(&ViewSpec::explicit(id, ScreenId(0), edge), "DP-1")
    }

    #[test]
    fn test_insert_refuses_duplicate_id() {
        let mut registry = ViewRegistry::new();
        assert!(registry.insert(placed(1, Edge::Bottom), ViewState::Active));
        assert!(!registry.insert(placed(1, Edge::Top), ViewState::Waiting));
        assert_eq!(registry.state(ViewId(1)), Some(ViewState::Active));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_waiting_views_are_not_live() {
        // Arrange
        let mut registry = ViewRegistry::new();
        registry.insert(placed(1, Edge::Bottom), ViewState::Active);
        registry.insert(placed(2, Edge::Left), ViewState::Waiting);

        // Act
        let live = registry.live_ids();

        // Assert
        assert_eq!(live, vec![ViewId(1)]);
        assert_eq!(registry.waiting_ids(), vec![ViewId(2)]);
        assert!(registry.live(ViewId(2)).is_none());
    }

    #[test]
    fn test_pending_recreate_is_live_until_window_is_gone() {
        assert!(ViewState::PendingRecreate(RecreatePhase::Scheduled).is_live());
        assert!(ViewState::PendingRecreate(RecreatePhase::Destroying).is_live());
        assert!(!ViewState::PendingRecreate(RecreatePhase::Recreating).is_live());
        assert!(!ViewState::PendingRecreate(RecreatePhase::Recreating).has_window());
        assert!(ViewState::Waiting.has_window());
    }

    #[test]
    fn test_occupant_ignores_non_live_views() {
        let mut registry = ViewRegistry::new();
        registry.insert(placed(1, Edge::Bottom), ViewState::Waiting);
        assert_eq!(registry.occupant("DP-1", Edge::Bottom), None);

        registry.set_state(ViewId(1), ViewState::Active);
        assert_eq!(registry.occupant("DP-1", Edge::Bottom), Some(ViewId(1)));
    }

    #[test]
    fn test_set_state_on_unknown_id_is_rejected() {
        let mut registry = ViewRegistry::new();
        assert!(!registry.set_state(ViewId(9), ViewState::Active));
    }

    #[test]
    fn test_drain_empties_registry() {
        let mut registry = ViewRegistry::new();
        registry.insert(placed(1, Edge::Bottom), ViewState::Active);
        registry.insert(placed(2, Edge::Top), ViewState::Waiting);

        let drained = registry.drain();

        assert_eq!(drained.len(), 2);
        assert!(registry.is_empty());
    }
}
