//! GenericLayout: the views of one layout and where they live.
//!
//! A *layout* is a named set of containments (the user's docks and panels).
//! The [`GenericLayout`] owns their configuration, the registry of views that
//! were created for them, and the current screen topology.  Everything that
//! decides where a view goes is implemented on it:
//!
//! - [`placement`] – `add_view`, the placement policy for a single view.
//! - [`reconcile`] – `sync_views_to_screens`, run after every screen change.
//! - [`recreate`]  – the two-phase destroy-then-recreate state machine.
//!
//! This module holds the state itself and the housekeeping operations: adding
//! and removing containments, moving views between layouts, renaming, and the
//! read-only queries used by shortcuts and the settings UI.
//!
//! # Events
//!
//! Instead of signals, the layout queues [`LayoutEvent`]s.  The owner drains
//! them with [`GenericLayout::take_events`] after each operation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use latte_core::{
    available_edges_for_view, free_edges, sort_by_priority, Edge, PlacedView, ScreenId,
    ScreenPool, ScreenTopology, ViewId, ViewSpec,
};

use super::host::ViewHost;
use super::registry::{ViewRegistry, ViewState};

pub mod placement;
pub mod reconcile;
pub mod recreate;

pub use placement::PlacementError;
pub use reconcile::SyncReport;

/// How containments are shared between layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryUsage {
    /// One layout is loaded at a time and owns every containment.
    #[default]
    Single,
    /// Several layouts are loaded together; a containment belongs to the
    /// layout named by its `layout_id`.
    Multiple,
}

/// Delays of the recreation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutTimings {
    /// Wait before a delayed recreation tears the old window down.
    pub recreate_delay: Duration,
    /// Wait after the old window is gone before the view is placed again.
    pub recreate_settle: Duration,
}

impl Default for LayoutTimings {
    fn default() -> Self {
        Self {
            recreate_delay: Duration::from_millis(350),
            recreate_settle: Duration::from_millis(250),
        }
    }
}

/// Notifications queued by the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutEvent {
    /// The number of live views changed.
    ViewsCountChanged,
    /// A view's edge may have changed; free-edge queries should be refreshed.
    ViewEdgeChanged,
    LastConfigViewChanged(Option<ViewId>),
}

/// A view and its containments detached from a layout, ready to be assigned
/// to another one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedView {
    pub view: PlacedView,
    pub containments: Vec<ViewSpec>,
}

/// The views of one layout.
pub struct GenericLayout<H: ViewHost> {
    name: String,
    memory_usage: MemoryUsage,
    containments: Vec<ViewSpec>,
    registry: ViewRegistry,
    topology: ScreenTopology,
    pool: ScreenPool,
    host: H,
    timings: LayoutTimings,
    last_config_view: Option<ViewId>,
    block_automatic_creation: bool,
    events: Vec<LayoutEvent>,
}

impl<H: ViewHost> GenericLayout<H> {
    pub fn new(name: impl Into<String>, memory_usage: MemoryUsage, host: H, timings: LayoutTimings) -> Self {
        Self {
            name: name.into(),
            memory_usage,
            containments: Vec::new(),
            registry: ViewRegistry::new(),
            topology: ScreenTopology::empty(),
            pool: ScreenPool::new(),
            host,
            timings,
            last_config_view: None,
            block_automatic_creation: false,
            events: Vec::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn memory_usage(&self) -> MemoryUsage {
        self.memory_usage
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn topology(&self) -> &ScreenTopology {
        &self.topology
    }

    pub fn pool(&self) -> &ScreenPool {
        &self.pool
    }

    /// Mutable pool access, so the owner can seed ids from stored config.
    pub fn pool_mut(&mut self) -> &mut ScreenPool {
        &mut self.pool
    }

    pub fn timings(&self) -> LayoutTimings {
        self.timings
    }

    pub fn containments(&self) -> &[ViewSpec] {
        &self.containments
    }

    pub fn containment(&self, id: ViewId) -> Option<&ViewSpec> {
        self.containments.iter().find(|spec| spec.id == id)
    }

    fn containment_mut(&mut self, id: ViewId) -> Option<&mut ViewSpec> {
        self.containments.iter_mut().find(|spec| spec.id == id)
    }

    /// Drains queued notifications.
    pub fn take_events(&mut self) -> Vec<LayoutEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Screens ───────────────────────────────────────────────────────────────

    /// Installs a new screen topology without reconciling views.
    pub fn set_topology(&mut self, topology: ScreenTopology) {
        self.pool.register_topology(&topology);
        self.topology = topology;
    }

    /// Installs a new screen topology and reconciles views against it.
    pub fn update_topology(&mut self, topology: ScreenTopology) -> SyncReport {
        self.set_topology(topology);
        self.sync_views_to_screens(None)
    }

    // ── Containments ──────────────────────────────────────────────────────────

    /// Associates a containment with this layout and places its view.
    ///
    /// With [`MemoryUsage::Multiple`] only containments whose `layout_id` names
    /// this layout are accepted.  Returns `true` if the containment joined the
    /// layout.
    pub fn add_containment(&mut self, spec: ViewSpec) -> bool {
        if self.containment(spec.id).is_some() {
            return false;
        }

        let belongs = match self.memory_usage {
            MemoryUsage::Single => true,
            MemoryUsage::Multiple => spec.layout_id.as_deref() == Some(self.name.as_str()),
        };
        if !belongs {
            return false;
        }

        let id = spec.id;
        self.containments.push(spec);

        if self.block_automatic_creation {
            debug!(containment = %id, "delaying view creation");
        } else if let Err(e) = self.add_view(id, Default::default()) {
            debug!("view for containment {id} not placed: {e}");
        }
        true
    }

    /// Forgets a destroyed containment and tears its view down.
    pub fn containment_destroyed(&mut self, id: ViewId) {
        self.containments.retain(|spec| spec.id != id);

        if let Some(entry) = self.registry.remove(id) {
            if entry.state.has_window() {
                self.host.destroy_view(id);
            }
            info!(layout = %self.name, containment = %id, "containment destroyed");
            self.events.push(LayoutEvent::ViewEdgeChanged);
            self.events.push(LayoutEvent::ViewsCountChanged);
        }
    }

    /// Moves a view between the active and waiting states when its
    /// containment is marked (or unmarked) as destroyed.
    pub fn destroyed_changed(&mut self, id: ViewId, destroyed: bool) {
        let (from, to) = if destroyed {
            (ViewState::Active, ViewState::Waiting)
        } else {
            (ViewState::Waiting, ViewState::Active)
        };

        if self.registry.state(id) != Some(from) {
            debug!(containment = %id, destroyed, "ignoring destroyed change for view in another state");
            return;
        }

        self.registry.set_state(id, to);
        self.events.push(LayoutEvent::ViewEdgeChanged);
        self.events.push(LayoutEvent::ViewsCountChanged);
    }

    /// Destroys every view of the layout, active or waiting.
    pub fn unload_views(&mut self) {
        info!(layout = %self.name, views = self.registry.len(), "unloading views");
        for entry in self.registry.drain() {
            if entry.state.has_window() {
                self.host.destroy_view(entry.view.id);
            }
        }
    }

    pub fn block_automatic_view_creation(&self) -> bool {
        self.block_automatic_creation
    }

    pub fn set_block_automatic_view_creation(&mut self, block: bool) {
        self.block_automatic_creation = block;
    }

    // ── Moving views between layouts ──────────────────────────────────────────

    /// Adopts a view and its containments detached from another layout.
    ///
    /// Every containment is written with this layout's name.
    pub fn assign_view(&mut self, detached: DetachedView) {
        let DetachedView { view, containments } = detached;

        for mut spec in containments {
            spec.layout_id = Some(self.name.clone());
            if let Some(existing) = self.containment_mut(spec.id) {
                *existing = spec;
            } else {
                self.containments.push(spec);
            }
        }

        if self.registry.insert(view, ViewState::Active) {
            self.events.push(LayoutEvent::ViewsCountChanged);
        }
    }

    /// Detaches a view and its containment from this layout without
    /// destroying its window.
    pub fn unassign_view(&mut self, id: ViewId) -> Option<DetachedView> {
        let entry = self.registry.remove(id)?;
        let containments: Vec<ViewSpec> = self.containments.iter().filter(|spec| spec.id == id).cloned().collect();
        self.containments.retain(|spec| spec.id != id);
        self.events.push(LayoutEvent::ViewsCountChanged);

        Some(DetachedView {
            view: entry.view,
            containments,
        })
    }

    /// Renames the layout and rewrites `layout_id` on all its containments.
    ///
    /// Only layouts loaded with [`MemoryUsage::Multiple`] can be renamed;
    /// returns `false` otherwise.
    pub fn rename_layout(&mut self, new_name: impl Into<String>) -> bool {
        if self.memory_usage != MemoryUsage::Multiple {
            return false;
        }

        self.name = new_name.into();
        for spec in &mut self.containments {
            spec.layout_id = Some(self.name.clone());
        }
        true
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// Returns `true` if a live view exists for `id`.
    pub fn view_exists(&self, id: ViewId) -> bool {
        self.registry.live(id).is_some()
    }

    pub fn views_count(&self) -> usize {
        self.registry.live_views().count()
    }

    pub fn views_count_on(&self, connector: &str) -> usize {
        self.registry.live_views().filter(|view| view.connector == connector).count()
    }

    /// Edges of `connector` not used by any live view, in priority order.
    pub fn free_edges(&self, connector: &str) -> Vec<Edge> {
        free_edges(self.registry.live_views(), connector)
    }

    /// Edges of `connector` that `view` could move to.
    pub fn available_edges_for_view(&self, connector: &str, view: ViewId) -> Vec<Edge> {
        available_edges_for_view(self.registry.live_views(), connector, view)
    }

    /// Live views in shortcut priority order.
    pub fn sorted_views(&self) -> Vec<&PlacedView> {
        sort_by_priority(self.registry.live_views(), &self.topology)
    }

    pub fn highest_priority_view(&self) -> Option<&PlacedView> {
        self.sorted_views().into_iter().next()
    }

    /// Returns `true` if a containment that follows the primary screen is
    /// configured for `edge`.
    pub fn primary_dock_occupies_edge(&self, edge: Edge) -> bool {
        self.containments
            .iter()
            .any(|spec| spec.dock_capable && spec.on_primary && spec.edge == edge)
    }

    /// Returns `true` if a containment explicitly bound to `screen` is
    /// configured for `edge`.
    pub fn explicit_dock_occupies_edge(&self, screen: ScreenId, edge: Edge) -> bool {
        self.containments.iter().any(|spec| {
            spec.dock_capable && !spec.on_primary && spec.last_screen == Some(screen) && spec.edge == edge
        })
    }

    /// The view whose settings window was opened last.
    ///
    /// Cleared when that view no longer exists.
    pub fn last_config_view(&mut self) -> Option<ViewId> {
        if let Some(id) = self.last_config_view {
            if !self.view_exists(id) {
                self.last_config_view = None;
            }
        }
        self.last_config_view
    }

    pub fn set_last_config_view(&mut self, view: Option<ViewId>) {
        if self.last_config_view == view {
            return;
        }
        self.last_config_view = view;
        self.events.push(LayoutEvent::LastConfigViewChanged(view));
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Destroys the window of a live view and forgets it.
    ///
    /// The containment keeps its last screen so the view can come back when
    /// that screen returns.
    fn tear_down(&mut self, id: ViewId) {
        if self.registry.remove(id).is_none() {
            return;
        }
        self.host.destroy_view(id);
        if let Some(spec) = self.containment_mut(id) {
            spec.screen = None;
        }
    }
}
