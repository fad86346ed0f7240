//! View placement requests and placed views.
//!
//! A [`ViewSpec`] is what the user configured for a containment: which screen
//! it wants, which edge, whether it follows the primary screen.  Once the
//! placement policy accepts it, the layout binds it to a concrete connector
//! and edge and keeps a [`PlacedView`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::edge::Edge;
use super::occupancy::OccupancyMap;
use super::screen::ScreenId;

/// Identity of a view, shared with the containment that backs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewId(pub u32);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a view reacts to windows that overlap it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisibilityMode {
    AlwaysVisible,
    AutoHide,
    #[default]
    DodgeActive,
    DodgeMaximized,
    DodgeAllWindows,
    WindowsGoBelow,
    WindowsCanCover,
    WindowsAlwaysCover,
}

impl VisibilityMode {
    /// Modes in which the view reserves screen space and therefore always
    /// stays under window manager control.
    pub fn forces_window_manager(self) -> bool {
        matches!(self, VisibilityMode::AlwaysVisible | VisibilityMode::WindowsGoBelow)
    }
}

/// Configuration of one containment as seen by the placement policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSpec {
    pub id: ViewId,
    /// Screen the containment is currently assigned to, if any.
    pub screen: Option<ScreenId>,
    /// Screen the containment was last shown on.  Survives teardown.
    pub last_screen: Option<ScreenId>,
    /// Follow whichever screen is primary instead of an explicit screen.
    pub on_primary: bool,
    pub edge: Edge,
    pub visibility: VisibilityMode,
    /// Requested bypass of the window manager.  Ignored for modes that
    /// reserve screen space.
    pub by_pass_wm: bool,
    pub preferred_for_shortcuts: bool,
    /// Only dock-capable containments can host a view.
    pub dock_capable: bool,
    /// Layout this containment was written to, used when several layouts
    /// share one applets file.
    pub layout_id: Option<String>,
}

impl ViewSpec {
    /// A dock-capable containment that follows the primary screen at `edge`.
    pub fn on_primary(id: u32, edge: Edge) -> Self {
        Self {
            id: ViewId(id),
            screen: None,
            last_screen: None,
            on_primary: true,
            edge,
            visibility: VisibilityMode::default(),
            by_pass_wm: false,
            preferred_for_shortcuts: false,
            dock_capable: true,
            layout_id: None,
        }
    }

    /// A dock-capable containment bound to an explicit screen at `edge`.
    pub fn explicit(id: u32, screen: ScreenId, edge: Edge) -> Self {
        Self {
            screen: Some(screen),
            last_screen: Some(screen),
            on_primary: false,
            ..Self::on_primary(id, edge)
        }
    }

    pub fn with_preferred_for_shortcuts(mut self, preferred: bool) -> Self {
        self.preferred_for_shortcuts = preferred;
        self
    }

    pub fn with_visibility(mut self, visibility: VisibilityMode) -> Self {
        self.visibility = visibility;
        self
    }

    /// The current screen, falling back to the last known one.
    pub fn effective_screen(&self) -> Option<ScreenId> {
        self.screen.or(self.last_screen)
    }

    /// Bypass flag actually applied to a placed view.
    pub fn effective_by_pass_wm(&self) -> bool {
        !self.visibility.forces_window_manager() && self.by_pass_wm
    }
}

/// Caller-supplied overrides for a single placement attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementRequest<'a> {
    /// Place on the primary screen regardless of the containment's
    /// configuration and mark the view as following the primary.
    pub force_on_primary: bool,
    /// Screen to use instead of the containment's own screen.
    pub explicit_screen: Option<ScreenId>,
    /// Edges already claimed by other layouts.
    pub occupied: Option<&'a OccupancyMap>,
}

impl<'a> PlacementRequest<'a> {
    pub fn forced_on_primary() -> Self {
        Self {
            force_on_primary: true,
            ..Self::default()
        }
    }

    pub fn on_screen(screen: ScreenId) -> Self {
        Self {
            explicit_screen: Some(screen),
            ..Self::default()
        }
    }

    pub fn with_occupied(mut self, occupied: &'a OccupancyMap) -> Self {
        self.occupied = Some(occupied);
        self
    }
}

/// A view bound to a concrete screen connector and edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedView {
    pub id: ViewId,
    pub connector: String,
    pub edge: Edge,
    pub on_primary: bool,
    pub preferred_for_shortcuts: bool,
    pub by_pass_wm: bool,
    pub visibility: VisibilityMode,
}

impl PlacedView {
    /// Binds `spec` to `connector`, keeping its edge and flags.
    pub fn bind(spec: &ViewSpec, connector: impl Into<String>) -> Self {
        Self {
            id: spec.id,
            connector: connector.into(),
            edge: spec.edge,
            on_primary: spec.on_primary,
            preferred_for_shortcuts: spec.preferred_for_shortcuts,
            by_pass_wm: spec.effective_by_pass_wm(),
            visibility: spec.visibility,
        }
    }
}
