//! Ghost edge windows.
//!
//! When a view auto-hides it slides off screen, but something still has to
//! notice the mouse touching that edge.  A *ghost* window is a thin, invisible
//! strip glued to the screen edge under the hidden view: when the pointer
//! enters it, the view is revealed.
//!
//! This module only computes the strip's geometry and tracks hover state.
//! Creating the actual window is the host's job.
//!
//! Rectangles use inclusive edges: `right() = x + width - 1` and
//! `bottom() = y + height - 1`, which is what the windowing system reports.

use std::time::Duration;

use super::edge::{Edge, FormFactor};

/// Thickness of the ghost strip when a compositor is running.
pub const COMPOSITED_THICKNESS: i32 = 4;
/// Thickness without compositing, where a thicker strip would be visible.
pub const PLAIN_THICKNESS: i32 = 2;
/// Default hover debounce.
pub const DEFAULT_HOVER_DEBOUNCE: Duration = Duration::from_millis(50);

/// Axis-aligned rectangle in global screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }
}

/// Strip thickness for the current compositing state.
pub fn ghost_thickness(compositing: bool) -> i32 {
    if compositing {
        COMPOSITED_THICKNESS
    } else {
        PLAIN_THICKNESS
    }
}

/// Geometry of the ghost strip for a view at `edge`.
///
/// `view` is the view's absolute geometry, `screen` the geometry of the screen
/// it lives on.
pub fn ghost_geometry(edge: Edge, view: Rect, screen: Rect, compositing: bool) -> Rect {
    let thickness = ghost_thickness(compositing);

    let (x, y) = match edge {
        Edge::Bottom => (view.left(), screen.bottom() - thickness),
        Edge::Top => (view.left(), screen.top()),
        Edge::Left => (screen.left(), view.top()),
        Edge::Right => (screen.right() - thickness, view.top()),
    };

    let (width, height) = match edge.form_factor() {
        FormFactor::Horizontal => (view.width.min(screen.width - 1), thickness + 1),
        FormFactor::Vertical => (thickness + 1, view.height.min(screen.height - 1)),
    };

    Rect::new(x, y, width, height)
}

/// Input mask applied to the ghost window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GhostMask {
    /// The whole strip receives input.
    #[default]
    None,
    /// A single pixel mask, so the strip ignores the pointer.
    SinglePixel,
}

/// Debounces pointer enter/leave on the ghost strip.
///
/// Every enter or leave records the latest pending state and arms a one-shot
/// timer if none is running.  When the timer fires, the pending state becomes
/// the reported state.
#[derive(Debug, Clone)]
pub struct HoverDebounce {
    interval: Duration,
    hovered: bool,
    pending: bool,
    armed: bool,
}

impl HoverDebounce {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            hovered: false,
            pending: false,
            armed: false,
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Pointer entered.  Returns the delay to arm, if the timer was idle.
    pub fn enter(&mut self) -> Option<Duration> {
        self.record(true)
    }

    /// Pointer left.  Returns the delay to arm, if the timer was idle.
    pub fn leave(&mut self) -> Option<Duration> {
        self.record(false)
    }

    /// Timer fired.  Returns the new hover state if it changed.
    pub fn elapsed(&mut self) -> Option<bool> {
        self.armed = false;
        if self.pending == self.hovered {
            return None;
        }
        self.hovered = self.pending;
        Some(self.hovered)
    }

    fn record(&mut self, hovered: bool) -> Option<Duration> {
        self.pending = hovered;
        if self.armed {
            return None;
        }
        self.armed = true;
        Some(self.interval)
    }
}

impl Default for HoverDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_HOVER_DEBOUNCE)
    }
}

/// State of one ghost window.
#[derive(Debug, Clone)]
pub struct GhostWindow {
    edge: Edge,
    compositing: bool,
    geometry: Option<Rect>,
    mask: GhostMask,
    pub hover: HoverDebounce,
}

impl GhostWindow {
    pub fn new(edge: Edge, compositing: bool, hover_debounce: Duration) -> Self {
        Self {
            edge,
            compositing,
            geometry: None,
            mask: GhostMask::None,
            hover: HoverDebounce::new(hover_debounce),
        }
    }

    pub fn geometry(&self) -> Option<Rect> {
        self.geometry
    }

    pub fn mask(&self) -> GhostMask {
        self.mask
    }

    pub fn set_edge(&mut self, edge: Edge) {
        self.edge = edge;
    }

    pub fn set_compositing(&mut self, compositing: bool) {
        self.compositing = compositing;
    }

    /// Returns `true` when `current` differs from the geometry this window
    /// should have.
    pub fn needs_fix(&self, current: Rect, view: Rect, screen: Rect) -> bool {
        current != ghost_geometry(self.edge, view, screen, self.compositing)
    }

    /// Recomputes the geometry.  Returns the new rectangle only when it changed
    /// and the host has to move the window.
    pub fn update_geometry(&mut self, view: Rect, screen: Rect) -> Option<Rect> {
        let wanted = ghost_geometry(self.edge, view, screen, self.compositing);
        if self.geometry == Some(wanted) {
            return None;
        }
        self.geometry = Some(wanted);
        Some(wanted)
    }

    pub fn hide_with_mask(&mut self) {
        self.mask = GhostMask::SinglePixel;
    }

    pub fn show_with_mask(&mut self) {
        self.mask = GhostMask::None;
    }
}
