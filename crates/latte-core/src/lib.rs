//! # latte-core
//!
//! Domain model for the Latte dock shell: screens, edges, view placement
//! requests, edge occupancy and the priority ordering used by global
//! shortcuts.
//!
//! This crate has zero dependencies on windowing toolkits, compositors or
//! configuration files.  Everything here is a plain value or a pure function,
//! so the placement rules can be unit-tested without a running desktop.
//!
//! # Architecture overview
//!
//! A *view* is a dock or panel window.  Each view is backed by a
//! *containment* (the applet container configured by the user) which says
//! where the view wants to live: on whichever screen is primary, or on an
//! explicit screen, at one of four edges.
//!
//! - **`domain`** – Screens, edges, view specs, occupancy maps, priority
//!   sorting, ghost edge geometry and the window info record.
//!
//! - **`shortcuts`** – The fixed key table that maps shortcut entry numbers
//!   (1..19) to key sequences.

pub mod domain;
pub mod shortcuts;

// Re-export the most-used types at the crate root so callers can write
// `latte_core::Edge` instead of `latte_core::domain::edge::Edge`.
pub use domain::edge::{Edge, FormFactor, ParseEdgeError, EDGE_PRIORITY};
pub use domain::ghost::{ghost_geometry, GhostMask, GhostWindow, HoverDebounce, Rect};
pub use domain::occupancy::{available_edges_for_view, free_edges, OccupancyMap};
pub use domain::priority::sort_by_priority;
pub use domain::screen::{Screen, ScreenId, ScreenPool, ScreenTopology, TopologyError};
pub use domain::view::{PlacedView, PlacementRequest, ViewId, ViewSpec, VisibilityMode};
pub use domain::window_info::{WindowId, WindowInfo};
pub use shortcuts::keys::{entry_shortcuts, EntryShortcut, FixedAction, Modifier, ShortcutKey};
