//! Domain entities for the Latte dock shell.
//!
//! This module contains pure placement logic with no infrastructure
//! dependencies.  Nothing in here talks to a compositor, reads a file or
//! starts a timer: timers and windows belong to the outer layers, which call
//! into these types with plain values.
//!
//! # Layering
//!
//! Code in `latte-dock` (application, infrastructure, binary) depends on the
//! domain, but the domain never depends on it.  That keeps every rule about
//! which view may sit on which edge testable in isolation.

/// The four screen edges and their tie-break priority.
pub mod edge;

/// Ghost edge windows used to reveal auto-hidden views.
pub mod ghost;

/// Per-screen edge occupancy and free-edge queries.
pub mod occupancy;

/// Priority ordering of placed views.
pub mod priority;

/// Connected screens and the stable screen id pool.
pub mod screen;

/// View placement requests and placed views.
pub mod view;

/// Window state record.
pub mod window_info;
