//! Application layer of the dock shell.
//!
//! # What is the "application" layer? (for beginners)
//!
//! The domain crate (`latte-core`) knows the rules: which edge outranks which,
//! how views are ordered, what a ghost strip looks like.  This layer applies
//! those rules over time.  It owns the mutable state (which views exist right
//! now, which are being recreated, which shortcut badges are visible) and
//! reacts to events such as "a monitor was unplugged" or "Meta+3 was pressed".
//!
//! Use cases here:
//!
//! - **Depend on abstractions**: every window operation goes through the
//!   [`host::ViewHost`] and [`host::ShortcutHost`] traits, so the whole layer
//!   runs in unit tests without a compositor.
//! - **Contain no timers and no I/O**: where the shell has to wait, methods
//!   return the delay and the caller schedules the follow-up step.
//!
//! # Sub-modules
//!
//! - **`layout`**    – `GenericLayout`: placement policy, screen
//!   reconciliation, two-phase view recreation and layout housekeeping.
//!
//! - **`registry`**  – The single owned registry of views with an explicit
//!   state tag per view.
//!
//! - **`shortcuts`** – `GlobalShortcuts`: entry activation, shortcut badges,
//!   settings cycling and the hide-views timer.
//!
//! - **`host`**      – Traits for the window system collaborators.

pub mod host;
pub mod layout;
pub mod registry;
pub mod shortcuts;
