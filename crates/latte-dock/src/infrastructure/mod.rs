//! Infrastructure layer for the dock shell.
//!
//! Contains the adapters around the application layer: window host
//! implementations, configuration file storage, the deferred-task scheduler
//! that drives timers, and the [`shell::Shell`] that ties them to one layout.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `latte_core`, but MUST NOT be imported by the `application` or domain
//! layers (tests excepted).

pub mod host;
pub mod scheduler;
pub mod shell;
pub mod storage;
