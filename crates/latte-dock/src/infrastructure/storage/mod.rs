//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads the TOML file describing screens,
//! containments and timings from the platform config directory, falls back
//! to defaults on first run, and converts the stored records into the domain
//! types the layout works with.

pub mod config;
