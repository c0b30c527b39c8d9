//! core
//!
//! Domain types and the pure parts of a metadata synchronization.
//!
//! # Modules
//!
//! - [`types`] - Coordinates, metadata entries and sets, connection settings
//! - [`coordinate`] - Canonical and transport artifact identifiers
//! - [`merge`] - Merge policy for current metadata and a new entry
//! - [`config`] - Configuration schema and loading
//!
//! Nothing in this module performs I/O except [`config`].

pub mod config;
pub mod coordinate;
pub mod merge;
pub mod types;
