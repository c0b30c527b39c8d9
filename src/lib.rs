//! nexmeta - upsert key/value custom metadata on Nexus repository artifacts
//!
//! Given an artifact coordinate and one key/value pair, nexmeta checks that
//! the Nexus instance runs the Professional edition with the custom metadata
//! plugin, reads the artifact's current metadata, merges the new entry in,
//! writes the result back, and reads it again to confirm.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates Validate -> Probe -> Read -> Merge -> Write -> Confirm
//! - [`core`] - Domain types, identifier encoding, merge policy, configuration
//! - [`service`] - The remote metadata service and a recording mock
//! - [`secrets`] - Password storage
//! - [`ui`] - Terminal output and prompts
//!
//! # Invariants
//!
//! 1. No network call happens with incomplete connection settings
//! 2. No metadata is read or written unless the capability probe passes
//! 3. Read-only entries are never submitted
//! 4. Failures are reported, never retried or rolled back

pub mod cli;
pub mod core;
pub mod engine;
pub mod secrets;
pub mod service;
pub mod ui;
