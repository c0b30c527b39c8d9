//! service
//!
//! Abstraction for the remote repository-metadata service.
//!
//! # Architecture
//!
//! The `MetadataService` trait defines the three calls the synchronization
//! needs: a status query, a metadata read, and a metadata write. The engine
//! talks to the trait only; [`nexus::NexusService`] speaks the Nexus REST API
//! and [`mock::MockService`] backs the tests.
//!
//! - Service calls happen only after the local configuration is validated
//! - Every call is a single attempt; failures are surfaced, never retried
//! - Implementations hold no state across invocations
//!
//! # Modules
//!
//! - `traits`: `MetadataService` trait, `ServiceError`, `ServiceStatus`
//! - [`nexus`]: HTTP implementation using reqwest
//! - [`mock`]: In-memory implementation for deterministic testing

pub mod mock;
pub mod nexus;
mod traits;

pub use traits::*;
