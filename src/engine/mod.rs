//! engine
//!
//! Orchestrates a metadata synchronization: validate -> probe -> read ->
//! merge -> write -> confirm.
//!
//! # Architecture
//!
//! The engine is the only layer that talks to a [`MetadataService`] on behalf
//! of the user. It enforces the ordering the remote protocol depends on:
//!
//! 1. **Validate**: Reject incomplete configuration before any connection
//! 2. **Probe**: Verify the service has the required capabilities
//! 3. **Read**: Fetch the artifact's current metadata
//! 4. **Merge**: Combine current metadata with the new entry
//! 5. **Write**: Submit the merged set
//! 6. **Confirm**: Read back what the service stored
//!
//! If the probe fails, nothing is read or written. The engine never retries.
//!
//! [`MetadataService`]: crate::service::MetadataService

pub mod capabilities;
pub mod probe;
pub mod sync;
pub mod trace;

pub use capabilities::{Capability, CapabilitySet};
pub use probe::{probe, test_connection, ConnectionCheck, ProbeReport, ProbeResult};
pub use sync::{
    synchronize, synchronize_with, SyncFailure, SyncRequest, SyncResult, SyncState,
};
pub use trace::{LogSink, NullSink};
