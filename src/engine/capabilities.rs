//! engine::capabilities
//!
//! Service capabilities required before metadata may be changed.
//!
//! # Architecture
//!
//! A capability is a fact established from the service status payload. It
//! either exists or does not. The synchronization declares the capabilities
//! it requires ([`REQUIRED`]) and only proceeds when all are present.
//!
//! Detection is marker based: the status payload is searched for a fixed
//! string per capability. No schema is assumed, so the check works on JSON
//! and XML payloads alike.
//!
//! # Example
//!
//! ```
//! use nexmeta::engine::capabilities::{Capability, CapabilitySet, REQUIRED};
//!
//! let caps = CapabilitySet::detect(r#"{"plugins":["nexus:metadata"]}"#);
//!
//! assert!(caps.has(&Capability::MetadataPlugin));
//! assert_eq!(caps.missing(&REQUIRED), vec![Capability::ProfessionalEdition]);
//! ```

use std::collections::HashSet;

/// A capability of the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// The custom metadata plugin is installed.
    MetadataPlugin,

    /// The instance runs the Professional edition.
    ProfessionalEdition,
}

/// Capabilities required for a metadata synchronization, in check order.
pub const REQUIRED: [Capability; 2] = [Capability::MetadataPlugin, Capability::ProfessionalEdition];

impl Capability {
    /// Marker string whose presence in the status payload proves the capability.
    pub fn marker(&self) -> &'static str {
        match self {
            Capability::MetadataPlugin => "nexus:metadata",
            Capability::ProfessionalEdition => "Sonatype Nexus Professional",
        }
    }

    /// Get a human-readable description of the capability.
    ///
    /// # Example
    ///
    /// ```
    /// use nexmeta::engine::capabilities::Capability;
    ///
    /// assert_eq!(Capability::MetadataPlugin.description(), "metadata plugin is installed");
    /// ```
    pub fn description(&self) -> &'static str {
        match self {
            Capability::MetadataPlugin => "metadata plugin is installed",
            Capability::ProfessionalEdition => "service is Sonatype Nexus Professional",
        }
    }

    /// What the operator should do when the capability is missing.
    pub fn remedy(&self) -> &'static str {
        match self {
            Capability::MetadataPlugin => "Please install the metadata plugin.",
            Capability::ProfessionalEdition => "Please install Sonatype Nexus Professional.",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A set of capabilities detected on the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    capabilities: HashSet<Capability>,
}

impl CapabilitySet {
    /// Create an empty capability set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a capability set with the given capabilities.
    pub fn with<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self {
            capabilities: iter.into_iter().collect(),
        }
    }

    /// Detect capabilities from a raw status payload.
    pub fn detect(status_body: &str) -> Self {
        REQUIRED
            .iter()
            .filter(|cap| status_body.contains(cap.marker()))
            .copied()
            .collect()
    }

    /// Insert a capability into the set.
    pub fn insert(&mut self, cap: Capability) {
        self.capabilities.insert(cap);
    }

    /// Check if a capability is present.
    pub fn has(&self, cap: &Capability) -> bool {
        self.capabilities.contains(cap)
    }

    /// Check if all given capabilities are present.
    ///
    /// Returns true if the slice is empty.
    pub fn has_all(&self, caps: &[Capability]) -> bool {
        caps.iter().all(|c| self.capabilities.contains(c))
    }

    /// Get the capabilities that are missing from the required set,
    /// in the order they were required.
    pub fn missing(&self, required: &[Capability]) -> Vec<Capability> {
        required
            .iter()
            .filter(|c| !self.capabilities.contains(c))
            .copied()
            .collect()
    }

    /// Get the number of capabilities in the set.
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        Self {
            capabilities: iter.into_iter().collect(),
        }
    }
}
