//! engine::probe
//!
//! Capability probe: the hard precondition gate in front of every metadata
//! read or write.
//!
//! # Policy
//!
//! - Any transport failure or non-2xx status answer is `Unreachable`.
//! - The metadata plugin marker is checked first, then the edition marker.
//! - The first missing capability decides the result.
//!
//! The probe is not retried. A non-`Ready` result aborts the synchronization.

use crate::service::{MetadataService, ServiceStatus};

use super::capabilities::{Capability, CapabilitySet, REQUIRED};

/// Outcome of a capability probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// The status query failed or did not succeed.
    Unreachable(String),
    /// The metadata plugin marker is absent.
    MissingMetadataCapability,
    /// The Professional edition marker is absent.
    WrongEdition,
    /// All required capabilities are present.
    Ready,
}

impl ProbeResult {
    /// True only for `Ready`.
    pub fn is_ready(&self) -> bool {
        matches!(self, ProbeResult::Ready)
    }

    /// Result for the first missing capability.
    fn for_missing(cap: Capability) -> Self {
        match cap {
            Capability::MetadataPlugin => ProbeResult::MissingMetadataCapability,
            Capability::ProfessionalEdition => ProbeResult::WrongEdition,
        }
    }
}

impl std::fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeResult::Unreachable(reason) => write!(f, "service unreachable ({})", reason),
            ProbeResult::MissingMetadataCapability => {
                write!(f, "{}", Capability::MetadataPlugin.remedy())
            }
            ProbeResult::WrongEdition => {
                write!(f, "{}", Capability::ProfessionalEdition.remedy())
            }
            ProbeResult::Ready => write!(f, "ready"),
        }
    }
}

/// Probe result plus what was learned along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    /// Gate decision
    pub result: ProbeResult,
    /// Service version from the status payload, when present
    pub version: Option<String>,
}

/// Classify a status answer.
///
/// # Example
///
/// ```
/// use nexmeta::engine::probe::{classify, ProbeResult};
/// use nexmeta::service::ServiceStatus;
///
/// let status = ServiceStatus {
///     http_status: 200,
///     body: r#"{"data":{"appName":"Sonatype Nexus","plugins":["nexus:metadata"]}}"#.into(),
/// };
/// assert_eq!(classify(&status), ProbeResult::WrongEdition);
/// ```
pub fn classify(status: &ServiceStatus) -> ProbeResult {
    if !status.is_success() {
        return ProbeResult::Unreachable(format!(
            "status endpoint answered {}",
            status.http_status
        ));
    }

    let caps = CapabilitySet::detect(&status.body);
    match caps.missing(&REQUIRED).into_iter().next() {
        Some(cap) => ProbeResult::for_missing(cap),
        None => ProbeResult::Ready,
    }
}

/// Query the service status and check required capabilities.
pub async fn probe(service: &dyn MetadataService) -> ProbeReport {
    match service.status().await {
        Ok(status) => {
            let result = classify(&status);
            tracing::debug!(service = service.name(), result = %result, "capability probe");
            ProbeReport {
                result,
                version: status.version(),
            }
        }
        Err(err) => {
            tracing::debug!(service = service.name(), error = %err, "status query failed");
            ProbeReport {
                result: ProbeResult::Unreachable(err.to_string()),
                version: None,
            }
        }
    }
}

/// Outcome of a plain connection test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionCheck {
    /// The status endpoint answered 200.
    Verified,
    /// Anything else, with the reason shown to the user.
    Failed(String),
}

/// Check that the service answers the status endpoint with 200.
///
/// Unlike [`probe`], capability markers are ignored; this only verifies
/// that the URL and credentials work.
pub async fn test_connection(service: &dyn MetadataService) -> ConnectionCheck {
    match service.status().await {
        Ok(status) if status.http_status == 200 => ConnectionCheck::Verified,
        Ok(status) => ConnectionCheck::Failed(format!(
            "Please check the configuration. HTTP Status: {}",
            status.http_status
        )),
        Err(err) => ConnectionCheck::Failed(format!("Client error: {}", err)),
    }
}
