//! service::traits
//!
//! Trait definition for the remote repository-metadata service.
//!
//! # Design
//!
//! The `MetadataService` trait is async because every operation is a network
//! round trip. Each implementation is constructed for one invocation and
//! carries its own connection settings; nothing is shared between calls.
//!
//! Operations are single-attempt. A failed request is reported to the caller
//! as-is; no method retries.
//!
//! # Example
//!
//! ```ignore
//! use nexmeta::service::{MetadataService, ServiceError};
//! use nexmeta::core::types::MetadataSet;
//!
//! async fn show(service: &dyn MetadataService, id: &str) -> Result<MetadataSet, ServiceError> {
//!     let set = service.read_metadata(id).await?;
//!     println!("{}", set.summary());
//!     Ok(set)
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::MetadataSet;

/// Errors from service operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request never got an HTTP answer (DNS, connect, TLS, timeout).
    #[error("service unreachable: {0}")]
    Unreachable(String),

    /// The artifact has no metadata resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// The service answered, but the payload did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The service answered with a non-success status.
    #[error("rejected by service: {status} - {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The configured base URL cannot be used.
    #[error("invalid service url: {0}")]
    InvalidUrl(String),
}

/// Raw answer of the status endpoint.
///
/// The body is kept verbatim because capability detection works on marker
/// strings, not on a parsed schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    /// HTTP status code of the status request
    pub http_status: u16,
    /// Response body as text
    pub body: String,
}

impl ServiceStatus {
    /// True for 2xx answers.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.http_status)
    }

    /// Version string from a JSON status payload (`data.version`), if any.
    pub fn version(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(&self.body).ok()?;
        value
            .get("data")
            .and_then(|d| d.get("version"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

/// The repository-metadata service.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so they can be held across await
/// points on a multi-threaded runtime.
///
/// # Error Handling
///
/// - `Unreachable`: transport failure, nothing was received
/// - `NotFound`: the artifact has no metadata resource
/// - `MalformedResponse`: the body could not be decoded
/// - `Rejected`: any other non-2xx answer (bad payload, permission denied)
#[async_trait]
pub trait MetadataService: Send + Sync {
    /// Short implementation name for logs (e.g. "nexus", "mock").
    fn name(&self) -> &'static str;

    /// Query the status endpoint.
    ///
    /// Returns the status and body for any HTTP answer, including non-2xx.
    ///
    /// # Errors
    ///
    /// - `Unreachable` if no answer was received
    async fn status(&self) -> Result<ServiceStatus, ServiceError>;

    /// Fetch the current metadata of the artifact addressed by `transport_id`.
    ///
    /// # Errors
    ///
    /// - `NotFound`, `Unreachable`, `MalformedResponse`, `Rejected`
    async fn read_metadata(&self, transport_id: &str) -> Result<MetadataSet, ServiceError>;

    /// Submit `set` as the new metadata of the artifact, in one request.
    ///
    /// # Errors
    ///
    /// - `Unreachable`, `Rejected`
    async fn write_metadata(&self, transport_id: &str, set: &MetadataSet)
        -> Result<(), ServiceError>;
}
