//! core::coordinate
//!
//! Canonical and transport identifiers for artifacts.
//!
//! The canonical id is `namespace#groupId:artifactId:version::packaging`.
//! The transport id is its standard base64 encoding (padding kept) so it can
//! travel as a single URL path segment.
//!
//! # Example
//!
//! ```
//! use nexmeta::core::coordinate::{canonical_id, decode_transport_id, transport_id};
//! use nexmeta::core::types::ArtifactCoordinate;
//!
//! let coord = ArtifactCoordinate::new("urn:maven/artifact", "de.mb", "rest-test", "0.0.1", "jar");
//! let id = canonical_id(&coord);
//! assert_eq!(id, "urn:maven/artifact#de.mb:rest-test:0.0.1::jar");
//!
//! let encoded = transport_id(&id);
//! assert_eq!(decode_transport_id(&encoded).unwrap(), id);
//! ```

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

use super::types::{ArtifactCoordinate, NAMESPACE_SEPARATOR};

/// Errors decoding a transport id.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("transport id is not valid base64: {0}")]
    InvalidBase64(String),

    #[error("transport id does not decode to UTF-8")]
    InvalidUtf8,
}

/// Format the canonical artifact id.
///
/// Performs no validation; empty fields produce a malformed id.
pub fn canonical_id(coord: &ArtifactCoordinate) -> String {
    format!(
        "{}{}{}:{}:{}::{}",
        coord.namespace(),
        NAMESPACE_SEPARATOR,
        coord.group_id(),
        coord.artifact_id(),
        coord.version(),
        coord.packaging()
    )
}

/// Encode a canonical id for use as a path segment.
pub fn transport_id(canonical: &str) -> String {
    STANDARD.encode(canonical.as_bytes())
}

/// Reverse [`transport_id`].
pub fn decode_transport_id(transport: &str) -> Result<String, DecodeError> {
    let bytes = STANDARD
        .decode(transport)
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))?;
    String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)
}
