//! core::types
//!
//! Strong types for the metadata domain.
//!
//! # Types
//!
//! - [`ArtifactCoordinate`] - Identity of an artifact in the repository
//! - [`MetadataEntry`] - One key/value annotation on an artifact
//! - [`MetadataSet`] - The ordered list of entries the service returns/accepts
//! - [`ServiceConfig`] - Connection settings for one invocation
//! - [`FieldCheck`] - Result of checking a user-supplied key or value
//!
//! # Wire shape
//!
//! `MetadataSet` serializes to the shape the Nexus custom metadata endpoint
//! speaks. The `data` array is required when reading; a body without it is
//! not a metadata set:
//!
//! ```json
//! {
//!   "data": [
//!     { "key": "build", "value": "42", "namespace": "urn:maven/artifact#", "readOnly": false }
//!   ]
//! }
//! ```
//!
//! # Examples
//!
//! ```
//! use nexmeta::core::types::{ArtifactCoordinate, MetadataEntry};
//!
//! let coord = ArtifactCoordinate::new("urn:maven/artifact", "de.mb", "rest-test", "0.0.1", "jar");
//! let entry = MetadataEntry::owned(coord.namespace(), "build", "42");
//!
//! assert_eq!(entry.namespace, "urn:maven/artifact#");
//! assert!(!entry.read_only);
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Separator appended to an owner namespace on authored entries, and used
/// between the namespace and the GAV part of a canonical id.
pub const NAMESPACE_SEPARATOR: char = '#';

/// Minimum length below which a key or value draws a warning.
const SHORT_FIELD_THRESHOLD: usize = 4;

/// Identity of an artifact in the repository.
///
/// Immutable once constructed. Field contents are not validated: an empty
/// field yields a malformed canonical id rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactCoordinate {
    namespace: String,
    group_id: String,
    artifact_id: String,
    version: String,
    packaging: String,
}

impl ArtifactCoordinate {
    /// Create a coordinate from its five parts.
    pub fn new(
        namespace: impl Into<String>,
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        packaging: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            packaging: packaging.into(),
        }
    }

    /// Owner namespace (without the trailing separator).
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn packaging(&self) -> &str {
        &self.packaging
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.version, self.packaging
        )
    }
}

/// A single metadata annotation on an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataEntry {
    /// Annotation key
    pub key: String,
    /// Annotation value
    pub value: String,
    /// Owning namespace, including the trailing `#`
    pub namespace: String,
    /// Immutable at the service; never resubmitted
    #[serde(default)]
    pub read_only: bool,
}

impl MetadataEntry {
    /// Build a writable entry owned by `owner_namespace`.
    ///
    /// The stored namespace is `owner_namespace` followed by `#`.
    pub fn owned(
        owner_namespace: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            namespace: format!("{}{}", owner_namespace, NAMESPACE_SEPARATOR),
            read_only: false,
        }
    }

    /// True when this entry shares key and namespace with `other`.
    pub fn same_slot(&self, other: &MetadataEntry) -> bool {
        self.key == other.key && self.namespace == other.namespace
    }
}

impl fmt::Display for MetadataEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}@{}", self.key, self.value, self.namespace)?;
        if self.read_only {
            write!(f, " (read-only)")?;
        }
        Ok(())
    }
}

/// Ordered collection of metadata entries.
///
/// Order does not matter to the service but is preserved so traces and
/// tests see entries in the order they were read or merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataSet {
    data: Vec<MetadataEntry>,
}

impl MetadataSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set from entries, keeping their order.
    pub fn from_entries(entries: Vec<MetadataEntry>) -> Self {
        Self { data: entries }
    }

    pub fn entries(&self) -> &[MetadataEntry] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetadataEntry> {
        self.data.iter()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append an entry.
    pub fn push(&mut self, entry: MetadataEntry) {
        self.data.push(entry);
    }

    /// Find the first entry with the given key and namespace.
    pub fn find(&self, key: &str, namespace: &str) -> Option<&MetadataEntry> {
        self.data
            .iter()
            .find(|e| e.key == key && e.namespace == namespace)
    }

    /// One-line summary for trace output, e.g. `2 entries [a=1@x#, b=2@y#]`.
    pub fn summary(&self) -> String {
        let noun = if self.data.len() == 1 {
            "entry"
        } else {
            "entries"
        };
        let listing = self
            .data
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} {} [{}]", self.data.len(), noun, listing)
    }

    pub fn into_entries(self) -> Vec<MetadataEntry> {
        self.data
    }
}

impl FromIterator<MetadataEntry> for MetadataSet {
    fn from_iter<I: IntoIterator<Item = MetadataEntry>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MetadataSet {
    type Item = MetadataEntry;
    type IntoIter = std::vec::IntoIter<MetadataEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a> IntoIterator for &'a MetadataSet {
    type Item = &'a MetadataEntry;
    type IntoIter = std::slice::Iter<'a, MetadataEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Connection settings for one synchronization call.
///
/// Built by the host for each invocation and discarded afterwards. The
/// password is never printed; `Debug` redacts it.
#[derive(Clone)]
pub struct ServiceConfig {
    /// Service base URL, e.g. `http://nexus:8081/nexus`
    pub base_url: String,
    /// HTTP Basic user name
    pub username: String,
    /// HTTP Basic password
    pub password: String,
    /// Per-request timeout; `None` leaves the HTTP client default in place
    pub timeout: Option<Duration>,
}

impl ServiceConfig {
    /// Create a config without an explicit timeout.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            timeout: None,
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Names of required fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.base_url.trim().is_empty() {
            missing.push("url");
        }
        if self.username.is_empty() {
            missing.push("username");
        }
        if self.password.is_empty() {
            missing.push("password");
        }
        missing
    }

    /// True when url, username, and password are all present.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Outcome of checking a user-supplied metadata key or value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldCheck {
    /// Acceptable.
    Ok,
    /// Accepted, but probably a mistake.
    Warning(String),
    /// Not acceptable.
    Error(String),
}

/// Check a metadata key or value before it is sent anywhere.
///
/// Empty is an error; fewer than four characters is a warning.
///
/// # Example
///
/// ```
/// use nexmeta::core::types::{check_field, FieldCheck};
///
/// assert_eq!(check_field("key", "build"), FieldCheck::Ok);
/// assert!(matches!(check_field("key", "id"), FieldCheck::Warning(_)));
/// assert!(matches!(check_field("value", ""), FieldCheck::Error(_)));
/// ```
pub fn check_field(name: &str, value: &str) -> FieldCheck {
    if value.is_empty() {
        FieldCheck::Error(format!("please set a {}", name))
    } else if value.chars().count() < SHORT_FIELD_THRESHOLD {
        FieldCheck::Warning(format!("{} '{}' looks too short", name, value))
    } else {
        FieldCheck::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_entry_appends_separator() {
        let entry = MetadataEntry::owned("urn:maven/artifact", "build", "42");
        assert_eq!(entry.namespace, "urn:maven/artifact#");
        assert_eq!(entry.key, "build");
        assert_eq!(entry.value, "42");
        assert!(!entry.read_only);
    }

    #[test]
    fn same_slot_requires_key_and_namespace() {
        let a = MetadataEntry::owned("ns", "build", "1");
        let b = MetadataEntry::owned("ns", "build", "2");
        let c = MetadataEntry::owned("other", "build", "1");
        assert!(a.same_slot(&b));
        assert!(!a.same_slot(&c));
    }

    #[test]
    fn entry_display() {
        let mut entry = MetadataEntry::owned("ns", "k", "v");
        assert_eq!(entry.to_string(), "k=v@ns#");
        entry.read_only = true;
        assert_eq!(entry.to_string(), "k=v@ns# (read-only)");
    }

    #[test]
    fn metadata_set_wire_shape() {
        let json = r#"{"data":[
            {"key":"owner","value":"teamA","namespace":"other#","readOnly":true}
        ]}"#;
        let set: MetadataSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.entries()[0].read_only);

        let back = serde_json::to_value(&set).unwrap();
        assert_eq!(back["data"][0]["readOnly"], serde_json::Value::Bool(true));
        assert_eq!(back["data"][0]["namespace"], "other#");
    }

    #[test]
    fn metadata_set_requires_data_but_not_read_only() {
        assert!(serde_json::from_str::<MetadataSet>("{}").is_err());
        assert!(serde_json::from_str::<MetadataSet>(r#"{"error":"index busy"}"#).is_err());

        let set: MetadataSet = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert!(set.is_empty());

        let set: MetadataSet =
            serde_json::from_str(r#"{"data":[{"key":"a","value":"b","namespace":"n#"}]}"#)
                .unwrap();
        assert!(!set.entries()[0].read_only);
    }

    #[test]
    fn metadata_set_summary() {
        assert_eq!(MetadataSet::new().summary(), "0 entries []");

        let set = MetadataSet::from_entries(vec![MetadataEntry::owned("ns", "a", "1")]);
        assert_eq!(set.summary(), "1 entry [a=1@ns#]");
    }

    #[test]
    fn metadata_set_find() {
        let set = MetadataSet::from_entries(vec![
            MetadataEntry::owned("ns", "a", "1"),
            MetadataEntry::owned("other", "a", "2"),
        ]);
        assert_eq!(set.find("a", "other#").map(|e| e.value.as_str()), Some("2"));
        assert!(set.find("b", "ns#").is_none());
    }

    #[test]
    fn service_config_missing_fields() {
        let config = ServiceConfig::new("http://nexus", "", "");
        assert_eq!(config.missing_fields(), vec!["username", "password"]);
        assert!(!config.is_complete());

        let config = ServiceConfig::new("  ", "admin", "secret");
        assert_eq!(config.missing_fields(), vec!["url"]);

        assert!(ServiceConfig::new("http://nexus", "admin", "secret").is_complete());
    }

    #[test]
    fn service_config_debug_redacts_password() {
        let config = ServiceConfig::new("http://nexus", "admin", "hunter22");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter22"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("admin"));
    }

    #[test]
    fn check_field_thresholds() {
        assert!(matches!(check_field("key", ""), FieldCheck::Error(m) if m.contains("key")));
        assert!(matches!(check_field("value", "abc"), FieldCheck::Warning(_)));
        assert_eq!(check_field("value", "abcd"), FieldCheck::Ok);
    }

    #[test]
    fn coordinate_display() {
        let coord = ArtifactCoordinate::new("ns", "de.mb", "rest-test", "0.0.1", "jar");
        assert_eq!(coord.to_string(), "de.mb:rest-test:0.0.1:jar");
    }
}
