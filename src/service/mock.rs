//! service::mock
//!
//! Mock metadata service for deterministic testing.
//!
//! # Design
//!
//! The mock keeps metadata sets in memory, keyed by transport id, and records
//! every call so tests can assert which requests were (or were not) made.
//! Writes behave like the real service: read-only entries already stored for
//! the artifact survive a write, everything else is replaced by the submitted
//! set.
//!
//! # Example
//!
//! ```
//! use nexmeta::service::mock::MockService;
//! use nexmeta::service::MetadataService;
//! use nexmeta::core::types::{MetadataEntry, MetadataSet};
//!
//! # tokio_test::block_on(async {
//! let service = MockService::new();
//! service.insert_metadata("abc=", MetadataSet::new());
//!
//! let set = MetadataSet::from_entries(vec![MetadataEntry::owned("ns", "build", "42")]);
//! service.write_metadata("abc=", &set).await.unwrap();
//!
//! assert_eq!(service.read_metadata("abc=").await.unwrap(), set);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{MetadataService, ServiceError, ServiceStatus};
use crate::core::types::MetadataSet;

/// Status body of a Nexus Professional instance with the metadata plugin.
pub const PROFESSIONAL_STATUS: &str = r#"{"data":{"appName":"Sonatype Nexus","formattedAppName":"Sonatype Nexus Professional 2.14.5-02","version":"2.14.5-02","editionLong":"Professional","plugins":["nexus:metadata","nexus:indexer-lucene"]}}"#;

/// Mock service for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone)]
pub struct MockService {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockServiceInner>>,
}

/// Internal mutable state.
#[derive(Debug)]
struct MockServiceInner {
    /// Answer of the status endpoint.
    status: ServiceStatus,
    /// Stored metadata by transport id.
    metadata: HashMap<String, MetadataSet>,
    /// Operation to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Whether a write has succeeded yet.
    written: bool,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail the status query with the given error.
    Status(ServiceError),
    /// Fail every metadata read with the given error.
    ReadMetadata(ServiceError),
    /// Fail metadata reads only after a successful write.
    ReadAfterWrite(ServiceError),
    /// Fail metadata writes with the given error.
    WriteMetadata(ServiceError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Status,
    ReadMetadata { transport_id: String },
    WriteMetadata { transport_id: String, set: MetadataSet },
}

impl MockService {
    /// Create a mock that reports a ready Nexus Professional instance.
    pub fn new() -> Self {
        Self::with_status(200, PROFESSIONAL_STATUS)
    }

    /// Create a mock with a specific status answer.
    ///
    /// # Example
    ///
    /// ```
    /// use nexmeta::service::mock::MockService;
    ///
    /// let oss = MockService::with_status(200, r#"{"data":{"appName":"Sonatype Nexus OSS"}}"#);
    /// ```
    pub fn with_status(http_status: u16, body: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockServiceInner {
                status: ServiceStatus {
                    http_status,
                    body: body.into(),
                },
                metadata: HashMap::new(),
                fail_on: None,
                written: false,
                operations: Vec::new(),
            })),
        }
    }

    /// Configure the mock to fail on a specific operation.
    ///
    /// # Example
    ///
    /// ```
    /// use nexmeta::service::mock::{FailOn, MockService};
    /// use nexmeta::service::ServiceError;
    ///
    /// let service = MockService::new()
    ///     .fail_on(FailOn::WriteMetadata(ServiceError::Rejected {
    ///         status: 400,
    ///         message: "bad request".into(),
    ///     }));
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_on = None;
    }

    /// Store metadata for an artifact (test setup).
    pub fn insert_metadata(&self, transport_id: &str, set: MetadataSet) {
        let mut inner = self.inner.lock().unwrap();
        inner.metadata.insert(transport_id.to_string(), set);
    }

    /// Get stored metadata without recording an operation (test verification).
    pub fn stored_metadata(&self, transport_id: &str) -> Option<MetadataSet> {
        let inner = self.inner.lock().unwrap();
        inner.metadata.get(transport_id).cloned()
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Clear recorded operations.
    pub fn clear_operations(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.clear();
    }

    /// Number of write requests received.
    pub fn write_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner
            .operations
            .iter()
            .filter(|op| matches!(op, MockOperation::WriteMetadata { .. }))
            .count()
    }

    /// Record an operation.
    fn record(&self, op: MockOperation) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(op);
    }

    /// Check if we should fail and return the error if so.
    fn check_fail(&self, expected: &str) -> Option<ServiceError> {
        let inner = self.inner.lock().unwrap();
        match &inner.fail_on {
            Some(FailOn::Status(e)) if expected == "status" => Some(e.clone()),
            Some(FailOn::ReadMetadata(e)) if expected == "read_metadata" => Some(e.clone()),
            Some(FailOn::ReadAfterWrite(e)) if expected == "read_metadata" && inner.written => {
                Some(e.clone())
            }
            Some(FailOn::WriteMetadata(e)) if expected == "write_metadata" => Some(e.clone()),
            _ => None,
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataService for MockService {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn status(&self) -> Result<ServiceStatus, ServiceError> {
        self.record(MockOperation::Status);

        if let Some(err) = self.check_fail("status") {
            return Err(err);
        }

        let inner = self.inner.lock().unwrap();
        Ok(inner.status.clone())
    }

    async fn read_metadata(&self, transport_id: &str) -> Result<MetadataSet, ServiceError> {
        self.record(MockOperation::ReadMetadata {
            transport_id: transport_id.to_string(),
        });

        if let Some(err) = self.check_fail("read_metadata") {
            return Err(err);
        }

        let inner = self.inner.lock().unwrap();
        inner.metadata.get(transport_id).cloned().ok_or_else(|| {
            ServiceError::NotFound(format!("no metadata resource for {}", transport_id))
        })
    }

    async fn write_metadata(
        &self,
        transport_id: &str,
        set: &MetadataSet,
    ) -> Result<(), ServiceError> {
        self.record(MockOperation::WriteMetadata {
            transport_id: transport_id.to_string(),
            set: set.clone(),
        });

        if let Some(err) = self.check_fail("write_metadata") {
            return Err(err);
        }

        if set.iter().any(|e| e.read_only) {
            return Err(ServiceError::Rejected {
                status: 400,
                message: "read-only entries cannot be submitted".into(),
            });
        }

        let mut inner = self.inner.lock().unwrap();
        let kept_read_only: Vec<_> = inner
            .metadata
            .get(transport_id)
            .map(|current| current.iter().filter(|e| e.read_only).cloned().collect())
            .unwrap_or_default();

        let stored: MetadataSet = set.iter().cloned().chain(kept_read_only).collect();
        inner.metadata.insert(transport_id.to_string(), stored);
        inner.written = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MetadataEntry;

    fn read_only(key: &str) -> MetadataEntry {
        MetadataEntry {
            key: key.into(),
            value: "x".into(),
            namespace: "other#".into(),
            read_only: true,
        }
    }

    #[tokio::test]
    async fn default_status_is_professional() {
        let service = MockService::new();
        let status = service.status().await.unwrap();
        assert!(status.is_success());
        assert!(status.body.contains("nexus:metadata"));
        assert!(status.body.contains("Sonatype Nexus Professional"));
    }

    #[tokio::test]
    async fn unknown_artifact_is_not_found() {
        let service = MockService::new();
        let err = service.read_metadata("missing").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn write_keeps_stored_read_only_entries() {
        let service = MockService::new();
        service.insert_metadata("id", MetadataSet::from_entries(vec![read_only("owner")]));

        let submitted = MetadataSet::from_entries(vec![MetadataEntry::owned("ns", "build", "42")]);
        service.write_metadata("id", &submitted).await.unwrap();

        let stored = service.stored_metadata("id").unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored.entries()[0].key, "build");
        assert!(stored.entries()[1].read_only);
    }

    #[tokio::test]
    async fn write_rejects_read_only_entries() {
        let service = MockService::new();
        let submitted = MetadataSet::from_entries(vec![read_only("owner")]);

        let err = service.write_metadata("id", &submitted).await.unwrap_err();
        assert!(matches!(err, ServiceError::Rejected { status: 400, .. }));
    }

    #[tokio::test]
    async fn read_after_write_failure_only_triggers_after_write() {
        let service = MockService::new()
            .fail_on(FailOn::ReadAfterWrite(ServiceError::Unreachable("gone".into())));
        service.insert_metadata("id", MetadataSet::new());

        assert!(service.read_metadata("id").await.is_ok());
        service
            .write_metadata("id", &MetadataSet::new())
            .await
            .unwrap();
        assert!(service.read_metadata("id").await.is_err());
    }

    #[tokio::test]
    async fn records_operations() {
        let service = MockService::new();
        service.insert_metadata("id", MetadataSet::new());

        service.status().await.unwrap();
        service.read_metadata("id").await.unwrap();

        assert_eq!(
            service.operations(),
            vec![
                MockOperation::Status,
                MockOperation::ReadMetadata {
                    transport_id: "id".into()
                }
            ]
        );
        assert_eq!(service.write_count(), 0);

        service.clear_operations();
        assert!(service.operations().is_empty());
    }

    #[tokio::test]
    async fn clear_fail_on_restores_normal_behavior() {
        let service =
            MockService::new().fail_on(FailOn::Status(ServiceError::Unreachable("down".into())));
        assert!(service.status().await.is_err());

        service.clear_fail_on();
        assert!(service.status().await.is_ok());
    }
}
