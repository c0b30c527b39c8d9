//! engine::sync
//!
//! The metadata synchronization: validate, probe, read, merge, write, confirm.
//!
//! # State machine
//!
//! ```text
//! Init -> ValidatingConfig -> Probing -> Reading -> Merging -> Writing -> Confirming -> Done
//!                 \               \          \                    \
//!                  +---------------+----------+--------------------+--> Aborted
//! ```
//!
//! The machine is linear. Every failure before the write is terminal and
//! reported through [`SyncFailure`]. Once the write succeeded the change is
//! committed on the service: a failed confirmation read only adds a warning
//! to an otherwise successful result.
//!
//! Each transition writes one trace line (state, operation, artifact id,
//! payload summary) to the caller's [`LogSink`] and emits a `tracing` event.
//!
//! # Invariants
//!
//! - No network call happens before the configuration is validated
//! - No read or write happens unless the capability probe is `Ready`
//! - Read-only entries are never part of a write request
//! - Nothing is retried and nothing is rolled back
//!
//! # Example
//!
//! ```ignore
//! use nexmeta::core::types::{ArtifactCoordinate, ServiceConfig};
//! use nexmeta::engine::sync::{synchronize, SyncRequest};
//!
//! let coord = ArtifactCoordinate::new("urn:maven/artifact", "de.mb", "rest-test", "0.0.1", "jar");
//! let request = SyncRequest::new(coord, "build", "42");
//! let config = ServiceConfig::new("http://nexus:8081/nexus", "admin", "admin123");
//!
//! let mut trace: Vec<String> = Vec::new();
//! let result = synchronize(&request, &config, &mut trace).await;
//! assert!(result.succeeded);
//! ```

use thiserror::Error;

use super::probe::{probe, ProbeResult};
use super::trace::LogSink;
use crate::core::coordinate::{canonical_id, transport_id};
use crate::core::merge::{dropped_entries, merge};
use crate::core::types::{ArtifactCoordinate, MetadataEntry, MetadataSet, ServiceConfig};
use crate::service::nexus::{parse_base_url, NexusService};
use crate::service::{MetadataService, ServiceError};

/// States of a synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncState {
    Init,
    ValidatingConfig,
    Probing,
    Reading,
    Merging,
    Writing,
    Confirming,
    Done,
    Aborted,
}

impl SyncState {
    /// Short name used in trace lines.
    pub fn name(&self) -> &'static str {
        match self {
            SyncState::Init => "init",
            SyncState::ValidatingConfig => "validating-config",
            SyncState::Probing => "probing",
            SyncState::Reading => "reading",
            SyncState::Merging => "merging",
            SyncState::Writing => "writing",
            SyncState::Confirming => "confirming",
            SyncState::Done => "done",
            SyncState::Aborted => "aborted",
        }
    }

    /// The operation performed while in this state.
    pub fn operation(&self) -> &'static str {
        match self {
            SyncState::Init => "start",
            SyncState::ValidatingConfig => "validate config",
            SyncState::Probing => "GET status",
            SyncState::Reading => "GET metadata",
            SyncState::Merging => "merge",
            SyncState::Writing => "POST metadata",
            SyncState::Confirming => "GET metadata (confirm)",
            SyncState::Done => "finish",
            SyncState::Aborted => "abort",
        }
    }
}

impl std::fmt::Display for SyncState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Why a synchronization was aborted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncFailure {
    /// Required connection settings are empty.
    #[error("configuration incomplete: missing {}", .0.join(", "))]
    ConfigIncomplete(Vec<&'static str>),

    /// Connection settings are present but unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The service lacks a required capability or did not answer the probe.
    #[error("service capability unmet: {0}")]
    CapabilityUnmet(ProbeResult),

    /// Reading the current metadata failed.
    #[error("reading metadata failed: {0}")]
    ReadFailed(ServiceError),

    /// Submitting the merged metadata failed.
    #[error("writing metadata failed: {0}")]
    WriteFailed(ServiceError),
}

/// What to write, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    /// Target artifact
    pub coordinate: ArtifactCoordinate,
    /// Metadata key
    pub key: String,
    /// Metadata value
    pub value: String,
}

impl SyncRequest {
    pub fn new(
        coordinate: ArtifactCoordinate,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            coordinate,
            key: key.into(),
            value: value.into(),
        }
    }

    /// The entry this request authors, owned by the coordinate's namespace.
    pub fn new_entry(&self) -> MetadataEntry {
        MetadataEntry::owned(self.coordinate.namespace(), &self.key, &self.value)
    }
}

/// Outcome of a synchronization.
#[derive(Debug, Clone)]
pub struct SyncResult {
    /// True when the write was committed
    pub succeeded: bool,
    /// Failure kind when aborted
    pub failure: Option<SyncFailure>,
    /// State in which the run was aborted
    pub aborted_in: Option<SyncState>,
    /// Canonical artifact id
    pub artifact_id: String,
    /// Metadata as read before the write
    pub before: MetadataSet,
    /// Metadata submitted by the write
    pub submitted: MetadataSet,
    /// Metadata as read after the write (empty if the confirmation read failed)
    pub after: MetadataSet,
    /// Non-fatal problems, e.g. a failed confirmation read
    pub warnings: Vec<String>,
}

impl SyncResult {
    /// `Done` or `Aborted`.
    pub fn final_state(&self) -> SyncState {
        if self.succeeded {
            SyncState::Done
        } else {
            SyncState::Aborted
        }
    }

    /// Operation that was being attempted when the run aborted.
    pub fn attempted_operation(&self) -> Option<&'static str> {
        self.aborted_in.map(|state| state.operation())
    }
}

/// Run a synchronization against the Nexus service named by `config`.
///
/// The configuration is validated before any connection is built. A fresh
/// service client is created for this call and dropped afterwards.
pub async fn synchronize(
    request: &SyncRequest,
    config: &ServiceConfig,
    sink: &mut dyn LogSink,
) -> SyncResult {
    let mut run = SyncRun::new(request, sink);
    if let Err(failure) = run.validate(config) {
        return run.abort(failure);
    }

    let service = match NexusService::new(config) {
        Ok(service) => service,
        Err(err) => return run.abort(SyncFailure::InvalidConfig(err.to_string())),
    };

    run.execute(&service).await
}

/// Run a synchronization against any [`MetadataService`].
///
/// `config` is still validated first, so an incomplete configuration never
/// reaches the service.
pub async fn synchronize_with(
    service: &dyn MetadataService,
    request: &SyncRequest,
    config: &ServiceConfig,
    sink: &mut dyn LogSink,
) -> SyncResult {
    let mut run = SyncRun::new(request, sink);
    if let Err(failure) = run.validate(config) {
        return run.abort(failure);
    }

    run.execute(service).await
}

/// One in-flight synchronization.
struct SyncRun<'a> {
    request: &'a SyncRequest,
    sink: &'a mut dyn LogSink,
    state: SyncState,
    artifact_id: String,
    transport_id: String,
    before: MetadataSet,
    submitted: MetadataSet,
    warnings: Vec<String>,
}

impl<'a> SyncRun<'a> {
    fn new(request: &'a SyncRequest, sink: &'a mut dyn LogSink) -> Self {
        let artifact_id = canonical_id(&request.coordinate);
        let transport_id = transport_id(&artifact_id);

        let mut run = Self {
            request,
            sink,
            state: SyncState::Init,
            artifact_id,
            transport_id,
            before: MetadataSet::new(),
            submitted: MetadataSet::new(),
            warnings: Vec::new(),
        };
        let detail = format!(
            "{}={} (transport id {})",
            request.key, request.value, run.transport_id
        );
        run.trace(&detail);
        run
    }

    /// Write a trace line for the current state.
    fn trace(&mut self, detail: &str) {
        tracing::info!(
            artifact = %self.artifact_id,
            state = %self.state,
            operation = self.state.operation(),
            "{}",
            detail
        );
        let line = format!(
            "[{}] {} {}: {}",
            self.state,
            self.state.operation(),
            self.artifact_id,
            detail
        );
        self.sink.line(&line);
    }

    fn validate(&mut self, config: &ServiceConfig) -> Result<(), SyncFailure> {
        self.state = SyncState::ValidatingConfig;

        let missing = config.missing_fields();
        if !missing.is_empty() {
            return Err(SyncFailure::ConfigIncomplete(missing));
        }
        parse_base_url(&config.base_url)
            .map_err(|e| SyncFailure::InvalidConfig(e.to_string()))?;

        let detail = format!("url={} user={}", config.base_url.trim(), config.username);
        self.trace(&detail);
        Ok(())
    }

    async fn execute(mut self, service: &dyn MetadataService) -> SyncResult {
        match self.run_steps(service).await {
            Ok(after) => self.finish(after),
            Err(failure) => self.abort(failure),
        }
    }

    async fn run_steps(
        &mut self,
        service: &dyn MetadataService,
    ) -> Result<MetadataSet, SyncFailure> {
        self.state = SyncState::Probing;
        let report = probe(service).await;
        let detail = match &report.version {
            Some(version) => format!("version {}, {}", version, report.result),
            None => report.result.to_string(),
        };
        self.trace(&detail);
        if !report.result.is_ready() {
            return Err(SyncFailure::CapabilityUnmet(report.result));
        }

        self.state = SyncState::Reading;
        let current = service
            .read_metadata(&self.transport_id)
            .await
            .map_err(SyncFailure::ReadFailed)?;
        self.trace(&current.summary());

        self.state = SyncState::Merging;
        let new_entry = self.request.new_entry();
        let dropped = dropped_entries(&current, &new_entry)
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>();
        let outgoing = merge(&current, new_entry);
        let detail = if dropped.is_empty() {
            outgoing.summary()
        } else {
            format!("{}; not resubmitted: {}", outgoing.summary(), dropped.join(", "))
        };
        self.trace(&detail);
        self.before = current;

        self.state = SyncState::Writing;
        service
            .write_metadata(&self.transport_id, &outgoing)
            .await
            .map_err(SyncFailure::WriteFailed)?;
        self.trace(&outgoing.summary());
        self.submitted = outgoing;

        self.state = SyncState::Confirming;
        match service.read_metadata(&self.transport_id).await {
            Ok(after) => {
                self.trace(&after.summary());
                Ok(after)
            }
            Err(err) => {
                let warning = format!("confirmation read failed: {}", err);
                tracing::warn!(
                    artifact = %self.artifact_id,
                    error = %err,
                    "confirmation read failed"
                );
                self.trace(&warning);
                self.warnings.push(warning);
                Ok(MetadataSet::new())
            }
        }
    }

    fn finish(mut self, after: MetadataSet) -> SyncResult {
        self.state = SyncState::Done;
        let detail = if self.warnings.is_empty() {
            "succeeded".to_string()
        } else {
            format!("succeeded with {} warning(s)", self.warnings.len())
        };
        self.trace(&detail);

        SyncResult {
            succeeded: true,
            failure: None,
            aborted_in: None,
            artifact_id: self.artifact_id,
            before: self.before,
            submitted: self.submitted,
            after,
            warnings: self.warnings,
        }
    }

    fn abort(mut self, failure: SyncFailure) -> SyncResult {
        let aborted_in = self.state;
        self.state = SyncState::Aborted;
        tracing::warn!(
            artifact = %self.artifact_id,
            state = %aborted_in,
            error = %failure,
            "synchronization aborted"
        );
        let detail = format!("{} failed: {}", aborted_in.operation(), failure);
        self.trace(&detail);

        SyncResult {
            succeeded: false,
            failure: Some(failure),
            aborted_in: Some(aborted_in),
            artifact_id: self.artifact_id,
            before: self.before,
            submitted: self.submitted,
            after: MetadataSet::new(),
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::mock::{FailOn, MockOperation, MockService};

    fn request() -> SyncRequest {
        SyncRequest::new(
            ArtifactCoordinate::new("urn:maven/artifact", "de.mb", "rest-test", "0.0.1", "jar"),
            "build",
            "42",
        )
    }

    fn config() -> ServiceConfig {
        ServiceConfig::new("http://nexus:8081/nexus", "admin", "admin123")
    }

    fn tid() -> String {
        transport_id(&canonical_id(&request().coordinate))
    }

    fn entry(key: &str, value: &str, namespace: &str, read_only: bool) -> MetadataEntry {
        MetadataEntry {
            key: key.into(),
            value: value.into(),
            namespace: namespace.into(),
            read_only,
        }
    }

    #[test]
    fn state_names_and_operations() {
        assert_eq!(SyncState::ValidatingConfig.to_string(), "validating-config");
        assert_eq!(SyncState::Writing.operation(), "POST metadata");
    }

    #[test]
    fn failure_display() {
        assert_eq!(
            SyncFailure::ConfigIncomplete(vec!["username", "password"]).to_string(),
            "configuration incomplete: missing username, password"
        );
        assert_eq!(
            SyncFailure::CapabilityUnmet(ProbeResult::WrongEdition).to_string(),
            "service capability unmet: Please install Sonatype Nexus Professional."
        );
    }

    #[test]
    fn request_new_entry_uses_owner_namespace() {
        assert_eq!(
            request().new_entry(),
            entry("build", "42", "urn:maven/artifact#", false)
        );
    }

    #[tokio::test]
    async fn empty_username_aborts_without_network() {
        let service = MockService::new();
        let config = ServiceConfig::new("http://nexus", "", "secret");
        let mut trace: Vec<String> = Vec::new();

        let result = synchronize_with(&service, &request(), &config, &mut trace).await;

        assert!(!result.succeeded);
        assert_eq!(
            result.failure,
            Some(SyncFailure::ConfigIncomplete(vec!["username"]))
        );
        assert_eq!(result.aborted_in, Some(SyncState::ValidatingConfig));
        assert!(service.operations().is_empty());
        assert!(trace.last().unwrap().starts_with("[aborted]"));
    }

    #[tokio::test]
    async fn synchronize_rejects_incomplete_config_before_connecting() {
        let config = ServiceConfig::new("", "admin", "");
        let mut trace: Vec<String> = Vec::new();

        let result = synchronize(&request(), &config, &mut trace).await;

        assert_eq!(
            result.failure,
            Some(SyncFailure::ConfigIncomplete(vec!["url", "password"]))
        );
    }

    #[tokio::test]
    async fn invalid_url_aborts_in_validation() {
        let service = MockService::new();
        let config = ServiceConfig::new("nexus:8081", "admin", "admin123");
        let mut trace: Vec<String> = Vec::new();

        let result = synchronize_with(&service, &request(), &config, &mut trace).await;

        assert!(matches!(result.failure, Some(SyncFailure::InvalidConfig(_))));
        assert!(service.operations().is_empty());
    }

    #[tokio::test]
    async fn missing_metadata_capability_aborts_before_read() {
        let service = MockService::with_status(200, "Sonatype Nexus Professional 2.14");
        let mut trace: Vec<String> = Vec::new();

        let result = synchronize_with(&service, &request(), &config(), &mut trace).await;

        assert_eq!(
            result.failure,
            Some(SyncFailure::CapabilityUnmet(
                ProbeResult::MissingMetadataCapability
            ))
        );
        assert_eq!(result.attempted_operation(), Some("GET status"));
        assert_eq!(service.operations(), vec![MockOperation::Status]);
    }

    #[tokio::test]
    async fn wrong_edition_aborts_with_sub_reason() {
        let service = MockService::with_status(200, r#"{"plugins":["nexus:metadata"]}"#);
        let mut trace: Vec<String> = Vec::new();

        let result = synchronize_with(&service, &request(), &config(), &mut trace).await;

        assert_eq!(
            result.failure,
            Some(SyncFailure::CapabilityUnmet(ProbeResult::WrongEdition))
        );
        assert_eq!(service.write_count(), 0);
    }

    #[tokio::test]
    async fn read_failure_aborts_without_write() {
        let service = MockService::new();
        let mut trace: Vec<String> = Vec::new();

        let result = synchronize_with(&service, &request(), &config(), &mut trace).await;

        assert!(matches!(
            result.failure,
            Some(SyncFailure::ReadFailed(ServiceError::NotFound(_)))
        ));
        assert_eq!(result.aborted_in, Some(SyncState::Reading));
        assert_eq!(service.write_count(), 0);
    }

    #[tokio::test]
    async fn write_failure_aborts() {
        let service = MockService::new().fail_on(FailOn::WriteMetadata(ServiceError::Rejected {
            status: 403,
            message: "Forbidden".into(),
        }));
        service.insert_metadata(&tid(), MetadataSet::new());
        let mut trace: Vec<String> = Vec::new();

        let result = synchronize_with(&service, &request(), &config(), &mut trace).await;

        assert!(!result.succeeded);
        assert_eq!(result.aborted_in, Some(SyncState::Writing));
        assert!(matches!(
            result.failure,
            Some(SyncFailure::WriteFailed(ServiceError::Rejected { status: 403, .. }))
        ));
    }

    #[tokio::test]
    async fn read_only_entry_is_dropped_from_write() {
        let service = MockService::new();
        service.insert_metadata(
            &tid(),
            MetadataSet::from_entries(vec![entry("owner", "teamA", "other#", true)]),
        );
        let mut trace: Vec<String> = Vec::new();

        let result = synchronize_with(&service, &request(), &config(), &mut trace).await;

        assert!(result.succeeded);
        assert_eq!(result.final_state(), SyncState::Done);
        assert_eq!(
            result.submitted.entries(),
            &[entry("build", "42", "urn:maven/artifact#", false)]
        );
        assert_eq!(result.before.len(), 1);
        // the service keeps its read-only entry
        assert_eq!(result.after.len(), 2);
    }

    #[tokio::test]
    async fn distinct_key_is_carried_over() {
        let service = MockService::new();
        service.insert_metadata(
            &tid(),
            MetadataSet::from_entries(vec![entry("notes", "x", "urn:maven/artifact#", false)]),
        );
        let mut trace: Vec<String> = Vec::new();

        let result = synchronize_with(&service, &request(), &config(), &mut trace).await;

        assert!(result.succeeded);
        assert_eq!(
            result.submitted.entries(),
            &[
                entry("build", "42", "urn:maven/artifact#", false),
                entry("notes", "x", "urn:maven/artifact#", false),
            ]
        );
    }

    #[tokio::test]
    async fn confirmation_failure_is_a_warning() {
        let service = MockService::new()
            .fail_on(FailOn::ReadAfterWrite(ServiceError::Unreachable("reset".into())));
        service.insert_metadata(&tid(), MetadataSet::new());
        let mut trace: Vec<String> = Vec::new();

        let result = synchronize_with(&service, &request(), &config(), &mut trace).await;

        assert!(result.succeeded);
        assert!(result.failure.is_none());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("reset"));
        assert!(result.after.is_empty());
        assert_eq!(service.write_count(), 1);
    }

    #[tokio::test]
    async fn trace_covers_every_state_in_order() {
        let service = MockService::new();
        service.insert_metadata(&tid(), MetadataSet::new());
        let mut trace: Vec<String> = Vec::new();

        synchronize_with(&service, &request(), &config(), &mut trace).await;

        let states: Vec<&str> = trace
            .iter()
            .map(|l| l.trim_start_matches('[').split(']').next().unwrap())
            .collect();
        assert_eq!(
            states,
            vec![
                "init",
                "validating-config",
                "probing",
                "reading",
                "merging",
                "writing",
                "confirming",
                "done"
            ]
        );
        assert!(trace
            .iter()
            .all(|l| l.contains("urn:maven/artifact#de.mb:rest-test:0.0.1::jar")));
        assert!(trace[1].contains("user=admin"));
        assert!(!trace.iter().any(|l| l.contains("admin123")));
    }

    #[tokio::test]
    async fn operations_follow_protocol_order() {
        let service = MockService::new();
        service.insert_metadata(&tid(), MetadataSet::new());
        let mut trace: Vec<String> = Vec::new();

        synchronize_with(&service, &request(), &config(), &mut trace).await;

        let ops = service.operations();
        assert_eq!(ops.len(), 4);
        assert_eq!(ops[0], MockOperation::Status);
        assert_eq!(
            ops[1],
            MockOperation::ReadMetadata {
                transport_id: tid()
            }
        );
        assert!(matches!(&ops[2], MockOperation::WriteMetadata { .. }));
        assert!(matches!(&ops[3], MockOperation::ReadMetadata { .. }));
    }
}
