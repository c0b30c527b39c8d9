//! End-to-end synchronization scenarios against the in-memory service.

use nexmeta::core::coordinate::{canonical_id, transport_id};
use nexmeta::core::types::{ArtifactCoordinate, MetadataEntry, MetadataSet, ServiceConfig};
use nexmeta::engine::{
    synchronize_with, NullSink, ProbeResult, SyncFailure, SyncRequest, SyncState,
};
use nexmeta::service::mock::{FailOn, MockOperation, MockService};
use nexmeta::service::ServiceError;

const OWNER_NS: &str = "urn:maven/artifact#";

fn coordinate() -> ArtifactCoordinate {
    ArtifactCoordinate::new("urn:maven/artifact", "de.mb", "rest-test", "0.0.1", "jar")
}

fn tid() -> String {
    transport_id(&canonical_id(&coordinate()))
}

fn config() -> ServiceConfig {
    ServiceConfig::new("http://nexus:8081/nexus", "admin", "admin123")
}

fn entry(key: &str, value: &str, namespace: &str, read_only: bool) -> MetadataEntry {
    MetadataEntry {
        key: key.into(),
        value: value.into(),
        namespace: namespace.into(),
        read_only,
    }
}

#[tokio::test]
async fn repeated_runs_converge() {
    let service = MockService::new();
    service.insert_metadata(&tid(), MetadataSet::new());
    let request = SyncRequest::new(coordinate(), "build", "42");

    let first = synchronize_with(&service, &request, &config(), &mut NullSink).await;
    let second = synchronize_with(&service, &request, &config(), &mut NullSink).await;

    assert!(first.succeeded && second.succeeded);
    assert_eq!(first.submitted, second.submitted);
    assert_eq!(
        service.stored_metadata(&tid()).unwrap().entries(),
        &[entry("build", "42", OWNER_NS, false)]
    );
}

#[tokio::test]
async fn new_value_replaces_previous_value() {
    let service = MockService::new();
    service.insert_metadata(
        &tid(),
        MetadataSet::from_entries(vec![entry("build", "41", OWNER_NS, false)]),
    );

    let result = synchronize_with(
        &service,
        &SyncRequest::new(coordinate(), "build", "42"),
        &config(),
        &mut NullSink,
    )
    .await;

    assert!(result.succeeded);
    assert_eq!(result.submitted.len(), 1);
    assert_eq!(
        result.after.find("build", OWNER_NS).map(|e| e.value.as_str()),
        Some("42")
    );
}

#[tokio::test]
async fn same_key_in_foreign_namespace_is_kept() {
    let service = MockService::new();
    service.insert_metadata(
        &tid(),
        MetadataSet::from_entries(vec![entry("build", "7", "ci#", false)]),
    );

    let result = synchronize_with(
        &service,
        &SyncRequest::new(coordinate(), "build", "42"),
        &config(),
        &mut NullSink,
    )
    .await;

    assert!(result.succeeded);
    assert_eq!(
        result.submitted.entries(),
        &[
            entry("build", "42", OWNER_NS, false),
            entry("build", "7", "ci#", false),
        ]
    );
}

#[tokio::test]
async fn read_only_entries_survive_on_the_server() {
    let service = MockService::new();
    service.insert_metadata(
        &tid(),
        MetadataSet::from_entries(vec![entry("owner", "teamA", "other#", true)]),
    );

    let result = synchronize_with(
        &service,
        &SyncRequest::new(coordinate(), "build", "42"),
        &config(),
        &mut NullSink,
    )
    .await;

    assert!(result.succeeded);
    assert!(result.submitted.iter().all(|e| !e.read_only));
    assert!(result.after.find("owner", "other#").is_some());
    assert_eq!(result.after.len(), 2);
}

#[tokio::test]
async fn unreachable_status_is_a_capability_failure() {
    let service =
        MockService::new().fail_on(FailOn::Status(ServiceError::Unreachable("refused".into())));

    let result = synchronize_with(
        &service,
        &SyncRequest::new(coordinate(), "build", "42"),
        &config(),
        &mut NullSink,
    )
    .await;

    match &result.failure {
        Some(SyncFailure::CapabilityUnmet(ProbeResult::Unreachable(reason))) => {
            assert!(reason.contains("refused"))
        }
        other => panic!("expected unreachable, got {:?}", other),
    }
    assert_eq!(result.aborted_in, Some(SyncState::Probing));
    assert_eq!(service.operations(), vec![MockOperation::Status]);
}

#[tokio::test]
async fn write_failure_leaves_stored_metadata_untouched() {
    let stored = MetadataSet::from_entries(vec![entry("notes", "x", OWNER_NS, false)]);
    let service = MockService::new().fail_on(FailOn::WriteMetadata(ServiceError::Rejected {
        status: 400,
        message: "bad request".into(),
    }));
    service.insert_metadata(&tid(), stored.clone());

    let result = synchronize_with(
        &service,
        &SyncRequest::new(coordinate(), "build", "42"),
        &config(),
        &mut NullSink,
    )
    .await;

    assert!(!result.succeeded);
    assert_eq!(result.aborted_in, Some(SyncState::Writing));
    assert_eq!(service.stored_metadata(&tid()), Some(stored));
}
