//! Integration tests for the edit audit trail, through the file sink.

use docsplice::audit::{
    AuditSink, EditRecord, EditSession, FileAuditSink, SessionState, SessionStore,
};
use serde_json::json;
use tempfile::tempdir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_full_session_lifecycle_to_disk() {
    init_logging();
    let dir = tempdir().unwrap();
    let sink = FileAuditSink::new(dir.path());
    let mut store = SessionStore::new();

    store.start_session("job-100", json!({"title": "Intake Form", "pages": 2}));
    store.record_extraction("job-100", json!({"blocks": 14}));
    store.record_edit(
        "job-100",
        EditRecord::new("inject-fields", json!(null), json!({"injected": 3}))
            .with_instruction("add name and date fields"),
    );
    store.record_edit(
        "job-100",
        EditRecord::new("text-replace", json!("____"), json!("")),
    );
    store.record_final_output("job-100", json!({"pages": []}));

    assert!(store.end_session("job-100", &sink).unwrap());
    assert_eq!(store.active_count(), 0);

    let written = std::fs::read_to_string(dir.path().join("job-100.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["jobId"], "job-100");
    assert_eq!(value["state"], "persisted");
    assert_eq!(value["edits"].as_array().unwrap().len(), 2);
    assert_eq!(value["edits"][0]["type"], "inject-fields");
    assert!(value["completedAt"].is_string());
}

#[test]
fn test_unknown_job_operations_do_not_error() {
    let dir = tempdir().unwrap();
    let sink = FileAuditSink::new(dir.path());
    let mut store = SessionStore::new();

    assert!(!store.record_extraction("missing", json!({})));
    assert!(!store.record_final_output("missing", json!({})));
    assert!(!store.end_session("missing", &sink).unwrap());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_persist_keeps_session_active() {
    let dir = tempdir().unwrap();
    let sink = FileAuditSink::new(dir.path());
    let mut store = SessionStore::new();

    store.start_session("job-1", json!({}));
    store.record_final_output("job-1", json!(null));
    assert!(store.persist("job-1", &sink).unwrap());

    assert_eq!(store.active_count(), 1);
    assert_eq!(
        store.session("job-1").unwrap().state,
        SessionState::Persisted
    );
    assert!(sink.path_for("job-1").exists());
}

/// Sink whose writes always fail, standing in for a full or revoked
/// destination.
struct FailingSink;

impl AuditSink for FailingSink {
    fn persist(&self, _session: &EditSession) -> docsplice::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into())
    }
}

#[test]
fn test_failed_persist_leaves_session_state_untouched() {
    let mut store = SessionStore::new();
    store.start_session("job-f", json!({}));
    store.record_final_output("job-f", json!(null));

    // The write error propagates and the session must not claim Persisted.
    assert!(store.persist("job-f", &FailingSink).is_err());
    assert_eq!(
        store.session("job-f").unwrap().state,
        SessionState::Finalized
    );

    // A retry against a working sink completes the transition.
    let dir = tempdir().unwrap();
    let sink = FileAuditSink::new(dir.path());
    assert!(store.persist("job-f", &sink).unwrap());
    assert_eq!(
        store.session("job-f").unwrap().state,
        SessionState::Persisted
    );
}

#[test]
fn test_failed_persist_keeps_session_in_store_on_close() {
    let mut store = SessionStore::new();
    store.start_session("job-g", json!({}));
    store.record_final_output("job-g", json!(null));

    // Closing always persists first; a failed write must not drop the
    // session.
    assert!(store.end_session("job-g", &FailingSink).is_err());
    assert_eq!(store.active_count(), 1);
    assert_eq!(
        store.session("job-g").unwrap().state,
        SessionState::Finalized
    );
}

#[test]
fn test_concurrent_jobs_write_separate_files() {
    let dir = tempdir().unwrap();
    let sink = FileAuditSink::new(dir.path());
    let mut store = SessionStore::new();

    for job in ["alpha", "beta"] {
        store.start_session(job, json!({"title": job}));
        store.record_edit(job, EditRecord::new("inject-fields", json!(null), json!(null)));
        store.record_final_output(job, json!(null));
        store.end_session(job, &sink).unwrap();
    }

    let alpha: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(sink.path_for("alpha")).unwrap()).unwrap();
    let beta: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(sink.path_for("beta")).unwrap()).unwrap();
    assert_eq!(alpha["documentInfo"]["title"], "alpha");
    assert_eq!(beta["documentInfo"]["title"], "beta");
}

#[test]
fn test_edit_recording_tracks_injection_reports() {
    use docsplice::inject::{inject_into_page, FieldDescriptor, InjectionMethod};
    use docsplice::{Element, FieldType, Page};

    let page = Page::with_elements(1, vec![Element::paragraph("Full Name:")]);
    let desc = FieldDescriptor::new("name", FieldType::TextField, 0, InjectionMethod::InsertAfter)
        .with_anchor_text("Full Name:");
    let report = inject_into_page(&page, &[desc]);

    let mut store = SessionStore::new();
    store.start_session("job-7", json!({}));
    let record = EditRecord::new(
        "inject-fields",
        serde_json::to_value(&page).unwrap(),
        serde_json::to_value(&report.structure).unwrap(),
    )
    .with_metadata(json!({"injected": report.injected}));
    let id = store.record_edit("job-7", record).unwrap();

    let session = store.session("job-7").unwrap();
    assert_eq!(session.edits[0].id, id);
    assert_eq!(session.edits[0].metadata["injected"], 1);
    let stats = session.stats();
    assert_eq!(stats.edits_by_type.get("inject-fields"), Some(&1));
}
