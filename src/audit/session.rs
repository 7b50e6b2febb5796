//! Per-job edit session records and the in-memory session store.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Lifecycle position of a session.
///
/// `Closed` never appears in the store; closing a session persists it and
/// removes the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Session started, document metadata captured
    Created,
    /// At least one edit recorded
    Recording,
    /// Final output set, completion timestamp stamped
    Finalized,
    /// Serialized to the external sink
    Persisted,
}

/// One recorded mutation: what was asked, what it looked like before and
/// after. The before/after snapshots are stored opaquely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRecord {
    /// Unique record id, generated at creation
    pub id: String,

    /// When the edit was recorded
    pub timestamp: DateTime<Utc>,

    /// Edit category, e.g. "inject-fields" or "text-replace"
    #[serde(rename = "type")]
    pub edit_type: String,

    /// The caller-supplied instruction that drove the edit, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,

    /// The selection the edit applied to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<Value>,

    /// Snapshot of the affected content before the edit
    pub before: Value,

    /// Snapshot of the affected content after the edit
    pub after: Value,

    /// Free-form extra data (diagnostics, counts, timings)
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub metadata: Value,
}

impl EditRecord {
    /// Create a record with a fresh id and the current timestamp.
    pub fn new(edit_type: impl Into<String>, before: Value, after: Value) -> Self {
        Self {
            id: Self::generate_id(),
            timestamp: Utc::now(),
            edit_type: edit_type.into(),
            instruction: None,
            selection: None,
            before,
            after,
            metadata: Value::Null,
        }
    }

    /// Attach the instruction text that produced this edit.
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    /// Attach the selection the edit applied to.
    pub fn with_selection(mut self, selection: Value) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Attach free-form metadata.
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Generate a unique record id of the form `edit_a1b2c3d4`.
    pub fn generate_id() -> String {
        let uuid = Uuid::new_v4().simple().to_string();
        format!("edit_{}", &uuid[..8])
    }
}

/// The full audit record for one document's editing workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSession {
    /// External job id this session is keyed by
    pub job_id: String,

    /// When the session was started
    pub started_at: DateTime<Utc>,

    /// Source-document metadata captured at start, stored opaquely
    pub document_info: Value,

    /// The extraction snapshot the edits started from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_extraction: Option<Value>,

    /// Every recorded edit, in order
    pub edits: Vec<EditRecord>,

    /// The final document snapshot, set on finalization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_output: Option<Value>,

    /// When the session was finalized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Current lifecycle position
    pub state: SessionState,
}

impl EditSession {
    /// Start a session for `job_id`, capturing document metadata.
    pub fn new(job_id: impl Into<String>, document_info: Value) -> Self {
        Self {
            job_id: job_id.into(),
            started_at: Utc::now(),
            document_info,
            original_extraction: None,
            edits: Vec::new(),
            final_output: None,
            completed_at: None,
            state: SessionState::Created,
        }
    }

    /// Derive summary statistics for the session as it stands.
    pub fn stats(&self) -> SessionStats {
        let mut edits_by_type: IndexMap<String, usize> = IndexMap::new();
        for edit in &self.edits {
            *edits_by_type.entry(edit.edit_type.clone()).or_insert(0) += 1;
        }
        SessionStats {
            edit_count: self.edits.len(),
            edits_by_type,
            has_extraction: self.original_extraction.is_some(),
            has_final_output: self.final_output.is_some(),
            duration_ms: self
                .completed_at
                .map(|done| (done - self.started_at).num_milliseconds()),
        }
    }
}

/// Summary statistics derivable from a session at any point.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    /// Total recorded edits
    pub edit_count: usize,

    /// Edit counts keyed by edit type, in first-seen order
    pub edits_by_type: IndexMap<String, usize>,

    /// Whether an extraction snapshot was recorded
    pub has_extraction: bool,

    /// Whether a final output was recorded
    pub has_final_output: bool,

    /// Start-to-finalization duration; `None` until finalized
    pub duration_ms: Option<i64>,
}

/// In-memory map of active sessions, keyed by job id.
///
/// Entries are independent; nothing is shared between jobs. Operations
/// against an unknown job id log a warning and do nothing, so a caller's
/// edit flow cannot be crashed by a missing or expired session.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: IndexMap<String, EditSession>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `job_id`. Starting a job id that already has an
    /// active session replaces it with a fresh one.
    pub fn start_session(&mut self, job_id: impl Into<String>, document_info: Value) {
        let job_id = job_id.into();
        if self.sessions.contains_key(&job_id) {
            log::warn!("session {} restarted; previous record discarded", job_id);
        }
        log::debug!("session {} started", job_id);
        self.sessions
            .insert(job_id.clone(), EditSession::new(job_id, document_info));
    }

    /// Look up an active session.
    pub fn session(&self, job_id: &str) -> Option<&EditSession> {
        self.sessions.get(job_id)
    }

    /// Number of active sessions.
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Attach the extraction snapshot the edits will start from.
    pub fn record_extraction(&mut self, job_id: &str, extraction: Value) -> bool {
        let Some(session) = self.known(job_id, "record_extraction") else {
            return false;
        };
        session.original_extraction = Some(extraction);
        true
    }

    /// Append an edit record. Returns the record's generated id, or `None`
    /// if the job is unknown or the session is already finalized.
    pub fn record_edit(&mut self, job_id: &str, record: EditRecord) -> Option<String> {
        let session = self.known(job_id, "record_edit")?;
        if matches!(
            session.state,
            SessionState::Finalized | SessionState::Persisted
        ) {
            log::warn!(
                "record_edit after finalization ignored for session {}",
                job_id
            );
            return None;
        }
        let id = record.id.clone();
        session.edits.push(record);
        session.state = SessionState::Recording;
        Some(id)
    }

    /// Set the final snapshot and stamp the completion time. A second call
    /// on the same session is ignored with a warning.
    pub fn record_final_output(&mut self, job_id: &str, output: Value) -> bool {
        let Some(session) = self.known(job_id, "record_final_output") else {
            return false;
        };
        if matches!(
            session.state,
            SessionState::Finalized | SessionState::Persisted
        ) {
            log::warn!("session {} already finalized; output kept", job_id);
            return false;
        }
        session.final_output = Some(output);
        session.completed_at = Some(Utc::now());
        session.state = SessionState::Finalized;
        true
    }

    /// Serialize the session to `sink`. Persisting before finalization is
    /// allowed (partial sessions are still worth keeping) but warned about.
    pub fn persist(&mut self, job_id: &str, sink: &dyn super::AuditSink) -> crate::Result<bool> {
        let Some(session) = self.known(job_id, "persist") else {
            return Ok(false);
        };
        if session.state != SessionState::Finalized {
            log::warn!("session {} persisted before finalization", job_id);
        }
        // The serialized snapshot carries the Persisted state, but the
        // in-memory transition only sticks if the sink write succeeds.
        let prior = session.state;
        session.state = SessionState::Persisted;
        if let Err(e) = sink.persist(session) {
            session.state = prior;
            return Err(e);
        }
        Ok(true)
    }

    /// Persist the session, then remove it from the active set.
    pub fn end_session(&mut self, job_id: &str, sink: &dyn super::AuditSink) -> crate::Result<bool> {
        if !self.persist(job_id, sink)? {
            return Ok(false);
        }
        self.sessions.shift_remove(job_id);
        log::debug!("session {} closed", job_id);
        Ok(true)
    }

    fn known(&mut self, job_id: &str, operation: &str) -> Option<&mut EditSession> {
        if !self.sessions.contains_key(job_id) {
            log::warn!("{} against unknown session {}; ignored", operation, job_id);
            return None;
        }
        self.sessions.get_mut(job_id)
    }
}
