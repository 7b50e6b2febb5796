//! Persistence seam for finished sessions.

use super::session::EditSession;
use crate::Result;
use std::fs;
use std::path::PathBuf;

/// Destination for serialized sessions, addressable by job id.
///
/// Implementations decide where the JSON document goes; the store only
/// cares that persisting either succeeds or returns an error.
pub trait AuditSink {
    /// Write one session's full audit record.
    fn persist(&self, session: &EditSession) -> Result<()>;
}

/// Sink writing one pretty-printed `<job_id>.json` file per session.
#[derive(Debug, Clone)]
pub struct FileAuditSink {
    directory: PathBuf,
}

impl FileAuditSink {
    /// Create a sink rooted at `directory`. The directory is created on
    /// first persist if it does not exist.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Path the given job id would be written to.
    pub fn path_for(&self, job_id: &str) -> PathBuf {
        self.directory.join(format!("{}.json", job_id))
    }
}

impl AuditSink for FileAuditSink {
    fn persist(&self, session: &EditSession) -> Result<()> {
        fs::create_dir_all(&self.directory)?;
        let json = serde_json::to_string_pretty(session)?;
        let path = self.path_for(&session.job_id);
        fs::write(&path, json)?;
        log::debug!("session {} written to {}", session.job_id, path.display());
        Ok(())
    }
}
