//! Edit audit trail.
//!
//! Records the lifecycle of one document's editing workflow, keyed by an
//! external job id: session start with document metadata, the extraction
//! snapshot, every edit applied, and the final output. Sessions move
//! through `Created -> Recording -> Finalized -> Persisted` and are
//! removed from the store when closed; closing always persists first.
//!
//! The snapshots a session stores are opaque JSON values, so the trail
//! has no dependency on how the document structures evolve.

mod session;
mod sink;

pub use session::{EditRecord, EditSession, SessionState, SessionStats, SessionStore};
pub use sink::{AuditSink, FileAuditSink};
