//! Per-cycle result reporting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Summary of one completed reconciliation cycle.
///
/// Per-record failures are counted here rather than propagated — a cycle
/// that fetched both snapshots completes even if individual records could
/// not be applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// Cycle identifier.
    pub run_id: Uuid,
    /// When the cycle started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the cycle in milliseconds.
    pub duration_ms: u64,
    /// Size of the remote snapshot.
    pub remote_contacts: usize,
    /// Size of the local snapshot.
    pub local_records: usize,
    /// Local notes updated in place.
    pub updated_local: usize,
    /// Local notes created.
    pub created_local: usize,
    /// Contacts uploaded to the server.
    pub created_remote: usize,
    /// Records whose apply step failed (logged and skipped).
    pub failed: usize,
}

impl SyncReport {
    /// Whether any record failed to apply.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Total operations applied successfully.
    #[must_use]
    pub fn applied(&self) -> usize {
        self.updated_local + self.created_local + self.created_remote
    }
}
