//! Cycle observability seam.
//!
//! The engine reports lifecycle moments through this trait instead of
//! logging or popping notices directly, so the host surface (CLI status
//! line, desktop notification, test recorder) is injectable.

use uuid::Uuid;

use rolo_core::SyncError;

use crate::report::SyncReport;

/// Receiver for sync lifecycle notifications.
///
/// All methods default to no-ops so implementations override only what
/// they care about.
pub trait SyncObserver: Send + Sync {
    /// A cycle is starting.
    fn cycle_started(&self, _run_id: Uuid) {}

    /// A cycle finished; per-record failures (if any) are in the report.
    fn cycle_completed(&self, _report: &SyncReport) {}

    /// A cycle aborted before the apply phase (fetch failure on either side).
    fn cycle_failed(&self, _run_id: Uuid, _error: &SyncError) {}

    /// One record could not be applied; the cycle continues.
    fn record_failed(&self, _run_id: Uuid, _uid: &str, _message: &str) {}
}

/// Observer that forwards everything to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SyncObserver for TracingObserver {
    fn cycle_started(&self, run_id: Uuid) {
        tracing::info!(run_id = %run_id, "sync started");
    }

    fn cycle_completed(&self, report: &SyncReport) {
        tracing::info!(
            run_id = %report.run_id,
            remote = report.remote_contacts,
            local = report.local_records,
            updated = report.updated_local,
            created_local = report.created_local,
            created_remote = report.created_remote,
            failed = report.failed,
            duration_ms = report.duration_ms,
            "sync completed"
        );
    }

    fn cycle_failed(&self, run_id: Uuid, error: &SyncError) {
        tracing::error!(run_id = %run_id, error = %error, "sync failed");
    }

    fn record_failed(&self, run_id: Uuid, uid: &str, message: &str) {
        tracing::warn!(run_id = %run_id, uid = %uid, error = %message, "record skipped");
    }
}
