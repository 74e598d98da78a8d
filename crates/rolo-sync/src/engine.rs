//! The reconciliation engine.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use rolo_core::{Contact, ContactVault, RemoteDirectory, RemoteError, SyncError};

use crate::observer::{SyncObserver, TracingObserver};
use crate::plan::compute_plan;
use crate::report::SyncReport;

/// Drives one store toward the other and back.
///
/// Stateless across cycles — every [`run`](Self::run) is a full independent
/// pass over both snapshots; there is no cursor, checkpoint, or version
/// vector. An internal run lock guarantees at most one cycle in flight per
/// engine, so a timer tick can never race a manual run on the same vault.
pub struct SyncEngine<R, V> {
    pub(crate) remote: R,
    pub(crate) vault: V,
    observer: Arc<dyn SyncObserver>,
    run_lock: Mutex<()>,
}

impl<R, V> SyncEngine<R, V>
where
    R: RemoteDirectory,
    V: ContactVault,
{
    /// Create an engine reporting through the default tracing observer.
    pub fn new(remote: R, vault: V) -> Self {
        Self::with_observer(remote, vault, Arc::new(TracingObserver))
    }

    /// Create an engine with a custom observer.
    pub fn with_observer(remote: R, vault: V, observer: Arc<dyn SyncObserver>) -> Self {
        Self {
            remote,
            vault,
            observer,
            run_lock: Mutex::new(()),
        }
    }

    /// Run one reconciliation cycle, waiting for any in-flight cycle first.
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let _guard = self.run_lock.lock().await;
        self.run_cycle().await
    }

    /// Run one cycle unless another is already in flight.
    ///
    /// Returns `None` when a cycle holds the run lock — the caller (the
    /// periodic scheduler) skips the tick rather than queueing behind it.
    pub async fn try_run(&self) -> Option<Result<SyncReport, SyncError>> {
        let guard = self.run_lock.try_lock().ok()?;
        let result = self.run_cycle().await;
        drop(guard);
        Some(result)
    }

    /// Verify the remote server answers directory requests.
    ///
    /// A connectivity probe for the `check` entry point; not part of the
    /// sync cycle.
    pub async fn check_connection(&self) -> Result<(), RemoteError> {
        self.remote.test_connection().await
    }

    async fn run_cycle(&self) -> Result<SyncReport, SyncError> {
        let run_id = Uuid::now_v7();
        let started_at = chrono::Utc::now();
        let clock = Instant::now();
        self.observer.cycle_started(run_id);

        // Fetch phase: either side failing aborts the cycle — nothing has
        // been mutated yet, so there is nothing to roll back.
        let remote_snapshot = match self.remote.fetch_contacts().await {
            Ok(contacts) => contacts,
            Err(e) => return Err(self.abort(run_id, e.into())),
        };
        let local_snapshot = match self.vault.list_records().await {
            Ok(records) => records,
            Err(e) => return Err(self.abort(run_id, e.into())),
        };

        debug!(
            run_id = %run_id,
            remote = remote_snapshot.len(),
            local = local_snapshot.len(),
            "snapshots fetched"
        );

        let plan = compute_plan(&remote_snapshot, &local_snapshot);

        // Apply phase: strictly sequential, and per-record failures never
        // abort the cycle — one bad record must not block the rest.
        let mut report = SyncReport {
            run_id,
            started_at,
            duration_ms: 0,
            remote_contacts: remote_snapshot.len(),
            local_records: local_snapshot.len(),
            updated_local: 0,
            created_local: 0,
            created_remote: 0,
            failed: 0,
        };

        for (record, contact) in &plan.update_local {
            match self.vault.update_record(record, contact).await {
                Ok(()) => report.updated_local += 1,
                Err(e) => self.record_failure(&mut report, &contact.uid, &e.to_string()),
            }
        }

        for contact in &plan.create_local {
            match self.vault.create_record(contact).await {
                Ok(()) => report.created_local += 1,
                Err(e) => self.record_failure(&mut report, &contact.uid, &e.to_string()),
            }
        }

        for contact in &plan.create_remote {
            let upload = upload_projection(contact);
            match self.remote.create_contact(&upload).await {
                Ok(()) => report.created_remote += 1,
                Err(e) => self.record_failure(&mut report, &contact.uid, &e.to_string()),
            }
        }

        report.duration_ms = clock.elapsed().as_millis() as u64;
        self.observer.cycle_completed(&report);
        Ok(report)
    }

    fn abort(&self, run_id: Uuid, error: SyncError) -> SyncError {
        self.observer.cycle_failed(run_id, &error);
        error
    }

    fn record_failure(&self, report: &mut SyncReport, uid: &str, message: &str) {
        warn!(run_id = %report.run_id, uid = %uid, error = %message, "record apply failed");
        report.failed += 1;
        self.observer.record_failed(report.run_id, uid, message);
    }
}

/// The narrow field set carried toward the server.
///
/// create-remote sends only uid, fullName, email, and phone — deliberately
/// narrower than the nine fields create-local writes. Do not symmetrize.
fn upload_projection(contact: &Contact) -> Contact {
    Contact {
        uid: contact.uid.clone(),
        full_name: contact.full_name.clone(),
        email: contact.email.clone(),
        phone: contact.phone.clone(),
        ..Contact::default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
