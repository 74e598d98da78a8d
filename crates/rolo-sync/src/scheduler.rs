//! Periodic sync trigger.
//!
//! An owned handle around the timer task — start/stop lifecycle, no
//! process-global state. Ticks that fire while a cycle is still in flight
//! are skipped (never queued), and stopping only prevents future runs; an
//! in-flight cycle always completes.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use rolo_core::{ContactVault, RemoteDirectory};

use crate::engine::SyncEngine;

/// Handle to the periodic sync task.
///
/// Dropping the handle stops the schedule; the task notices the
/// cancellation at its next loop turn.
pub struct SyncScheduler {
    cancel: CancellationToken,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl SyncScheduler {
    /// Start running cycles every `every` on the shared engine.
    ///
    /// A zero interval disables periodic sync — the returned handle owns no
    /// task. The first cycle runs one full interval after start, matching a
    /// plain repeating timer.
    pub fn start<R, V>(engine: Arc<SyncEngine<R, V>>, every: Duration) -> Self
    where
        R: RemoteDirectory + 'static,
        V: ContactVault + 'static,
    {
        let cancel = CancellationToken::new();
        if every.is_zero() {
            info!("periodic sync disabled");
            return Self {
                cancel,
                handle: None,
            };
        }

        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // A tick that lands while a cycle is running is coalesced, not
            // replayed in a burst afterwards.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // interval() fires immediately; consume that so the first cycle
            // waits a full period.
            let _ = ticker.tick().await;

            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    _ = ticker.tick() => match engine.try_run().await {
                        None => warn!("previous sync still in flight, skipping tick"),
                        Some(Ok(report)) => {
                            debug!(run_id = %report.run_id, "scheduled sync completed");
                        }
                        Some(Err(e)) => warn!(error = %e, "scheduled sync failed"),
                    },
                }
            }
            debug!("sync schedule stopped");
        });

        info!(interval_secs = every.as_secs(), "periodic sync started");
        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Whether a timer task is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop scheduling future cycles.
    ///
    /// Does not interrupt a cycle already in flight.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Stop and wait for the timer task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for SyncScheduler {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
