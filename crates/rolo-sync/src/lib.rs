//! # rolo-sync
//!
//! The bidirectional reconciliation core.
//!
//! Given the two full contact snapshots, [`plan::compute_plan`] classifies
//! every contact by uid membership into update-local, create-local, or
//! create-remote, and [`engine::SyncEngine`] applies the plan best-effort:
//! a fetch failure aborts the cycle, a per-record failure is counted and
//! skipped. [`scheduler::SyncScheduler`] drives periodic cycles with an
//! overlap guard, and [`observer::SyncObserver`] is the seam the host
//! surface plugs its status notices into.
//!
//! The engine is written against the store traits in [`rolo_core`] only —
//! the CardDAV client and the note vault are interchangeable with doubles.

#![deny(unsafe_code)]

pub mod engine;
pub mod observer;
pub mod plan;
pub mod report;
pub mod scheduler;

pub use engine::SyncEngine;
pub use observer::{SyncObserver, TracingObserver};
pub use plan::{SyncPlan, compute_plan};
pub use report::SyncReport;
pub use scheduler::SyncScheduler;
