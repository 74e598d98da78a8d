//! # rolo
//!
//! Wiring for the rolo binary: builds the production engine out of the
//! settings — the CardDAV client on the remote side, the note vault on the
//! local side.

#![deny(unsafe_code)]

use std::time::Duration;

use rolo_carddav::{DavClient, DavConfig};
use rolo_core::RemoteError;
use rolo_settings::RoloSettings;
use rolo_sync::SyncEngine;
use rolo_vault::NoteStore;

/// Build the production engine from settings.
pub fn build_engine(settings: &RoloSettings) -> Result<SyncEngine<DavClient, NoteStore>, RemoteError> {
    let client = DavClient::new(DavConfig {
        server_url: settings.remote.server_url.clone(),
        username: settings.remote.username.clone(),
        password: settings.remote.password.clone(),
        timeout: Duration::from_secs(settings.remote.timeout_secs),
    })?;
    let store = NoteStore::new(&settings.vault.contacts_dir);
    Ok(SyncEngine::new(client, store))
}

/// Periodic sync interval from settings; zero disables the schedule.
#[must_use]
pub fn sync_interval(settings: &RoloSettings) -> Duration {
    Duration::from_secs(settings.sync.interval_minutes * 60)
}
