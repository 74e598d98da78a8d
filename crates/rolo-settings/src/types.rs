//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]` so a partial
//! `settings.json` deep-merges over compiled defaults — missing fields get
//! their default value during deserialization.

use serde::{Deserialize, Serialize};

/// Root settings type for rolo.
///
/// Loaded from `~/.rolo/settings.json` with defaults applied for missing
/// fields, then overridden by `ROLO_*` environment variables.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoloSettings {
    /// Settings schema version.
    pub version: String,
    /// Remote CardDAV server settings.
    pub remote: RemoteSettings,
    /// Local vault settings.
    pub vault: VaultSettings,
    /// Sync cycle settings.
    pub sync: SyncSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for RoloSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            remote: RemoteSettings::default(),
            vault: VaultSettings::default(),
            sync: SyncSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl RoloSettings {
    /// Correct invalid values in place rather than rejecting the file.
    ///
    /// Called automatically during loading.
    pub fn validate(&mut self) {
        if self.remote.timeout_secs == 0 {
            tracing::warn!("remote timeoutSecs of 0 corrected to default 30");
            self.remote.timeout_secs = 30;
        }
    }
}

/// Remote CardDAV server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteSettings {
    /// Address-book collection URL, e.g. `https://dav.example.com/contacts/`.
    pub server_url: String,
    /// Basic-auth username.
    pub username: String,
    /// Basic-auth password. Never logged.
    pub password: String,
    /// Per-request timeout in seconds. A hung server must not stall sync.
    pub timeout_secs: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            server_url: String::new(),
            username: String::new(),
            password: String::new(),
            timeout_secs: 30,
        }
    }
}

/// Local vault settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VaultSettings {
    /// Folder holding the contact notes.
    pub contacts_dir: String,
}

impl Default for VaultSettings {
    fn default() -> Self {
        Self {
            contacts_dir: "Contacts".to_string(),
        }
    }
}

/// Sync cycle settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncSettings {
    /// Minutes between periodic runs. 0 disables periodic sync.
    pub interval_minutes: u64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            interval_minutes: 0,
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `rolo_sync=debug`.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
