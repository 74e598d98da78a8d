//! # rolo-settings
//!
//! Configuration management with layered sources for rolo.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`RoloSettings::default()`]
//! 2. **User file** — `~/.rolo/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `ROLO_*` overrides (highest priority)
//!
//! The global singleton is reloadable: after the settings file is rewritten,
//! [`reload_settings_from_path`] swaps the cached value so all subsequent
//! [`get_settings`] calls return fresh data.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

/// Global settings singleton.
///
/// `RwLock<Option<Arc<..>>>` instead of `OnceLock` so the cached value can
/// be swapped after a reload. Reads are cheap (shared lock + `Arc::clone`).
static SETTINGS: RwLock<Option<Arc<RoloSettings>>> = RwLock::new(None);

/// Get the global settings instance.
///
/// On first call, loads settings from `~/.rolo/settings.json` with env
/// overrides. On subsequent calls, returns the cached value. If loading
/// fails, returns compiled defaults.
///
/// Returns an `Arc` so callers hold a consistent snapshot even if another
/// thread reloads settings concurrently.
pub fn get_settings() -> Arc<RoloSettings> {
    // Fast path: read lock
    {
        if let Some(ref s) = *SETTINGS.read() {
            return Arc::clone(s);
        }
    }

    // Slow path: first access, take write lock
    let mut guard = SETTINGS.write();
    // Double-check after acquiring write lock (another thread may have initialized)
    if let Some(ref s) = *guard {
        return Arc::clone(s);
    }

    let settings = Arc::new(match load_settings() {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            RoloSettings::default()
        }
    });
    *guard = Some(Arc::clone(&settings));
    settings
}

/// Initialize the global settings with a specific value.
///
/// Replaces any previously cached settings. Useful for tests and startup
/// where the settings are already in hand.
pub fn init_settings(settings: RoloSettings) {
    let mut guard = SETTINGS.write();
    *guard = Some(Arc::new(settings));
}

/// Reload settings from a specific file path.
///
/// Reads the file, deep-merges over defaults, applies env overrides, and
/// swaps the global cache. All subsequent [`get_settings`] calls return the
/// new values.
pub fn reload_settings_from_path(path: &Path) {
    let new = Arc::new(match load_settings_from_path(path) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, ?path, "failed to reload settings, falling back to defaults");
            RoloSettings::default()
        }
    });
    let mut guard = SETTINGS.write();
    *guard = Some(new);
    tracing::info!(?path, "settings reloaded from disk");
}

/// Reset the global settings cache (test-only).
#[cfg(test)]
pub(crate) fn reset_settings() {
    let mut guard = SETTINGS.write();
    *guard = None;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that mutate the global SETTINGS static must hold this lock
    /// to avoid racing with each other.
    static SETTINGS_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn re_exports_work() {
        let _settings = RoloSettings::default();
        let _path = settings_path();
    }

    #[test]
    fn init_settings_sets_custom_value() {
        let _lock = SETTINGS_MUTEX.lock().unwrap();
        reset_settings();
        let mut custom = RoloSettings::default();
        custom.sync.interval_minutes = 7;
        init_settings(custom);
        assert_eq!(get_settings().sync.interval_minutes, 7);
        reset_settings();
    }

    #[test]
    fn reload_settings_from_path_updates_cached_value() {
        let _lock = SETTINGS_MUTEX.lock().unwrap();
        reset_settings();
        init_settings(RoloSettings::default());
        assert_eq!(get_settings().vault.contacts_dir, "Contacts");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"vault": {"contactsDir": "People"}}"#).unwrap();

        reload_settings_from_path(&path);

        let updated = get_settings();
        assert_eq!(updated.vault.contacts_dir, "People");
        // Other defaults preserved (deep merge)
        assert_eq!(updated.remote.timeout_secs, 30);
        reset_settings();
    }

    #[test]
    fn get_settings_returns_arc_for_snapshot_isolation() {
        let _lock = SETTINGS_MUTEX.lock().unwrap();
        reset_settings();
        init_settings(RoloSettings::default());

        let snapshot = get_settings();
        assert_eq!(snapshot.sync.interval_minutes, 0);

        let mut new = RoloSettings::default();
        new.sync.interval_minutes = 90;
        init_settings(new);

        // Snapshot still sees the old value (Arc isolation)
        assert_eq!(snapshot.sync.interval_minutes, 0);
        assert_eq!(get_settings().sync.interval_minutes, 90);
        reset_settings();
    }
}
