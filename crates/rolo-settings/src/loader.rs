//! Settings loading: defaults ← file ← environment.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::Result;
use crate::types::RoloSettings;

/// Path to the user settings file: `~/.rolo/settings.json`.
#[must_use]
pub fn settings_path() -> PathBuf {
    home_dir().join(".rolo").join("settings.json")
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

/// Deep-merge `overlay` into `base`.
///
/// Objects merge recursively; any other value in `overlay` replaces the
/// corresponding value in `base`.
#[must_use]
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                let _ = base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Load settings from the default path with env overrides applied.
pub fn load_settings() -> Result<RoloSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific file path.
///
/// A missing file is not an error — defaults are used. The file contents
/// deep-merge over the compiled defaults, then `ROLO_*` environment
/// variables override individual values, then [`RoloSettings::validate`]
/// corrects anything out of range.
pub fn load_settings_from_path(path: &Path) -> Result<RoloSettings> {
    let defaults = serde_json::to_value(RoloSettings::default())?;

    let merged = if path.exists() {
        let raw = std::fs::read_to_string(path)?;
        let file_value: Value = serde_json::from_str(&raw)?;
        deep_merge(defaults, file_value)
    } else {
        tracing::debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: RoloSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    settings.validate();
    Ok(settings)
}

/// Apply `ROLO_*` environment overrides (highest priority layer).
fn apply_env_overrides(settings: &mut RoloSettings) {
    if let Ok(url) = std::env::var("ROLO_SERVER_URL") {
        settings.remote.server_url = url;
    }
    if let Ok(username) = std::env::var("ROLO_USERNAME") {
        settings.remote.username = username;
    }
    if let Ok(password) = std::env::var("ROLO_PASSWORD") {
        settings.remote.password = password;
    }
    if let Ok(dir) = std::env::var("ROLO_CONTACTS_DIR") {
        settings.vault.contacts_dir = dir;
    }
    if let Ok(minutes) = std::env::var("ROLO_SYNC_INTERVAL_MINUTES") {
        match minutes.parse() {
            Ok(m) => settings.sync.interval_minutes = m,
            Err(_) => tracing::warn!(value = %minutes, "ignoring bad ROLO_SYNC_INTERVAL_MINUTES"),
        }
    }
    if let Ok(secs) = std::env::var("ROLO_HTTP_TIMEOUT_SECS") {
        match secs.parse() {
            Ok(s) => settings.remote.timeout_secs = s,
            Err(_) => tracing::warn!(value = %secs, "ignoring bad ROLO_HTTP_TIMEOUT_SECS"),
        }
    }
    if let Ok(filter) = std::env::var("ROLO_LOG") {
        settings.logging.filter = filter;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
