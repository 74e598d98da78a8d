//! The canonical contact entity shared by both stores.
//!
//! Field names use `camelCase` serde renaming to match the note header keys
//! (`fullName`, not `full_name`).

use serde::{Deserialize, Serialize};

/// A contact as seen by the reconciliation engine.
///
/// Identity is the `uid` — a non-empty string, globally unique across both
/// stores, compared byte-for-byte (case-sensitive, no normalization).
/// `full_name` is required and also derives the vault note's filename.
/// All other fields are optional and default to the empty string; an empty
/// field is a real value that overwrites stale data on update, not a
/// "leave unchanged" marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    /// Stable unique identifier. Immutable once assigned.
    pub uid: String,
    /// Display name. Required; derives the local note filename.
    pub full_name: String,
    /// Primary email address.
    pub email: String,
    /// Primary phone number.
    pub phone: String,
    /// Organization / company.
    pub organization: String,
    /// Job title.
    pub title: String,
    /// Postal address, single line.
    pub address: String,
    /// Birthday, normalized to `YYYY-MM-DD` (or `xxxx-MM-DD` when the year
    /// is unknown). See [`normalize_birthday`].
    pub birthday: String,
    /// Home page or profile URL.
    pub url: String,
}

impl Contact {
    /// Create a contact with the two required fields set.
    #[must_use]
    pub fn new(uid: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            full_name: full_name.into(),
            ..Self::default()
        }
    }

    /// Whether this contact may enter reconciliation.
    ///
    /// A contact lacking `uid` or `full_name` must be dropped before the
    /// engine ever sees it — parsers return `None` for such records rather
    /// than erroring.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.uid.is_empty() && !self.full_name.is_empty()
    }
}

/// Normalize a raw birthday value to `YYYY-MM-DD` or `xxxx-MM-DD`.
///
/// Accepted inputs:
/// - `YYYY-MM-DD` — passed through unchanged
/// - `--MM-DD` / `MM-DD` — year unknown, becomes `xxxx-MM-DD`
/// - compact vCard forms `YYYYMMDD` and `--MMDD` — expanded to the dashed
///   equivalents
///
/// Anything else yields the empty string (an unset birthday).
#[must_use]
pub fn normalize_birthday(raw: &str) -> String {
    let value = raw.trim();

    fn digits(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
    }

    // Dashed forms.
    if let Some(rest) = value.strip_prefix("--") {
        // --MM-DD or --MMDD
        if let Some((month, day)) = rest.split_once('-') {
            if month.len() == 2 && day.len() == 2 && digits(month) && digits(day) {
                return format!("xxxx-{month}-{day}");
            }
        } else if rest.len() == 4 && digits(rest) {
            return format!("xxxx-{}-{}", &rest[..2], &rest[2..]);
        }
        return String::new();
    }

    let parts: Vec<&str> = value.split('-').collect();
    match parts.as_slice() {
        [year, month, day]
            if year.len() == 4
                && month.len() == 2
                && day.len() == 2
                && digits(year)
                && digits(month)
                && digits(day) =>
        {
            value.to_string()
        }
        [month, day] if month.len() == 2 && day.len() == 2 && digits(month) && digits(day) => {
            format!("xxxx-{month}-{day}")
        }
        [compact] if compact.len() == 8 && digits(compact) => {
            format!("{}-{}-{}", &compact[..4], &compact[4..6], &compact[6..])
        }
        _ => String::new(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
