//! Filesystem-backed contact vault.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};
use walkdir::WalkDir;

use rolo_core::{Contact, ContactVault, VaultError, VaultRecord};

use crate::constants::NOTE_EXTENSION;
use crate::format::{parse_note, render_note, rewrite_header};

/// Contact store over a folder of Markdown notes.
///
/// The folder is the collection; each note's path is its only durable
/// handle. Scans are non-recursive.
#[derive(Debug, Clone)]
pub struct NoteStore {
    root: PathBuf,
}

impl NoteStore {
    /// Create a store over the given contacts folder.
    ///
    /// The folder is created lazily on the first scan.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The collection folder.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_collection(&self) -> Result<(), VaultError> {
        if self.root.is_dir() {
            return Ok(());
        }
        debug!(path = %self.root.display(), "creating contacts folder");
        std::fs::create_dir_all(&self.root).map_err(|source| VaultError::CreateCollection {
            path: self.root.clone(),
            source,
        })
    }

    /// Derive the note path for a new contact.
    ///
    /// Named from `full_name` with filesystem-hostile characters replaced.
    /// If a note with that name already exists (two contacts sharing a
    /// name), a short uid prefix is appended; the `uid:` header line, not
    /// the filename, carries identity.
    fn note_path_for(&self, contact: &Contact) -> PathBuf {
        let base = sanitize_file_name(&contact.full_name);
        let candidate = self.root.join(format!("{base}.{NOTE_EXTENSION}"));
        if !candidate.exists() {
            return candidate;
        }
        let suffix: String = contact.uid.chars().take(8).collect();
        self.root.join(format!("{base} {suffix}.{NOTE_EXTENSION}"))
    }
}

/// Replace characters that are path separators or otherwise unsafe in
/// filenames. An all-unsafe name falls back to `contact`.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim().trim_matches('.');
    if trimmed.is_empty() {
        "contact".to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl ContactVault for NoteStore {
    async fn list_records(&self) -> Result<Vec<VaultRecord>, VaultError> {
        self.ensure_collection()?;

        let mut records = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(NOTE_EXTENSION)
            {
                continue;
            }

            // One unreadable or malformed note must not hide the rest of
            // the collection.
            let content = match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable note");
                    continue;
                }
            };

            let Some(header) = parse_note(&content) else {
                debug!(path = %path.display(), "skipping note without header");
                continue;
            };
            if !header.has_contact_tag() {
                continue;
            }
            let Some(contact) = header.to_contact() else {
                debug!(path = %path.display(), "skipping contact note without uid/fullName");
                continue;
            };

            records.push(VaultRecord {
                path: path.to_path_buf(),
                contact,
            });
        }

        debug!(count = records.len(), path = %self.root.display(), "scanned contact notes");
        Ok(records)
    }

    async fn update_record(
        &self,
        record: &VaultRecord,
        contact: &Contact,
    ) -> Result<(), VaultError> {
        let content = std::fs::read_to_string(&record.path).map_err(|source| VaultError::Io {
            path: record.path.clone(),
            source,
        })?;

        let updated = rewrite_header(&content, contact).ok_or_else(|| VaultError::MissingHeader {
            path: record.path.clone(),
        })?;

        if updated == content {
            // Nothing changed; skip the write so an unchanged sync cycle
            // leaves mtimes alone.
            return Ok(());
        }

        std::fs::write(&record.path, updated).map_err(|source| VaultError::Io {
            path: record.path.clone(),
            source,
        })
    }

    async fn create_record(&self, contact: &Contact) -> Result<(), VaultError> {
        self.ensure_collection()?;

        let path = self.note_path_for(contact);
        debug!(uid = %contact.uid, path = %path.display(), "creating contact note");
        std::fs::write(&path, render_note(contact)).map_err(|source| VaultError::Io {
            path,
            source,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
