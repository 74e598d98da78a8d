//! Error hierarchy for the contact sync.
//!
//! Two leaf domains — the remote directory and the local vault — and a
//! cycle-level [`SyncError`] that wraps whichever side aborted a run.
//! Per-record apply failures are *not* represented here: the engine catches
//! them at the record boundary, counts them, and carries on.

use std::path::PathBuf;

/// Errors from the remote CardDAV directory.
///
/// A malformed *individual* vCard is not an error — the fetch drops that
/// record and continues. These variants are transport- or directory-level
/// failures that abort the whole fetch.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Transport failure (connection, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Non-success status code from the server.
    #[error("unexpected status {status} from {url}")]
    Status {
        /// HTTP status code received.
        status: u16,
        /// Request URL.
        url: String,
    },

    /// Malformed multistatus body from PROPFIND.
    #[error("malformed multistatus response: {0}")]
    Multistatus(String),

    /// Server URL or member href could not be parsed/joined.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors from the local note vault.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// The contacts folder is missing and could not be created.
    #[error("failed to create contacts folder {path}: {source}")]
    CreateCollection {
        /// Folder that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Read or write failure on a specific note.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Note that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A note that should carry a header block does not.
    #[error("no header block in {path}")]
    MissingHeader {
        /// Note without a parseable header.
        path: PathBuf,
    },
}

/// Cycle-level sync failure.
///
/// Only fetch-phase errors surface here; by the time the apply phase runs,
/// individual record failures are logged and counted instead of propagated.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Fetching the remote snapshot failed; the cycle was aborted.
    #[error("remote fetch failed: {0}")]
    Remote(#[from] RemoteError),

    /// Enumerating the local vault failed; the cycle was aborted.
    #[error("local vault unavailable: {0}")]
    Vault(#[from] VaultError),
}
