//! Capability traits for the two contact stores.
//!
//! The reconciliation engine depends only on these seams, which keeps it
//! testable against in-memory doubles. `rolo-carddav` and `rolo-vault`
//! provide the production implementations.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::contact::Contact;
use crate::errors::{RemoteError, VaultError};

/// A local contact record: the note's path plus the contact projected from
/// its header.
///
/// The path is the only durable handle — there is no persisted uid→path map,
/// so resolving a uid means scanning the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultRecord {
    /// Location of the note on disk.
    pub path: PathBuf,
    /// Contact projected from the note's header fields.
    pub contact: Contact,
}

/// Remote address-book server capabilities.
#[async_trait]
pub trait RemoteDirectory: Send + Sync {
    /// Fetch the full remote snapshot.
    ///
    /// Malformed individual records are dropped, not errors; a transport or
    /// directory-level failure aborts the fetch.
    async fn fetch_contacts(&self) -> Result<Vec<Contact>, RemoteError>;

    /// Verify the server is reachable and answers directory requests.
    ///
    /// Used by the connectivity-check entry point, not by the sync cycle.
    async fn test_connection(&self) -> Result<(), RemoteError>;

    /// Persist a contact remotely.
    ///
    /// Only the narrow field set (uid, fullName, email, phone) is carried in
    /// this direction.
    async fn create_contact(&self, contact: &Contact) -> Result<(), RemoteError>;
}

/// Local note collection capabilities.
#[async_trait]
pub trait ContactVault: Send + Sync {
    /// Enumerate the contact notes in the collection, creating the collection
    /// folder first if it does not exist.
    async fn list_records(&self) -> Result<Vec<VaultRecord>, VaultError>;

    /// Overwrite the known header fields of an existing note in place.
    ///
    /// Unknown header lines and the note body must survive byte-for-byte.
    async fn update_record(&self, record: &VaultRecord, contact: &Contact)
    -> Result<(), VaultError>;

    /// Create a new note for a contact at a location derived from its name.
    async fn create_record(&self, contact: &Contact) -> Result<(), VaultError>;
}
