//! Constants for the note format.

/// Delimiter line opening and closing the header block.
pub const HEADER_DELIMITER: &str = "---";

/// Membership tag marking a note as a contact.
pub const CONTACT_TAG: &str = "contact";

/// File extension for contact notes.
pub const NOTE_EXTENSION: &str = "md";

/// Header keys the sync engine owns and may overwrite on update.
///
/// `uid` and `tags` are deliberately absent: identity and membership are
/// never rewritten in place.
pub const SYNCED_KEYS: [&str; 8] = [
    "fullName",
    "email",
    "phone",
    "organization",
    "title",
    "address",
    "birthday",
    "url",
];
