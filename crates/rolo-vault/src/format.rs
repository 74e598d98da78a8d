//! Note header parsing and rewriting.
//!
//! A contact note is a `---`-delimited block of `key: value` lines followed
//! by a free-text body. Rewrites are line-level: only lines whose key is in
//! [`SYNCED_KEYS`](crate::constants::SYNCED_KEYS) are replaced, so unknown
//! keys, line order, and the body survive byte-for-byte.

use rolo_core::Contact;

use crate::constants::{CONTACT_TAG, HEADER_DELIMITER, SYNCED_KEYS};

/// Parsed view of a note's header block.
#[derive(Debug, Clone, Default)]
pub struct NoteHeader {
    /// Header fields in file order, unknown keys included.
    pub fields: Vec<(String, String)>,
}

impl NoteHeader {
    /// Value of the first field with the given key, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the `tags` field includes the contact membership tag.
    ///
    /// Tags may be a single word or a comma-separated list.
    #[must_use]
    pub fn has_contact_tag(&self) -> bool {
        self.get("tags").is_some_and(|tags| {
            tags.split(',').any(|tag| tag.trim() == CONTACT_TAG)
        })
    }

    /// Project the header into a [`Contact`].
    ///
    /// Returns `None` when the note lacks a non-empty `uid` or `fullName` —
    /// such notes never enter reconciliation.
    #[must_use]
    pub fn to_contact(&self) -> Option<Contact> {
        let field = |key: &str| self.get(key).unwrap_or_default().to_string();
        let contact = Contact {
            uid: field("uid"),
            full_name: field("fullName"),
            email: field("email"),
            phone: field("phone"),
            organization: field("organization"),
            title: field("title"),
            address: field("address"),
            birthday: field("birthday"),
            url: field("url"),
        };
        contact.is_valid().then_some(contact)
    }
}

/// Parse the header block of a note.
///
/// Returns `None` when the note does not start with a delimited header.
#[must_use]
pub fn parse_note(content: &str) -> Option<NoteHeader> {
    let body = header_span(content).map(|(start, end)| &content[start..end])?;

    let mut fields = Vec::new();
    for line in body.lines() {
        if let Some((key, value)) = line.split_once(':') {
            fields.push((key.trim().to_string(), value.trim().to_string()));
        }
    }
    Some(NoteHeader { fields })
}

/// Byte range of the header's interior (between the two delimiter lines).
fn header_span(content: &str) -> Option<(usize, usize)> {
    let first = content.lines().next()?;
    if first.trim_end() != HEADER_DELIMITER {
        return None;
    }
    let interior_start = content.find('\n')? + 1;

    let mut offset = interior_start;
    for line in content[interior_start..].split_inclusive('\n') {
        if line.trim_end() == HEADER_DELIMITER {
            return Some((interior_start, offset));
        }
        offset += line.len();
    }
    None
}

/// Rewrite the synced header fields of an existing note in place.
///
/// Only lines whose key is in [`SYNCED_KEYS`] are replaced; an empty contact
/// field writes an empty value (clearing stale data is intentional, not a
/// merge). Lines for keys absent from the header are not inserted. Returns
/// `None` when the note has no header block.
#[must_use]
pub fn rewrite_header(content: &str, contact: &Contact) -> Option<String> {
    let (start, end) = header_span(content)?;
    let interior = &content[start..end];

    let mut rewritten = String::with_capacity(interior.len());
    for line in interior.split_inclusive('\n') {
        let stripped = line.strip_suffix('\n');
        let had_newline = stripped.is_some();
        let text = stripped.unwrap_or(line);

        match text.split_once(':') {
            Some((raw_key, _)) if SYNCED_KEYS.contains(&raw_key.trim()) => {
                rewritten.push_str(raw_key);
                rewritten.push_str(": ");
                rewritten.push_str(synced_value(contact, raw_key.trim()));
            }
            _ => rewritten.push_str(text),
        }
        if had_newline {
            rewritten.push('\n');
        }
    }

    let mut result = String::with_capacity(content.len());
    result.push_str(&content[..start]);
    result.push_str(&rewritten);
    result.push_str(&content[end..]);
    Some(result)
}

fn synced_value<'a>(contact: &'a Contact, key: &str) -> &'a str {
    match key {
        "fullName" => &contact.full_name,
        "email" => &contact.email,
        "phone" => &contact.phone,
        "organization" => &contact.organization,
        "title" => &contact.title,
        "address" => &contact.address,
        "birthday" => &contact.birthday,
        "url" => &contact.url,
        _ => "",
    }
}

/// Render a fresh note for a newly created contact.
///
/// All synced fields are written (empty ones included) plus the membership
/// tag, so the note is discoverable as a contact on the next scan.
#[must_use]
pub fn render_note(contact: &Contact) -> String {
    format!(
        "---\n\
         uid: {uid}\n\
         tags: {tag}\n\
         fullName: {full_name}\n\
         email: {email}\n\
         phone: {phone}\n\
         organization: {organization}\n\
         title: {title}\n\
         address: {address}\n\
         birthday: {birthday}\n\
         url: {url}\n\
         ---\n\
         \n\
         # {full_name}\n",
        uid = contact.uid,
        tag = CONTACT_TAG,
        full_name = contact.full_name,
        email = contact.email,
        phone = contact.phone,
        organization = contact.organization,
        title = contact.title,
        address = contact.address,
        birthday = contact.birthday,
        url = contact.url,
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
