//! vCard parsing and serialization.
//!
//! Reads the nine properties the sync cares about (UID, FN, EMAIL, TEL,
//! ORG, TITLE, ADR, BDAY, URL) out of a vCard 3.0/4.0 body, first instance
//! wins. Serialization goes the other way with the narrow create-remote
//! field set only.

use rolo_core::{Contact, normalize_birthday};

/// Parse a vCard body into a [`Contact`].
///
/// Returns `None` for records missing `UID` or `FN` — the caller drops
/// those silently (a deliberate filter, not an error).
#[must_use]
pub fn parse_vcard(data: &str) -> Option<Contact> {
    let mut uid = None;
    let mut full_name = None;
    let mut email = None;
    let mut phone = None;
    let mut organization = None;
    let mut title = None;
    let mut address = None;
    let mut birthday = None;
    let mut url = None;

    for line in unfold_lines(data) {
        let Some((name_part, value)) = line.split_once(':') else {
            continue;
        };

        // Strip any group prefix (`item1.EMAIL`) and parameters (`TEL;TYPE=home`).
        let name = name_part
            .rsplit_once('.')
            .map_or(name_part, |(_, n)| n)
            .split(';')
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase();

        // First property instance wins.
        let slot = match name.as_str() {
            "UID" => &mut uid,
            "FN" => &mut full_name,
            "EMAIL" => &mut email,
            "TEL" => &mut phone,
            "ORG" => &mut organization,
            "TITLE" => &mut title,
            "ADR" => &mut address,
            "BDAY" => &mut birthday,
            "URL" => &mut url,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }

    let contact = Contact {
        uid: unescape_text(uid.as_deref().unwrap_or_default()),
        full_name: unescape_text(full_name.as_deref().unwrap_or_default()),
        email: unescape_text(email.as_deref().unwrap_or_default()),
        phone: unescape_text(phone.as_deref().unwrap_or_default()),
        organization: join_compound(organization.as_deref().unwrap_or_default()),
        title: unescape_text(title.as_deref().unwrap_or_default()),
        address: join_compound(address.as_deref().unwrap_or_default()),
        birthday: normalize_birthday(&unescape_text(birthday.as_deref().unwrap_or_default())),
        url: unescape_text(url.as_deref().unwrap_or_default()),
    };

    contact.is_valid().then_some(contact)
}

/// Serialize the narrow create-remote projection of a contact.
///
/// Only UID, FN, EMAIL, and TEL are carried in this direction; empty
/// optional properties are omitted entirely.
#[must_use]
pub fn render_vcard(contact: &Contact) -> String {
    let mut out = String::from("BEGIN:VCARD\r\nVERSION:3.0\r\n");
    push_property(&mut out, "UID", &contact.uid);
    push_property(&mut out, "FN", &contact.full_name);
    if !contact.email.is_empty() {
        push_property(&mut out, "EMAIL", &contact.email);
    }
    if !contact.phone.is_empty() {
        push_property(&mut out, "TEL", &contact.phone);
    }
    out.push_str("END:VCARD\r\n");
    out
}

fn push_property(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push(':');
    out.push_str(&escape_text(value));
    out.push_str("\r\n");
}

/// Unfold the content lines of a vCard.
///
/// A line starting with a space or tab continues the previous line
/// (RFC 6350 §3.2); the fold marker itself is removed.
fn unfold_lines(data: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in data.lines() {
        if let Some(continuation) = raw.strip_prefix([' ', '\t']) {
            if let Some(last) = lines.last_mut() {
                last.push_str(continuation);
                continue;
            }
        }
        lines.push(raw.to_string());
    }
    lines
}

/// Undo vCard text escaping: `\\`, `\,`, `\;`, `\n`.
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.trim().chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(escaped) => out.push(escaped),
            None => out.push('\\'),
        }
    }
    out
}

/// Apply vCard text escaping for serialization.
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

/// Join the non-empty components of a compound value (ORG, ADR).
///
/// Components are separated by unescaped semicolons; the result joins them
/// with `", "`, matching how the original plugin flattened these fields.
fn join_compound(value: &str) -> String {
    let mut components = Vec::new();
    let mut current = String::new();
    let mut chars = value.trim().chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n' | 'N') => current.push('\n'),
                Some(escaped) => current.push(escaped),
                None => current.push('\\'),
            },
            ';' => {
                components.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    components.push(current);

    let non_empty: Vec<&str> = components
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    non_empty.join(", ")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_VCARD: &str = "BEGIN:VCARD\r\n\
        VERSION:3.0\r\n\
        UID:u-100\r\n\
        FN:Ada Lovelace\r\n\
        EMAIL;TYPE=work:ada@example.com\r\n\
        TEL;TYPE=cell:+44 1234\r\n\
        ORG:Analytical Engines Ltd;Research\r\n\
        TITLE:Countess\r\n\
        ADR:;;12 St James Square;London;;SW1Y 4JH;UK\r\n\
        BDAY:1815-12-10\r\n\
        URL:https://example.com/ada\r\n\
        END:VCARD\r\n";

    #[test]
    fn parses_all_known_properties() {
        let c = parse_vcard(FULL_VCARD).unwrap();
        assert_eq!(c.uid, "u-100");
        assert_eq!(c.full_name, "Ada Lovelace");
        assert_eq!(c.email, "ada@example.com");
        assert_eq!(c.phone, "+44 1234");
        assert_eq!(c.organization, "Analytical Engines Ltd, Research");
        assert_eq!(c.title, "Countess");
        assert_eq!(c.address, "12 St James Square, London, SW1Y 4JH, UK");
        assert_eq!(c.birthday, "1815-12-10");
        assert_eq!(c.url, "https://example.com/ada");
    }

    #[test]
    fn missing_uid_or_fn_is_dropped() {
        assert!(parse_vcard("BEGIN:VCARD\r\nFN:No Uid\r\nEND:VCARD\r\n").is_none());
        assert!(parse_vcard("BEGIN:VCARD\r\nUID:u-1\r\nEND:VCARD\r\n").is_none());
        assert!(parse_vcard("not a vcard at all").is_none());
    }

    #[test]
    fn first_property_instance_wins() {
        let data = "BEGIN:VCARD\r\nUID:u-1\r\nFN:Ada\r\n\
            EMAIL:first@example.com\r\nEMAIL:second@example.com\r\nEND:VCARD\r\n";
        let c = parse_vcard(data).unwrap();
        assert_eq!(c.email, "first@example.com");
    }

    #[test]
    fn folded_lines_are_unfolded() {
        let data = "BEGIN:VCARD\r\nUID:u-1\r\nFN:Ada Augusta\r\n \
            King-Noel\r\nEND:VCARD\r\n";
        let c = parse_vcard(data).unwrap();
        assert_eq!(c.full_name, "Ada Augusta King-Noel");
    }

    #[test]
    fn grouped_properties_are_recognized() {
        let data =
            "BEGIN:VCARD\r\nUID:u-1\r\nFN:Ada\r\nitem1.EMAIL:ada@example.com\r\nEND:VCARD\r\n";
        let c = parse_vcard(data).unwrap();
        assert_eq!(c.email, "ada@example.com");
    }

    #[test]
    fn escapes_are_undone() {
        let data = "BEGIN:VCARD\r\nUID:u-1\r\nFN:Ada\\, Countess\r\nEND:VCARD\r\n";
        let c = parse_vcard(data).unwrap();
        assert_eq!(c.full_name, "Ada, Countess");
    }

    #[test]
    fn month_day_birthday_is_normalized() {
        let data = "BEGIN:VCARD\r\nUID:u-1\r\nFN:Ada\r\nBDAY:--06-15\r\nEND:VCARD\r\n";
        let c = parse_vcard(data).unwrap();
        assert_eq!(c.birthday, "xxxx-06-15");
    }

    #[test]
    fn empty_compound_components_are_skipped() {
        let data = "BEGIN:VCARD\r\nUID:u-1\r\nFN:Ada\r\nADR:;;Only Street;;\r\nEND:VCARD\r\n";
        let c = parse_vcard(data).unwrap();
        assert_eq!(c.address, "Only Street");
    }

    // -- Serialization --

    #[test]
    fn render_carries_narrow_field_set_only() {
        let mut c = Contact::new("u-1", "Ada Lovelace");
        c.email = "ada@example.com".to_string();
        c.phone = "+44 1234".to_string();
        c.organization = "Analytical Engines Ltd".to_string();
        c.birthday = "1815-12-10".to_string();

        let vcard = render_vcard(&c);
        assert!(vcard.contains("UID:u-1\r\n"));
        assert!(vcard.contains("FN:Ada Lovelace\r\n"));
        assert!(vcard.contains("EMAIL:ada@example.com\r\n"));
        assert!(vcard.contains("TEL:+44 1234\r\n"));
        // The reverse direction is deliberately narrower than the forward one
        assert!(!vcard.contains("ORG"));
        assert!(!vcard.contains("BDAY"));
    }

    #[test]
    fn render_omits_empty_optionals() {
        let vcard = render_vcard(&Contact::new("u-1", "Ada"));
        assert!(!vcard.contains("EMAIL"));
        assert!(!vcard.contains("TEL"));
    }

    #[test]
    fn render_escapes_values() {
        let c = Contact::new("u-1", "Ada; Countess");
        assert!(render_vcard(&c).contains("FN:Ada\\; Countess\r\n"));
    }

    #[test]
    fn rendered_vcard_parses_back() {
        let mut c = Contact::new("u-1", "Ada, Countess");
        c.email = "ada@example.com".to_string();
        let parsed = parse_vcard(&render_vcard(&c)).unwrap();
        assert_eq!(parsed.uid, "u-1");
        assert_eq!(parsed.full_name, "Ada, Countess");
        assert_eq!(parsed.email, "ada@example.com");
    }
}
