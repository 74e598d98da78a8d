//! PROPFIND multistatus parsing.
//!
//! Pulls the member `href` elements out of a `207 Multi-Status` body.
//! Matching is on local names, so `d:href`, `D:href`, and default-namespace
//! `href` all work regardless of how the server declares its prefixes.

use quick_xml::Reader;
use quick_xml::events::Event;

use rolo_core::RemoteError;

/// Extract member hrefs from a multistatus document.
///
/// Collection hrefs (trailing `/`) are skipped — only addressable members
/// are returned. A document that fails to parse is a directory-level error.
pub fn member_hrefs(xml: &str) -> Result<Vec<String>, RemoteError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut hrefs = Vec::new();
    let mut in_href = false;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                in_href = e.local_name().into_inner() == b"href";
            }
            Ok(Event::Text(ref e)) if in_href => {
                let text = e
                    .unescape()
                    .map_err(|e| RemoteError::Multistatus(format!("bad href text: {e}")))?
                    .trim()
                    .to_string();
                if !text.is_empty() && !text.ends_with('/') {
                    hrefs.push(text);
                }
            }
            Ok(Event::End(_)) => {
                in_href = false;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(RemoteError::Multistatus(format!("XML parse error: {e}")));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(hrefs)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
