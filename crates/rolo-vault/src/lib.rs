//! # rolo-vault
//!
//! Local contact note store.
//!
//! A contact note is a Markdown file whose `---`-delimited header carries
//! `key: value` fields (`uid`, `tags`, `fullName`, …) above a free-text
//! body. This crate scans the contacts folder, projects headers into
//! [`rolo_core::Contact`]s, rewrites synced fields in place without
//! disturbing anything else in the file, and creates notes for new
//! contacts.

#![deny(unsafe_code)]

pub mod constants;
pub mod format;
pub mod store;

pub use format::{NoteHeader, parse_note, render_note, rewrite_header};
pub use store::NoteStore;
