//! # rolo-carddav
//!
//! CardDAV remote directory client.
//!
//! Speaks the WebDAV subset an address-book server needs — `PROPFIND` to
//! enumerate the collection, `GET` per member, `PUT` to create — and
//! translates between vCard bodies and [`rolo_core::Contact`].
//!
//! The [`DavClient`] implements [`rolo_core::RemoteDirectory`]; the engine
//! never sees wire details.

#![deny(unsafe_code)]

pub mod client;
pub mod multistatus;
pub mod vcard;

pub use client::{DavClient, DavConfig};
