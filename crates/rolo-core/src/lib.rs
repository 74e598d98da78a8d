//! # rolo-core
//!
//! Foundation types, store traits, and errors for the rolo contact sync.
//!
//! This crate provides the shared vocabulary the other rolo crates depend on:
//!
//! - **Contact**: [`contact::Contact`] — the canonical entity both stores are
//!   translated into and out of, plus birthday normalization
//! - **Store traits**: [`store::RemoteDirectory`] and [`store::ContactVault`] —
//!   the capability seams the reconciliation engine is written against
//! - **Errors**: [`errors::RemoteError`], [`errors::VaultError`], and the
//!   cycle-level [`errors::SyncError`] via `thiserror`
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other rolo crates.

#![deny(unsafe_code)]

pub mod contact;
pub mod errors;
pub mod store;

pub use contact::{Contact, normalize_birthday};
pub use errors::{RemoteError, SyncError, VaultError};
pub use store::{ContactVault, RemoteDirectory, VaultRecord};
