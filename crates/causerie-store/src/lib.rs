//! # causerie-store
//!
//! On-device persistence for the Causerie messaging client, backed by SQLite.
//!
//! State is kept as four JSON records (user, contacts, message threads and
//! call log) in a single key-value table.  The crate exposes a synchronous
//! [`Database`] handle with typed load/save helpers for every aggregate,
//! transparently upgrading legacy records on read, plus the backup codec
//! that exports and restores the whole graph as one document.

pub mod backup;
pub mod calls;
pub mod contacts;
pub mod database;
pub mod messages;
pub mod migrations;
pub mod models;
pub mod records;
pub mod seed;
pub mod user;

mod error;

pub use backup::Snapshot;
pub use database::Database;
pub use error::{Result, StoreError};
pub use models::*;
pub use records::RecordKey;
