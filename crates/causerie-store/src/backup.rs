//! Whole-store backup documents.
//!
//! A [`Snapshot`] carries all four records.  Import validates the document,
//! runs the legacy upgrades on it, and only then replaces storage in a single
//! transaction; an invalid document leaves everything untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::Database;
use crate::error::Result;
use crate::migrations::legacy;
use crate::models::{Call, Contact, Threads, User};
use crate::records::RecordKey;

/// Full backup document: every aggregate in one portable JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// `null` when exported before onboarding.
    pub user: Option<User>,
    pub contacts: Vec<Contact>,
    pub messages: Threads,
    pub calls: Vec<Call>,
}

impl Snapshot {
    /// Pretty-printed JSON form of the document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate a backup document.
    ///
    /// All four top-level keys must be present and `user` must hold a
    /// profile.  `user` and `contacts` go through the legacy upgrade first so
    /// older backups still restore.  Returns `None` for anything invalid.
    pub fn parse(json: &str) -> Option<Self> {
        let mut doc: Value = match serde_json::from_str(json) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(error = %e, "backup is not valid JSON");
                return None;
            }
        };

        let Some(fields) = doc.as_object_mut() else {
            tracing::warn!("backup is not a JSON object");
            return None;
        };

        if let Some(missing) = RecordKey::ALL
            .iter()
            .find(|key| !fields.contains_key(key.as_str()))
        {
            tracing::warn!(key = %missing, "backup is missing a top-level key");
            return None;
        }

        if let Some(user) = fields.get_mut("user") {
            legacy::upgrade_user(user);
        }
        if let Some(contacts) = fields.get_mut("contacts") {
            legacy::upgrade_contacts(contacts);
        }

        match serde_json::from_value::<Snapshot>(doc) {
            Ok(snapshot) if snapshot.user.is_some() => Some(snapshot),
            Ok(_) => {
                tracing::warn!("backup carries no profile");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "backup does not match the expected shape");
                None
            }
        }
    }
}

impl Database {
    /// Assemble the current state of all four records.
    pub fn export_snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            user: self.load_user()?,
            contacts: self.load_contacts()?,
            messages: self.load_threads()?,
            calls: self.load_calls()?,
        })
    }

    /// Overwrite all four records from `snapshot` in one transaction.
    ///
    /// A snapshot without a profile clears the stored one.
    pub fn restore_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let user = snapshot.user.as_ref().map(serde_json::to_string).transpose()?;
        let contacts = serde_json::to_string(&snapshot.contacts)?;
        let messages = serde_json::to_string(&snapshot.messages)?;
        let calls = serde_json::to_string(&snapshot.calls)?;

        self.write_records(&[
            (RecordKey::User, user.as_deref()),
            (RecordKey::Contacts, Some(contacts.as_str())),
            (RecordKey::Messages, Some(messages.as_str())),
            (RecordKey::Calls, Some(calls.as_str())),
        ])
    }

    /// Validate and restore a backup document.
    ///
    /// Returns `Ok(false)` without touching storage when the document is
    /// invalid; `Err` is reserved for storage failures during the write.
    pub fn import_snapshot(&self, json: &str) -> Result<bool> {
        let Some(snapshot) = Snapshot::parse(json) else {
            return Ok(false);
        };

        self.restore_snapshot(&snapshot)?;

        tracing::info!(
            contacts = snapshot.contacts.len(),
            threads = snapshot.messages.len(),
            calls = snapshot.calls.len(),
            "backup imported"
        );
        Ok(true)
    }
}
