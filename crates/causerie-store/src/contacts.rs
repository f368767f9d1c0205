//! Load/save for the [`Contact`] list.

use crate::database::Database;
use crate::error::Result;
use crate::migrations::legacy;
use crate::models::{Contact, ContactId};
use crate::records::{decode_record, RecordKey};

impl Database {
    /// Load all contacts in insertion order, upgrading legacy entries.
    ///
    /// An absent record yields an empty list.
    pub fn load_contacts(&self) -> Result<Vec<Contact>> {
        let Some(mut value) = self.load_value(RecordKey::Contacts)? else {
            return Ok(Vec::new());
        };

        if legacy::upgrade_contacts(&mut value) {
            tracing::warn!("upgraded legacy contact records");
            self.save_json(RecordKey::Contacts, &value)?;
        }

        decode_record(RecordKey::Contacts, value)
    }

    /// Replace the stored contact list.
    pub fn save_contacts(&self, contacts: &[Contact]) -> Result<()> {
        self.save_json(RecordKey::Contacts, contacts)
    }

    /// Look up a single contact.
    pub fn get_contact(&self, id: ContactId) -> Result<Option<Contact>> {
        Ok(self.load_contacts()?.into_iter().find(|c| c.id == id))
    }
}
