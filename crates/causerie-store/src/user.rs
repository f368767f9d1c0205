//! Load/save for the singleton [`User`] record.

use crate::database::Database;
use crate::error::Result;
use crate::migrations::legacy;
use crate::models::User;
use crate::records::{decode_record, RecordKey};
use crate::seed;

impl Database {
    /// Load the profile, upgrading and re-persisting a legacy record first.
    ///
    /// Returns `Ok(None)` before onboarding.  A record that cannot be parsed
    /// is a hard [`StoreError::Corrupt`] error, never an empty profile.
    ///
    /// [`StoreError::Corrupt`]: crate::StoreError::Corrupt
    pub fn load_user(&self) -> Result<Option<User>> {
        let Some(mut value) = self.load_value(RecordKey::User)? else {
            return Ok(None);
        };

        if legacy::upgrade_user(&mut value) {
            tracing::warn!("upgraded legacy user record");
            self.save_json(RecordKey::User, &value)?;
        }

        decode_record(RecordKey::User, value).map(Some)
    }

    /// Replace the stored profile.
    pub fn save_user(&self, user: &User) -> Result<()> {
        self.save_json(RecordKey::User, user)
    }

    /// Store a brand-new profile together with the seed contacts, threads and
    /// call log, in one transaction.  Any existing data is overwritten.
    pub fn create_profile(&self, user: &User) -> Result<()> {
        self.save_records(&[
            (RecordKey::User, serde_json::to_string(user)?),
            (RecordKey::Contacts, serde_json::to_string(&seed::contacts())?),
            (RecordKey::Messages, serde_json::to_string(&seed::threads())?),
            (RecordKey::Calls, serde_json::to_string(&seed::calls())?),
        ])?;

        tracing::info!(name = %user.name, "profile created with seed data");
        Ok(())
    }

    /// Erase all four aggregates.  Safe to call when nothing is stored.
    pub fn erase_account(&self) -> Result<()> {
        self.delete_all_records()?;
        tracing::info!("account data erased");
        Ok(())
    }
}
