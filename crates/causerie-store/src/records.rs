//! Raw key-value access to the `records` table.
//!
//! Every aggregate is stored whole under one [`RecordKey`]; there are no
//! field-level updates.  Typed helpers in the sibling modules build on the
//! JSON accessors defined here.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::database::Database;
use crate::error::{Result, StoreError};

/// The four top-level aggregates.
///
/// The declaration order is also the lock order used by callers that touch
/// several records in one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKey {
    User,
    Contacts,
    Messages,
    Calls,
}

impl RecordKey {
    pub const ALL: [RecordKey; 4] = [
        RecordKey::User,
        RecordKey::Contacts,
        RecordKey::Messages,
        RecordKey::Calls,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKey::User => "user",
            RecordKey::Contacts => "contacts",
            RecordKey::Messages => "messages",
            RecordKey::Calls => "calls",
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Database {
    // ------------------------------------------------------------------
    // Raw text
    // ------------------------------------------------------------------

    /// Fetch the stored JSON text for `key`, if any.
    pub fn load_record(&self, key: RecordKey) -> Result<Option<String>> {
        let json = self
            .conn()
            .query_row(
                "SELECT json FROM records WHERE key = ?1",
                params![key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(json)
    }

    /// Insert or replace the JSON text stored under `key`.
    pub fn save_record(&self, key: RecordKey, json: &str) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO records (key, json, updated_at) VALUES (?1, ?2, ?3)",
            params![key.as_str(), json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Write several records in one transaction: either all land or none.
    pub fn save_records(&self, records: &[(RecordKey, String)]) -> Result<()> {
        let writes: Vec<_> = records
            .iter()
            .map(|(key, json)| (*key, Some(json.as_str())))
            .collect();
        self.write_records(&writes)
    }

    /// Delete every record in one transaction.  Deleting absent keys is fine.
    pub fn delete_all_records(&self) -> Result<()> {
        let writes: Vec<(RecordKey, Option<&str>)> =
            RecordKey::ALL.iter().map(|key| (*key, None)).collect();
        self.write_records(&writes)
    }

    /// Apply a batch of writes atomically; `None` deletes the key.
    pub fn write_records(&self, writes: &[(RecordKey, Option<&str>)]) -> Result<()> {
        let tx = self.conn().unchecked_transaction()?;
        let now = Utc::now().to_rfc3339();
        for (key, json) in writes {
            match json {
                Some(json) => tx.execute(
                    "INSERT OR REPLACE INTO records (key, json, updated_at) VALUES (?1, ?2, ?3)",
                    params![key.as_str(), json, now],
                )?,
                None => tx.execute("DELETE FROM records WHERE key = ?1", params![key.as_str()])?,
            };
        }
        tx.commit()?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // JSON
    // ------------------------------------------------------------------

    /// Load `key` as a raw JSON value.  Unparseable text is reported as
    /// [`StoreError::Corrupt`].
    pub fn load_value(&self, key: RecordKey) -> Result<Option<Value>> {
        self.load_record(key)?
            .map(|json| parse_record(key, &json))
            .transpose()
    }

    /// Load `key` and decode it into `T`.
    pub fn load_json<T: DeserializeOwned>(&self, key: RecordKey) -> Result<Option<T>> {
        self.load_value(key)?
            .map(|value| decode_record(key, value))
            .transpose()
    }

    /// Encode `value` and store it under `key`.
    pub fn save_json<T: Serialize + ?Sized>(&self, key: RecordKey, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.save_record(key, &json)
    }

    /// Raw stored documents of all four keys, `null` where absent.
    ///
    /// No legacy upgrade is applied; this shows exactly what is on disk.
    /// Unparseable records are returned as their raw text.
    pub fn dump_records(&self) -> Result<BTreeMap<&'static str, Value>> {
        let mut dump = BTreeMap::new();
        for key in RecordKey::ALL {
            let value = match self.load_record(key)? {
                Some(json) => serde_json::from_str(&json).unwrap_or(Value::String(json)),
                None => Value::Null,
            };
            dump.insert(key.as_str(), value);
        }
        Ok(dump)
    }
}

pub(crate) fn parse_record(key: RecordKey, json: &str) -> Result<Value> {
    serde_json::from_str(json).map_err(|source| StoreError::Corrupt {
        key: key.as_str(),
        source,
    })
}

pub(crate) fn decode_record<T: DeserializeOwned>(key: RecordKey, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| StoreError::Corrupt {
        key: key.as_str(),
        source,
    })
}
