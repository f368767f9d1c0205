use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// No home directory to derive the default data directory from.
    #[error("No data directory available for this user")]
    NoDataDir,

    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted record could not be parsed into its aggregate.
    ///
    /// The record is left untouched on disk; callers should offer an account
    /// reset or a restore from backup rather than fabricate empty state.
    #[error("Stored record '{key}' is corrupt: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not encode record: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Schema migration failed: {0}")]
    Migration(String),
}

impl StoreError {
    /// Whether this error means persisted data is unreadable.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
