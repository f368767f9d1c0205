//! Opening the on-disk record store.
//!
//! A [`Database`] is only handed out after its schema is current, so the
//! record accessors never see a half-initialised file.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::Connection;

use crate::error::{Result, StoreError};
use crate::migrations;

/// File name of the database inside its data directory.
pub const DB_FILE_NAME: &str = "causerie.db";

/// Handle to one SQLite record store.  Not `Sync`; share it behind a mutex.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Store in the per-user data directory, e.g.
    /// `~/.local/share/causerie/causerie.db` on Linux.
    pub fn new() -> Result<Self> {
        Self::open_in(&default_data_dir()?)
    }

    /// Store in `dir/causerie.db`; `dir` is created if needed.
    pub fn open_in(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Self::open_at(&dir.join(DB_FILE_NAME))
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "opening record store");

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        migrations::run_migrations(&conn)?;

        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Location of the backing file; `None` for in-memory stores.
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "causerie", "causerie")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StoreError::NoDataDir)
}
