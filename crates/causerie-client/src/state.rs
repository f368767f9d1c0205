//! Application state shared by every client operation.
//!
//! [`AppState`] is cheap to clone: each clone refers to the same database
//! handle, record locks and id generator.  Operations are async methods
//! defined on it in the `commands` modules.

use std::sync::Arc;
use std::time::Duration;

use causerie_store::Database;
use tokio::sync::Mutex;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::locks::RecordLocks;

/// Relative cost of an operation's simulated round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Latency {
    Half,
    Normal,
    Double,
}

impl Latency {
    fn scale(self, base: Duration) -> Duration {
        match self {
            Latency::Half => base / 2,
            Latency::Normal => base,
            Latency::Double => base * 2,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    /// Handle to the local SQLite record store.
    database: Arc<Mutex<Database>>,

    /// Serializes read-modify-write cycles per record.
    pub(crate) locks: Arc<RecordLocks>,

    ids: Arc<IdGenerator>,

    config: Arc<ClientConfig>,
}

impl AppState {
    /// Open the record store described by `config`.
    pub fn open(config: ClientConfig) -> Result<Self> {
        let database = match &config.data_dir {
            Some(dir) => Database::open_in(dir)?,
            None => Database::new()?,
        };

        if let Some(path) = database.path() {
            tracing::debug!(path = %path.display(), "record store opened");
        }
        Ok(Self::with_database(database, config, IdGenerator::new()))
    }

    /// Build state around an already-open database.
    pub fn with_database(database: Database, config: ClientConfig, ids: IdGenerator) -> Self {
        Self {
            database: Arc::new(Mutex::new(database)),
            locks: Arc::new(RecordLocks::new()),
            ids: Arc::new(ids),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn next_id(&self) -> i64 {
        self.ids.next_id()
    }

    /// Run `f` against the database.
    pub(crate) async fn with_db<T>(
        &self,
        f: impl FnOnce(&Database) -> causerie_store::Result<T>,
    ) -> Result<T> {
        let db = self.database.lock().await;
        Ok(f(&db)?)
    }

    /// Wait out the simulated round trip of an operation.
    pub(crate) async fn simulate_latency(&self, latency: Latency) {
        let delay = latency.scale(self.config.latency);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
