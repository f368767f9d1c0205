use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use crate::error::Result;
use crate::state::AppState;

impl AppState {
    /// Export the profile, contacts, threads and call log as pretty JSON.
    pub async fn export_backup(&self) -> Result<String> {
        let _guard = self.locks.acquire_all().await;

        let json = self
            .with_db(|db| {
                let snapshot = db.export_snapshot()?;
                info!(
                    contacts = snapshot.contacts.len(),
                    threads = snapshot.messages.len(),
                    calls = snapshot.calls.len(),
                    "backup exported"
                );
                snapshot.to_json()
            })
            .await?;

        Ok(json)
    }

    /// Replace all four records from a backup document.
    ///
    /// Returns `false`, with storage untouched, when the document is not a
    /// valid backup.
    pub async fn import_backup(&self, json: &str) -> Result<bool> {
        let _guard = self.locks.acquire_all().await;
        let imported = self.with_db(|db| db.import_snapshot(json)).await?;

        if !imported {
            warn!("backup rejected");
        }
        Ok(imported)
    }

    /// Write a dated backup file into `dir`, creating it if needed.
    pub async fn save_backup_to_file(&self, dir: &Path) -> Result<PathBuf> {
        let json = self.export_backup().await?;

        tokio::fs::create_dir_all(dir).await?;

        let date = chrono::Local::now().format("%Y-%m-%d");
        let file_path = dir.join(format!("causerie_backup_{date}.json"));
        tokio::fs::write(&file_path, json.as_bytes()).await?;

        info!(path = %file_path.display(), "backup saved to file");
        Ok(file_path)
    }

    pub async fn restore_backup_from_file(&self, path: &Path) -> Result<bool> {
        let json = tokio::fs::read_to_string(path).await?;
        self.import_backup(&json).await
    }

    /// Raw stored JSON of every record, `null` when absent.  No migration is
    /// applied.
    pub async fn inspect_records(&self) -> Result<BTreeMap<&'static str, Value>> {
        let _guard = self.locks.acquire_all().await;
        self.with_db(|db| db.dump_records()).await
    }
}
