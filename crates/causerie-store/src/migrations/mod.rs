//! Schema and record migrations.
//!
//! Schema steps are listed in [`STEPS`] and applied on open, each at most
//! once, tracked through SQLite's `user_version`.  Upgrades of legacy JSON
//! documents live in [`legacy`]; those run on every read of the affected
//! record instead.

pub mod legacy;
pub mod v001_initial;

use rusqlite::Connection;

use crate::error::{Result, StoreError};

type Step = fn(&Connection) -> rusqlite::Result<()>;

/// Schema steps in order; step `i` brings the file to version `i + 1`.
const STEPS: &[(&str, Step)] = &[("v001_initial", v001_initial::up)];

pub const CURRENT_VERSION: u32 = STEPS.len() as u32;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if found > CURRENT_VERSION {
        return Err(StoreError::Migration(format!(
            "store was written by a newer version (schema {found}, this build knows {CURRENT_VERSION})"
        )));
    }

    for (version, (name, step)) in (1u32..).zip(STEPS).skip(found as usize) {
        tracing::info!(step = *name, version, "applying schema migration");
        step(conn).map_err(|e| StoreError::Migration(format!("{name}: {e}")))?;
        conn.pragma_update(None, "user_version", version)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(conn: &Connection) -> u32 {
        conn.pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn newer_schema_is_refused() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", CURRENT_VERSION + 1)
            .unwrap();

        assert!(matches!(
            run_migrations(&conn).unwrap_err(),
            StoreError::Migration(_)
        ));
    }

    #[test]
    fn running_twice_is_harmless() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(version(&conn), CURRENT_VERSION);
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'records'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }
}
