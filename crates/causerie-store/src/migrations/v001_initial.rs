//! Schema 1: the `records` table, one JSON document per aggregate.

use rusqlite::Connection;

pub fn up(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS records (
            key        TEXT PRIMARY KEY NOT NULL,
            json       TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )
}
