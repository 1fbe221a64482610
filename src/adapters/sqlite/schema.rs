use rusqlite::Connection;

use crate::types::error::GuardError;

pub fn initialize_schema(conn: &Connection) -> Result<(), GuardError> {
    conn.execute_batch("
        -- One row per reputation check. Rows are never updated or deleted.
        CREATE TABLE IF NOT EXISTS email_lookups (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            email               TEXT NOT NULL,
            reputation          TEXT NOT NULL DEFAULT 'none',  -- 'high' | 'medium' | 'low' | 'none'
            suspicious          INTEGER NOT NULL DEFAULT 0,
            reference_count     INTEGER NOT NULL DEFAULT 0,
            data_breach         INTEGER NOT NULL DEFAULT 0,
            credentials_leaked  INTEGER NOT NULL DEFAULT 0,
            spam                INTEGER NOT NULL DEFAULT 0,
            disposable          INTEGER NOT NULL DEFAULT 0,
            checked_at          INTEGER NOT NULL                -- unix epoch ms
        );

        CREATE INDEX IF NOT EXISTS idx_email_lookups_checked_at ON email_lookups(checked_at DESC, id DESC);
    ")?;

    Ok(())
}
