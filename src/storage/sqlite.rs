use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, types::Type, Connection, OptionalExtension};
use std::path::Path;

use super::OverrideStore;
use crate::types::{timestamp, Override, OverrideRecord, Overrides, RepoId};

const DB_SCHEMA_VERSION: i64 = 1;

#[derive(Clone, Debug)]
pub struct SqliteStore {
    pub path: String,
}

fn map_override_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(RepoId, OverrideRecord)> {
    let id: String = row.get(0)?;
    let id = id
        .parse::<RepoId>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err)))?;
    let text: String = row.get(1)?;
    let updated_at: String = row.get(2)?;
    let updated_at = DateTime::parse_from_rfc3339(&updated_at)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(err)))?
        .with_timezone(&Utc);
    Ok((id, OverrideRecord { text, updated_at }))
}

fn db_load_override(conn: &Connection, id: &RepoId) -> rusqlite::Result<Option<OverrideRecord>> {
    conn.query_row(
        "SELECT id, text, updated_at FROM overrides WHERE id = ?1",
        params![id.as_str()],
        map_override_row,
    )
    .optional()
    .map(|row| row.map(|(_, record)| record))
}

fn db_list_overrides(conn: &Connection) -> rusqlite::Result<Overrides> {
    let mut stmt = conn.prepare("SELECT id, text, updated_at FROM overrides ORDER BY id")?;
    let mapped = stmt
        .query_map([], map_override_row)?
        .collect::<rusqlite::Result<Overrides>>()?;
    Ok(mapped)
}

fn db_save_override(conn: &Connection, id: &RepoId, record: &OverrideRecord) -> rusqlite::Result<()> {
    conn.execute(
        r#"
        INSERT INTO overrides (id, text, updated_at) VALUES (?1, ?2, ?3)
        ON CONFLICT(id) DO UPDATE SET
            text = excluded.text,
            updated_at = excluded.updated_at
        "#,
        params![id.as_str(), record.text, timestamp::to_iso_millis(&record.updated_at)],
    )?;
    Ok(())
}

fn db_delete_override(conn: &Connection, id: &RepoId) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM overrides WHERE id = ?1", params![id.as_str()])
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    pub fn reset_all(&self) -> Result<()> {
        if !std::path::Path::new(&self.path).exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path)?;
        Ok(())
    }

    pub fn init(&self) -> Result<()> {
        self.with_conn(|_conn| Ok(()))?;
        Ok(())
    }

    fn with_conn<F, T>(&self, f: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;

        Self::migrate(&conn)?;
        f(&conn)
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        log::info!(
            "SQLite schema migration: {} -> {}",
            version,
            DB_SCHEMA_VERSION
        );

        if version == 0 {
            conn.execute_batch(
                r#"
            CREATE TABLE overrides (
                id TEXT PRIMARY KEY,
                text TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
        "#,
            )?;
            conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
            return Ok(());
        }

        Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::ErrorCode::SchemaChanged as i32),
            Some("database schema version mismatch; please run with --reset option".to_string()),
        ))
    }
}

impl OverrideStore for SqliteStore {
    fn get(&self, id: &RepoId) -> Result<Override> {
        let record = self.with_conn(|conn| db_load_override(conn, id))?;
        Ok(record.into())
    }

    fn put(&self, id: &RepoId, text: &str) -> Result<OverrideRecord> {
        let record = OverrideRecord::now(text);
        self.with_conn(|conn| db_save_override(conn, id, &record))?;
        log::debug!("override stored for repository {}", id);
        Ok(record)
    }

    fn delete(&self, id: &RepoId) -> Result<()> {
        let removed = self.with_conn(|conn| db_delete_override(conn, id))?;
        if removed > 0 {
            log::debug!("override removed for repository {}", id);
        }
        Ok(())
    }

    fn all(&self) -> Result<Overrides> {
        let rows = self.with_conn(db_list_overrides)?;
        Ok(rows)
    }
}
