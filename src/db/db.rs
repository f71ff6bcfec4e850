use crate::db::migrations::init_with_migrations;
use crate::libs::config::DatabaseConfig;
use crate::libs::error::{StoreError, StoreResult};
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// An open, migrated database connection.
pub struct Db {
    pub conn: Connection,
    pub path: Option<PathBuf>,
}

impl Db {
    /// Opens the configured database file and applies pending migrations.
    pub fn open(config: &DatabaseConfig) -> StoreResult<Db> {
        let path = config.resolved_path().map_err(|e| StoreError::Connection(e.to_string()))?;
        let mut conn = Self::open_without_migrations(config)?;
        init_with_migrations(&mut conn)?;
        tracing::debug!(path = %path.display(), "database opened");

        Ok(Db { conn, path: Some(path) })
    }

    /// Opens the database file without touching the schema.
    pub fn open_without_migrations(config: &DatabaseConfig) -> StoreResult<Connection> {
        let path = config.resolved_path().map_err(|e| StoreError::Connection(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::Connection(format!("{}: {}", parent.display(), e)))?;
        }

        let conn = Connection::open(&path)?;
        Self::configure(&conn, config)?;
        Ok(conn)
    }

    pub fn in_memory() -> StoreResult<Db> {
        let mut conn = Connection::open_in_memory()?;
        Self::configure(&conn, &DatabaseConfig::default())?;
        init_with_migrations(&mut conn)?;
        Ok(Db { conn, path: None })
    }

    fn configure(conn: &Connection, config: &DatabaseConfig) -> StoreResult<()> {
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        conn.pragma_update(None, "foreign_keys", config.foreign_keys)?;
        Ok(())
    }
}
