//! SQLite adapter.
//!
//! Uses rusqlite with the bundled engine. Unlike the server-based adapters,
//! this one supports deferred connection: [`SqliteAdapter::new`] builds a
//! disconnected adapter and [`SqliteAdapter::connect`] opens the handle on
//! demand (idempotently). [`SqliteAdapter::open`] is the construct-and-connect
//! convenience.

use async_trait::async_trait;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::config::SqliteSource;
use crate::core::schema::{Column, ConnectionStatus, Engine};
use crate::core::traits::DbAdapter;
use crate::error::{InspectError, Result};

/// Adapter for inspecting SQLite databases.
#[derive(Debug)]
pub struct SqliteAdapter {
    source: SqliteSource,
    conn: Option<Connection>,
}

impl SqliteAdapter {
    /// Build a disconnected adapter for the given source.
    pub fn new(source: SqliteSource) -> Self {
        Self { source, conn: None }
    }

    /// Build an adapter and connect it immediately.
    pub fn open(source: SqliteSource) -> Result<Self> {
        let mut adapter = Self::new(source);
        adapter.connect()?;
        Ok(adapter)
    }

    /// Open the database handle. A no-op if already connected.
    ///
    /// A file source is created on first open, matching SQLite's native
    /// behavior.
    pub fn connect(&mut self) -> Result<()> {
        if self.conn.is_some() {
            return Ok(());
        }

        let conn = match &self.source {
            SqliteSource::InMemory => Connection::open_in_memory(),
            SqliteSource::File(path) => Connection::open(path),
        }
        .map_err(|e| InspectError::connection_failed(Engine::Sqlite, e))?;

        info!(source = ?self.source, "connected to SQLite database");
        self.conn = Some(conn);
        Ok(())
    }

    /// Direct access to the native handle, for callers that need to run
    /// their own setup SQL (test fixtures).
    pub fn connection(&self) -> Option<&Connection> {
        self.conn.as_ref()
    }

    fn handle(&self) -> Result<&Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| InspectError::disconnected(Engine::Sqlite))
    }

    fn ensure_connected(&self) -> Result<&Connection> {
        let conn = self.handle()?;
        // rusqlite surfaces a dead handle as a prepare error.
        conn.prepare("SELECT 1")
            .map_err(|e| InspectError::connection_lost(Engine::Sqlite, e))?;
        Ok(conn)
    }
}

#[async_trait]
impl DbAdapter for SqliteAdapter {
    fn engine(&self) -> Engine {
        Engine::Sqlite
    }

    async fn status(&mut self) -> ConnectionStatus {
        match &self.conn {
            Some(conn) if conn.prepare("SELECT 1").is_ok() => ConnectionStatus::Connected,
            _ => ConnectionStatus::Disconnected,
        }
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            debug!("closing SQLite connection");
            conn.close()
                .map_err(|(_, e)| InspectError::connection_lost(Engine::Sqlite, e))?;
        }
        Ok(())
    }

    async fn list_tables(&mut self) -> Result<Vec<String>> {
        let conn = self.ensure_connected()?;

        debug!("listing SQLite tables");
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
            )
            .map_err(|e| InspectError::connection_lost(Engine::Sqlite, e))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| InspectError::connection_lost(Engine::Sqlite, e))?;

        let mut tables = Vec::new();
        for name in rows {
            tables.push(name.map_err(|e| InspectError::connection_lost(Engine::Sqlite, e))?);
        }
        Ok(tables)
    }

    async fn list_columns(&mut self, table: &str) -> Result<Vec<Column>> {
        let conn = self.ensure_connected()?;

        // PRAGMA table_info on a nonexistent table yields an empty result
        // rather than an error, so probe the catalog first.
        let exists: i64 = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master \
                 WHERE type = 'table' AND name = ?1)",
                [table],
                |row| row.get(0),
            )
            .map_err(|e| InspectError::connection_lost(Engine::Sqlite, e))?;
        if exists == 0 {
            return Err(InspectError::table_not_found(Engine::Sqlite, table));
        }

        debug!(table, "describing SQLite table");
        let pragma = format!("PRAGMA table_info('{}')", table.replace('\'', "''"));
        let mut stmt = conn
            .prepare(&pragma)
            .map_err(|e| InspectError::connection_lost(Engine::Sqlite, e))?;
        let rows = stmt
            .query_map([], |row| {
                let name: String = row.get(1)?;
                let native_type: String = row.get(2)?;
                let not_null: i64 = row.get(3)?;
                Ok(Column::from_native(name, &native_type, not_null == 0))
            })
            .map_err(|e| InspectError::connection_lost(Engine::Sqlite, e))?;

        let mut columns = Vec::new();
        for column in rows {
            columns.push(column.map_err(|e| InspectError::connection_lost(Engine::Sqlite, e))?);
        }
        Ok(columns)
    }
}
