//! MySQL/MariaDB adapter.
//!
//! Uses a single SQLx `MySqlConnection`. Connects eagerly:
//! [`MysqlAdapter::connect`] either yields a live adapter or fails with
//! `ConnectionFailed`.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection, Row};
use tracing::{debug, info};

use crate::config::ConnectParams;
use crate::core::schema::{Column, ConnectionStatus, Engine};
use crate::core::traits::DbAdapter;
use crate::error::{InspectError, Result};

/// Adapter for inspecting MySQL/MariaDB databases.
#[derive(Debug)]
pub struct MysqlAdapter {
    conn: Option<MySqlConnection>,
}

impl MysqlAdapter {
    /// Connect to a MySQL database.
    pub async fn connect(params: &ConnectParams) -> Result<Self> {
        let options = MySqlConnectOptions::new()
            .host(&params.host)
            .port(params.port)
            .username(&params.user)
            .password(&params.password)
            .database(&params.database);

        let conn = options
            .connect()
            .await
            .map_err(|e| InspectError::connection_failed(Engine::Mysql, e))?;

        info!(
            host = %params.host,
            port = params.port,
            database = %params.database,
            "connected to MySQL database"
        );

        Ok(Self { conn: Some(conn) })
    }

    async fn ensure_connected(&mut self) -> Result<&mut MySqlConnection> {
        if self.status().await == ConnectionStatus::Disconnected {
            return Err(InspectError::disconnected(Engine::Mysql));
        }
        self.conn
            .as_mut()
            .ok_or_else(|| InspectError::disconnected(Engine::Mysql))
    }
}

#[async_trait]
impl DbAdapter for MysqlAdapter {
    fn engine(&self) -> Engine {
        Engine::Mysql
    }

    async fn status(&mut self) -> ConnectionStatus {
        match self.conn.as_mut() {
            Some(conn) => match conn.ping().await {
                Ok(()) => ConnectionStatus::Connected,
                Err(_) => ConnectionStatus::Disconnected,
            },
            None => ConnectionStatus::Disconnected,
        }
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            debug!("closing MySQL connection");
            conn.close()
                .await
                .map_err(|e| InspectError::connection_lost(Engine::Mysql, e))?;
        }
        Ok(())
    }

    async fn list_tables(&mut self) -> Result<Vec<String>> {
        let conn = self.ensure_connected().await?;

        debug!("listing MySQL tables");
        let rows = sqlx::query("SHOW TABLES")
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| InspectError::connection_lost(Engine::Mysql, e))?;

        let mut tables = Vec::new();
        for row in rows {
            tables.push(
                row.try_get::<String, _>(0)
                    .map_err(|e| InspectError::connection_lost(Engine::Mysql, e))?,
            );
        }
        Ok(tables)
    }

    async fn list_columns(&mut self, table: &str) -> Result<Vec<Column>> {
        let conn = self.ensure_connected().await?;

        debug!(table, "describing MySQL table");
        let query = format!("DESCRIBE `{}`", table.replace('`', "``"));
        let rows = match sqlx::query(&query).fetch_all(&mut *conn).await {
            Ok(rows) => rows,
            // DESCRIBE is the one catalog path that errors natively on a
            // missing table (ER_NO_SUCH_TABLE).
            Err(sqlx::Error::Database(_)) => {
                return Err(InspectError::table_not_found(Engine::Mysql, table));
            }
            Err(e) => return Err(InspectError::connection_lost(Engine::Mysql, e)),
        };

        let mut columns = Vec::new();
        for row in rows {
            let name: String = row
                .try_get("Field")
                .map_err(|e| InspectError::connection_lost(Engine::Mysql, e))?;
            let native_type: String = row
                .try_get("Type")
                .map_err(|e| InspectError::connection_lost(Engine::Mysql, e))?;
            let nullable: String = row
                .try_get("Null")
                .map_err(|e| InspectError::connection_lost(Engine::Mysql, e))?;
            columns.push(Column::from_native(
                name,
                &native_type,
                nullable.eq_ignore_ascii_case("yes"),
            ));
        }
        Ok(columns)
    }
}
