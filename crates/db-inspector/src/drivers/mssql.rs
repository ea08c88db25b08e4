//! Microsoft SQL Server adapter.
//!
//! Uses Tiberius over a tokio `TcpStream`. Connects eagerly:
//! [`MssqlAdapter::connect`] either yields a live adapter or fails with
//! `ConnectionFailed`.

use async_trait::async_trait;
use tiberius::{AuthMethod, Client, Config, EncryptionLevel, Query, Row};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::{debug, info};

use crate::config::ConnectParams;
use crate::core::schema::{Column, ConnectionStatus, Engine};
use crate::core::traits::DbAdapter;
use crate::error::{InspectError, Result};

type MssqlClient = Client<Compat<TcpStream>>;

/// Adapter for inspecting SQL Server databases.
#[derive(Debug)]
pub struct MssqlAdapter {
    database: String,
    client: Option<MssqlClient>,
}

impl MssqlAdapter {
    /// Connect to a SQL Server database.
    pub async fn connect(params: &ConnectParams) -> Result<Self> {
        let mut config = Config::new();
        config.host(&params.host);
        config.port(params.port);
        config.database(&params.database);
        config.authentication(AuthMethod::sql_server(&params.user, &params.password));
        config.encryption(EncryptionLevel::NotSupported);
        config.trust_cert();

        let tcp = TcpStream::connect(config.get_addr())
            .await
            .map_err(|e| InspectError::connection_failed(Engine::Mssql, e))?;
        tcp.set_nodelay(true)
            .map_err(|e| InspectError::connection_failed(Engine::Mssql, e))?;

        let client = Client::connect(config, tcp.compat_write())
            .await
            .map_err(|e| InspectError::connection_failed(Engine::Mssql, e))?;

        info!(
            host = %params.host,
            port = params.port,
            database = %params.database,
            "connected to SQL Server database"
        );

        Ok(Self {
            database: params.database.clone(),
            client: Some(client),
        })
    }

    fn ensure_connected(&mut self) -> Result<&mut MssqlClient> {
        self.client
            .as_mut()
            .ok_or_else(|| InspectError::disconnected(Engine::Mssql))
    }

    fn str_field(row: &Row, idx: usize) -> Result<String> {
        let value: Option<&str> = row
            .try_get(idx)
            .map_err(|e| InspectError::connection_lost(Engine::Mssql, e))?;
        value.map(str::to_string).ok_or_else(|| {
            InspectError::connection_lost(Engine::Mssql, "catalog returned a NULL identifier")
        })
    }
}

#[async_trait]
impl DbAdapter for MssqlAdapter {
    fn engine(&self) -> Engine {
        Engine::Mssql
    }

    async fn status(&mut self) -> ConnectionStatus {
        // Tiberius exposes no liveness flag; the owned client decides.
        match &self.client {
            Some(_) => ConnectionStatus::Connected,
            None => ConnectionStatus::Disconnected,
        }
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(client) = self.client.take() {
            debug!("closing SQL Server connection");
            client
                .close()
                .await
                .map_err(|e| InspectError::connection_lost(Engine::Mssql, e))?;
        }
        Ok(())
    }

    async fn list_tables(&mut self) -> Result<Vec<String>> {
        let database = self.database.clone();
        let client = self.ensure_connected()?;

        debug!("listing SQL Server tables");
        let sql = format!(
            "SELECT table_name FROM [{}].information_schema.tables \
             WHERE table_type = 'BASE TABLE'",
            database.replace(']', "]]")
        );
        let rows = client
            .simple_query(&sql)
            .await
            .map_err(|e| InspectError::connection_lost(Engine::Mssql, e))?
            .into_first_result()
            .await
            .map_err(|e| InspectError::connection_lost(Engine::Mssql, e))?;

        let mut tables = Vec::new();
        for row in &rows {
            tables.push(Self::str_field(row, 0)?);
        }
        Ok(tables)
    }

    async fn list_columns(&mut self, table: &str) -> Result<Vec<Column>> {
        let client = self.ensure_connected()?;

        debug!(table, "describing SQL Server table");
        let mut query = Query::new(
            "SELECT column_name, data_type, is_nullable \
             FROM information_schema.columns \
             WHERE table_name = @P1 \
             ORDER BY ordinal_position",
        );
        query.bind(table);
        let rows = query
            .query(client)
            .await
            .map_err(|e| InspectError::connection_lost(Engine::Mssql, e))?
            .into_first_result()
            .await
            .map_err(|e| InspectError::connection_lost(Engine::Mssql, e))?;

        // information_schema.columns yields an empty set, not an error, for
        // a missing table; a base table always has at least one column.
        if rows.is_empty() {
            return Err(InspectError::table_not_found(Engine::Mssql, table));
        }

        let mut columns = Vec::new();
        for row in &rows {
            let name = Self::str_field(row, 0)?;
            let native_type = Self::str_field(row, 1)?;
            let nullable = Self::str_field(row, 2)?;
            columns.push(Column::from_native(
                name,
                &native_type,
                nullable.eq_ignore_ascii_case("yes"),
            ));
        }
        Ok(columns)
    }
}
