//! PostgreSQL adapter.
//!
//! Uses tokio-postgres with a single client and its spawned connection task.
//! Connects eagerly: [`PostgresAdapter::connect`] either yields a live
//! adapter or fails with `ConnectionFailed`; a half-built adapter is never
//! observable.

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, Config, NoTls};
use tracing::{debug, info};

use crate::config::ConnectParams;
use crate::core::schema::{Column, ConnectionStatus, Engine};
use crate::core::traits::DbAdapter;
use crate::error::{InspectError, Result};

/// Adapter for inspecting PostgreSQL databases.
#[derive(Debug)]
pub struct PostgresAdapter {
    client: Option<Client>,
    conn_task: Option<JoinHandle<()>>,
}

impl PostgresAdapter {
    /// Connect to a PostgreSQL database.
    pub async fn connect(params: &ConnectParams) -> Result<Self> {
        let mut config = Config::new();
        config
            .host(&params.host)
            .port(params.port)
            .user(&params.user)
            .password(&params.password)
            .dbname(&params.database);

        let (client, connection) = config
            .connect(NoTls)
            .await
            .map_err(|e| InspectError::connection_failed(Engine::Postgres, e))?;

        // The connection future drives the socket; it resolves once the
        // client is dropped.
        let conn_task = tokio::spawn(async move {
            if let Err(e) = connection.await {
                debug!("PostgreSQL connection task ended: {e}");
            }
        });

        info!(
            host = %params.host,
            port = params.port,
            database = %params.database,
            "connected to PostgreSQL database"
        );

        Ok(Self {
            client: Some(client),
            conn_task: Some(conn_task),
        })
    }

    fn ensure_connected(&self) -> Result<&Client> {
        match &self.client {
            Some(client) if !client.is_closed() => Ok(client),
            _ => Err(InspectError::disconnected(Engine::Postgres)),
        }
    }
}

#[async_trait]
impl DbAdapter for PostgresAdapter {
    fn engine(&self) -> Engine {
        Engine::Postgres
    }

    async fn status(&mut self) -> ConnectionStatus {
        match &self.client {
            Some(client) if !client.is_closed() => ConnectionStatus::Connected,
            _ => ConnectionStatus::Disconnected,
        }
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(client) = self.client.take() {
            debug!("closing PostgreSQL connection");
            drop(client);
        }
        if let Some(task) = self.conn_task.take() {
            let _ = task.await;
        }
        Ok(())
    }

    async fn list_tables(&mut self) -> Result<Vec<String>> {
        let client = self.ensure_connected()?;

        debug!("listing PostgreSQL tables");
        let rows = client
            .query(
                "SELECT table_name::text FROM information_schema.tables \
                 WHERE table_schema = 'public' AND table_type = 'BASE TABLE'",
                &[],
            )
            .await
            .map_err(|e| InspectError::connection_lost(Engine::Postgres, e))?;

        let mut tables = Vec::new();
        for row in rows {
            tables.push(
                row.try_get(0)
                    .map_err(|e| InspectError::connection_lost(Engine::Postgres, e))?,
            );
        }
        Ok(tables)
    }

    async fn list_columns(&mut self, table: &str) -> Result<Vec<Column>> {
        let client = self.ensure_connected()?;

        let row = client
            .query_one("SELECT current_schema()::text", &[])
            .await
            .map_err(|e| InspectError::connection_lost(Engine::Postgres, e))?;
        let schema: String = row
            .try_get(0)
            .map_err(|e| InspectError::connection_lost(Engine::Postgres, e))?;

        // Describing a nonexistent table returns an empty set, so probe the
        // catalog first.
        let probe = client
            .query_one(
                "SELECT to_regclass($1)::text",
                &[&format!("{schema}.{table}")],
            )
            .await
            .map_err(|e| InspectError::connection_lost(Engine::Postgres, e))?;
        let regclass: Option<String> = probe
            .try_get(0)
            .map_err(|e| InspectError::connection_lost(Engine::Postgres, e))?;
        if regclass.is_none() {
            return Err(InspectError::table_not_found(Engine::Postgres, table));
        }

        debug!(table, "describing PostgreSQL table");
        let rows = client
            .query(
                "SELECT column_name::text, data_type::text, is_nullable::text \
                 FROM information_schema.columns \
                 WHERE table_schema = $1 AND table_name = $2",
                &[&schema, &table],
            )
            .await
            .map_err(|e| InspectError::connection_lost(Engine::Postgres, e))?;

        let mut columns = Vec::new();
        for row in rows {
            let name: String = row
                .try_get(0)
                .map_err(|e| InspectError::connection_lost(Engine::Postgres, e))?;
            let native_type: String = row
                .try_get(1)
                .map_err(|e| InspectError::connection_lost(Engine::Postgres, e))?;
            let is_nullable: String = row
                .try_get(2)
                .map_err(|e| InspectError::connection_lost(Engine::Postgres, e))?;
            columns.push(Column::from_native(
                name,
                &native_type,
                is_nullable.eq_ignore_ascii_case("yes"),
            ));
        }
        Ok(columns)
    }
}
