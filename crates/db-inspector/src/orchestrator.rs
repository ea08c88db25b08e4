//! Schema extraction orchestration.
//!
//! [`DbAdapter::extract_schema`] works on an already-connected adapter and
//! leaves the connection open. The helpers here add the scoped form: connect,
//! extract, and close exactly once, with close guaranteed on the failure path
//! as well. No retries anywhere; every failure propagates unchanged.

use crate::config::{ConnectParams, SqliteSource};
use crate::core::schema::Schema;
use crate::core::traits::DbAdapter;
use crate::drivers::{MssqlAdapter, MysqlAdapter, PostgresAdapter, SqliteAdapter};
use crate::error::Result;

/// Extract the schema from a connected adapter, closing it afterwards
/// whether extraction succeeded or not. An extraction error wins over a
/// close error.
pub async fn extract_and_close<A: DbAdapter>(mut adapter: A) -> Result<Schema> {
    let extracted = adapter.extract_schema().await;
    let closed = adapter.close().await;
    let schema = extracted?;
    closed?;
    Ok(schema)
}

/// Connect to a SQLite database, extract its schema, and close.
pub async fn inspect_sqlite(source: &SqliteSource) -> Result<Schema> {
    extract_and_close(SqliteAdapter::open(source.clone())?).await
}

/// Connect to a PostgreSQL database, extract its schema, and close.
pub async fn inspect_postgres(params: &ConnectParams) -> Result<Schema> {
    extract_and_close(PostgresAdapter::connect(params).await?).await
}

/// Connect to a MySQL database, extract its schema, and close.
pub async fn inspect_mysql(params: &ConnectParams) -> Result<Schema> {
    extract_and_close(MysqlAdapter::connect(params).await?).await
}

/// Connect to a SQL Server database, extract its schema, and close.
pub async fn inspect_mssql(params: &ConnectParams) -> Result<Schema> {
    extract_and_close(MssqlAdapter::connect(params).await?).await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::core::schema::{Column, ConnectionStatus, Engine, PortableType};
    use crate::error::InspectError;

    /// In-memory adapter over a fixed catalog.
    struct FakeAdapter {
        tables: Vec<(String, Vec<Column>)>,
        missing: Option<String>,
        closes: Arc<AtomicUsize>,
        connected: bool,
    }

    impl FakeAdapter {
        fn new(tables: Vec<(String, Vec<Column>)>) -> (Self, Arc<AtomicUsize>) {
            let closes = Arc::new(AtomicUsize::new(0));
            let adapter = Self {
                tables,
                missing: None,
                closes: Arc::clone(&closes),
                connected: true,
            };
            (adapter, closes)
        }
    }

    #[async_trait]
    impl DbAdapter for FakeAdapter {
        fn engine(&self) -> Engine {
            Engine::Sqlite
        }

        async fn status(&mut self) -> ConnectionStatus {
            if self.connected {
                ConnectionStatus::Connected
            } else {
                ConnectionStatus::Disconnected
            }
        }

        async fn close(&mut self) -> Result<()> {
            if self.connected {
                self.connected = false;
                self.closes.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        }

        async fn list_tables(&mut self) -> Result<Vec<String>> {
            if !self.connected {
                return Err(InspectError::disconnected(Engine::Sqlite));
            }
            Ok(self.tables.iter().map(|(name, _)| name.clone()).collect())
        }

        async fn list_columns(&mut self, table: &str) -> Result<Vec<Column>> {
            if !self.connected {
                return Err(InspectError::disconnected(Engine::Sqlite));
            }
            if self.missing.as_deref() == Some(table) {
                return Err(InspectError::table_not_found(Engine::Sqlite, table));
            }
            self.tables
                .iter()
                .find(|(name, _)| name == table)
                .map(|(_, columns)| columns.clone())
                .ok_or_else(|| InspectError::table_not_found(Engine::Sqlite, table))
        }
    }

    fn fixture() -> Vec<(String, Vec<Column>)> {
        vec![
            (
                "zebra".to_string(),
                vec![Column {
                    name: "id".to_string(),
                    datatype: PortableType::Integer,
                    is_nullable: false,
                }],
            ),
            (
                "alpha".to_string(),
                vec![Column {
                    name: "label".to_string(),
                    datatype: PortableType::Text,
                    is_nullable: true,
                }],
            ),
        ]
    }

    #[tokio::test]
    async fn extract_schema_preserves_catalog_order() {
        let (mut adapter, _) = FakeAdapter::new(fixture());
        let schema = adapter.extract_schema().await.unwrap();
        let keys: Vec<_> = schema.keys().cloned().collect();
        assert_eq!(keys, vec!["zebra", "alpha"]);
        assert_eq!(schema["zebra"][0].name, "id");
    }

    #[tokio::test]
    async fn extract_and_close_closes_on_success() {
        let (adapter, closes) = FakeAdapter::new(fixture());
        let schema = extract_and_close(adapter).await.unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn extract_and_close_closes_on_failure_and_propagates() {
        let (mut adapter, closes) = FakeAdapter::new(fixture());
        adapter.missing = Some("zebra".to_string());

        let err = extract_and_close(adapter).await.unwrap_err();
        assert!(matches!(err, InspectError::TableNotFound { .. }));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn operations_after_close_report_connection_lost() {
        let (mut adapter, _) = FakeAdapter::new(fixture());
        adapter.close().await.unwrap();
        let err = adapter.list_tables().await.unwrap_err();
        assert!(matches!(err, InspectError::ConnectionLost { .. }));
    }
}
