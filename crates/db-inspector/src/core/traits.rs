//! The adapter capability trait every engine implements.
//!
//! # Design
//!
//! - **Strategy**: each engine translates its own catalog dialect behind the
//!   same five operations.
//! - **Template Method**: [`DbAdapter::extract_schema`] has a default body
//!   driving `list_tables` + `list_columns`.
//!
//! Methods take `&mut self`: an adapter owns exactly one native connection
//! handle and access to it must be serialized by the caller.

use async_trait::async_trait;

use crate::error::Result;

use super::schema::{Column, ConnectionStatus, Engine, Schema};

/// Read-only catalog inspection over one owned database connection.
///
/// Construction policy is per-engine: the SQLite adapter is built
/// disconnected and connects on demand, while the server-based adapters
/// connect eagerly in their constructors and are never observable in a
/// half-built state.
#[async_trait]
pub trait DbAdapter: Send {
    /// The engine this adapter speaks to.
    fn engine(&self) -> Engine;

    /// Current liveness of the underlying transport.
    ///
    /// Re-checked before every catalog query; a transport may drop silently
    /// between calls.
    async fn status(&mut self) -> ConnectionStatus;

    /// Release the native handle. Idempotent: closing an already-closed
    /// adapter is a no-op. A closed adapter must not be reused.
    async fn close(&mut self) -> Result<()>;

    /// Names of the base tables in the database, in catalog order.
    /// Views and system tables are excluded.
    async fn list_tables(&mut self) -> Result<Vec<String>>;

    /// Column name, portable type, and nullability for one table, in
    /// catalog order. Fails with `TableNotFound` if the table is absent.
    async fn list_columns(&mut self, table: &str) -> Result<Vec<Column>>;

    /// Extract the full schema: every table, with its columns, in the order
    /// the catalog returned the tables. Any failure propagates unchanged.
    async fn extract_schema(&mut self) -> Result<Schema> {
        let mut schema = Schema::new();
        for table in self.list_tables().await? {
            let columns = self.list_columns(&table).await?;
            schema.insert(table, columns);
        }
        Ok(schema)
    }
}
