//! # db-inspector
//!
//! Read-only schema introspection for SQLite, PostgreSQL, MySQL and
//! SQL Server.
//!
//! Each engine is driven through the same capability trait
//! ([`DbAdapter`]): connect, check status, list base tables, list the
//! columns of a table, close. Engine-native type spellings are normalized
//! into a small portable type set, so the same logical column yields the
//! same [`Column`] value regardless of engine.
//!
//! ## Example
//!
//! ```rust,no_run
//! use db_inspector::{inspect_postgres, ConnectParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), db_inspector::InspectError> {
//!     let params = ConnectParams {
//!         host: "localhost".to_string(),
//!         port: 5432,
//!         user: "postgres".to_string(),
//!         password: "password".to_string(),
//!         database: "app".to_string(),
//!     };
//!     let schema = inspect_postgres(&params).await?;
//!     for (table, columns) in &schema {
//!         println!("{table}: {} columns", columns.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod drivers;
pub mod error;
pub mod orchestrator;

// Re-exports for convenient access
pub use crate::config::{ConnectParams, SqliteSource, SQLITE_IN_MEMORY};
pub use crate::core::schema::{Column, ConnectionStatus, Engine, PortableType, Schema};
pub use crate::core::traits::DbAdapter;
pub use crate::core::typemap::{normalize_type_name, portable_type};
pub use crate::drivers::{MssqlAdapter, MysqlAdapter, PostgresAdapter, SqliteAdapter};
pub use crate::error::{InspectError, Result};
pub use crate::orchestrator::{
    extract_and_close, inspect_mssql, inspect_mysql, inspect_postgres, inspect_sqlite,
};
