//! Schema model types shared by every adapter.
//!
//! These are plain data records: two adapters inspecting the same logical
//! table must produce equal [`Column`] values, which is what the cross-engine
//! parity tests key off.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The database engines this crate can inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Engine {
    /// SQLite (file-backed or in-memory).
    Sqlite,
    /// PostgreSQL.
    Postgres,
    /// MySQL / MariaDB.
    Mysql,
    /// Microsoft SQL Server.
    Mssql,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Engine::Sqlite => "SQLite",
            Engine::Postgres => "PostgreSQL",
            Engine::Mysql => "MySQL",
            Engine::Mssql => "SQL Server",
        };
        f.write_str(name)
    }
}

/// Liveness of an adapter's native connection handle.
///
/// A closed transport always reads as `Disconnected`, even while the adapter
/// still holds a handle value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// The handle is present and the transport is open.
    Connected,
    /// The handle was released, or the transport reports closed.
    Disconnected,
}

/// Engine-agnostic scalar type tag for a column.
///
/// `Unknown` is a valid, expected value for native spellings with no
/// registered mapping; it is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortableType {
    Text,
    Integer,
    Float,
    Boolean,
    Date,
    DateTime,
    Binary,
    Unknown,
}

/// A single column as reported by an engine's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Portable type inferred from the native spelling.
    pub datatype: PortableType,
    /// Whether the column accepts NULL.
    pub is_nullable: bool,
}

impl Column {
    /// Build a column, mapping the native type spelling to a portable type.
    pub fn from_native(name: impl Into<String>, native_type: &str, is_nullable: bool) -> Self {
        Column {
            name: name.into(),
            datatype: super::typemap::portable_type(native_type),
            is_nullable,
        }
    }
}

/// The complete table → columns map produced by extraction.
///
/// Iteration order follows the order the engine's catalog returned the
/// tables; column order per table likewise follows the catalog.
pub type Schema = IndexMap<String, Vec<Column>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_display_names() {
        assert_eq!(Engine::Sqlite.to_string(), "SQLite");
        assert_eq!(Engine::Postgres.to_string(), "PostgreSQL");
        assert_eq!(Engine::Mysql.to_string(), "MySQL");
        assert_eq!(Engine::Mssql.to_string(), "SQL Server");
    }

    #[test]
    fn column_equality_is_structural() {
        let a = Column::from_native("id", "INTEGER", false);
        let b = Column {
            name: "id".to_string(),
            datatype: PortableType::Integer,
            is_nullable: false,
        };
        assert_eq!(a, b);
    }

    #[test]
    fn schema_preserves_insertion_order() {
        let mut schema = Schema::new();
        schema.insert("zebra".to_string(), vec![]);
        schema.insert("alpha".to_string(), vec![]);
        let keys: Vec<_> = schema.keys().cloned().collect();
        assert_eq!(keys, vec!["zebra", "alpha"]);
    }
}
