//! Per-engine adapter implementations.
//!
//! Each driver owns a single native connection handle and translates its
//! engine's catalog dialect into the common schema model.

pub mod mssql;
pub mod mysql;
pub mod postgres;
pub mod sqlite;

pub use self::mssql::MssqlAdapter;
pub use self::mysql::MysqlAdapter;
pub use self::postgres::PostgresAdapter;
pub use self::sqlite::SqliteAdapter;
