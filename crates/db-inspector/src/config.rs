//! Connection-parameter records for the supported engines.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Marker string that selects an in-memory SQLite database.
pub const SQLITE_IN_MEMORY: &str = ":memory:";

/// Connection parameters for the server-based engines (PostgreSQL, MySQL,
/// SQL Server).
///
/// Immutable once constructed; an adapter keeps its own copy for the
/// lifetime of the connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectParams {
    /// Hostname or IP address of the database server.
    pub host: String,
    /// Port the server listens on.
    pub port: u16,
    /// Username for authentication.
    pub user: String,
    /// Password for authentication.
    pub password: String,
    /// Name of the database to inspect.
    pub database: String,
}

/// Where a SQLite database lives: a file on disk or a private in-memory
/// database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqliteSource {
    /// A fresh in-memory database, discarded on close.
    InMemory,
    /// A database file; created if it does not exist.
    File(PathBuf),
}

impl SqliteSource {
    /// Build a source from a path-like string, recognizing the `":memory:"`
    /// marker.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.as_os_str() == SQLITE_IN_MEMORY {
            SqliteSource::InMemory
        } else {
            SqliteSource::File(path.to_path_buf())
        }
    }
}
