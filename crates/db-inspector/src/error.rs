//! Error types for schema inspection.

use thiserror::Error;

use crate::core::schema::Engine;

/// Main error type for inspection operations.
///
/// Every failure an adapter can surface falls into exactly one of these
/// three kinds; native driver errors are translated at the adapter boundary
/// and never leak through untyped.
#[derive(Error, Debug)]
pub enum InspectError {
    /// The native driver rejected the connection parameters (bad credentials,
    /// unreachable host, invalid path). Raised at connect time only.
    #[error("connection failed: {message} ({engine})")]
    ConnectionFailed { engine: Engine, message: String },

    /// An operation was invoked on a disconnected adapter, or the transport
    /// dropped mid-operation.
    #[error("connection to {engine} database was unexpectedly closed: {message}")]
    ConnectionLost { engine: Engine, message: String },

    /// `list_columns` was asked for a table that does not exist.
    #[error("table {table} does not exist ({engine})")]
    TableNotFound { engine: Engine, table: String },
}

impl InspectError {
    /// Create a ConnectionFailed error from a native driver error.
    pub fn connection_failed(engine: Engine, cause: impl std::fmt::Display) -> Self {
        InspectError::ConnectionFailed {
            engine,
            message: cause.to_string(),
        }
    }

    /// Create a ConnectionLost error from a native driver error.
    pub fn connection_lost(engine: Engine, cause: impl std::fmt::Display) -> Self {
        InspectError::ConnectionLost {
            engine,
            message: cause.to_string(),
        }
    }

    /// Create a ConnectionLost error for an adapter that is already closed.
    pub fn disconnected(engine: Engine) -> Self {
        InspectError::ConnectionLost {
            engine,
            message: "adapter is disconnected".to_string(),
        }
    }

    /// Create a TableNotFound error.
    pub fn table_not_found(engine: Engine, table: impl Into<String>) -> Self {
        InspectError::TableNotFound {
            engine,
            table: table.into(),
        }
    }

    /// The engine the failing adapter was speaking to.
    pub fn engine(&self) -> Engine {
        match self {
            InspectError::ConnectionFailed { engine, .. }
            | InspectError::ConnectionLost { engine, .. }
            | InspectError::TableNotFound { engine, .. } => *engine,
        }
    }
}

/// Result type alias for inspection operations.
pub type Result<T> = std::result::Result<T, InspectError>;
