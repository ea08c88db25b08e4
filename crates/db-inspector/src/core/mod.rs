//! Engine-agnostic core: schema model, portable type mapping, and the
//! adapter capability trait.

pub mod schema;
pub mod traits;
pub mod typemap;

pub use self::schema::{Column, ConnectionStatus, Engine, PortableType, Schema};
pub use self::traits::DbAdapter;
pub use self::typemap::{normalize_type_name, portable_type};
