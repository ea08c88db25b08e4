//! Mapping between engine-native type spellings and portable types.
//!
//! The spelling table is process-wide immutable data; the reverse lookup is
//! built once and shared by every adapter. A miss yields
//! [`PortableType::Unknown`], never an error.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::schema::PortableType;

/// Accepted native spellings per portable type (uppercase, no parameters).
///
/// Meant to be exhaustive over the catalogs of the supported engines; a
/// spelling missing here simply maps to `Unknown`.
pub const TYPE_SPELLINGS: &[(PortableType, &[&str])] = &[
    (
        PortableType::Text,
        &["TEXT", "CHAR", "VARCHAR", "NVARCHAR", "CLOB", "CHARACTER VARYING"],
    ),
    (
        PortableType::Integer,
        &["INT", "INTEGER", "SMALLINT", "BIGINT", "SERIAL"],
    ),
    (
        PortableType::Float,
        &["REAL", "DOUBLE PRECISION", "NUMERIC", "DECIMAL"],
    ),
    (PortableType::Boolean, &["BOOLEAN"]),
    (PortableType::Date, &["DATE"]),
    (
        PortableType::DateTime,
        &["DATETIME", "DATETIME2", "TIMESTAMP WITHOUT TIME ZONE"],
    ),
    (PortableType::Binary, &["BLOB", "BYTEA", "VARBINARY"]),
];

/// Reverse lookup: normalized native spelling → portable type.
static NATIVE_TO_PORTABLE: LazyLock<HashMap<&'static str, PortableType>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (portable, spellings) in TYPE_SPELLINGS {
        for spelling in *spellings {
            map.insert(*spelling, *portable);
        }
    }
    map
});

/// Normalize a native type spelling for lookup.
///
/// Strips any parenthesized length/precision section (`VARCHAR(255)` →
/// `VARCHAR`), uppercases, and drops trailing `UNSIGNED`/`ZEROFILL`
/// qualifiers as MySQL appends them.
pub fn normalize_type_name(native: &str) -> String {
    let stripped = match (native.find('('), native.rfind(')')) {
        (Some(open), Some(close)) if close > open => {
            format!("{}{}", &native[..open], &native[close + 1..])
        }
        _ => native.to_string(),
    };

    let mut normalized = stripped.trim().to_uppercase();
    loop {
        if let Some(rest) = normalized.strip_suffix("UNSIGNED") {
            normalized = rest.trim_end().to_string();
        } else if let Some(rest) = normalized.strip_suffix("ZEROFILL") {
            normalized = rest.trim_end().to_string();
        } else {
            break;
        }
    }
    normalized.trim().to_string()
}

/// Map a native type spelling to its portable type.
pub fn portable_type(native: &str) -> PortableType {
    NATIVE_TO_PORTABLE
        .get(normalize_type_name(native).as_str())
        .copied()
        .unwrap_or(PortableType::Unknown)
}
