//! SQLite adapter integration tests.
//!
//! SQLite is bundled, so these run against real databases: in-memory for the
//! catalog tests, a temp file for the lifecycle test.

use db_inspector::{
    extract_and_close, inspect_sqlite, Column, ConnectionStatus, DbAdapter, InspectError,
    PortableType, Schema, SqliteAdapter, SqliteSource,
};

const FIXTURE_SQL: &str = "
CREATE TABLE test_table (
    id INTEGER NOT NULL,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    date_of_birth DATE,
    timestamp DATETIME NOT NULL,
    description TEXT
);
CREATE TABLE test_table_2 (
    id INTEGER NOT NULL,
    product_name TEXT NOT NULL,
    product_description TEXT NOT NULL,
    product_price REAL NOT NULL,
    timestamp DATETIME NOT NULL
);
";

fn col(name: &str, datatype: PortableType, is_nullable: bool) -> Column {
    Column {
        name: name.to_string(),
        datatype,
        is_nullable,
    }
}

fn expected_test_table_columns() -> Vec<Column> {
    vec![
        col("id", PortableType::Integer, false),
        col("name", PortableType::Text, false),
        col("email", PortableType::Text, false),
        col("date_of_birth", PortableType::Date, true),
        col("timestamp", PortableType::DateTime, false),
        col("description", PortableType::Text, true),
    ]
}

fn expected_test_table_2_columns() -> Vec<Column> {
    vec![
        col("id", PortableType::Integer, false),
        col("product_name", PortableType::Text, false),
        col("product_description", PortableType::Text, false),
        col("product_price", PortableType::Float, false),
        col("timestamp", PortableType::DateTime, false),
    ]
}

fn populated_adapter() -> SqliteAdapter {
    let adapter = SqliteAdapter::open(SqliteSource::InMemory).unwrap();
    adapter
        .connection()
        .unwrap()
        .execute_batch(FIXTURE_SQL)
        .unwrap();
    adapter
}

fn sorted_by_name(mut columns: Vec<Column>) -> Vec<Column> {
    columns.sort_by(|a, b| a.name.cmp(&b.name));
    columns
}

#[tokio::test]
async fn file_backed_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    let mut db = SqliteAdapter::open(SqliteSource::File(db_path.clone())).unwrap();
    assert!(db_path.exists());
    assert_eq!(db.status().await, ConnectionStatus::Connected);
    assert!(db.connection().is_some());

    db.close().await.unwrap();
    assert_eq!(db.status().await, ConnectionStatus::Disconnected);
    assert!(db.connection().is_none());

    // Second close is a no-op.
    db.close().await.unwrap();

    let err = db.list_tables().await.unwrap_err();
    assert!(matches!(err, InspectError::ConnectionLost { .. }));
}

#[tokio::test]
async fn deferred_connect_is_idempotent() {
    let mut db = SqliteAdapter::new(SqliteSource::InMemory);
    assert_eq!(db.status().await, ConnectionStatus::Disconnected);

    db.connect().unwrap();
    assert_eq!(db.status().await, ConnectionStatus::Connected);

    // Reconnecting while connected is a no-op.
    db.connect().unwrap();
    assert_eq!(db.status().await, ConnectionStatus::Connected);
}

#[tokio::test]
async fn empty_database_has_no_tables() {
    let mut db = SqliteAdapter::open(SqliteSource::InMemory).unwrap();
    assert!(db.list_tables().await.unwrap().is_empty());
    assert_eq!(db.extract_schema().await.unwrap(), Schema::new());
}

#[tokio::test]
async fn list_tables_follows_catalog_order() {
    let mut db = populated_adapter();
    let tables = db.list_tables().await.unwrap();
    assert_eq!(tables, vec!["test_table", "test_table_2"]);
}

#[tokio::test]
async fn list_columns_maps_types_and_nullability() {
    let mut db = populated_adapter();
    assert_eq!(
        db.list_columns("test_table").await.unwrap(),
        expected_test_table_columns()
    );
    assert_eq!(
        db.list_columns("test_table_2").await.unwrap(),
        expected_test_table_2_columns()
    );
}

#[tokio::test]
async fn missing_table_is_not_an_empty_list() {
    let mut db = populated_adapter();
    let err = db.list_columns("fake_table").await.unwrap_err();
    match err {
        InspectError::TableNotFound { table, .. } => assert_eq!(table, "fake_table"),
        other => panic!("expected TableNotFound, got {other}"),
    }
}

#[tokio::test]
async fn extract_schema_round_trip() {
    let mut db = populated_adapter();
    let schema = db.extract_schema().await.unwrap();

    let keys: Vec<_> = schema.keys().cloned().collect();
    assert_eq!(keys, vec!["test_table", "test_table_2"]);
    assert_eq!(
        sorted_by_name(schema["test_table"].clone()),
        sorted_by_name(expected_test_table_columns())
    );
    assert_eq!(
        sorted_by_name(schema["test_table_2"].clone()),
        sorted_by_name(expected_test_table_2_columns())
    );
}

#[tokio::test]
async fn extract_and_close_releases_the_handle() {
    let db = populated_adapter();
    let schema = extract_and_close(db).await.unwrap();
    assert_eq!(schema.len(), 2);
}

#[tokio::test]
async fn inspect_sqlite_one_shot_on_a_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("inspect.db");

    // Seed a file database, then inspect it through the scoped entry point.
    let mut seed = SqliteAdapter::open(SqliteSource::File(db_path.clone())).unwrap();
    seed.connection()
        .unwrap()
        .execute_batch(FIXTURE_SQL)
        .unwrap();
    seed.close().await.unwrap();

    let schema = inspect_sqlite(&SqliteSource::File(db_path)).await.unwrap();
    let keys: Vec<_> = schema.keys().cloned().collect();
    assert_eq!(keys, vec!["test_table", "test_table_2"]);
}

#[tokio::test]
async fn invalid_path_fails_with_connection_failed() {
    let err = SqliteAdapter::open(SqliteSource::File(
        "/nonexistent-dir/definitely/not/here.db".into(),
    ))
    .unwrap_err();
    assert!(matches!(err, InspectError::ConnectionFailed { .. }));
    assert!(err.to_string().starts_with("connection failed"));
}
