//! SQLite source adapter
//!
//! Read-only access to the local source database. The adapter enumerates
//! tables and views from `sqlite_master` and materializes whole tables or
//! views as text-sanitized [`TableData`]: every cell becomes its textual
//! form and NULL becomes the empty string, regardless of column affinity.

use crate::domain::{Result, SheetporterError, TableData};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, Connection, Row};
use std::path::{Path, PathBuf};

/// Read-only connection to the source SQLite database
pub struct SqliteSource {
    conn: SqliteConnection,
    path: PathBuf,
}

impl SqliteSource {
    /// Open the database file read-only.
    ///
    /// # Errors
    ///
    /// Returns a local-file error if the file does not exist, or a database
    /// error if the connection cannot be established.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SheetporterError::LocalFile(format!(
                "Database file not found at: {}\n\
                 💡 Make sure the file exists and the path is correct.",
                path.display()
            )));
        }

        let options = SqliteConnectOptions::new().filename(path).read_only(true);

        let conn = SqliteConnection::connect_with(&options)
            .await
            .map_err(|e| {
                SheetporterError::Database(format!(
                    "Failed to connect to {}: {}",
                    path.display(),
                    e
                ))
            })?;

        tracing::debug!(path = %path.display(), "Opened SQLite database read-only");

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List all table names in the database.
    pub async fn table_names(&mut self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| SheetporterError::Database(format!("Failed to list tables: {e}")))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>(0).map_err(|e| {
                    SheetporterError::Database(format!("Failed to read table name: {e}"))
                })
            })
            .collect()
    }

    /// List all view names starting with the given prefix.
    pub async fn views_with_prefix(&mut self, prefix: &str) -> Result<Vec<String>> {
        let pattern = format!("{prefix}%");
        let rows = sqlx::query(
            "SELECT name FROM sqlite_master WHERE type='view' AND name LIKE ? ORDER BY name",
        )
        .bind(&pattern)
        .fetch_all(&mut self.conn)
        .await
        .map_err(|e| SheetporterError::Database(format!("Failed to list views: {e}")))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>(0).map_err(|e| {
                    SheetporterError::Database(format!("Failed to read view name: {e}"))
                })
            })
            .collect()
    }

    /// Fetch every row of the named table or view as sanitized text.
    ///
    /// The header is taken from the result set when rows exist, and from
    /// `PRAGMA table_info` otherwise, so an empty source still yields its
    /// column names.
    pub async fn fetch_table(&mut self, name: &str) -> Result<TableData> {
        let sql = format!("SELECT * FROM {}", quote_identifier(name));
        let rows = sqlx::query(&sql)
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| {
                SheetporterError::Database(format!("Failed to read '{name}': {e}"))
            })?;

        let columns: Vec<String> = match rows.first() {
            Some(first) => first
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect(),
            None => self.column_names(name).await?,
        };

        let data = rows
            .iter()
            .map(|row| (0..row.len()).map(|i| cell_to_string(row, i)).collect())
            .collect();

        tracing::debug!(
            source = name,
            rows = rows.len(),
            columns = columns.len(),
            "Fetched table"
        );

        Ok(TableData::new(columns, data))
    }

    /// Column names of a table or view, in declaration order.
    async fn column_names(&mut self, name: &str) -> Result<Vec<String>> {
        let sql = format!("PRAGMA table_info({})", quote_identifier(name));
        let rows = sqlx::query(&sql)
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| {
                SheetporterError::Database(format!("Failed to describe '{name}': {e}"))
            })?;

        if rows.is_empty() {
            return Err(SheetporterError::Database(format!(
                "No such table or view: '{name}'"
            )));
        }

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("name").map_err(|e| {
                    SheetporterError::Database(format!("Failed to read column name: {e}"))
                })
            })
            .collect()
    }
}

/// Quote an identifier for use in a SQL statement.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Stringify one cell, trying the SQLite storage classes in turn.
/// NULL always renders as the empty string.
fn cell_to_string(row: &SqliteRow, idx: usize) -> String {
    if let Ok(value) = row.try_get::<Option<String>, _>(idx) {
        return value.unwrap_or_default();
    }
    if let Ok(value) = row.try_get::<Option<i64>, _>(idx) {
        return value.map(|v| v.to_string()).unwrap_or_default();
    }
    if let Ok(value) = row.try_get::<Option<f64>, _>(idx) {
        return value.map(|v| v.to_string()).unwrap_or_default();
    }
    if let Ok(value) = row.try_get::<Option<Vec<u8>>, _>(idx) {
        return value
            .map(|v| String::from_utf8_lossy(&v).into_owned())
            .unwrap_or_default();
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::ConnectOptions;
    use tempfile::TempDir;

    async fn seed_database(path: &Path) {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let mut conn = options.connect().await.unwrap();

        sqlx::query(
            "CREATE TABLE orders (id INTEGER PRIMARY KEY, customer TEXT, total REAL, note TEXT)",
        )
        .execute(&mut conn)
        .await
        .unwrap();
        sqlx::query("INSERT INTO orders (id, customer, total, note) VALUES (1, 'alice', 9.5, NULL)")
            .execute(&mut conn)
            .await
            .unwrap();
        sqlx::query("INSERT INTO orders (id, customer, total, note) VALUES (2, 'bob', 3.0, 'rush')")
            .execute(&mut conn)
            .await
            .unwrap();

        sqlx::query("CREATE VIEW dash_orders AS SELECT id, customer FROM orders")
            .execute(&mut conn)
            .await
            .unwrap();
        sqlx::query("CREATE VIEW dash_totals AS SELECT customer, total FROM orders")
            .execute(&mut conn)
            .await
            .unwrap();
        sqlx::query("CREATE VIEW other_view AS SELECT id FROM orders")
            .execute(&mut conn)
            .await
            .unwrap();
        sqlx::query("CREATE VIEW dash_empty AS SELECT id, note FROM orders WHERE 0")
            .execute(&mut conn)
            .await
            .unwrap();

        conn.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let result = SqliteSource::open("/nonexistent/path/db.sqlite").await;
        assert!(matches!(result, Err(SheetporterError::LocalFile(_))));
    }

    #[tokio::test]
    async fn test_table_and_view_listing() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("test.db");
        seed_database(&db_path).await;

        let mut source = SqliteSource::open(&db_path).await.unwrap();
        assert_eq!(source.table_names().await.unwrap(), vec!["orders"]);

        let views = source.views_with_prefix("dash_").await.unwrap();
        assert_eq!(views, vec!["dash_empty", "dash_orders", "dash_totals"]);
    }

    #[tokio::test]
    async fn test_fetch_table_sanitizes_values() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("test.db");
        seed_database(&db_path).await;

        let mut source = SqliteSource::open(&db_path).await.unwrap();
        let table = source.fetch_table("orders").await.unwrap();

        assert_eq!(table.columns, vec!["id", "customer", "total", "note"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0][0], "1");
        assert_eq!(table.rows[0][1], "alice");
        assert_eq!(table.rows[0][2], "9.5");
        // NULL renders as empty string
        assert_eq!(table.rows[0][3], "");
        assert_eq!(table.rows[1][3], "rush");
    }

    #[tokio::test]
    async fn test_fetch_empty_view_keeps_header() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("test.db");
        seed_database(&db_path).await;

        let mut source = SqliteSource::open(&db_path).await.unwrap();
        let table = source.fetch_table("dash_empty").await.unwrap();

        assert_eq!(table.columns, vec!["id", "note"]);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.to_values().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_unknown_source_fails() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("test.db");
        seed_database(&db_path).await;

        let mut source = SqliteSource::open(&db_path).await.unwrap();
        assert!(source.fetch_table("missing_view").await.is_err());
    }

    #[test]
    fn test_quote_identifier_escapes_quotes() {
        assert_eq!(quote_identifier("plain"), "\"plain\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }
}
