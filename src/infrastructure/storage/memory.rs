use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;
use tracing::debug;

use crate::domain::entity::{Column, Row, SqlDriver, Table, TableError, Value};
use crate::domain::repository::{RepositoryError, SqlConnection};
use crate::infrastructure::parser::{ShowColumnsStatement, SqlParser};

/// ストレージエラー
#[derive(Error, Debug, PartialEq)]
pub enum StorageError {
    #[error("Table {0} not found")]
    TableNotFound(String),

    #[error("Table {0} already exists")]
    TableAlreadyExists(String),

    #[error("Invalid schema: {0}")]
    InvalidSchema(#[from] TableError),

    #[error("Internal storage error: {0}")]
    Internal(String),
}

impl From<StorageError> for RepositoryError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::TableNotFound(name) => RepositoryError::TableNotFound(name),
            other => RepositoryError::QueryFailed(other.to_string()),
        }
    }
}

impl From<StorageError> for crate::Error {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Internal(msg) => crate::Error::Internal(msg),
            other => crate::Error::Schema(other.to_string()),
        }
    }
}

/// スキーマだけを保持するインメモリの接続
///
/// `SHOW COLUMNS FROM t [LIKE 'pattern']` に MySQL と同じ形の行で応答する。
pub struct MemoryConnection {
    driver: SqlDriver,
    tables: RwLock<HashMap<String, Table>>,
    parser: SqlParser,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::with_driver(SqlDriver::MySql)
    }

    pub fn with_driver(driver: SqlDriver) -> Self {
        Self {
            driver,
            tables: RwLock::new(HashMap::new()),
            parser: SqlParser::new(),
        }
    }

    /// テーブルを作成する
    pub fn create_table(&self, table: Table) -> Result<(), StorageError> {
        table.validate()?;

        let mut tables = self
            .tables
            .write()
            .map_err(|e| StorageError::Internal(e.to_string()))?;

        if tables.contains_key(&table.name) {
            return Err(StorageError::TableAlreadyExists(table.name));
        }

        debug!(table = %table.name, columns = table.columns.len(), "テーブルを作成しました");
        tables.insert(table.name.clone(), table);
        Ok(())
    }

    /// ビルダーパターンでテーブルを追加する
    pub fn with_table(self, table: Table) -> Result<Self, StorageError> {
        self.create_table(table)?;
        Ok(self)
    }

    /// SHOW COLUMNS の結果行を返す
    pub fn show_columns(&self, stmt: &ShowColumnsStatement) -> Result<Vec<Row>, StorageError> {
        let tables = self
            .tables
            .read()
            .map_err(|e| StorageError::Internal(e.to_string()))?;

        // `db.table` はテーブル名の部分だけで引く
        let name = stmt.table_name.rsplit('.').next().unwrap_or(&stmt.table_name);
        let table = tables
            .get(name)
            .ok_or_else(|| StorageError::TableNotFound(stmt.table_name.clone()))?;

        Ok(table
            .columns
            .iter()
            .filter(|c| stmt.pattern.as_deref().map_or(true, |p| like_matches(p, &c.name)))
            .map(describe_column)
            .collect())
    }
}

impl Default for MemoryConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlConnection for MemoryConnection {
    fn driver(&self) -> SqlDriver {
        self.driver
    }

    fn query_row(&self, sql: &str) -> Result<Option<Row>, RepositoryError> {
        let stmt = self
            .parser
            .parse_show_columns(sql)
            .map_err(|e| RepositoryError::UnsupportedStatement(e.to_string()))?;

        Ok(self.show_columns(&stmt)?.into_iter().next())
    }
}

// SHOW COLUMNS の1行 (Field, Type, Null, Key, Default, Extra)
fn describe_column(column: &Column) -> Row {
    Row::new()
        .with("Field", column.name.as_str())
        .with("Type", column.data_type.to_string())
        .with("Null", if column.is_not_null() { "NO" } else { "YES" })
        .with("Key", column.key_flag())
        .with("Default", column.default_value().map(Value::from))
        .with("Extra", if column.is_auto_increment() { "auto_increment" } else { "" })
}

/// SQL の LIKE 照合 (`%`, `_`, `\` エスケープ、大文字小文字を区別しない)
pub fn like_matches(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
    let text: Vec<char> = text.to_lowercase().chars().collect();
    like_at(&pattern, &text)
}

fn like_at(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('%', rest)) => (0..=text.len()).any(|i| like_at(rest, &text[i..])),
        Some(('_', rest)) => !text.is_empty() && like_at(rest, &text[1..]),
        Some(('\\', [escaped, rest @ ..])) => {
            text.first() == Some(escaped) && like_at(rest, &text[1..])
        }
        Some((c, rest)) => text.first() == Some(c) && like_at(rest, &text[1..]),
    }
}
