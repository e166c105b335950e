use thiserror::Error;
use tracing::debug;

use crate::domain::entity::SqlDriver;
use crate::domain::repository::{RepositoryError, SqlConnection};
use crate::infrastructure::parser::{ParseError, SqlParser};

/// エラーの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 呼び出し側の引数の誤り
    Argument,
    /// カラムの型が想定と違う
    State,
    /// 接続・クエリの失敗
    Connection,
}

#[derive(Error, Debug, PartialEq)]
pub enum IntrospectionError {
    #[error("The connection you provided is not supported: {0}")]
    UnsupportedConnection(SqlDriver),

    #[error(transparent)]
    InvalidQuery(#[from] ParseError),

    #[error("Column '{column}' does not exist in '{table}' table.")]
    ColumnNotFound { table: String, column: String },

    #[error("Column '{0}' is not of type enum")]
    NotEnum(String),

    #[error(transparent)]
    Query(#[from] RepositoryError),
}

impl IntrospectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IntrospectionError::UnsupportedConnection(_)
            | IntrospectionError::InvalidQuery(_)
            | IntrospectionError::ColumnNotFound { .. } => ErrorKind::Argument,
            IntrospectionError::NotEnum(_) => ErrorKind::State,
            IntrospectionError::Query(_) => ErrorKind::Connection,
        }
    }
}

impl From<IntrospectionError> for crate::Error {
    fn from(err: IntrospectionError) -> Self {
        match err.kind() {
            ErrorKind::Argument => crate::Error::Argument(err.to_string()),
            ErrorKind::State => crate::Error::State(err.to_string()),
            ErrorKind::Connection => crate::Error::Execution(err.to_string()),
        }
    }
}

/// `enum('male','female')` 型のカラムから値の一覧を取り出す
///
/// `SHOW COLUMNS` を発行し、結果の `Type` 列を解析する。値は定義順。
pub fn get_mysql_enum_values<C>(
    connection: &C,
    table: &str,
    column: &str,
) -> Result<Vec<String>, IntrospectionError>
where
    C: SqlConnection + ?Sized,
{
    let driver = connection.driver();
    if !driver.supports_show_columns() {
        return Err(IntrospectionError::UnsupportedConnection(driver));
    }

    let sql = SqlParser::new().show_columns(table, column)?;
    debug!(%sql, %driver, "カラム定義を取得します");

    let row = connection.query_row(&sql)?;
    let column_type = row
        .as_ref()
        .and_then(|row| row.get("Type"))
        .filter(|value| value.is_truthy())
        .ok_or_else(|| IntrospectionError::ColumnNotFound {
            table: table.to_string(),
            column: column.to_string(),
        })?;

    match column_type.as_text() {
        Some(literal) if literal.contains("enum(") => Ok(parse_enum_literal(literal)),
        _ => Err(IntrospectionError::NotEnum(column.to_string())),
    }
}

/// `enum('a','b')` の外側を外して `','` で分割する
///
/// 値の中の `''` エスケープはそのまま残る。
pub fn parse_enum_literal(literal: &str) -> Vec<String> {
    literal
        .replace("enum('", "")
        .replace("')", "")
        .split("','")
        .map(str::to_string)
        .collect()
}
