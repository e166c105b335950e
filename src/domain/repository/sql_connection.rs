use crate::domain::entity::{Row, SqlDriver};
use crate::Error;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepositoryError {
    #[error("Table {0} not found")]
    TableNotFound(String),

    #[error("Unsupported statement: {0}")]
    UnsupportedStatement(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::TableNotFound(name) => Error::Schema(format!("Table {} not found", name)),
            RepositoryError::UnsupportedStatement(sql) => Error::Parse(sql),
            RepositoryError::QueryFailed(msg) => Error::Execution(msg),
            RepositoryError::ConnectionError(msg) => Error::Execution(msg),
        }
    }
}

/// SQL接続 - クエリを実行して1行だけ取得する抽象インターフェース
///
/// 呼び出しは同期的。タイムアウトやリトライは実装側の責任。
#[cfg_attr(test, mockall::automock)]
pub trait SqlConnection: Send + Sync {
    /// 接続先のドライバ
    fn driver(&self) -> SqlDriver;

    /// クエリを実行し、最初の行を返す（結果が空なら `None`）
    fn query_row(&self, sql: &str) -> Result<Option<Row>, RepositoryError>;
}
