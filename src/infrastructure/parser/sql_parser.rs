use sqlparser::ast::{ShowStatementFilter, Statement};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::{Parser, ParserError};
use thiserror::Error;

/// MySQLの識別子の最大長
const MAX_IDENTIFIER_LEN: usize = 64;

/// SQL解析エラー
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("SQL syntax error: {0}")]
    SyntaxError(String),

    #[error("Unsupported SQL feature: {0}")]
    UnsupportedFeature(String),

    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

impl From<ParserError> for ParseError {
    fn from(err: ParserError) -> Self {
        ParseError::SyntaxError(err.to_string())
    }
}

impl From<ParseError> for crate::Error {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::InvalidIdentifier(_) => crate::Error::Argument(err.to_string()),
            _ => crate::Error::Parse(err.to_string()),
        }
    }
}

/// SHOW COLUMNS文からの解析結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowColumnsStatement {
    /// `db.table` の場合は `db.table` のまま
    pub table_name: String,
    /// LIKE のパターン
    pub pattern: Option<String>,
}

/// MySQL方言のSQLパーサー
pub struct SqlParser {
    dialect: MySqlDialect,
}

impl SqlParser {
    pub fn new() -> Self {
        Self {
            dialect: MySqlDialect {},
        }
    }

    /// `SHOW COLUMNS FROM `table` LIKE 'column'` を組み立てる
    ///
    /// 組み立てたSQLを再度解析し、1つの SHOW COLUMNS 文として同じテーブルを指すことを確認する。
    pub fn show_columns(&self, table: &str, column: &str) -> Result<String, ParseError> {
        let quoted_table = table
            .split('.')
            .map(|part| check_identifier(part).map(|p| format!("`{}`", p)))
            .collect::<Result<Vec<_>, _>>()?
            .join(".");
        check_identifier(column)?;

        let sql = format!("SHOW COLUMNS FROM {} LIKE '{}'", quoted_table, column);

        let parsed = self.parse_show_columns(&sql)?;
        if parsed.table_name != table || parsed.pattern.as_deref() != Some(column) {
            return Err(ParseError::InvalidIdentifier(table.to_string()));
        }

        Ok(sql)
    }

    /// SHOW COLUMNS 文を解析する
    pub fn parse_show_columns(&self, sql: &str) -> Result<ShowColumnsStatement, ParseError> {
        let mut statements = Parser::parse_sql(&self.dialect, sql)?;

        if statements.len() != 1 {
            return Err(ParseError::UnsupportedFeature(format!(
                "expected exactly one statement, got {}",
                statements.len()
            )));
        }

        match statements.remove(0) {
            Statement::ShowColumns {
                table_name, filter, ..
            } => {
                let table_name = table_name
                    .0
                    .iter()
                    .map(|ident| ident.value.as_str())
                    .collect::<Vec<_>>()
                    .join(".");

                let pattern = match filter {
                    None => None,
                    Some(ShowStatementFilter::Like(pattern)) => Some(pattern),
                    Some(other) => {
                        return Err(ParseError::UnsupportedFeature(format!(
                            "SHOW COLUMNS filter: {}",
                            other
                        )))
                    }
                };

                Ok(ShowColumnsStatement {
                    table_name,
                    pattern,
                })
            }
            other => Err(ParseError::UnsupportedFeature(other.to_string())),
        }
    }
}

impl Default for SqlParser {
    fn default() -> Self {
        Self::new()
    }
}

// 引用符の中でも解釈が変わる文字は受け付けない
fn check_identifier(ident: &str) -> Result<&str, ParseError> {
    let forbidden = |c: char| matches!(c, '`' | '\'' | '"' | '\\') || c.is_control();

    if ident.is_empty() || ident.chars().count() > MAX_IDENTIFIER_LEN || ident.contains(forbidden) {
        return Err(ParseError::InvalidIdentifier(ident.to_string()));
    }

    Ok(ident)
}
