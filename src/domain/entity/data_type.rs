use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// MySQLのカラム型
///
/// `Display` は `SHOW COLUMNS` の `Type` 列と同じ表記を返す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Int,
    Varchar(u32),
    Text,
    Enum(Vec<String>),
}

impl DataType {
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DataType::Enum(values.into_iter().map(Into::into).collect())
    }
}

// enum('a','b') の中身
fn quoted_list(values: &[String]) -> String {
    values.iter().map(|v| format!("'{}'", v.replace('\'', "''"))).join(",")
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Int => write!(f, "int(11)"),
            DataType::Varchar(len) => write!(f, "varchar({})", len),
            DataType::Text => write!(f, "text"),
            DataType::Enum(values) => write!(f, "enum({})", quoted_list(values)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    // 主キー制約
    PrimaryKey,
    // ユニーク制約
    Unique,
    // NOT NULL 制約
    NotNull,
    // デフォルト値
    Default(String),
    // AUTO_INCREMENT
    AutoIncrement,
}
