use crate::domain::entity::column::Column;
use crate::domain::entity::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TableError {
    #[error("Column '{0}' already exists in table")]
    ColumnAlreadyExists(String),

    #[error("Table must have at least one column")]
    NoColumns,
}

/// テーブルのスキーマ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    // table name
    pub name: String,

    // table columns
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn add_column(&mut self, column: Column) -> Result<(), TableError> {
        // 同名のカラムが既に存在するかチェック
        if self.get_column(&column.name).is_some() {
            return Err(TableError::ColumnAlreadyExists(column.name));
        }

        self.columns.push(column);
        Ok(())
    }

    /// ビルダーパターンでカラムを追加する
    pub fn with_column(mut self, column: Column) -> Result<Self, TableError> {
        self.add_column(column)?;
        Ok(self)
    }

    /// 名前でカラムを検索する
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// テーブルが有効かチェックする
    pub fn validate(&self) -> Result<(), TableError> {
        if self.columns.is_empty() {
            return Err(TableError::NoColumns);
        }

        Ok(())
    }
}

/// 1行のデータを表現する
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// カラム名と値のマッピング
    pub values: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// 特定のカラムの値を取得する
    pub fn get(&self, column_name: &str) -> Option<&Value> {
        self.values.get(column_name)
    }

    /// 特定のカラムの値を設定する
    pub fn set(&mut self, column_name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(column_name.into(), value.into());
    }

    pub fn with(mut self, column_name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column_name, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::DataType;

    #[test]
    fn rejects_duplicate_columns() {
        let mut table = Table::new("users");
        table.add_column(Column::new("id", DataType::Int).primary_key()).unwrap();

        assert_eq!(
            table.add_column(Column::new("id", DataType::Text)),
            Err(TableError::ColumnAlreadyExists("id".into()))
        );
        assert_eq!(table.columns.len(), 1);
    }

    #[test]
    fn empty_table_is_invalid() {
        assert_eq!(Table::new("t").validate(), Err(TableError::NoColumns));
    }

    #[test]
    fn row_builder_sets_values() {
        let row = Row::new().with("Field", "sex").with("Default", None::<String>);
        assert_eq!(row.get("Field"), Some(&Value::Text("sex".into())));
        assert_eq!(row.get("Default"), Some(&Value::Null));
        assert_eq!(row.get("Type"), None);
    }
}
