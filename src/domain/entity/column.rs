use crate::domain::entity::data_type::{Constraint, DataType};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// テーブルのカラムを表すエンティティ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
pub struct Column {
    /// カラム名
    #[builder(setter(into))]
    pub name: String,

    /// データ型
    pub data_type: DataType,

    /// 制約
    #[builder(default)]
    pub constraints: Vec<Constraint>,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            constraints: Vec::new(),
        }
    }

    // primary key constraint
    pub fn primary_key(mut self) -> Self {
        if !self.constraints.contains(&Constraint::PrimaryKey) {
            self.constraints.push(Constraint::PrimaryKey);
        }
        self
    }

    // NOT NULL constraint
    pub fn not_null(mut self) -> Self {
        if !self.constraints.contains(&Constraint::NotNull) {
            self.constraints.push(Constraint::NotNull);
        }
        self
    }

    // UNIQUE constraint
    pub fn unique(mut self) -> Self {
        if !self.constraints.contains(&Constraint::Unique) {
            self.constraints.push(Constraint::Unique);
        }
        self
    }

    pub fn auto_increment(mut self) -> Self {
        if !self.constraints.contains(&Constraint::AutoIncrement) {
            self.constraints.push(Constraint::AutoIncrement);
        }
        self
    }

    //DEFAULT constraint
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        // 既存のDEFAULT制約を削除
        self.constraints.retain(|c| !matches!(c, Constraint::Default(_)));

        self.constraints.push(Constraint::Default(value.into()));
        self
    }

    pub fn is_primary_key(&self) -> bool {
        self.constraints.contains(&Constraint::PrimaryKey)
    }

    /// 主キーは常に NOT NULL
    pub fn is_not_null(&self) -> bool {
        self.is_primary_key() || self.constraints.contains(&Constraint::NotNull)
    }

    pub fn is_unique(&self) -> bool {
        self.constraints.contains(&Constraint::Unique)
    }

    pub fn is_auto_increment(&self) -> bool {
        self.constraints.contains(&Constraint::AutoIncrement)
    }

    /// このカラムのDEFAULT値を取得する（存在する場合）
    pub fn default_value(&self) -> Option<&str> {
        self.constraints.iter().find_map(|c| {
            if let Constraint::Default(value) = c {
                Some(value.as_str())
            } else {
                None
            }
        })
    }

    /// `SHOW COLUMNS` の `Key` 列
    pub fn key_flag(&self) -> &'static str {
        if self.is_primary_key() {
            "PRI"
        } else if self.is_unique() {
            "UNI"
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_flag_prefers_primary_key() {
        let id = Column::new("id", DataType::Int).primary_key().unique();
        assert_eq!(id.key_flag(), "PRI");
        assert!(id.is_not_null());

        let email = Column::new("email", DataType::Varchar(255)).unique();
        assert_eq!(email.key_flag(), "UNI");
    }

    #[test]
    fn with_default_replaces_previous_default() {
        let col = Column::builder()
            .name("sex")
            .data_type(DataType::enumeration(["male", "female"]))
            .build()
            .with_default("male")
            .with_default("female");

        assert_eq!(col.default_value(), Some("female"));
        assert_eq!(col.constraints.len(), 1);
    }
}
