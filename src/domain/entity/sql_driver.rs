use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// 接続先データベースの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SqlDriver {
    #[strum(serialize = "mysql")]
    MySql,
    #[strum(serialize = "mariadb")]
    MariaDb,
    #[strum(to_string = "postgres", serialize = "postgresql")]
    Postgres,
    Sqlite,
}

impl SqlDriver {
    /// `SHOW COLUMNS` を理解するか
    pub fn supports_show_columns(&self) -> bool {
        matches!(self, SqlDriver::MySql | SqlDriver::MariaDb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_driver_names() {
        assert_eq!(SqlDriver::from_str("MySQL"), Ok(SqlDriver::MySql));
        assert_eq!(SqlDriver::from_str("postgresql"), Ok(SqlDriver::Postgres));
        assert_eq!(SqlDriver::MariaDb.to_string(), "mariadb");
        assert_eq!(SqlDriver::from_str("postgres"), Ok(SqlDriver::Postgres));
        assert_eq!(SqlDriver::Postgres.to_string(), "postgres");
        assert!(SqlDriver::from_str("oracle").is_err());
    }

    #[test]
    fn only_mysql_family_supports_show_columns() {
        assert!(SqlDriver::MySql.supports_show_columns());
        assert!(SqlDriver::MariaDb.supports_show_columns());
        assert!(!SqlDriver::Sqlite.supports_show_columns());
    }
}
