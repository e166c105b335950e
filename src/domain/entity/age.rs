use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString};

/// 日付文字列から取り出した年月日
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct DateComponents {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateComponents {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

/// 年齢の単位
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, StrumDisplay, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    #[default]
    Years,
    Months,
    Days,
    Decimal,
}

impl AgeUnit {
    /// 未知の単位は `Years` として扱う
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

/// 計算された年齢
///
/// 月は30日、年は12か月として近似した値。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Age {
    Years(i64),
    Months(i64),
    Days(i64),
    Decimal(f64),
}

impl Age {
    pub fn unit(&self) -> AgeUnit {
        match self {
            Age::Years(_) => AgeUnit::Years,
            Age::Months(_) => AgeUnit::Months,
            Age::Days(_) => AgeUnit::Days,
            Age::Decimal(_) => AgeUnit::Decimal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_unit_falls_back_to_years() {
        assert_eq!(AgeUnit::parse_lossy("decimal"), AgeUnit::Decimal);
        assert_eq!(AgeUnit::parse_lossy("weeks"), AgeUnit::Years);
        assert_eq!(AgeUnit::parse_lossy("Days"), AgeUnit::Years);
        assert_eq!(AgeUnit::Months.to_string(), "months");
    }

    #[test]
    fn date_components_display_zero_padded() {
        assert_eq!(DateComponents::new(2024, 2, 9).to_string(), "2024-02-09");
    }

    #[test]
    fn age_serializes_as_bare_number() {
        assert_eq!(serde_json::to_string(&Age::Years(24)).unwrap(), "24");
        assert_eq!(serde_json::to_string(&Age::Decimal(24.5)).unwrap(), "24.5");
        assert_eq!(Age::Days(3).unit(), AgeUnit::Days);
    }
}
