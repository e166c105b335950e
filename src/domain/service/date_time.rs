use chrono::{Datelike, Local, NaiveDate};

use crate::domain::entity::{Age, AgeUnit};
use crate::domain::service::string_validator::{parse_date, DEFAULT_DATE_FORMAT};

const DAYS_PER_MONTH: i64 = 30;
const MONTHS_PER_YEAR: i64 = 12;

/// 生年月日 (`YYYY-MM-DD`) から今日時点の年齢を計算する
///
/// 日付として不正なら `None`。
pub fn calculate_age(birthdate: &str, unit: AgeUnit) -> Option<Age> {
    calculate_age_on(birthdate, unit, Local::now().date_naive())
}

/// 基準日を指定して年齢を計算する
///
/// 1か月を30日、1年を12か月とみなす簡易計算。暦の上の正確な日数ではない。
pub fn calculate_age_on(birthdate: &str, unit: AgeUnit, today: NaiveDate) -> Option<Age> {
    let born = parse_date(birthdate, DEFAULT_DATE_FORMAT)?;

    let mut year_diff = i64::from(today.year()) - i64::from(born.year);
    let mut month_diff = i64::from(today.month()) - i64::from(born.month);
    let mut day_diff = i64::from(today.day()) - i64::from(born.day);

    if month_diff < 0 {
        year_diff -= 1;
        month_diff += MONTHS_PER_YEAR;
    }

    if day_diff < 0 {
        month_diff -= 1;
        day_diff += DAYS_PER_MONTH;
    }

    let age_in_months = year_diff * MONTHS_PER_YEAR + month_diff;
    let age_in_days =
        year_diff * MONTHS_PER_YEAR * DAYS_PER_MONTH + month_diff * DAYS_PER_MONTH + day_diff;

    let age = match unit {
        AgeUnit::Years => Age::Years(year_diff),
        AgeUnit::Months => Age::Months(age_in_months),
        AgeUnit::Days => Age::Days(age_in_days),
        AgeUnit::Decimal => {
            let years = age_in_days as f64 / DAYS_PER_MONTH as f64 / MONTHS_PER_YEAR as f64;
            Age::Decimal((years * 10.0).round() / 10.0)
        }
    };

    Some(age)
}
