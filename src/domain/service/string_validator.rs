//! 文字列の書式チェック
//!
//! 不正な入力は「想定内の結果」なので、どの関数もエラーではなく `false` を返す。

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::domain::entity::{DateComponents, Value};
use crate::domain::repository::DnsResolver;
use crate::infrastructure::dns::SystemResolver;

/// `valid_date` の既定フォーマット
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

static USERNAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+[a-zA-Z0-9_]+[a-zA-Z0-9]$").unwrap());

static ENGLISH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+[ \t\n\x0B\x0C\r]?[a-zA-Z]+$").unwrap());

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,6})([/A-Za-z0-9_ .-]*)*/?$").unwrap()
});

static EMAIL_DOMAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9.-]+$").unwrap());

static EMAIL_LOCAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\\.|[A-Za-z0-9!#%&`_=/$'*+?^{}|~.-])+$").unwrap());

static EMAIL_LOCAL_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^"(?:\\"|[^"])+"$"#).unwrap());

// valid_timestamp の範囲 (下限は !MAX のまま。2の補数では i64::MIN と同じ値)
const TIMESTAMP_UPPER: i64 = i64::MAX;
const TIMESTAMP_LOWER: i64 = !i64::MAX;

/// ユーザー名として有効か
///
/// - 英字で始まる
/// - 英数字とアンダースコアのみ
/// - アンダースコアで終わらない
/// - 3文字以上
pub fn valid_username(username: &str) -> bool {
    USERNAME.is_match(username)
}

/// パスワードが十分に強いか
///
/// 8バイト以上で、数字か記号、英大文字、英小文字をそれぞれ1つ以上含むこと。
/// 改行を含むもの、`.` で始まるものは弱いとみなす。ただし末尾の改行1つは許し、
/// その改行は記号として数える。
pub fn is_password_strong(password: &str) -> bool {
    let bytes = password.as_bytes();
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);

    body.len() >= 8
        && !body.contains(&b'\n')
        && bytes.first() != Some(&b'.')
        && bytes
            .iter()
            .any(|b| b.is_ascii_digit() || !(b.is_ascii_alphanumeric() || *b == b'_'))
        && bytes.iter().any(u8::is_ascii_uppercase)
        && bytes.iter().any(u8::is_ascii_lowercase)
}

/// 英字だけの1語または2語か（末尾の空白は不可）
pub fn is_english(text: &str) -> bool {
    ENGLISH.is_match(text)
}

/// タイムスタンプとして有効か
///
/// 整数と浮動小数点数はそのまま自分自身と比較される（NaN は一致しない）。
/// 文字列は `i64` の正規の10進表記のときだけ有効。
pub fn valid_timestamp(timestamp: &Value) -> bool {
    let within_bounds = |i: i64| (TIMESTAMP_LOWER..=TIMESTAMP_UPPER).contains(&i);

    match timestamp {
        Value::Integer(i) => within_bounds(*i),
        Value::Float(f) => !f.is_nan() && within_bounds(*f as i64),
        Value::Text(s) => s
            .parse::<i64>()
            .map_or(false, |i| i.to_string() == *s && within_bounds(i)),
        Value::Boolean(_) | Value::Null => false,
    }
}

/// 先頭の `http://` または `https://` を取り除く
pub fn remove_http_protocol(url: &str) -> String {
    for prefix in ["http://", "https://"] {
        if url.starts_with(prefix) {
            return url.replace(prefix, "");
        }
    }

    url.to_string()
}

/// メールアドレスとして有効か
///
/// 書式チェックのあと、ドメインに MX か A レコードがあるかをシステムのリゾルバで確認する。
/// ネットワークに依存するので結果は環境によって変わる。
pub fn valid_email(email: &str) -> bool {
    if !valid_email_format(email) {
        return false;
    }

    match SystemResolver::new() {
        Ok(resolver) => valid_email_with(email, &resolver),
        Err(e) => {
            warn!(error = %e, "DNSリゾルバを初期化できません");
            false
        }
    }
}

/// 任意のリゾルバでメールアドレスを検証する
pub fn valid_email_with<R: DnsResolver + ?Sized>(email: &str, resolver: &R) -> bool {
    match email_domain(email) {
        Some(domain) => resolver.has_mx_record(domain) || resolver.has_a_record(domain),
        None => false,
    }
}

/// DNSを引かずに書式だけを確認する
pub fn valid_email_format(email: &str) -> bool {
    email_domain(email).is_some()
}

// 書式が正しければドメイン部分を返す
fn email_domain(email: &str) -> Option<&str> {
    let at = email.rfind('@')?;
    let (local, domain) = (&email[..at], &email[at + 1..]);

    if local.is_empty() || local.len() > 64 {
        return None;
    }
    if domain.is_empty() || domain.len() > 255 {
        return None;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return None;
    }
    if !EMAIL_DOMAIN.is_match(domain) || domain.contains("..") {
        return None;
    }

    // エスケープされたバックスラッシュは無視する
    let local = local.replace("\\\\", "");
    if !EMAIL_LOCAL.is_match(&local) && !EMAIL_LOCAL_QUOTED.is_match(&local) {
        return None;
    }

    Some(domain)
}

/// URLとして有効か（スキーマは省略可、ホストは小文字のみ）
pub fn valid_url(url: &str) -> bool {
    URL.is_match(url)
}

/// `format` (`YYYY-MM-DD`, `DD/MM/YYYY` など) に従った実在する日付か
pub fn valid_date(date: &str, format: &str) -> bool {
    parse_date(date, format).is_some()
}

/// `format` に従って日付を解析し、年月日を返す
///
/// トークンは `YYYY`, `YY`, `MM`, `M`, `DD`, `D`。区切り文字はフォーマット中の
/// 最初のトークン以外の文字。`YY` は `20YY` として扱う。
pub fn parse_date(date: &str, format: &str) -> Option<DateComponents> {
    if !(8..=10).contains(&date.len()) {
        return None;
    }

    let separator = format.chars().find(|c| !matches!(c, 'M' | 'D' | 'Y'))?;
    let pattern = date_pattern(format, separator);

    if pattern == date {
        return None;
    }
    // 先頭は固定しない
    let re = Regex::new(&format!("{}$", pattern)).ok()?;
    if !re.is_match(date) {
        return None;
    }

    let keys: Vec<&str> = format.split(separator).collect();
    let parts: Vec<&str> = date.split(separator).collect();
    if keys.len() != parts.len() {
        return None;
    }

    let (mut year, mut month, mut day) = (String::new(), "", "");
    for (key, part) in keys.into_iter().zip(parts) {
        match key {
            "YY" => year = format!("20{}", part),
            "YYYY" => year = part.to_string(),
            _ => {}
        }
        if key.starts_with('M') {
            month = part;
        }
        if key.starts_with('D') {
            day = part;
        }
    }

    check_date(&year, month, day)
}

fn date_pattern(format: &str, separator: char) -> String {
    format
        .replace(separator, &regex::escape(&separator.to_string()))
        .replace("MM", "(0[1-9]|1[0-2])")
        .replace('M', "(0?[1-9]|1[0-2])")
        .replace("DD", "(0[1-9]|[1-2][0-9]|3[0-1])")
        .replace('D', "(0?[1-9]|[1-2][0-9]|3[0-1])")
        .replace("YYYY", r"\d{4}")
        .replace("YY", r"\d{2}")
}

// 暦の上で実在するか (年は 1..=32767)
fn check_date(year: &str, month: &str, day: &str) -> Option<DateComponents> {
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;

    if !(1..=32767).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)?;

    Some(DateComponents::new(year, month, day))
}
