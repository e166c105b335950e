use axum::{
    extract::{Json, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::entity::{Age, AgeUnit, RequestContext, Value};
use crate::domain::service::date_time::calculate_age;
use crate::domain::service::random_string::{random_string, DEFAULT_LENGTH};
use crate::domain::service::request_info::{get_ip, get_useragent};
use crate::domain::service::string_validator::{
    is_english, is_password_strong, valid_date, valid_email, valid_timestamp, valid_url,
    valid_username, DEFAULT_DATE_FORMAT,
};
use crate::domain::service::text_cleaner::{clean_text, trim_extra_space};

/// `/api/random` で受け付ける最大長
pub const MAX_RANDOM_LENGTH: usize = 4096;

/// API エラー
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// エラーレスポンス
#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

/// クライアント情報
#[derive(Debug, Serialize, PartialEq)]
pub struct ClientResponse {
    pub ip: String,
    pub user_agent: Option<String>,
}

/// 検証の種類
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidationKind {
    Username,
    Password,
    English,
    Timestamp,
    Email,
    Url,
    Date,
}

/// 検証リクエスト
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub kind: ValidationKind,
    pub value: Value,
    pub format: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ValidateResponse {
    pub valid: bool,
}

#[derive(Debug, Deserialize)]
pub struct CleanRequest {
    pub text: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CleanResponse {
    pub trimmed: String,
    pub cleaned: String,
}

#[derive(Debug, Deserialize)]
pub struct AgeQuery {
    pub birthdate: String,
    pub unit: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AgeResponse {
    pub age: Age,
    pub unit: AgeUnit,
}

#[derive(Debug, Deserialize)]
pub struct RandomQuery {
    pub length: Option<usize>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct RandomResponse {
    pub value: String,
}

/// ヘルスチェックハンドラー
pub async fn health_check_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// クライアントのIPとユーザーエージェント
pub async fn client_handler(ctx: RequestContext) -> Json<ClientResponse> {
    Json(ClientResponse {
        ip: get_ip(&ctx).to_string(),
        user_agent: get_useragent(&ctx).map(str::to_string),
    })
}

/// 値の検証ハンドラー
pub async fn validate_handler(
    Json(payload): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let kind = payload.kind;

    // タイムスタンプ以外は文字列のみ
    let text = || {
        payload
            .value
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadRequest(format!("{:?} expects a string value", kind)))
    };

    let valid = match kind {
        ValidationKind::Username => valid_username(&text()?),
        ValidationKind::Password => is_password_strong(&text()?),
        ValidationKind::English => is_english(&text()?),
        ValidationKind::Timestamp => valid_timestamp(&payload.value),
        ValidationKind::Url => valid_url(&text()?),
        ValidationKind::Date => {
            let format = payload.format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
            valid_date(&text()?, format)
        }
        ValidationKind::Email => {
            // DNS の問い合わせはブロッキング
            let email = text()?;
            tokio::task::spawn_blocking(move || valid_email(&email))
                .await
                .map_err(|e| ApiError::Internal(e.to_string()))?
        }
    };

    debug!(?kind, valid, "検証しました");
    Ok(Json(ValidateResponse { valid }))
}

/// テキスト整形ハンドラー
pub async fn clean_handler(Json(payload): Json<CleanRequest>) -> Json<CleanResponse> {
    Json(CleanResponse {
        trimmed: trim_extra_space(&payload.text),
        cleaned: clean_text(&payload.text),
    })
}

/// 年齢計算ハンドラー
pub async fn age_handler(Query(query): Query<AgeQuery>) -> Result<Json<AgeResponse>, ApiError> {
    let unit = query
        .unit
        .as_deref()
        .map(AgeUnit::parse_lossy)
        .unwrap_or_default();

    let age = calculate_age(&query.birthdate, unit).ok_or_else(|| {
        ApiError::Unprocessable(format!("invalid birthdate: {}", query.birthdate))
    })?;

    Ok(Json(AgeResponse { age, unit }))
}

/// ランダム文字列ハンドラー
pub async fn random_handler(
    Query(query): Query<RandomQuery>,
) -> Result<Json<RandomResponse>, ApiError> {
    let length = query.length.unwrap_or(DEFAULT_LENGTH);
    if length > MAX_RANDOM_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "length must be at most {}",
            MAX_RANDOM_LENGTH
        )));
    }

    Ok(Json(RandomResponse {
        value: random_string(length),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(kind: ValidationKind, value: impl Into<Value>) -> ValidateRequest {
        ValidateRequest {
            kind,
            value: value.into(),
            format: None,
        }
    }

    #[tokio::test]
    async fn client_prefers_client_ip_header() {
        let ctx = RequestContext::builder()
            .client_ip("203.0.113.7")
            .remote_addr("127.0.0.1")
            .user_agent("curl/8.0")
            .build();

        let Json(resp) = client_handler(ctx).await;
        assert_eq!(
            resp,
            ClientResponse {
                ip: "203.0.113.7".into(),
                user_agent: Some("curl/8.0".into()),
            }
        );
    }

    #[tokio::test]
    async fn validates_each_kind() {
        let cases = [
            (validate(ValidationKind::Username, "john_doe1"), true),
            (validate(ValidationKind::Password, "Abcdef1!"), true),
            (validate(ValidationKind::English, "hello world"), true),
            (validate(ValidationKind::Timestamp, 1_700_000_000i64), true),
            (validate(ValidationKind::Url, "http://example.com"), true),
            (validate(ValidationKind::Date, "2024-02-30"), false),
        ];

        for (request, expected) in cases {
            let kind = request.kind;
            let Json(resp) = validate_handler(Json(request)).await.unwrap();
            assert_eq!(resp.valid, expected, "{:?}", kind);
        }
    }

    #[tokio::test]
    async fn date_uses_custom_format() {
        let request = ValidateRequest {
            kind: ValidationKind::Date,
            value: "31/12/2023".into(),
            format: Some("DD/MM/YYYY".into()),
        };
        let Json(resp) = validate_handler(Json(request)).await.unwrap();
        assert!(resp.valid);
    }

    #[tokio::test]
    async fn malformed_email_is_invalid_without_dns() {
        let Json(resp) = validate_handler(Json(validate(ValidationKind::Email, "not-an-email")))
            .await
            .unwrap();
        assert!(!resp.valid);
    }

    #[tokio::test]
    async fn non_string_value_is_a_bad_request() {
        let result = validate_handler(Json(validate(ValidationKind::Username, 42i64))).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn clean_returns_both_forms() {
        let Json(resp) = clean_handler(Json(CleanRequest {
            text: "<b>a</b>   b+c".into(),
        }))
        .await;

        assert_eq!(resp.trimmed, "<b>a</b> b+c");
        assert_eq!(resp.cleaned, "a b,c");
    }

    #[tokio::test]
    async fn age_rejects_garbage() {
        let result = age_handler(Query(AgeQuery {
            birthdate: "yesterday".into(),
            unit: None,
        }))
        .await;

        assert!(matches!(result, Err(ApiError::Unprocessable(_))));
    }

    #[tokio::test]
    async fn age_defaults_to_years() {
        let Json(resp) = age_handler(Query(AgeQuery {
            birthdate: "2000-01-01".into(),
            unit: Some("weeks".into()),
        }))
        .await
        .unwrap();

        assert_eq!(resp.unit, AgeUnit::Years);
        assert!(matches!(resp.age, Age::Years(y) if y >= 24));
    }

    #[tokio::test]
    async fn random_respects_length_and_cap() {
        let Json(resp) = random_handler(Query(RandomQuery { length: None })).await.unwrap();
        assert_eq!(resp.value.len(), DEFAULT_LENGTH);

        let result = random_handler(Query(RandomQuery {
            length: Some(MAX_RANDOM_LENGTH + 1),
        }))
        .await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn api_error_status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unprocessable("x".into()).into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Internal("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
