use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// リクエストから取り出したクライアント情報
///
/// `HTTP_CLIENT_IP`, `REMOTE_ADDR`, `HTTP_X_FORWARDED_FOR`, `HTTP_USER_AGENT`
/// に相当する値を保持する。グローバルな状態は読まない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct RequestContext {
    /// `Client-IP` ヘッダー
    pub client_ip: Option<String>,

    /// ソケットのピアアドレス
    pub remote_addr: Option<String>,

    /// `X-Forwarded-For` ヘッダー
    pub forwarded_for: Option<String>,

    /// `User-Agent` ヘッダー
    pub user_agent: Option<String>,
}
