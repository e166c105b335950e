use std::convert::Infallible;
use std::net::SocketAddr;

use async_trait::async_trait;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::domain::entity::RequestContext;

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// ヘッダーと接続元アドレスから `RequestContext` を組み立てる
///
/// `ConnectInfo` がない場合 (テストやプロキシ越しのUnixソケットなど) は `remote_addr` が空になる。
#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let remote_addr = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Ok(RequestContext {
            client_ip: header(&parts.headers, "client-ip"),
            remote_addr,
            forwarded_for: header(&parts.headers, "x-forwarded-for"),
            user_agent: header(&parts.headers, "user-agent"),
        })
    }
}
