use axum::{
    routing::{get, post},
    Router, Server,
};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::interface::api::handler::{
    age_handler, clean_handler, client_handler, health_check_handler, random_handler,
    validate_handler,
};

/// ポート番号を上書きする環境変数
pub const PORT_ENV: &str = "RUSTYKIT_PORT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080, // デフォルトポート番号
        }
    }
}

impl ServerConfig {
    /// 環境変数から読み込む。未設定や不正な値のときは既定値
    pub fn from_env() -> Self {
        Self::from_port_var(std::env::var(PORT_ENV).ok().as_deref())
    }

    fn from_port_var(value: Option<&str>) -> Self {
        match value.map(str::parse::<u16>) {
            Some(Ok(port)) => Self { port },
            Some(Err(e)) => {
                warn!(error = %e, "{} を解釈できません。既定のポートを使います", PORT_ENV);
                Self::default()
            }
            None => Self::default(),
        }
    }
}

/// ルーターの設定
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_check_handler))
        .route("/api/client", get(client_handler))
        .route("/api/validate", post(validate_handler))
        .route("/api/clean", post(clean_handler))
        .route("/api/age", get(age_handler))
        .route("/api/random", get(random_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = router();

    // サーバーのアドレス設定
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("サーバーを{}で起動中...", addr);

    // 接続元アドレスを RequestContext に渡す
    Server::bind(&addr)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
}
