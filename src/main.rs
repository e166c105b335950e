use rustykit::interface::api::{start_server, ServerConfig};
use rustykit::VERSION;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("RustyKit version: {}", VERSION);

    start_server(ServerConfig::from_env()).await
}
