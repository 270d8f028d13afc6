use anyhow::Result;
use order_desk::config::AppConfig;
use order_desk::server::ServerBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // First argument wins over ORDER_DESK_CONFIG
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_yaml_file(&path)?,
        None => AppConfig::from_env()?,
    };

    tracing::info!(
        bind = %config.server.bind,
        backend = ?config.storage.backend,
        path = %config.storage.path.display(),
        "starting order-desk"
    );

    ServerBuilder::new().with_config(config).serve().await
}
