use anyhow::Context;
use movieinfo_server::config::{LogFormat, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    match LogFormat::from_env() {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    let config = ServerConfig::from_env();

    let resolver = movieinfo_server::providers::build_resolver(&config);
    info!(
        providers = ?resolver.provider_names(),
        timeout = ?config.provider_timeout,
        "movie providers configured"
    );

    let app_state = movieinfo_server::state::AppState::new(resolver);
    let app = movieinfo_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
