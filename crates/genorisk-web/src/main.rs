//! Genorisk web server.
//!
//! Run with: cargo run -p genorisk-web

use genorisk_common::config::ServiceConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_filter.clone()))
        .init();

    info!("starting genorisk web server");

    let state = genorisk_web::state::AppState::from_config(&config).await?;
    let app = genorisk_web::router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
