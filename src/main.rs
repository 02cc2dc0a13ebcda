use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use scaffold::router::init_router;
use scaffold::scaffold_config::AppConfig;
use scaffold::state::init_app_state;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env();
    let _log_guards = scaffold::logging::init_tracing(&config.log)?;

    let port = config.port;
    let environment = config.environment;
    let state = init_app_state(config);
    let app = init_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%environment, "Server running on http://localhost:{}", port);
    info!("Health check available at http://localhost:{}/health", port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
