mod auth;
mod backend;
mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;
mod views;

#[cfg(test)]
mod test_utils;

use std::net::SocketAddr;

use backend::BackendClient;
use config::Config;
use routes::{create_router, AppState};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (from repo root)
    dotenvy::from_filename("../../.env").ok();
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gymdash_server=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;
    let port = config.server_port;

    let pool = db::create_pool(&config.sqlite_path)?;
    tracing::info!("Session store at {}", config.sqlite_path);

    let backend = BackendClient::new(&config)?;
    tracing::info!("Gym backend at {}", config.backend_url);

    let state = AppState {
        db: pool,
        config,
        backend,
    };

    let app = create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new()),
    );

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("gymdash-server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Peer addresses feed the sign-in rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
