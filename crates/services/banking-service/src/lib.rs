//! Banking Service Library
//!
//! User registration and account ownership/membership rules, exposed over
//! HTTP. Storage is in-memory; the services only see the repository traits.

pub mod api;
pub mod config;
pub mod repository;
pub mod service;

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::BankingServiceConfig;
use crate::service::Services;

/// Build the HTTP application over fresh in-memory repositories.
pub fn build_app(config: BankingServiceConfig) -> axum::Router {
    let state = AppState::new(Services::in_memory(), config);
    create_router(state).layer(TraceLayer::new_for_http())
}

/// Run the HTTP server on `host:port`, other settings taken from the
/// environment.
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = BankingServiceConfig::from_env();
    config.service.host = host.to_string();
    config.service.port = port;
    run_server_with_config(config).await
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    config: BankingServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("{}:{}", config.service.host, config.service.port).parse()?;
    let app = build_app(config);

    info!("Banking service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
