use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::dashboard::{self, HttpProxyFetcher, ProxyFetcher};
use crate::weather::AsosClient;
use crate::{VERSION, api};

/// Shared, read-only state for all handlers
pub struct AppState {
    pub config: Config,
    pub asos: AsosClient,
    pub fetcher: Arc<dyn ProxyFetcher>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("asos-dashboard/{VERSION}"))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        let asos = AsosClient::new(
            client.clone(),
            config.asos_base_url.clone(),
            config.weather_api_key.clone(),
        );
        let fetcher: Arc<dyn ProxyFetcher> =
            Arc::new(HttpProxyFetcher::new(client, config.proxy_url.clone()));

        Ok(Self {
            config,
            asos,
            fetcher,
        })
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router())
        .merge(dashboard::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let port = config.port;
    let state = Arc::new(AppState::new(config)?);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);
    tracing::debug!("Dashboard posts to {}", state.config.proxy_url);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")?;
    tracing::info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
