mod routes;

pub use routes::{ErrorResponse, PredictRequest, PredictResponse};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use log::{error, info};
use tower_http::cors::{Any, CorsLayer};

use crate::classifier::IntentPredictor;

/// Shared handle to the loaded artifacts, cloned into every request handler.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn IntentPredictor>,
}

impl AppState {
    pub fn new(predictor: Arc<dyn IntentPredictor>) -> Self {
        Self { predictor }
    }
}

/// Build the Axum application
pub fn build_app(state: AppState) -> Router {
    // Clients connect from arbitrary origins (mobile apps, local dev pages),
    // so every origin, method, and header is permitted.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/predict", post(routes::predict))
        .route("/health", get(routes::health))
        .layer(cors)
        .with_state(state)
}

/// Run the server until ctrl-c.
pub async fn run_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_app(state);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
