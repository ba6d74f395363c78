//! Credit Risk Prediction Server
//!
//! Serves a form that scores the default risk of a credit card client with
//! a pre-trained model bundle.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   CREDIT RISK SERVER                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐ │
//! │  │  Form     │  │  JSON     │  │  Health                 │ │
//! │  │  Page     │  │  API      │  │                         │ │
//! │  └─────┬─────┘  └─────┬─────┘  └────────────┬────────────┘ │
//! │        └──────────────┼──────────────────────┘              │
//! │                       ▼                                     │
//! │             ┌───────────────────┐                           │
//! │             │ InferenceEngine   │  (credit_model.json)      │
//! │             └───────────────────┘                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod views;


use axum::{
    routing::{get, post},
    Router,
};
use credit_core::InferenceEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "credit_server=debug,credit_core=info,tower_http=debug".into()),
    );
    if config.log_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Credit Risk Server starting ({})...", config.environment);

    // Load model bundle; a failure leaves the server up with predictions disabled
    let engine = InferenceEngine::load(&config.model_path)
        .with_categorical_fields(config.categorical_fields.clone());
    if !engine.is_loaded() {
        tracing::warn!("Predictions are disabled until {} is available", config.model_path);
    }

    // Build application state
    let state = AppState {
        engine: Arc::new(engine),
        views: Arc::new(views::Views::new()?),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<InferenceEngine>,
    pub views: Arc<views::Views>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::page::index))
        .route("/predict", post(handlers::page::predict))
        .route("/health", get(handlers::health::check))
        .route("/api/v1/predict", post(handlers::api::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
