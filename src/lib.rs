//! Water Potability Prediction Service
//!
//! Serves a pre-fitted scaler + binary classifier over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    POTABILITY SERVER                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌──────────────┐   ┌────────────────────┐  │
//! │  │ HTML form  │   │  JSON API    │   │  Schema / Model    │  │
//! │  │  (Axum)    │   │  (Axum)      │   │  metadata          │  │
//! │  └─────┬──────┘   └──────┬───────┘   └────────────────────┘  │
//! │        └─────────┬───────┘                                   │
//! │                  ▼                                           │
//! │      ┌───────────────────────┐      ┌──────────────────┐     │
//! │      │ Predictor             │ ◄─── │ Artifact Loader  │     │
//! │      │ scale → classify      │      │ (startup only)   │     │
//! │      └───────────────────────┘      └──────────────────┘     │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod features;
pub mod handlers;
pub mod model;
pub mod stats;


use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};

use crate::model::{ArtifactInfo, LoadedArtifacts, Predictor};
use crate::stats::PredictionStats;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    pub artifacts: Arc<ArtifactSummary>,
    pub stats: Arc<PredictionStats>,
    pub config: config::Config,
}

/// Metadata of the artifacts the predictor was built from
#[derive(Debug, Clone)]
pub struct ArtifactSummary {
    pub scaler: ArtifactInfo,
    pub classifier: ArtifactInfo,
}

impl AppState {
    pub fn new(config: config::Config, artifacts: LoadedArtifacts) -> Self {
        let summary = ArtifactSummary {
            scaler: artifacts.scaler_info.clone(),
            classifier: artifacts.classifier_info.clone(),
        };

        Self {
            predictor: Arc::new(Predictor::from(artifacts)),
            artifacts: Arc::new(summary),
            stats: Arc::new(PredictionStats::new()),
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        // Interactive form
        .route("/", get(handlers::form::index).post(handlers::form::submit))
        // JSON API
        .route("/api/v1/features", get(handlers::features::list))
        .route("/api/v1/predict", post(handlers::predict::predict))
        .route("/api/v1/model", get(handlers::model::info))
        .fallback(handlers::fallback)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
