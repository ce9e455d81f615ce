//! Model metadata handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use crate::features::{FEATURE_COUNT, FEATURE_NAMES};
use crate::model::ArtifactInfo;
use crate::stats::StatsSnapshot;

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub feature_count: usize,
    pub feature_names: Vec<&'static str>,
    pub scaler: ArtifactInfo,
    pub classifier: ArtifactInfo,
    pub stats: StatsSnapshot,
}

/// Loaded artifacts and service counters
pub async fn info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    Json(ModelInfoResponse {
        feature_count: FEATURE_COUNT,
        feature_names: FEATURE_NAMES.to_vec(),
        scaler: state.artifacts.scaler.clone(),
        classifier: state.artifacts.classifier.clone(),
        stats: state.stats.snapshot(),
    })
}
