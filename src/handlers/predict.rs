//! Prediction handlers

use std::time::Instant;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, AppResult};
use crate::features::FeatureVector;
use crate::model::{Potability, PredictError, PredictionResult};

/// Either nine named fields or nine positional values
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PredictRequest {
    Named { features: FeatureVector },
    Positional { values: Vec<f64> },
}

impl PredictRequest {
    pub fn into_features(self) -> Result<FeatureVector, PredictError> {
        match self {
            PredictRequest::Named { features } => Ok(features),
            PredictRequest::Positional { values } => FeatureVector::from_values(&values),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Probabilities {
    pub not_potable: f64,
    pub potable: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub request_id: Uuid,
    pub label: Potability,
    pub potable: bool,
    pub confidence: f64,
    pub confidence_display: String,
    pub probabilities: Probabilities,
    pub message: String,
    /// Fields outside their typical range (advisory only)
    pub out_of_range: Vec<String>,
}

impl PredictResponse {
    pub fn new(request_id: Uuid, features: &FeatureVector, result: &PredictionResult) -> Self {
        Self {
            request_id,
            label: result.label,
            potable: result.label.is_potable(),
            confidence: result.confidence,
            confidence_display: result.confidence_display(),
            probabilities: Probabilities {
                not_potable: result.probability_of(Potability::NotPotable),
                potable: result.probability_of(Potability::Potable),
            },
            message: result.label.verdict().to_string(),
            out_of_range: features.out_of_range().into_iter().map(String::from).collect(),
        }
    }
}

/// Run the predictor and keep the service counters current
pub(crate) fn evaluate(
    state: &AppState,
    request_id: Uuid,
    features: &FeatureVector,
) -> Result<PredictionResult, PredictError> {
    let start = Instant::now();

    match state.predictor.predict(features) {
        Ok(result) => {
            let latency_us = start.elapsed().as_micros() as u64;
            state.stats.record_served(result.label.is_potable(), latency_us);
            tracing::debug!(
                %request_id,
                "Prediction: {:?} ({}) in {}us",
                result.label,
                result.confidence_display(),
                latency_us
            );
            Ok(result)
        }
        Err(e) => Err(reject(state, request_id, e)),
    }
}

pub(crate) fn reject(state: &AppState, request_id: Uuid, err: PredictError) -> PredictError {
    state.stats.record_rejected();
    tracing::warn!(%request_id, "Prediction rejected: {}", err);
    err
}

/// Predict potability for one sample
pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> AppResult<Json<PredictResponse>> {
    let request_id = Uuid::new_v4();

    let features = req
        .into_features()
        .map_err(|e| reject(&state, request_id, e))?;
    let result = evaluate(&state, request_id, &features)?;

    Ok(Json(PredictResponse::new(request_id, &features, &result)))
}
