//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::model::PredictError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Per-request input errors
    FeatureCountMismatch(String),
    NonFiniteInput(String),

    // Resource errors
    NotFound(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::FeatureCountMismatch(_) | AppError::NonFiniteInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::FeatureCountMismatch(msg) => msg.as_str(),
            AppError::NonFiniteInput(msg) => msg.as_str(),
            AppError::NotFound(msg) => msg.as_str(),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::FeatureCountMismatch { .. } => AppError::FeatureCountMismatch(err.to_string()),
            PredictError::NonFiniteInput { .. } => AppError::NonFiniteInput(err.to_string()),
        }
    }
}
