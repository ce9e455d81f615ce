//! HTTP handlers

pub mod health;
pub mod features;
pub mod predict;
pub mod model;
pub mod form;

use axum::http::Uri;

use crate::AppError;

/// Unknown routes
pub async fn fallback(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
