//! Feature schema handler

use axum::Json;
use serde::Serialize;

use crate::features::{layout::display_label, FeatureSpec, FEATURE_LAYOUT};

#[derive(Debug, Serialize)]
pub struct FeatureSchema {
    #[serde(flatten)]
    pub spec: FeatureSpec,
    pub display: String,
}

/// Input fields in model order, with typical ranges (advisory, not enforced)
pub async fn list() -> Json<Vec<FeatureSchema>> {
    Json(
        FEATURE_LAYOUT
            .iter()
            .map(|spec| FeatureSchema {
                spec: *spec,
                display: display_label(spec),
            })
            .collect(),
    )
}
