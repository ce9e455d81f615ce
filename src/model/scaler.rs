//! Feature scaler - fitted per-feature center/scale
//!
//! `scaled[i] = (raw[i] - center[i]) / scale[i]`

use serde::{Deserialize, Serialize};

use super::error::ShapeError;
use crate::features::{FEATURE_COUNT, FEATURE_NAMES};

/// Standardization parameters from training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    /// Column names the scaler was fit on (optional, checked when present)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    #[serde(alias = "mean")]
    pub center: Vec<f64>,
    pub scale: Vec<f64>,
}

impl ScalerParams {
    pub fn new(center: Vec<f64>, scale: Vec<f64>) -> Result<Self, ShapeError> {
        let params = Self {
            feature_names: None,
            center,
            scale,
        };
        params.validate()?;
        Ok(params)
    }

    /// Identity transform (center 0, scale 1)
    #[cfg(test)]
    pub fn identity() -> Self {
        Self {
            feature_names: None,
            center: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        }
    }

    /// Check shape against the feature layout
    pub fn validate(&self) -> Result<(), ShapeError> {
        if self.center.len() != FEATURE_COUNT {
            return Err(ShapeError(format!(
                "center has {} entries, expected {}",
                self.center.len(),
                FEATURE_COUNT
            )));
        }
        if self.scale.len() != FEATURE_COUNT {
            return Err(ShapeError(format!(
                "scale has {} entries, expected {}",
                self.scale.len(),
                FEATURE_COUNT
            )));
        }

        for (i, (c, s)) in self.center.iter().zip(self.scale.iter()).enumerate() {
            if !c.is_finite() || !s.is_finite() {
                return Err(ShapeError(format!("non-finite parameter for {}", FEATURE_NAMES[i])));
            }
            if *s == 0.0 {
                return Err(ShapeError(format!("zero scale for {}", FEATURE_NAMES[i])));
            }
        }

        if let Some(names) = &self.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
                return Err(ShapeError(format!(
                    "feature order mismatch: artifact has {:?}, expected {:?}",
                    names, FEATURE_NAMES
                )));
            }
        }

        Ok(())
    }

    /// Apply the affine transform
    pub fn transform(&self, raw: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut scaled = [0.0f64; FEATURE_COUNT];
        for (i, slot) in scaled.iter_mut().enumerate() {
            *slot = (raw[i] - self.center[i]) / self.scale[i];
        }
        scaled
    }
}
