//! Feature Vector - one sample of the nine water-quality measurements
//!
//! Named on the wire (`ph`, `Hardness`, ...), positional everywhere else.
//! Ordering comes from `layout.rs`.

use serde::{Deserialize, Serialize};

use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_NAMES};
use crate::model::PredictError;

/// One water sample as supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub ph: f64,
    #[serde(rename = "Hardness")]
    pub hardness: f64,
    #[serde(rename = "Solids")]
    pub solids: f64,
    #[serde(rename = "Chloramines")]
    pub chloramines: f64,
    #[serde(rename = "Sulfate")]
    pub sulfate: f64,
    #[serde(rename = "Conductivity")]
    pub conductivity: f64,
    #[serde(rename = "Organic_carbon")]
    pub organic_carbon: f64,
    #[serde(rename = "Trihalomethanes")]
    pub trihalomethanes: f64,
    #[serde(rename = "Turbidity")]
    pub turbidity: f64,
}

impl FeatureVector {
    /// Build from positional values.
    ///
    /// Fails with `FeatureCountMismatch` unless exactly nine values are given
    /// and with `NonFiniteInput` if any of them is NaN or infinite.
    pub fn from_values(values: &[f64]) -> Result<Self, PredictError> {
        let array: [f64; FEATURE_COUNT] = values
            .try_into()
            .map_err(|_| PredictError::FeatureCountMismatch {
                expected: FEATURE_COUNT,
                actual: values.len(),
            })?;

        let vector = Self::from_array(array);
        vector.validate()?;
        Ok(vector)
    }

    /// Build from an ordered array without validation
    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            ph: values[0],
            hardness: values[1],
            solids: values[2],
            chloramines: values[3],
            sulfate: values[4],
            conductivity: values[5],
            organic_carbon: values[6],
            trihalomethanes: values[7],
            turbidity: values[8],
        }
    }

    /// Values in layout order
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.ph,
            self.hardness,
            self.solids,
            self.chloramines,
            self.sulfate,
            self.conductivity,
            self.organic_carbon,
            self.trihalomethanes,
            self.turbidity,
        ]
    }

    /// Reject NaN / infinite values. Ranges are not checked.
    pub fn validate(&self) -> Result<(), PredictError> {
        match self
            .to_array()
            .iter()
            .zip(FEATURE_NAMES.iter())
            .find(|(value, _)| !value.is_finite())
        {
            Some((value, name)) => Err(PredictError::NonFiniteInput {
                feature: *name,
                value: *value,
            }),
            None => Ok(()),
        }
    }

    /// Names of the fields outside their typical range
    pub fn out_of_range(&self) -> Vec<&'static str> {
        FEATURE_LAYOUT
            .iter()
            .zip(self.to_array())
            .filter(|(spec, value)| !spec.in_typical_range(*value))
            .map(|(spec, _)| spec.name)
            .collect()
    }
}

impl Default for FeatureVector {
    /// Slider midpoints
    fn default() -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, spec) in values.iter_mut().zip(FEATURE_LAYOUT.iter()) {
            *slot = spec.default;
        }
        Self::from_array(values)
    }
}
