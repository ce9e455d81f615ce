//! Prediction Service
//!
//! Pure function of the input plus the two immutable artifacts:
//! order → scale → classify → report the predicted label's probability.

use serde::{Deserialize, Serialize};

use super::classifier::{ClassifierParams, Potability, CLASS_COUNT};
use super::error::{PredictError, ShapeError};
use super::loader::LoadedArtifacts;
use super::scaler::ScalerParams;
use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: Potability,
    /// `[p_not_potable, p_potable]`, sums to 1.0
    pub probabilities: [f64; CLASS_COUNT],
    /// Probability of `label` in percent, two decimals
    pub confidence: f64,
}

impl PredictionResult {
    /// Confidence as shown to users, e.g. `61.23%`
    pub fn confidence_display(&self) -> String {
        format!("{:.2}%", self.confidence)
    }

    pub fn probability_of(&self, label: Potability) -> f64 {
        self.probabilities[label.index()]
    }
}

/// Scaler + classifier pair. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Predictor {
    scaler: ScalerParams,
    classifier: ClassifierParams,
}

impl Predictor {
    /// Build from already-parsed parameters, re-checking their shape
    pub fn new(scaler: ScalerParams, classifier: ClassifierParams) -> Result<Self, ShapeError> {
        scaler.validate()?;
        classifier.validate()?;
        Ok(Self { scaler, classifier })
    }

    pub fn classifier(&self) -> &ClassifierParams {
        &self.classifier
    }

    /// Predict for a named feature vector.
    ///
    /// A finite raw value can still overflow once scaled or weighted; that is
    /// rejected as `NonFiniteInput` on the offending feature.
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult, PredictError> {
        features.validate()?;

        let scaled = self.scaler.transform(&features.to_array());
        if let Some((index, value)) = first_non_finite(&scaled)
            .or_else(|| self.classifier.overflowing_feature(&scaled))
        {
            return Err(PredictError::NonFiniteInput {
                feature: FEATURE_NAMES[index],
                value,
            });
        }

        let probabilities = self.classifier.predict_proba(&scaled);
        let label = self.classifier.decide(&scaled, &probabilities);

        Ok(PredictionResult {
            label,
            probabilities,
            confidence: round2(probabilities[label.index()] * 100.0),
        })
    }

    /// Predict for positional values (must be exactly nine)
    pub fn predict_values(&self, values: &[f64]) -> Result<PredictionResult, PredictError> {
        let features = FeatureVector::from_values(values)?;
        self.predict(&features)
    }
}

impl From<LoadedArtifacts> for Predictor {
    /// Loader output is already validated
    fn from(artifacts: LoadedArtifacts) -> Self {
        Self {
            scaler: artifacts.scaler,
            classifier: artifacts.classifier,
        }
    }
}

fn first_non_finite(values: &[f64; FEATURE_COUNT]) -> Option<(usize, f64)> {
    values.iter().copied().enumerate().find(|(_, v)| !v.is_finite())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_LAYOUT;
    use crate::model::classifier::DecisionTree;
    use crate::model::loader::load_all;
    use std::path::Path;

    fn reference_predictor() -> Predictor {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("artifacts");
        load_all(root.join("scaler.json"), root.join("model.json"))
            .unwrap()
            .into()
    }

    fn forest_predictor() -> Predictor {
        // Splits on scaled Sulfate (index 4), then on scaled pH (index 0)
        let tree = DecisionTree {
            children_left: vec![1, 3, -1, -1, -1],
            children_right: vec![2, 4, -1, -1, -1],
            feature: vec![4, 0, -2, -2, -2],
            threshold: vec![0.0, 0.0, -2.0, -2.0, -2.0],
            value: vec![[50.0, 50.0], [30.0, 20.0], [20.0, 30.0], [9.0, 1.0], [2.0, 8.0]],
        };
        Predictor::new(
            ScalerParams::new(
                FEATURE_LAYOUT.iter().map(|s| s.default).collect(),
                vec![1.0; FEATURE_COUNT],
            )
            .unwrap(),
            ClassifierParams::RandomForest { trees: vec![tree] },
        )
        .unwrap()
    }

    /// Deterministic sweep across and beyond the typical ranges
    fn sample_vectors() -> Vec<FeatureVector> {
        let mut out = Vec::new();
        for step in 0..=20 {
            let t = step as f64 / 20.0;
            let mut values = [0.0; FEATURE_COUNT];
            for (i, spec) in FEATURE_LAYOUT.iter().enumerate() {
                // Alternate direction per feature so vectors are not collinear
                let u = if i % 2 == 0 { t } else { 1.0 - t };
                let span = spec.max - spec.min;
                values[i] = spec.min - 0.25 * span + u * 1.5 * span;
            }
            out.push(FeatureVector::from_array(values));
        }
        out
    }

    #[test]
    fn test_default_midpoints_regression() {
        let predictor = reference_predictor();
        let result = predictor.predict(&FeatureVector::default()).unwrap();

        assert_eq!(result.label, Potability::NotPotable);
        assert_eq!(result.confidence, 60.43);
        assert_eq!(result.confidence_display(), "60.43%");
    }

    #[test]
    fn test_result_bounds_for_valid_vectors() {
        for predictor in [reference_predictor(), forest_predictor()] {
            for v in sample_vectors() {
                let result = predictor.predict(&v).unwrap();
                assert!(
                    (50.0..=100.0).contains(&result.confidence),
                    "confidence {} out of bounds",
                    result.confidence
                );
                let sum: f64 = result.probabilities.iter().sum();
                assert!((sum - 1.0).abs() < 1e-6);
                assert!(result.probability_of(result.label) >= 0.5);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let predictor = reference_predictor();
        for v in sample_vectors() {
            assert_eq!(predictor.predict(&v).unwrap(), predictor.predict(&v).unwrap());
        }
    }

    #[test]
    fn test_extreme_ph_not_rejected() {
        let predictor = reference_predictor();

        let mut low = FeatureVector::default();
        low.ph = 0.0;
        let low = predictor.predict(&low).unwrap();
        assert_eq!(low.label, Potability::NotPotable);
        assert_eq!(low.confidence, 58.48);

        let mut high = FeatureVector::default();
        high.ph = 14.0;
        let high = predictor.predict(&high).unwrap();
        assert_eq!(high.label, Potability::NotPotable);
        assert_eq!(high.confidence, 62.35);
    }

    #[test]
    fn test_far_out_of_range_still_predicts() {
        let predictor = reference_predictor();
        let values = [-5.0, 1e6, 0.0, 100.0, 0.0, 1e5, -3.0, 0.0, 50.0];
        assert!(predictor.predict_values(&values).is_ok());
    }

    #[test]
    fn test_count_mismatch() {
        let predictor = reference_predictor();
        for n in [0, 1, 8, 10, 18] {
            let values = vec![1.0; n];
            assert_eq!(
                predictor.predict_values(&values),
                Err(PredictError::FeatureCountMismatch { expected: 9, actual: n })
            );
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let predictor = reference_predictor();
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut v = FeatureVector::default();
            v.trihalomethanes = bad;
            assert!(matches!(
                predictor.predict(&v),
                Err(PredictError::NonFiniteInput { feature: "Trihalomethanes", .. })
            ));
        }
    }

    fn opposing_logistic(scale: f64, weight: f64) -> Predictor {
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[0] = weight;
        coefficients[1] = -weight;
        Predictor::new(
            ScalerParams::new(vec![0.0; FEATURE_COUNT], vec![scale; FEATURE_COUNT]).unwrap(),
            ClassifierParams::LogisticRegression { coefficients, intercept: 0.0 },
        )
        .unwrap()
    }

    #[test]
    fn test_overflowing_scale_rejected() {
        // 1.7e308 / 0.5 overflows to +inf on both pH and Hardness
        let predictor = opposing_logistic(0.5, 1.0);
        let mut v = FeatureVector::default();
        v.ph = 1.7e308;
        v.hardness = 1.7e308;

        assert_eq!(
            predictor.predict(&v),
            Err(PredictError::NonFiniteInput { feature: "ph", value: f64::INFINITY })
        );
    }

    #[test]
    fn test_overflowing_logit_rejected() {
        // Scaled values stay finite, the weighted terms do not
        let predictor = opposing_logistic(1.0, 10.0);
        let mut v = FeatureVector::default();
        v.ph = 1e308;
        v.hardness = 1e308;

        assert!(matches!(
            predictor.predict(&v),
            Err(PredictError::NonFiniteInput { feature: "ph", .. })
        ));

        // Large but representable inputs still get a bounded confidence
        v.ph = 1e300;
        v.hardness = 0.0;
        let result = predictor.predict(&v).unwrap();
        assert_eq!(result.label, Potability::Potable);
        assert_eq!(result.confidence, 100.0);
    }

    #[test]
    fn test_forest_paths() {
        let predictor = forest_predictor();

        // Midpoints scale to zero: left, left → [9, 1]
        let mid = predictor.predict(&FeatureVector::default()).unwrap();
        assert_eq!(mid.label, Potability::NotPotable);
        assert_eq!(mid.confidence, 90.0);

        let mut v = FeatureVector::default();
        v.ph = 8.0;
        let r = predictor.predict(&v).unwrap();
        assert_eq!(r.label, Potability::Potable);
        assert_eq!(r.confidence, 80.0);

        v.sulfate = 400.0;
        let r = predictor.predict(&v).unwrap();
        assert_eq!(r.label, Potability::Potable);
        assert_eq!(r.confidence, 60.0);
    }

    #[test]
    fn test_new_rejects_bad_shapes() {
        let bad = ClassifierParams::LogisticRegression {
            coefficients: vec![0.0; 4],
            intercept: 0.0,
        };
        assert!(Predictor::new(ScalerParams::identity(), bad).is_err());
    }
}
