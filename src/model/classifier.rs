//! Binary classifier parameters
//!
//! Two families are supported, tagged by `kind` in the artifact:
//!
//! - `logistic_regression`: `p1 = σ(w·x + b)`, Potable iff `w·x + b > 0`
//! - `random_forest`: mean of per-tree leaf distributions, argmax label
//!
//! Class index 0 is NotPotable, index 1 is Potable. An exact tie resolves to
//! NotPotable for both families.

use serde::{Deserialize, Serialize};

use super::error::ShapeError;
use crate::features::FEATURE_COUNT;

/// Number of output classes
pub const CLASS_COUNT: usize = 2;

/// Sentinel child index marking a leaf (scikit-learn `TREE_LEAF`)
pub const TREE_LEAF: i64 = -1;

// ============================================================================
// LABELS
// ============================================================================

/// Predicted class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Potability {
    NotPotable = 0,
    Potable = 1,
}

impl Potability {
    /// Position in the probability pair
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_potable(self) -> bool {
        self == Potability::Potable
    }

    /// Verdict line shown to users
    pub fn verdict(self) -> &'static str {
        match self {
            Potability::Potable => "The water is Drinkable!",
            Potability::NotPotable => "The water is Not Drinkable.",
        }
    }
}

// ============================================================================
// DECISION TREE
// ============================================================================

/// One fitted tree in flattened array form (node `i` is column `i` of every array)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights, `[not_potable, potable]`
    pub value: Vec<[f64; CLASS_COUNT]>,
}

impl DecisionTree {
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == TREE_LEAF
    }

    /// Check the flattened arrays describe a proper tree.
    ///
    /// Children must point strictly forward, so traversal always terminates.
    pub fn validate(&self) -> Result<(), ShapeError> {
        let n = self.node_count();
        if n == 0 {
            return Err(ShapeError("tree has no nodes".to_string()));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(ShapeError(format!(
                "tree arrays differ in length (children_left has {} nodes)",
                n
            )));
        }

        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];

            if left == TREE_LEAF || right == TREE_LEAF {
                if left != right {
                    return Err(ShapeError(format!("node {} has exactly one child", node)));
                }
                let weights = &self.value[node];
                if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(ShapeError(format!("leaf {} has invalid class weights", node)));
                }
                if weights.iter().sum::<f64>() <= 0.0 {
                    return Err(ShapeError(format!("leaf {} has zero total weight", node)));
                }
                continue;
            }

            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(ShapeError(format!(
                        "node {} points to invalid child {}",
                        node, child
                    )));
                }
            }

            let feature = self.feature[node];
            if feature < 0 || feature >= FEATURE_COUNT as i64 {
                return Err(ShapeError(format!(
                    "node {} splits on feature {} (expected 0..{})",
                    node, feature, FEATURE_COUNT
                )));
            }
            if !self.threshold[node].is_finite() {
                return Err(ShapeError(format!("node {} has non-finite threshold", node)));
            }
        }

        Ok(())
    }

    /// Walk to a leaf and return its normalized class distribution
    pub fn predict_proba(&self, x: &[f64; FEATURE_COUNT]) -> [f64; CLASS_COUNT] {
        let mut node = 0usize;
        while !self.is_leaf(node) {
            let feature = self.feature[node] as usize;
            node = if x[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }

        let weights = self.value[node];
        let total: f64 = weights.iter().sum();
        [weights[0] / total, weights[1] / total]
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

/// Fitted classifier, loaded once and never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierParams {
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    RandomForest {
        trees: Vec<DecisionTree>,
    },
}

impl ClassifierParams {
    /// Family name as written in the artifact
    pub fn family(&self) -> &'static str {
        match self {
            ClassifierParams::LogisticRegression { .. } => "logistic_regression",
            ClassifierParams::RandomForest { .. } => "random_forest",
        }
    }

    /// Check shape against the feature layout
    pub fn validate(&self) -> Result<(), ShapeError> {
        match self {
            ClassifierParams::LogisticRegression { coefficients, intercept } => {
                if coefficients.len() != FEATURE_COUNT {
                    return Err(ShapeError(format!(
                        "logistic regression has {} coefficients, expected {}",
                        coefficients.len(),
                        FEATURE_COUNT
                    )));
                }
                if coefficients.iter().any(|w| !w.is_finite()) || !intercept.is_finite() {
                    return Err(ShapeError("non-finite logistic regression parameter".to_string()));
                }
                Ok(())
            }
            ClassifierParams::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(ShapeError("random forest has no trees".to_string()));
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.validate()
                        .map_err(|e| ShapeError(format!("tree {}: {}", i, e.0)))?;
                }
                Ok(())
            }
        }
    }

    /// Raw decision value for logistic regression (`w·x + b`)
    fn logit(coefficients: &[f64], intercept: f64, x: &[f64; FEATURE_COUNT]) -> f64 {
        coefficients.iter().zip(x.iter()).map(|(w, v)| w * v).sum::<f64>() + intercept
    }

    /// Probability pair `[p_not_potable, p_potable]` for a scaled vector
    pub fn predict_proba(&self, x: &[f64; FEATURE_COUNT]) -> [f64; CLASS_COUNT] {
        match self {
            ClassifierParams::LogisticRegression { coefficients, intercept } => {
                let p1 = sigmoid(Self::logit(coefficients, *intercept, x));
                [1.0 - p1, p1]
            }
            ClassifierParams::RandomForest { trees } => {
                let mut sum = [0.0f64; CLASS_COUNT];
                for tree in trees {
                    let p = tree.predict_proba(x);
                    sum[0] += p[0];
                    sum[1] += p[1];
                }
                let n = trees.len() as f64;
                [sum[0] / n, sum[1] / n]
            }
        }
    }

    /// Label from the family's decision rule
    pub fn decide(&self, x: &[f64; FEATURE_COUNT], proba: &[f64; CLASS_COUNT]) -> Potability {
        match self {
            ClassifierParams::LogisticRegression { coefficients, intercept } => {
                if Self::logit(coefficients, *intercept, x) > 0.0 {
                    Potability::Potable
                } else {
                    Potability::NotPotable
                }
            }
            // argmax, first index wins ties
            ClassifierParams::RandomForest { .. } => {
                if proba[1] > proba[0] {
                    Potability::Potable
                } else {
                    Potability::NotPotable
                }
            }
        }
    }

    /// First feature whose weighted term `w_i * x_i` is not finite.
    ///
    /// Two such terms of opposite sign would make the logit NaN. Trees only
    /// compare against thresholds, so a forest never overflows.
    pub fn overflowing_feature(&self, x: &[f64; FEATURE_COUNT]) -> Option<(usize, f64)> {
        match self {
            ClassifierParams::LogisticRegression { coefficients, .. } => coefficients
                .iter()
                .zip(x.iter())
                .map(|(w, v)| w * v)
                .enumerate()
                .find(|(_, term)| !term.is_finite()),
            ClassifierParams::RandomForest { .. } => None,
        }
    }
}

/// Numerically stable logistic function
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single split on pH (feature 0) at 0.0
    fn stump(left: [f64; 2], right: [f64; 2]) -> DecisionTree {
        DecisionTree {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![0, -2, -2],
            threshold: vec![0.0, -2.0, -2.0],
            value: vec![[0.0, 0.0], left, right],
        }
    }

    fn label(clf: &ClassifierParams, x: &[f64; FEATURE_COUNT]) -> Potability {
        clf.decide(x, &clf.predict_proba(x))
    }

    fn logistic(intercept: f64) -> ClassifierParams {
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[0] = 1.0;
        ClassifierParams::LogisticRegression { coefficients, intercept }
    }

    #[test]
    fn test_sigmoid() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
        assert!(sigmoid(-1000.0) >= 0.0);
        assert!(sigmoid(1000.0) <= 1.0);
    }

    #[test]
    fn test_logistic_regression() {
        let clf = logistic(0.0);
        let mut x = [0.0; FEATURE_COUNT];

        x[0] = 2.0;
        let p = clf.predict_proba(&x);
        assert!((p[0] + p[1] - 1.0).abs() < 1e-12);
        assert!(p[1] > 0.88 && p[1] < 0.89);
        assert_eq!(label(&clf, &x), Potability::Potable);

        x[0] = -2.0;
        assert_eq!(label(&clf, &x), Potability::NotPotable);
    }

    #[test]
    fn test_logistic_tie_is_not_potable() {
        let clf = logistic(0.0);
        let x = [0.0; FEATURE_COUNT];
        assert_eq!(clf.predict_proba(&x), [0.5, 0.5]);
        assert_eq!(label(&clf, &x), Potability::NotPotable);
    }

    #[test]
    fn test_overflowing_terms_reported() {
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[0] = 1.0;
        coefficients[1] = -2.0;
        let clf = ClassifierParams::LogisticRegression { coefficients, intercept: 0.0 };

        let mut x = [0.0; FEATURE_COUNT];
        x[0] = 1e300;
        x[1] = 1e308;
        assert_eq!(clf.overflowing_feature(&x), Some((1, f64::NEG_INFINITY)));

        // Zero weight on a huge value contributes nothing
        x[1] = 0.0;
        x[2] = 1e308;
        assert_eq!(clf.overflowing_feature(&x), None);

        let forest = ClassifierParams::RandomForest { trees: vec![stump([1.0, 0.0], [0.0, 1.0])] };
        x[0] = f64::MAX;
        assert_eq!(forest.overflowing_feature(&x), None);
    }

    #[test]
    fn test_tree_routing() {
        let tree = stump([3.0, 1.0], [1.0, 4.0]);
        tree.validate().unwrap();

        let mut x = [0.0; FEATURE_COUNT];
        assert_eq!(tree.predict_proba(&x), [0.75, 0.25]);

        x[0] = 0.5;
        assert_eq!(tree.predict_proba(&x), [0.2, 0.8]);
    }

    #[test]
    fn test_forest_averages_trees() {
        let forest = ClassifierParams::RandomForest {
            trees: vec![stump([1.0, 0.0], [0.0, 1.0]), stump([1.0, 1.0], [1.0, 3.0])],
        };
        forest.validate().unwrap();

        let mut x = [0.0; FEATURE_COUNT];
        x[0] = 1.0;
        let p = forest.predict_proba(&x);
        assert!((p[0] - 0.125).abs() < 1e-12);
        assert!((p[1] - 0.875).abs() < 1e-12);
        assert_eq!(label(&forest, &x), Potability::Potable);
    }

    #[test]
    fn test_forest_tie_is_not_potable() {
        let forest = ClassifierParams::RandomForest {
            trees: vec![stump([1.0, 1.0], [1.0, 1.0])],
        };
        let x = [0.0; FEATURE_COUNT];
        assert_eq!(label(&forest, &x), Potability::NotPotable);
    }

    #[test]
    fn test_invalid_trees_rejected() {
        let mut backwards = stump([1.0, 0.0], [0.0, 1.0]);
        backwards.children_left[0] = 0;
        assert!(backwards.validate().is_err());

        let mut bad_feature = stump([1.0, 0.0], [0.0, 1.0]);
        bad_feature.feature[0] = FEATURE_COUNT as i64;
        assert!(bad_feature.validate().is_err());

        let mut empty_leaf = stump([1.0, 0.0], [0.0, 1.0]);
        empty_leaf.value[1] = [0.0, 0.0];
        assert!(empty_leaf.validate().is_err());

        let mut ragged = stump([1.0, 0.0], [0.0, 1.0]);
        ragged.threshold.pop();
        assert!(ragged.validate().is_err());

        let empty = ClassifierParams::RandomForest { trees: vec![] };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_logistic_wrong_length_rejected() {
        let clf = ClassifierParams::LogisticRegression {
            coefficients: vec![0.1; 8],
            intercept: 0.0,
        };
        assert!(clf.validate().is_err());
    }

    #[test]
    fn test_artifact_tagging() {
        let json = r#"{
            "kind": "random_forest",
            "trees": [{
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [3, -2, -2],
                "threshold": [0.5, -2.0, -2.0],
                "value": [[10, 10], [8, 2], [2, 8]]
            }]
        }"#;
        let clf: ClassifierParams = serde_json::from_str(json).unwrap();
        assert_eq!(clf.family(), "random_forest");
        clf.validate().unwrap();
    }

    #[test]
    fn test_labels() {
        assert_eq!(Potability::NotPotable.index(), 0);
        assert_eq!(Potability::Potable.index(), 1);
        assert!(Potability::Potable.is_potable());
        assert_eq!(
            serde_json::to_string(&Potability::NotPotable).unwrap(),
            "\"not_potable\""
        );
    }
}
