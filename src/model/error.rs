//! Model errors
//!
//! Artifact errors are startup-time and fatal. Predict errors reject a single
//! request and leave the service running.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which artifact an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Scaler,
    Classifier,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Scaler => write!(f, "scaler"),
            ArtifactKind::Classifier => write!(f, "classifier"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("{kind} artifact not found: {}", path.display())]
    NotFound { kind: ArtifactKind, path: PathBuf },

    #[error("{kind} artifact is corrupt ({}): {reason}", path.display())]
    Corrupt {
        kind: ArtifactKind,
        path: PathBuf,
        reason: String,
    },
}

impl ArtifactError {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            ArtifactError::NotFound { kind, .. } | ArtifactError::Corrupt { kind, .. } => *kind,
        }
    }
}

/// Shape problem found while validating a parsed artifact.
///
/// Path-free so the parameter types can validate themselves; the loader
/// attaches the path when turning it into `ArtifactError::Corrupt`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct ShapeError(pub String);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("expected {expected} feature values, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error("feature {feature} is not a finite number ({value})")]
    NonFiniteInput { feature: &'static str, value: f64 },
}
