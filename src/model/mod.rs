//! Model Module - artifact loading and inference
//!
//! Loading happens once at startup. Inference is a pure function over the
//! loaded parameters, shared read-only across requests.

pub mod classifier;
pub mod error;
pub mod loader;
pub mod predictor;
pub mod scaler;

// Re-export common types
pub use classifier::{ClassifierParams, DecisionTree, Potability};
pub use error::{ArtifactError, ArtifactKind, PredictError, ShapeError};
pub use loader::{load_all, load_classifier, load_scaler, ArtifactInfo, LoadedArtifacts};
pub use predictor::{PredictionResult, Predictor};
pub use scaler::ScalerParams;
