//! Features Module - input schema and the per-request feature vector

pub mod layout;
pub mod vector;

// Re-export common types
pub use layout::{FeatureSpec, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_NAMES};
pub use vector::FeatureVector;
