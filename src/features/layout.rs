//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema.**
//!
//! The scaler and classifier artifacts are positional: they were fit on the
//! nine water-quality measurements in exactly the order listed here. Changing
//! the order breaks every artifact built against it.
//!
//! The ranges are operator guidance taken from the input form. They are
//! surfaced to whoever supplies the values but never enforced.

use serde::Serialize;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 9;

/// Static description of one input measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureSpec {
    /// Wire name (column name the artifacts were fit with)
    pub name: &'static str,
    /// Human readable label
    pub label: &'static str,
    /// Measurement unit, empty for dimensionless values
    pub unit: &'static str,
    /// Lower bound of the typical range
    pub min: f64,
    /// Upper bound of the typical range
    pub max: f64,
    /// Slider midpoint
    pub default: f64,
    /// Slider step
    pub step: f64,
}

impl FeatureSpec {
    /// Whether `value` lies inside the typical range (inclusive)
    pub fn in_typical_range(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Features in the exact order they appear in the vector
pub const FEATURE_LAYOUT: [FeatureSpec; FEATURE_COUNT] = [
    FeatureSpec { name: "ph", label: "pH", unit: "", min: 0.0, max: 14.0, default: 7.0, step: 0.1 },
    FeatureSpec { name: "Hardness", label: "Hardness", unit: "mg/L", min: 40.0, max: 330.0, default: 170.0, step: 1.0 },
    FeatureSpec { name: "Solids", label: "Solids", unit: "ppm", min: 300.0, max: 62000.0, default: 21000.0, step: 100.0 },
    FeatureSpec { name: "Chloramines", label: "Chloramines", unit: "ppm", min: 0.3, max: 13.2, default: 7.0, step: 0.1 },
    FeatureSpec { name: "Sulfate", label: "Sulfate", unit: "mg/L", min: 120.0, max: 490.0, default: 330.0, step: 1.0 },
    FeatureSpec { name: "Conductivity", label: "Conductivity", unit: "μS/cm", min: 180.0, max: 760.0, default: 420.0, step: 1.0 },
    FeatureSpec { name: "Organic_carbon", label: "Organic Carbon", unit: "ppm", min: 2.0, max: 29.0, default: 14.0, step: 0.1 },
    FeatureSpec { name: "Trihalomethanes", label: "Trihalomethanes", unit: "μg/L", min: 0.7, max: 124.0, default: 66.0, step: 0.1 },
    FeatureSpec { name: "Turbidity", label: "Turbidity", unit: "NTU", min: 1.4, max: 6.8, default: 4.0, step: 0.1 },
];

/// Wire names in layout order, read off `FEATURE_LAYOUT`
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = layout_names();

const fn layout_names() -> [&'static str; FEATURE_COUNT] {
    let mut names = [""; FEATURE_COUNT];
    let mut i = 0;
    while i < FEATURE_COUNT {
        names[i] = FEATURE_LAYOUT[i].name;
        i += 1;
    }
    names
}

/// Display label with unit, e.g. `Hardness (mg/L)`
pub fn display_label(spec: &FeatureSpec) -> String {
    if spec.unit.is_empty() {
        spec.label.to_string()
    } else {
        format!("{} ({})", spec.label, spec.unit)
    }
}

// ============================================================================
// TESTS
// ============================================================================
