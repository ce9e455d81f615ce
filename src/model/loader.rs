//! Artifact Loader
//!
//! Reads the scaler and classifier JSON artifacts once at startup.
//! Any failure is fatal: the service never runs half-loaded.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::classifier::ClassifierParams;
use super::error::{ArtifactError, ArtifactKind, ShapeError};
use super::scaler::ScalerParams;

/// Operator-facing metadata about a loaded artifact
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactInfo {
    pub path: String,
    pub family: String,
    pub size_bytes: u64,
    pub sha256: String,
    pub loaded_at: DateTime<Utc>,
}

/// Both artifacts plus their metadata
#[derive(Debug, Clone)]
pub struct LoadedArtifacts {
    pub scaler: ScalerParams,
    pub classifier: ClassifierParams,
    pub scaler_info: ArtifactInfo,
    pub classifier_info: ArtifactInfo,
}

/// Load the scaler artifact
pub fn load_scaler(path: impl AsRef<Path>) -> Result<(ScalerParams, ArtifactInfo), ArtifactError> {
    load_artifact(ArtifactKind::Scaler, path.as_ref(), ScalerParams::validate, |_| {
        "standard_scaler".to_string()
    })
}

/// Load the classifier artifact
pub fn load_classifier(
    path: impl AsRef<Path>,
) -> Result<(ClassifierParams, ArtifactInfo), ArtifactError> {
    load_artifact(ArtifactKind::Classifier, path.as_ref(), ClassifierParams::validate, |c| {
        c.family().to_string()
    })
}

/// Load both artifacts, scaler first
pub fn load_all(
    scaler_path: impl AsRef<Path>,
    classifier_path: impl AsRef<Path>,
) -> Result<LoadedArtifacts, ArtifactError> {
    let (scaler, scaler_info) = load_scaler(scaler_path)?;
    let (classifier, classifier_info) = load_classifier(classifier_path)?;

    Ok(LoadedArtifacts {
        scaler,
        classifier,
        scaler_info,
        classifier_info,
    })
}

fn load_artifact<T, V, F>(
    kind: ArtifactKind,
    path: &Path,
    validate: V,
    family: F,
) -> Result<(T, ArtifactInfo), ArtifactError>
where
    T: DeserializeOwned,
    V: Fn(&T) -> Result<(), ShapeError>,
    F: Fn(&T) -> String,
{
    tracing::info!("Loading {} artifact from: {}", kind, path.display());

    if !path.exists() {
        return Err(ArtifactError::NotFound {
            kind,
            path: path.to_path_buf(),
        });
    }

    let corrupt = |reason: String| ArtifactError::Corrupt {
        kind,
        path: PathBuf::from(path),
        reason,
    };

    let bytes = std::fs::read(path).map_err(|e| corrupt(format!("read failed: {}", e)))?;
    let params: T = serde_json::from_slice(&bytes).map_err(|e| corrupt(e.to_string()))?;
    validate(&params).map_err(|e| corrupt(e.0))?;

    let info = ArtifactInfo {
        path: path.display().to_string(),
        family: family(&params),
        size_bytes: bytes.len() as u64,
        sha256: hex::encode(Sha256::digest(&bytes)),
        loaded_at: Utc::now(),
    };

    tracing::info!(
        "{} artifact loaded ({}, {} bytes, sha256 {})",
        kind,
        info.family,
        info.size_bytes,
        info.sha256
    );

    Ok((params, info))
}
