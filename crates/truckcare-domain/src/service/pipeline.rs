//! Encoder + regressor bundle loaded from one model artifact

use serde::{Deserialize, Serialize};
use tracing::debug;
use truckcare_types::{Error, Result};

use super::encoder::{EncoderConfig, FeatureEncoder};
use super::predictor::{ModelSpec, RegressionModel, Regressor};
use crate::model::{FeatureVector, TruckRecord};

/// Target column the pipeline must have been trained on
pub const TARGET_COLUMN: &str = "days_until_next_service";

/// Serialized form of the trained pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    pub preprocess: EncoderConfig,
    pub model: ModelSpec,
}

/// Validated, ready-to-run prediction pipeline
#[derive(Debug, Clone)]
pub struct MaintenancePipeline {
    version: String,
    fingerprint: String,
    encoder: FeatureEncoder,
    model: RegressionModel,
}

impl MaintenancePipeline {
    /// Build from an artifact. `fingerprint` identifies the artifact bytes.
    pub fn from_artifact(artifact: &ModelArtifact, fingerprint: impl Into<String>) -> Result<Self> {
        if let Some(target) = &artifact.target {
            if target != TARGET_COLUMN {
                return Err(Error::InvalidArtifact(format!(
                    "model predicts '{}', expected '{}'",
                    target, TARGET_COLUMN
                )));
            }
        }

        let encoder = FeatureEncoder::new(&artifact.preprocess)?;
        let model = RegressionModel::from_spec(&artifact.model)?;
        if encoder.dimension() != model.n_features() {
            return Err(Error::InvalidArtifact(format!(
                "encoder produces {} features but model expects {}",
                encoder.dimension(),
                model.n_features()
            )));
        }

        Ok(Self {
            version: artifact
                .version
                .clone()
                .unwrap_or_else(|| "unversioned".to_string()),
            fingerprint: fingerprint.into(),
            encoder,
            model,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn model_kind(&self) -> &'static str {
        self.model.kind()
    }

    pub fn encode(&self, record: &TruckRecord) -> FeatureVector {
        self.encoder.encode(record)
    }

    /// Predicted days until next service, never negative
    pub fn predict_days(&self, record: &TruckRecord) -> Result<f64> {
        let features = self.encode(record);
        let days = self.predict_features(&features)?;
        debug!(plate = %record.plate, days, "predicted days until service");
        Ok(days)
    }

    pub fn predict_features(&self, features: &FeatureVector) -> Result<f64> {
        self.model.predict(features)
    }
}

/// Whether a usable model was loaded at startup
#[derive(Debug, Clone)]
pub enum ModelState {
    Ready(MaintenancePipeline),
    /// Reason the model could not be loaded
    Unavailable(String),
}

impl ModelState {
    pub fn pipeline(&self) -> Result<&MaintenancePipeline> {
        match self {
            ModelState::Ready(pipeline) => Ok(pipeline),
            ModelState::Unavailable(reason) => Err(Error::ModelUnavailable(reason.clone())),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ModelState::Ready(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTIFACT: &str = r#"{
        "version": "rf-2024-06",
        "target": "days_until_next_service",
        "preprocess": {
            "transformers": [
                {"kind": "standard_scaler", "columns": [
                    {"field": "engine_temperature_c", "mean": 100.0, "scale": 20.0}
                ]},
                {"kind": "one_hot", "columns": [
                    {"field": "route_type", "categories": ["City", "Highway"]}
                ]}
            ]
        },
        "model": {
            "kind": "random_forest",
            "n_features": 3,
            "trees": [{
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [0, -2, -2],
                "threshold": [0.5, -2.0, -2.0],
                "value": [0.0, 45.0, 5.0]
            }]
        }
    }"#;

    fn pipeline() -> MaintenancePipeline {
        let artifact: ModelArtifact = serde_json::from_str(ARTIFACT).unwrap();
        MaintenancePipeline::from_artifact(&artifact, "abc123").unwrap()
    }

    #[test]
    fn test_predicts_from_record() {
        let pipeline = pipeline();
        let mut cool = TruckRecord::new("MH12AB1234");
        cool.engine_temperature_c = Some(90.0);
        let mut hot = TruckRecord::new("MH12AB1234");
        hot.engine_temperature_c = Some(130.0);

        assert_eq!(pipeline.predict_days(&cool).unwrap(), 45.0);
        assert_eq!(pipeline.predict_days(&hot).unwrap(), 5.0);
        assert_eq!(pipeline.version(), "rf-2024-06");
        assert_eq!(pipeline.fingerprint(), "abc123");
    }

    #[test]
    fn test_rejects_dimension_mismatch() {
        let mut artifact: ModelArtifact = serde_json::from_str(ARTIFACT).unwrap();
        if let ModelSpec::RandomForest { n_features, .. } = &mut artifact.model {
            *n_features = 4;
        }
        let err = MaintenancePipeline::from_artifact(&artifact, "x").unwrap_err();
        assert!(matches!(err, Error::InvalidArtifact(_)));
    }

    #[test]
    fn test_rejects_wrong_target() {
        let mut artifact: ModelArtifact = serde_json::from_str(ARTIFACT).unwrap();
        artifact.target = Some("total_km_run".to_string());
        assert!(MaintenancePipeline::from_artifact(&artifact, "x").is_err());
    }

    #[test]
    fn test_unavailable_state() {
        let state = ModelState::Unavailable("model file not found".to_string());
        assert!(!state.is_ready());
        assert!(matches!(state.pipeline(), Err(Error::ModelUnavailable(_))));
        assert!(ModelState::Ready(pipeline()).pipeline().is_ok());
    }
}
