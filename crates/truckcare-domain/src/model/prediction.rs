//! Prediction output types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use truckcare_types::{HealthBadge, RiskBucket};

use super::sensor::Sensor;

/// Badge per sensor, in a stable display order
pub type SensorBadges = BTreeMap<Sensor, HealthBadge>;

/// A sensor reading outside its plausible range. The encoder fed the
/// clamped value to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeWarning {
    pub sensor: Sensor,
    pub value: f64,
    pub clamped_to: f64,
}

/// Result of one prediction request. Recomputed per request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub plate: String,
    pub predicted_days: f64,
    pub predicted_hours: f64,
    pub risk_bucket: RiskBucket,
    pub sensor_badges: SensorBadges,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub range_warnings: Vec<RangeWarning>,
    pub model_version: String,
}

impl PredictionResult {
    pub fn critical_sensors(&self) -> Vec<Sensor> {
        self.sensor_badges
            .iter()
            .filter(|(_, badge)| **badge == HealthBadge::Critical)
            .map(|(sensor, _)| *sensor)
            .collect()
    }
}
