//! Threshold profile loader (TOML)
//!
//! A profile overrides the risk buckets and any subset of sensor cut points:
//!
//! ```toml
//! escalate_on_critical_sensor = false
//!
//! [risk]
//! critical_max_days = 10
//!
//! [[sensors]]
//! sensor = "engine_temperature_c"
//! warning = 95
//! critical = 115
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use truckcare_domain::model::Sensor;
use truckcare_domain::service::{RiskThresholds, SensorRule};
use truckcare_types::{ConfigError, Error, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SensorOverride {
    pub sensor: Sensor,
    pub warning: f64,
    pub critical: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ThresholdProfile {
    #[serde(default)]
    pub risk: Option<RiskThresholds>,
    #[serde(default)]
    pub escalate_on_critical_sensor: Option<bool>,
    #[serde(default)]
    pub sensors: Vec<SensorOverride>,
}

impl ThresholdProfile {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read threshold profile {}: {}",
                path.display(),
                e
            )))
        })?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        toml::from_str(toml_content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse threshold profile TOML: {}",
                e
            )))
        })
    }

    /// Apply sensor overrides on top of a base rule table
    pub fn apply_rules(&self, base: &[SensorRule]) -> Vec<SensorRule> {
        base.iter()
            .map(|rule| {
                match self.sensors.iter().rev().find(|o| o.sensor == rule.sensor) {
                    Some(o) => SensorRule {
                        warning: o.warning,
                        critical: o.critical,
                        ..*rule
                    },
                    None => *rule,
                }
            })
            .collect()
    }

    pub fn risk_or(&self, base: RiskThresholds) -> RiskThresholds {
        self.risk.unwrap_or(base)
    }
}
