//! Risk classification of predicted days until service

use serde::{Deserialize, Serialize};
use truckcare_types::{Error, HealthBadge, Result, RiskBucket};

use crate::model::SensorBadges;

fn default_critical_max() -> f64 {
    15.0
}

fn default_high_max() -> f64 {
    30.0
}

fn default_medium_max() -> f64 {
    60.0
}

/// Upper bounds (inclusive, in days) for each bucket below Low
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    #[serde(default = "default_critical_max")]
    pub critical_max_days: f64,
    #[serde(default = "default_high_max")]
    pub high_max_days: f64,
    #[serde(default = "default_medium_max")]
    pub medium_max_days: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            critical_max_days: default_critical_max(),
            high_max_days: default_high_max(),
            medium_max_days: default_medium_max(),
        }
    }
}

impl RiskThresholds {
    /// Bounds must be finite and strictly increasing
    pub fn validate(&self) -> Result<()> {
        let bounds = [
            self.critical_max_days,
            self.high_max_days,
            self.medium_max_days,
        ];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(Error::InvalidThresholds(
                "risk thresholds must be finite".to_string(),
            ));
        }
        if !(self.critical_max_days < self.high_max_days
            && self.high_max_days < self.medium_max_days)
        {
            return Err(Error::InvalidThresholds(format!(
                "risk thresholds must increase: critical {} < high {} < medium {}",
                self.critical_max_days, self.high_max_days, self.medium_max_days
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RiskClassifier {
    thresholds: RiskThresholds,
    escalate_on_critical_sensor: bool,
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self {
            thresholds: RiskThresholds::default(),
            escalate_on_critical_sensor: true,
        }
    }
}

impl RiskClassifier {
    pub fn new(thresholds: RiskThresholds, escalate_on_critical_sensor: bool) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self {
            thresholds,
            escalate_on_critical_sensor,
        })
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    /// Bucket for predicted days. NaN is treated as the worst case.
    pub fn classify(&self, days: f64) -> RiskBucket {
        let t = &self.thresholds;
        if days.is_nan() || days <= t.critical_max_days {
            RiskBucket::Critical
        } else if days <= t.high_max_days {
            RiskBucket::High
        } else if days <= t.medium_max_days {
            RiskBucket::Medium
        } else {
            RiskBucket::Low
        }
    }

    /// Bucket for predicted days, raised to at least High when any sensor
    /// is Critical and escalation is enabled
    pub fn classify_with_sensors(&self, days: f64, badges: &SensorBadges) -> RiskBucket {
        let bucket = self.classify(days);
        let any_critical = badges.values().any(|b| *b == HealthBadge::Critical);
        if self.escalate_on_critical_sensor && any_critical {
            bucket.at_least(RiskBucket::High)
        } else {
            bucket
        }
    }
}
