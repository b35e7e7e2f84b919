//! Per-sensor health grading

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use truckcare_types::{Error, HealthBadge, Result};

use crate::model::{Direction, RangeWarning, Sensor, SensorBadges, TruckRecord};

/// Warning and critical cut points for one sensor.
///
/// A reading exactly on a cut point stays on the healthier side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorRule {
    pub sensor: Sensor,
    pub direction: Direction,
    pub warning: f64,
    pub critical: f64,
}

impl SensorRule {
    pub fn new(sensor: Sensor, warning: f64, critical: f64) -> Self {
        Self {
            sensor,
            direction: sensor.direction(),
            warning,
            critical,
        }
    }

    pub fn grade(&self, value: Option<f64>) -> HealthBadge {
        let v = match value {
            Some(v) if !v.is_nan() => v,
            _ => return HealthBadge::Unknown,
        };
        match self.direction {
            Direction::HigherIsWorse => {
                if v > self.critical {
                    HealthBadge::Critical
                } else if v > self.warning {
                    HealthBadge::Warning
                } else {
                    HealthBadge::Healthy
                }
            }
            Direction::LowerIsWorse => {
                if v < self.critical {
                    HealthBadge::Critical
                } else if v < self.warning {
                    HealthBadge::Warning
                } else {
                    HealthBadge::Healthy
                }
            }
        }
    }

    /// Critical must lie beyond warning in the dangerous direction
    pub fn validate(&self) -> Result<()> {
        if !self.warning.is_finite() || !self.critical.is_finite() {
            return Err(Error::InvalidThresholds(format!(
                "{} cut points must be finite",
                self.sensor
            )));
        }
        let ordered = match self.direction {
            Direction::HigherIsWorse => self.critical > self.warning,
            Direction::LowerIsWorse => self.critical < self.warning,
        };
        if !ordered {
            return Err(Error::InvalidThresholds(format!(
                "{}: critical {} is not beyond warning {}",
                self.sensor, self.critical, self.warning
            )));
        }
        Ok(())
    }
}

/// Built-in rule table
pub fn default_rules() -> Vec<SensorRule> {
    vec![
        SensorRule::new(Sensor::EngineTemperatureC, 100.0, 120.0),
        SensorRule::new(Sensor::VibrationsLevel, 3.0, 6.0),
        SensorRule::new(Sensor::OilLifePercent, 60.0, 30.0),
        SensorRule::new(Sensor::BatteryHealthPercent, 70.0, 40.0),
        SensorRule::new(Sensor::AmbientTempC, 40.0, 45.0),
        SensorRule::new(Sensor::BrakePadThicknessMm, 8.0, 4.0),
        SensorRule::new(Sensor::TyreHealthPercent, 60.0, 30.0),
        SensorRule::new(Sensor::FuelEfficiencyKmpl, 4.0, 3.0),
    ]
}

#[derive(Debug, Clone)]
pub struct SensorHealthEvaluator {
    rules: Vec<SensorRule>,
}

impl Default for SensorHealthEvaluator {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

impl SensorHealthEvaluator {
    /// Every monitored sensor needs exactly one rule
    pub fn new(rules: Vec<SensorRule>) -> Result<Self> {
        let mut seen = HashSet::new();
        for rule in &rules {
            rule.validate()?;
            if !seen.insert(rule.sensor) {
                return Err(Error::InvalidThresholds(format!(
                    "duplicate rule for {}",
                    rule.sensor
                )));
            }
        }
        if let Some(missing) = Sensor::ALL.iter().find(|s| !seen.contains(*s)) {
            return Err(Error::InvalidThresholds(format!(
                "no rule for {}",
                missing
            )));
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[SensorRule] {
        &self.rules
    }

    pub fn grade(&self, sensor: Sensor, value: Option<f64>) -> HealthBadge {
        self.rules
            .iter()
            .find(|r| r.sensor == sensor)
            .map(|r| r.grade(value))
            .unwrap_or(HealthBadge::Unknown)
    }

    /// Badge for each of the eight sensors on a record
    pub fn evaluate(&self, record: &TruckRecord) -> SensorBadges {
        self.rules
            .iter()
            .map(|rule| (rule.sensor, rule.grade(record.sensor(rule.sensor))))
            .collect()
    }

    /// Readings outside their plausible range, with the value they clamp to
    pub fn range_warnings(&self, record: &TruckRecord) -> Vec<RangeWarning> {
        Sensor::ALL
            .iter()
            .filter_map(|&sensor| {
                let value = record.sensor(sensor)?;
                let clamped_to = sensor.clamp_reading(value);
                (clamped_to != value).then_some(RangeWarning {
                    sensor,
                    value,
                    clamped_to,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_higher_is_worse_boundaries() {
        let evaluator = SensorHealthEvaluator::default();
        let grade = |v| evaluator.grade(Sensor::EngineTemperatureC, Some(v));
        assert_eq!(grade(90.0), HealthBadge::Healthy);
        assert_eq!(grade(100.0), HealthBadge::Healthy);
        assert_eq!(grade(100.5), HealthBadge::Warning);
        assert_eq!(grade(120.0), HealthBadge::Warning);
        assert_eq!(grade(120.1), HealthBadge::Critical);
    }

    #[test]
    fn test_lower_is_worse_boundaries() {
        let evaluator = SensorHealthEvaluator::default();
        let grade = |v| evaluator.grade(Sensor::OilLifePercent, Some(v));
        assert_eq!(grade(80.0), HealthBadge::Healthy);
        assert_eq!(grade(60.0), HealthBadge::Healthy);
        assert_eq!(grade(59.9), HealthBadge::Warning);
        assert_eq!(grade(30.0), HealthBadge::Warning);
        assert_eq!(grade(8.0), HealthBadge::Critical);
    }

    #[test]
    fn test_every_rule_at_its_cut_points() {
        let evaluator = SensorHealthEvaluator::default();
        for rule in default_rules() {
            let step = match rule.direction {
                Direction::HigherIsWorse => 0.01,
                Direction::LowerIsWorse => -0.01,
            };
            let grade = |v| evaluator.grade(rule.sensor, Some(v));
            assert_eq!(grade(rule.warning), HealthBadge::Healthy, "{}", rule.sensor);
            assert_eq!(grade(rule.warning + step), HealthBadge::Warning, "{}", rule.sensor);
            assert_eq!(grade(rule.critical), HealthBadge::Warning, "{}", rule.sensor);
            assert_eq!(grade(rule.critical + step), HealthBadge::Critical, "{}", rule.sensor);
            assert_eq!(grade(f64::NAN), HealthBadge::Unknown, "{}", rule.sensor);
        }
    }

    #[test]
    fn test_fractional_cut_points() {
        let evaluator = SensorHealthEvaluator::default();
        let fuel = |v| evaluator.grade(Sensor::FuelEfficiencyKmpl, Some(v));
        assert_eq!(fuel(4.0), HealthBadge::Healthy);
        assert_eq!(fuel(3.99), HealthBadge::Warning);
        assert_eq!(fuel(3.0), HealthBadge::Warning);
        assert_eq!(fuel(2.99), HealthBadge::Critical);

        let vibration = |v| evaluator.grade(Sensor::VibrationsLevel, Some(v));
        assert_eq!(vibration(3.0), HealthBadge::Healthy);
        assert_eq!(vibration(3.01), HealthBadge::Warning);
        assert_eq!(vibration(6.0), HealthBadge::Warning);
        assert_eq!(vibration(6.01), HealthBadge::Critical);
    }

    #[test]
    fn test_missing_or_nan_is_unknown() {
        let evaluator = SensorHealthEvaluator::default();
        assert_eq!(
            evaluator.grade(Sensor::TyreHealthPercent, None),
            HealthBadge::Unknown
        );
        assert_eq!(
            evaluator.grade(Sensor::TyreHealthPercent, Some(f64::NAN)),
            HealthBadge::Unknown
        );
    }

    #[test]
    fn test_evaluate_covers_all_sensors() {
        let mut record = TruckRecord::new("MH12AB1234");
        record.engine_temperature_c = Some(145.0);
        record.oil_life_percent = Some(8.0);
        record.brake_pad_thickness_mm = Some(12.0);

        let badges = SensorHealthEvaluator::default().evaluate(&record);
        assert_eq!(badges.len(), 8);
        assert_eq!(badges[&Sensor::EngineTemperatureC], HealthBadge::Critical);
        assert_eq!(badges[&Sensor::OilLifePercent], HealthBadge::Critical);
        assert_eq!(badges[&Sensor::BrakePadThicknessMm], HealthBadge::Healthy);
        assert_eq!(badges[&Sensor::VibrationsLevel], HealthBadge::Unknown);
    }

    #[test]
    fn test_range_warnings() {
        let mut record = TruckRecord::new("MH12AB1234");
        record.engine_temperature_c = Some(145.0);
        record.oil_life_percent = Some(8.0);
        let warnings = SensorHealthEvaluator::default().range_warnings(&record);
        assert_eq!(
            warnings,
            vec![RangeWarning {
                sensor: Sensor::EngineTemperatureC,
                value: 145.0,
                clamped_to: 140.0,
            }]
        );
    }

    #[test]
    fn test_rejects_inverted_rule() {
        let mut rules = default_rules();
        rules[0] = SensorRule::new(Sensor::EngineTemperatureC, 120.0, 100.0);
        assert!(matches!(
            SensorHealthEvaluator::new(rules),
            Err(Error::InvalidThresholds(_))
        ));
    }

    #[test]
    fn test_rejects_missing_sensor() {
        let mut rules = default_rules();
        rules.pop();
        assert!(SensorHealthEvaluator::new(rules).is_err());
    }
}
