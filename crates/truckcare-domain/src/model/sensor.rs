//! The eight monitored sensor signals

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use truckcare_types::Error;

use super::field::NumericField;

/// Which side of the scale is dangerous for a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Temperature, vibration
    HigherIsWorse,
    /// Oil life, tyre health, battery health, brake pads, fuel efficiency
    LowerIsWorse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensor {
    EngineTemperatureC,
    VibrationsLevel,
    OilLifePercent,
    BatteryHealthPercent,
    AmbientTempC,
    BrakePadThicknessMm,
    TyreHealthPercent,
    FuelEfficiencyKmpl,
}

impl Sensor {
    pub const ALL: [Sensor; 8] = [
        Sensor::EngineTemperatureC,
        Sensor::VibrationsLevel,
        Sensor::OilLifePercent,
        Sensor::BatteryHealthPercent,
        Sensor::AmbientTempC,
        Sensor::BrakePadThicknessMm,
        Sensor::TyreHealthPercent,
        Sensor::FuelEfficiencyKmpl,
    ];

    /// Record field holding this sensor's reading
    pub fn field(&self) -> NumericField {
        match self {
            Sensor::EngineTemperatureC => NumericField::EngineTemperatureC,
            Sensor::VibrationsLevel => NumericField::VibrationsLevel,
            Sensor::OilLifePercent => NumericField::OilLifePercent,
            Sensor::BatteryHealthPercent => NumericField::BatteryHealthPercent,
            Sensor::AmbientTempC => NumericField::AmbientTempC,
            Sensor::BrakePadThicknessMm => NumericField::BrakePadThicknessMm,
            Sensor::TyreHealthPercent => NumericField::TyreHealthPercent,
            Sensor::FuelEfficiencyKmpl => NumericField::FuelEfficiencyKmpl,
        }
    }

    pub fn from_field(field: NumericField) -> Option<Sensor> {
        Sensor::ALL.into_iter().find(|s| s.field() == field)
    }

    pub fn name(&self) -> &'static str {
        self.field().name()
    }

    /// Human-readable label with unit
    pub fn label(&self) -> &'static str {
        match self {
            Sensor::EngineTemperatureC => "Engine Temp (°C)",
            Sensor::VibrationsLevel => "Vibration Level",
            Sensor::OilLifePercent => "Oil Life (%)",
            Sensor::BatteryHealthPercent => "Battery Health (%)",
            Sensor::AmbientTempC => "Ambient Temp (°C)",
            Sensor::BrakePadThicknessMm => "Brake Pad (mm)",
            Sensor::TyreHealthPercent => "Tyre Health (%)",
            Sensor::FuelEfficiencyKmpl => "Fuel Efficiency (kmpl)",
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Sensor::EngineTemperatureC | Sensor::VibrationsLevel | Sensor::AmbientTempC => {
                Direction::HigherIsWorse
            }
            _ => Direction::LowerIsWorse,
        }
    }

    /// Physically plausible input range (inclusive)
    pub fn plausible_range(&self) -> (f64, f64) {
        match self {
            Sensor::EngineTemperatureC => (60.0, 140.0),
            Sensor::VibrationsLevel => (0.0, 10.0),
            Sensor::OilLifePercent => (0.0, 100.0),
            Sensor::BatteryHealthPercent => (0.0, 100.0),
            Sensor::AmbientTempC => (-10.0, 50.0),
            Sensor::BrakePadThicknessMm => (1.0, 30.0),
            Sensor::TyreHealthPercent => (0.0, 100.0),
            Sensor::FuelEfficiencyKmpl => (1.0, 12.0),
        }
    }

    /// Clamp a reading into the plausible range
    pub fn clamp_reading(&self, value: f64) -> f64 {
        let (min, max) = self.plausible_range();
        value.clamp(min, max)
    }
}

impl FromStr for Sensor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field: NumericField = s.parse()?;
        Sensor::from_field(field).ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

impl std::fmt::Display for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_round_trip() {
        for sensor in Sensor::ALL {
            assert_eq!(Sensor::from_field(sensor.field()), Some(sensor));
        }
        assert_eq!(Sensor::from_field(NumericField::TotalKmRun), None);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(Sensor::EngineTemperatureC.clamp_reading(145.0), 140.0);
        assert_eq!(Sensor::OilLifePercent.clamp_reading(-3.0), 0.0);
        assert_eq!(Sensor::VibrationsLevel.clamp_reading(4.2), 4.2);
    }

    #[test]
    fn test_directions() {
        assert_eq!(Sensor::VibrationsLevel.direction(), Direction::HigherIsWorse);
        assert_eq!(Sensor::BrakePadThicknessMm.direction(), Direction::LowerIsWorse);
    }
}
