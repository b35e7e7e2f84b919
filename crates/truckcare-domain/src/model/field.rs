//! Typed field identifiers for truck records

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use truckcare_types::Error;

/// Numeric columns usable as model features
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    YearBought,
    TotalKmRun,
    KmAfterLastService,
    AvgDailyKmEst,
    EngineTemperatureC,
    VibrationsLevel,
    OilLifePercent,
    BatteryHealthPercent,
    AmbientTempC,
    BrakePadThicknessMm,
    TyreHealthPercent,
    FuelEfficiencyKmpl,
    TechnicianExperienceYears,
    CurrentQueueLength,
    ShiftHoursRemaining,
    ApproxPastServices,
}

impl NumericField {
    pub const ALL: [NumericField; 16] = [
        NumericField::YearBought,
        NumericField::TotalKmRun,
        NumericField::KmAfterLastService,
        NumericField::AvgDailyKmEst,
        NumericField::EngineTemperatureC,
        NumericField::VibrationsLevel,
        NumericField::OilLifePercent,
        NumericField::BatteryHealthPercent,
        NumericField::AmbientTempC,
        NumericField::BrakePadThicknessMm,
        NumericField::TyreHealthPercent,
        NumericField::FuelEfficiencyKmpl,
        NumericField::TechnicianExperienceYears,
        NumericField::CurrentQueueLength,
        NumericField::ShiftHoursRemaining,
        NumericField::ApproxPastServices,
    ];

    /// Column name as it appears in the dataset header
    pub fn name(&self) -> &'static str {
        match self {
            NumericField::YearBought => "year_bought",
            NumericField::TotalKmRun => "total_km_run",
            NumericField::KmAfterLastService => "km_after_last_service",
            NumericField::AvgDailyKmEst => "avg_daily_km_est",
            NumericField::EngineTemperatureC => "engine_temperature_c",
            NumericField::VibrationsLevel => "vibrations_level",
            NumericField::OilLifePercent => "oil_life_percent",
            NumericField::BatteryHealthPercent => "battery_health_percent",
            NumericField::AmbientTempC => "ambient_temp_c",
            NumericField::BrakePadThicknessMm => "brake_pad_thickness_mm",
            NumericField::TyreHealthPercent => "tyre_health_percent",
            NumericField::FuelEfficiencyKmpl => "fuel_efficiency_kmpl",
            NumericField::TechnicianExperienceYears => "technician_experience_years",
            NumericField::CurrentQueueLength => "current_queue_length",
            NumericField::ShiftHoursRemaining => "shift_hours_remaining",
            NumericField::ApproxPastServices => "approx_past_services",
        }
    }

    /// Fields stored as whole numbers
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            NumericField::YearBought
                | NumericField::CurrentQueueLength
                | NumericField::ApproxPastServices
        )
    }
}

impl FromStr for NumericField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        NumericField::ALL
            .into_iter()
            .find(|f| f.name() == key)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

impl std::fmt::Display for NumericField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Categorical columns usable as one-hot encoded features
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    VehicleModel,
    RouteType,
    LoadProfile,
    ServiceType,
    PartsInStockStatus,
    PartsChangedLastService,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 6] = [
        CategoricalField::VehicleModel,
        CategoricalField::RouteType,
        CategoricalField::LoadProfile,
        CategoricalField::ServiceType,
        CategoricalField::PartsInStockStatus,
        CategoricalField::PartsChangedLastService,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CategoricalField::VehicleModel => "vehicle_model",
            CategoricalField::RouteType => "route_type",
            CategoricalField::LoadProfile => "load_profile",
            CategoricalField::ServiceType => "service_type",
            CategoricalField::PartsInStockStatus => "parts_in_stock_status",
            CategoricalField::PartsChangedLastService => "parts_changed_last_service",
        }
    }
}

impl FromStr for CategoricalField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        CategoricalField::ALL
            .into_iter()
            .find(|f| f.name() == key)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

impl std::fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
