//! Truck service record

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use truckcare_types::{Error, Result};

use super::field::{CategoricalField, NumericField};
use super::sensor::Sensor;

/// One row of vehicle, sensor and workshop state for a truck.
///
/// Historical rows carry `days_until_next_service`; a live prediction
/// request leaves it empty. Every reading is optional so partially filled
/// rows and manual entries can be represented without sentinel values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruckRecord {
    #[serde(alias = "truck_number_plate")]
    pub plate: String,
    pub record_id: Option<String>,
    pub truck_id: Option<String>,

    pub vehicle_model: Option<String>,
    pub year_bought: Option<i32>,
    pub service_date: Option<NaiveDate>,
    pub last_service_date: Option<NaiveDate>,

    pub route_type: Option<String>,
    pub load_profile: Option<String>,
    pub total_km_run: Option<f64>,
    pub km_after_last_service: Option<f64>,
    pub avg_daily_km_est: Option<f64>,

    pub engine_temperature_c: Option<f64>,
    pub vibrations_level: Option<f64>,
    pub oil_life_percent: Option<f64>,
    pub battery_health_percent: Option<f64>,
    pub ambient_temp_c: Option<f64>,
    pub brake_pad_thickness_mm: Option<f64>,
    pub tyre_health_percent: Option<f64>,
    pub fuel_efficiency_kmpl: Option<f64>,

    pub service_type: Option<String>,
    pub technician_id: Option<String>,
    pub technician_experience_years: Option<f64>,
    pub current_queue_length: Option<u32>,
    pub shift_hours_remaining: Option<f64>,
    pub parts_in_stock_status: Option<String>,
    pub parts_changed_last_service: Option<String>,
    pub approx_past_services: Option<u32>,

    /// Target; present only on historical rows
    pub days_until_next_service: Option<f64>,
}

impl TruckRecord {
    pub fn new(plate: impl Into<String>) -> Self {
        Self {
            plate: plate.into(),
            ..Default::default()
        }
    }

    /// Numeric reading for a field; NaN is reported as missing
    pub fn numeric(&self, field: NumericField) -> Option<f64> {
        let value = match field {
            NumericField::YearBought => self.year_bought.map(f64::from),
            NumericField::TotalKmRun => self.total_km_run,
            NumericField::KmAfterLastService => self.km_after_last_service,
            NumericField::AvgDailyKmEst => self.avg_daily_km_est,
            NumericField::EngineTemperatureC => self.engine_temperature_c,
            NumericField::VibrationsLevel => self.vibrations_level,
            NumericField::OilLifePercent => self.oil_life_percent,
            NumericField::BatteryHealthPercent => self.battery_health_percent,
            NumericField::AmbientTempC => self.ambient_temp_c,
            NumericField::BrakePadThicknessMm => self.brake_pad_thickness_mm,
            NumericField::TyreHealthPercent => self.tyre_health_percent,
            NumericField::FuelEfficiencyKmpl => self.fuel_efficiency_kmpl,
            NumericField::TechnicianExperienceYears => self.technician_experience_years,
            NumericField::CurrentQueueLength => self.current_queue_length.map(f64::from),
            NumericField::ShiftHoursRemaining => self.shift_hours_remaining,
            NumericField::ApproxPastServices => self.approx_past_services.map(f64::from),
        };
        value.filter(|v| !v.is_nan())
    }

    /// Set a numeric reading. Integer fields reject fractional or
    /// out-of-range values.
    pub fn set_numeric(&mut self, field: NumericField, value: Option<f64>) -> Result<()> {
        let value = value.filter(|v| !v.is_nan());
        match field {
            NumericField::YearBought => {
                self.year_bought =
                    to_whole(field, value, i32::MIN as f64, i32::MAX as f64)?.map(|v| v as i32)
            }
            NumericField::CurrentQueueLength => {
                self.current_queue_length =
                    to_whole(field, value, 0.0, u32::MAX as f64)?.map(|v| v as u32)
            }
            NumericField::ApproxPastServices => {
                self.approx_past_services =
                    to_whole(field, value, 0.0, u32::MAX as f64)?.map(|v| v as u32)
            }
            NumericField::TotalKmRun => self.total_km_run = value,
            NumericField::KmAfterLastService => self.km_after_last_service = value,
            NumericField::AvgDailyKmEst => self.avg_daily_km_est = value,
            NumericField::EngineTemperatureC => self.engine_temperature_c = value,
            NumericField::VibrationsLevel => self.vibrations_level = value,
            NumericField::OilLifePercent => self.oil_life_percent = value,
            NumericField::BatteryHealthPercent => self.battery_health_percent = value,
            NumericField::AmbientTempC => self.ambient_temp_c = value,
            NumericField::BrakePadThicknessMm => self.brake_pad_thickness_mm = value,
            NumericField::TyreHealthPercent => self.tyre_health_percent = value,
            NumericField::FuelEfficiencyKmpl => self.fuel_efficiency_kmpl = value,
            NumericField::TechnicianExperienceYears => self.technician_experience_years = value,
            NumericField::ShiftHoursRemaining => self.shift_hours_remaining = value,
        }
        Ok(())
    }

    /// Categorical value for a field; blank strings are reported as missing
    pub fn categorical(&self, field: CategoricalField) -> Option<&str> {
        let value = match field {
            CategoricalField::VehicleModel => self.vehicle_model.as_deref(),
            CategoricalField::RouteType => self.route_type.as_deref(),
            CategoricalField::LoadProfile => self.load_profile.as_deref(),
            CategoricalField::ServiceType => self.service_type.as_deref(),
            CategoricalField::PartsInStockStatus => self.parts_in_stock_status.as_deref(),
            CategoricalField::PartsChangedLastService => self.parts_changed_last_service.as_deref(),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn set_categorical(&mut self, field: CategoricalField, value: Option<String>) {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        match field {
            CategoricalField::VehicleModel => self.vehicle_model = value,
            CategoricalField::RouteType => self.route_type = value,
            CategoricalField::LoadProfile => self.load_profile = value,
            CategoricalField::ServiceType => self.service_type = value,
            CategoricalField::PartsInStockStatus => self.parts_in_stock_status = value,
            CategoricalField::PartsChangedLastService => self.parts_changed_last_service = value,
        }
    }

    pub fn sensor(&self, sensor: Sensor) -> Option<f64> {
        self.numeric(sensor.field())
    }

    /// Set any field from its column name and a raw string value.
    ///
    /// An empty value clears the field. Used for manual entry and for
    /// overriding autofilled values.
    pub fn set_value(&mut self, name: &str, raw: &str) -> Result<()> {
        let raw = raw.trim();
        let key = name.trim().to_lowercase();
        let text = if raw.is_empty() { None } else { Some(raw.to_string()) };

        match key.as_str() {
            "plate" | "truck_number_plate" => self.plate = raw.to_string(),
            "record_id" => self.record_id = text,
            "truck_id" => self.truck_id = text,
            "technician_id" => self.technician_id = text,
            "service_date" => self.service_date = parse_optional_date(name, raw)?,
            "last_service_date" => self.last_service_date = parse_optional_date(name, raw)?,
            "days_until_next_service" => {
                self.days_until_next_service = parse_optional_number(name, raw)?
            }
            _ => {
                if let Ok(field) = key.parse::<NumericField>() {
                    self.set_numeric(field, parse_optional_number(name, raw)?)?;
                } else if let Ok(field) = key.parse::<CategoricalField>() {
                    self.set_categorical(field, text);
                } else {
                    return Err(Error::UnknownField(name.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Copy of this record suitable as a live prediction request
    pub fn as_request(&self) -> TruckRecord {
        TruckRecord {
            days_until_next_service: None,
            ..self.clone()
        }
    }
}

fn to_whole(field: NumericField, value: Option<f64>, min: f64, max: f64) -> Result<Option<f64>> {
    match value {
        Some(v) if v.fract() != 0.0 || v < min || v > max => Err(Error::InvalidValue {
            field: field.name().to_string(),
            value: v.to_string(),
        }),
        other => Ok(other),
    }
}

fn parse_optional_number(field: &str, raw: &str) -> Result<Option<f64>> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    raw.replace(',', "")
        .parse::<f64>()
        .map(Some)
        .map_err(|_| Error::InvalidValue {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

fn parse_optional_date(field: &str, raw: &str) -> Result<Option<NaiveDate>> {
    if raw.is_empty() {
        return Ok(None);
    }
    parse_service_date(raw).map(Some).ok_or_else(|| Error::InvalidValue {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Parse a service date, accepting date-only and date-time forms
pub fn parse_service_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];
    for fmt in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    None
}
