//! Prediction Service - Core Use Case for Maintenance Prediction
//!
//! This service orchestrates one prediction request:
//! 1. Build the request record (input file, history autofill or blank)
//! 2. Apply manual `field=value` overrides
//! 3. Encode and predict days until next service
//! 4. Grade sensors and classify risk
//! 5. Return the assembled result

use thiserror::Error;
use tracing::{debug, info};

use truckcare_domain::model::{PredictionResult, TruckRecord};
use truckcare_types::Error;

use crate::context::AppContext;

const HOURS_PER_DAY: f64 = 24.0;

/// Errors specific to the prediction service
#[derive(Debug, Error)]
pub enum PredictionServiceError {
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prediction failed: {0}")]
    PredictionFailed(String),
}

impl From<Error> for PredictionServiceError {
    fn from(err: Error) -> Self {
        match err {
            Error::ModelUnavailable(msg) => PredictionServiceError::ModelUnavailable(msg),
            Error::UnknownField(_) | Error::InvalidValue { .. } => {
                PredictionServiceError::InvalidInput(err.to_string())
            }
            _ => PredictionServiceError::PredictionFailed(err.to_string()),
        }
    }
}

/// What to predict for
#[derive(Debug, Clone, Default)]
pub struct PredictionRequest {
    /// Plate to look up for autofill (and to stamp on the record)
    pub plate: Option<String>,

    /// Explicit record, used instead of autofill
    pub input: Option<TruckRecord>,

    /// `(field, value)` overrides applied last
    pub overrides: Vec<(String, String)>,
}

/// Build the record to predict on
pub fn prepare_record(
    ctx: &AppContext,
    request: &PredictionRequest,
) -> Result<TruckRecord, PredictionServiceError> {
    let plate = request
        .plate
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let mut record = match (&request.input, plate) {
        (Some(input), _) => input.as_request(),
        (None, Some(plate)) => match ctx.history().autofill(plate) {
            Some(record) => {
                debug!(plate, "autofilled request from latest history row");
                record
            }
            None => {
                info!(plate, "no history for plate; starting from an empty record");
                TruckRecord::new(plate)
            }
        },
        (None, None) => TruckRecord::default(),
    };
    if let Some(plate) = plate {
        record.plate = plate.to_string();
    }

    for (field, value) in &request.overrides {
        record.set_value(field, value)?;
    }

    if record.plate.trim().is_empty() {
        return Err(PredictionServiceError::InvalidInput(
            "a truck plate is required".to_string(),
        ));
    }
    Ok(record)
}

/// Predict days until next service and classify the result
pub fn predict(
    ctx: &AppContext,
    record: &TruckRecord,
) -> Result<PredictionResult, PredictionServiceError> {
    let pipeline = ctx.pipeline()?;
    let predicted_days = pipeline.predict_days(record)?;

    let sensor_badges = ctx.sensors().evaluate(record);
    let risk_bucket = ctx
        .risk()
        .classify_with_sensors(predicted_days, &sensor_badges);
    let range_warnings = ctx.sensors().range_warnings(record);

    info!(
        plate = %record.plate,
        predicted_days,
        risk = %risk_bucket,
        "prediction complete"
    );

    Ok(PredictionResult {
        plate: record.plate.clone(),
        predicted_days,
        predicted_hours: predicted_days * HOURS_PER_DAY,
        risk_bucket,
        sensor_badges,
        range_warnings,
        model_version: pipeline.version().to_string(),
    })
}

/// Prepare and predict in one step
pub fn predict_request(
    ctx: &AppContext,
    request: &PredictionRequest,
) -> Result<PredictionResult, PredictionServiceError> {
    let record = prepare_record(ctx, request)?;
    predict(ctx, &record)
}

/// Parse `field=value` pairs from the command line
pub fn parse_overrides(pairs: &[String]) -> Result<Vec<(String, String)>, PredictionServiceError> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .filter(|(k, _)| !k.is_empty())
                .ok_or_else(|| {
                    PredictionServiceError::InvalidInput(format!(
                        "expected field=value, got '{}'",
                        pair
                    ))
                })
        })
        .collect()
}
