//! Query Service - Read-only access to the loaded dataset
//!
//! - Per-truck service history
//! - Paged browsing of the whole dataset
//! - Fleet dashboard statistics
//! - Category options for manual entry

use serde::Serialize;
use tracing::warn;

use truckcare_domain::model::{CategoricalField, TruckRecord};
use truckcare_domain::service::SummaryStats;
use truckcare_types::Result;

use crate::context::AppContext;

/// Rows for a plate, most recent first, capped at `limit`
/// (the configured default when `None`)
pub fn get_history(ctx: &AppContext, plate: &str, limit: Option<usize>) -> Vec<TruckRecord> {
    let limit = limit.unwrap_or(ctx.config().history_limit);
    ctx.history()
        .find_by_plate(plate)
        .into_iter()
        .take(limit)
        .cloned()
        .collect()
}

/// One page of the dataset in load order
#[derive(Debug, Clone, Serialize)]
pub struct RecordPage {
    pub total: usize,
    pub offset: usize,
    pub records: Vec<TruckRecord>,
}

/// Rows `offset..offset + limit` of the dataset in file order
/// (`history_limit` rows when `limit` is `None`)
pub fn get_records(ctx: &AppContext, offset: usize, limit: Option<usize>) -> RecordPage {
    let limit = limit.unwrap_or(ctx.config().history_limit);
    let records = ctx.dataset().records();
    RecordPage {
        total: records.len(),
        offset,
        records: records.iter().skip(offset).take(limit).cloned().collect(),
    }
}

/// Fleet summary. Model predictions for every row are included when a
/// model is loaded.
pub fn get_dashboard(ctx: &AppContext) -> Result<SummaryStats> {
    let predicted = match ctx.pipeline() {
        Ok(pipeline) => Some(
            ctx.dataset()
                .records()
                .iter()
                .map(|r| pipeline.predict_days(&r.as_request()))
                .collect::<Result<Vec<f64>>>()?,
        ),
        Err(e) => {
            warn!(error = %e, "dashboard computed without model predictions");
            None
        }
    };

    Ok(ctx.dashboard().aggregate(ctx.dataset(), predicted.as_deref()))
}

/// Selectable values for one categorical field
#[derive(Debug, Clone, Serialize)]
pub struct CategoryOptions {
    pub field: CategoricalField,
    pub values: Vec<String>,
}

/// Distinct values seen in the dataset for every categorical field
pub fn get_category_options(ctx: &AppContext) -> Vec<CategoryOptions> {
    let history = ctx.history();
    CategoricalField::ALL
        .iter()
        .map(|&field| CategoryOptions {
            field,
            values: history.distinct_categories(field),
        })
        .collect()
}

/// Known plates, sorted
pub fn get_plates(ctx: &AppContext) -> Vec<String> {
    ctx.history()
        .plates()
        .into_iter()
        .map(str::to_string)
        .collect()
}
