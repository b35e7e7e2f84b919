//! Fleet-wide dashboard statistics
//!
//! Every reduction is a sum, count or bin assignment, so the result does
//! not depend on row order (up to floating point rounding of the means).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use truckcare_types::{Error, Result, RiskBucket};

use super::risk::RiskClassifier;
use crate::model::HistoricalDataset;

fn default_days_bin_width() -> f64 {
    10.0
}

fn default_max_days_bins() -> usize {
    30
}

/// Upper limit accepted for `max_days_bins`
pub const MAX_HISTOGRAM_BINS: usize = 1000;

/// 2D grid for the engine temperature x vibration heatmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    pub engine_min: f64,
    pub engine_max: f64,
    pub engine_bins: usize,
    pub vibration_min: f64,
    pub vibration_max: f64,
    pub vibration_bins: usize,
}

impl Default for HeatmapGrid {
    fn default() -> Self {
        Self {
            engine_min: 60.0,
            engine_max: 140.0,
            engine_bins: 8,
            vibration_min: 0.0,
            vibration_max: 10.0,
            vibration_bins: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_days_bin_width")]
    pub days_bin_width: f64,
    /// Bin count cap; the last bin collects everything beyond it
    #[serde(default = "default_max_days_bins")]
    pub max_days_bins: usize,
    #[serde(default)]
    pub heatmap: HeatmapGrid,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            days_bin_width: default_days_bin_width(),
            max_days_bins: default_max_days_bins(),
            heatmap: HeatmapGrid::default(),
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<()> {
        let g = &self.heatmap;
        if !(self.days_bin_width.is_finite() && self.days_bin_width > 0.0) {
            return Err(Error::InvalidThresholds(format!(
                "days bin width must be positive, got {}",
                self.days_bin_width
            )));
        }
        if self.max_days_bins == 0 || self.max_days_bins > MAX_HISTOGRAM_BINS {
            return Err(Error::InvalidThresholds(format!(
                "days histogram needs 1..={} bins, got {}",
                MAX_HISTOGRAM_BINS, self.max_days_bins
            )));
        }
        if g.engine_bins == 0
            || g.vibration_bins == 0
            || !(g.engine_max > g.engine_min)
            || !(g.vibration_max > g.vibration_min)
        {
            return Err(Error::InvalidThresholds(
                "heatmap grid needs non-empty ranges and at least one bin per axis".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    /// Open-ended last bin: counts every value at or above `start`
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub overflow: bool,
}

/// Row counts with `counts[engine_bin][vibration_bin]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    pub engine_edges: Vec<f64>,
    pub vibration_edges: Vec<f64>,
    pub counts: Vec<Vec<usize>>,
}

impl Heatmap {
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub record_count: usize,
    pub distinct_plates: usize,
    pub mean_days_until_service: Option<f64>,
    pub mean_predicted_days: Option<f64>,
    /// Share of trucks whose latest row classifies as Critical
    pub critical_fraction: Option<f64>,
    pub risk_distribution: BTreeMap<RiskBucket, usize>,
    pub mean_km_after_last_service: Option<f64>,
    pub days_histogram: Vec<HistogramBin>,
    pub temperature_vibration_heatmap: Heatmap,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardAggregator {
    config: DashboardConfig,
    classifier: RiskClassifier,
}

impl DashboardAggregator {
    pub fn new(config: DashboardConfig, classifier: RiskClassifier) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, classifier })
    }

    /// Summarise the dataset. `predicted` holds model output for the rows
    /// when a model is available.
    pub fn aggregate(&self, dataset: &HistoricalDataset, predicted: Option<&[f64]>) -> SummaryStats {
        let records = dataset.records();

        let mean_days_until_service = mean(records.iter().filter_map(|r| r.days_until_next_service));
        let mean_predicted_days = predicted.and_then(|p| mean(p.iter().copied()));
        let mean_km_after_last_service = mean(records.iter().filter_map(|r| r.km_after_last_service));

        let mut risk_distribution: BTreeMap<RiskBucket, usize> =
            RiskBucket::ALL.iter().map(|b| (*b, 0)).collect();
        let mut classified = 0usize;
        for (_, rows) in dataset.histories() {
            let latest_days = rows
                .iter()
                .find_map(|r| r.days_until_next_service.filter(|d| !d.is_nan()));
            if let Some(days) = latest_days {
                *risk_distribution
                    .entry(self.classifier.classify(days))
                    .or_insert(0) += 1;
                classified += 1;
            }
        }
        let critical_fraction = (classified > 0)
            .then(|| risk_distribution[&RiskBucket::Critical] as f64 / classified as f64);

        SummaryStats {
            record_count: records.len(),
            distinct_plates: dataset.distinct_plates(),
            mean_days_until_service,
            mean_predicted_days,
            critical_fraction,
            risk_distribution,
            mean_km_after_last_service,
            days_histogram: self.days_histogram(dataset),
            temperature_vibration_heatmap: self.heatmap(dataset),
        }
    }

    fn days_histogram(&self, dataset: &HistoricalDataset) -> Vec<HistogramBin> {
        let width = self.config.days_bin_width;
        let cap = self.config.max_days_bins - 1;
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for days in dataset
            .records()
            .iter()
            .filter_map(|r| r.days_until_next_service)
            .filter(|d| d.is_finite())
        {
            let pos = (days.max(0.0) / width).floor();
            let idx = if pos >= cap as f64 { cap } else { pos as usize };
            *counts.entry(idx).or_insert(0) += 1;
        }

        let last = match counts.keys().next_back() {
            Some(&last) => last,
            None => return Vec::new(),
        };
        (0..=last)
            .map(|idx| HistogramBin {
                start: idx as f64 * width,
                end: (idx + 1) as f64 * width,
                count: counts.get(&idx).copied().unwrap_or(0),
                overflow: idx == cap,
            })
            .collect()
    }

    fn heatmap(&self, dataset: &HistoricalDataset) -> Heatmap {
        let g = &self.config.heatmap;
        let mut counts = vec![vec![0usize; g.vibration_bins]; g.engine_bins];
        for record in dataset.records() {
            let (Some(engine), Some(vibration)) =
                (record.engine_temperature_c, record.vibrations_level)
            else {
                continue;
            };
            if engine.is_nan() || vibration.is_nan() {
                continue;
            }
            let row = bin_index(engine, g.engine_min, g.engine_max, g.engine_bins);
            let col = bin_index(vibration, g.vibration_min, g.vibration_max, g.vibration_bins);
            counts[row][col] += 1;
        }

        Heatmap {
            engine_edges: edges(g.engine_min, g.engine_max, g.engine_bins),
            vibration_edges: edges(g.vibration_min, g.vibration_max, g.vibration_bins),
            counts,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Bin for a value; out-of-grid values land in the edge bins
fn bin_index(value: f64, min: f64, max: f64, bins: usize) -> usize {
    let pos = ((value - min) / (max - min) * bins as f64).floor();
    if pos <= 0.0 {
        0
    } else {
        (pos as usize).min(bins - 1)
    }
}

fn edges(min: f64, max: f64, bins: usize) -> Vec<f64> {
    let step = (max - min) / bins as f64;
    (0..=bins).map(|i| min + step * i as f64).collect()
}
