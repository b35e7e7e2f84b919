//! Domain services

pub mod dashboard;
pub mod encoder;
pub mod history;
pub mod pipeline;
pub mod predictor;
pub mod risk;
pub mod sensor_health;

pub use dashboard::{
    DashboardAggregator, DashboardConfig, Heatmap, HeatmapGrid, HistogramBin, SummaryStats,
};
pub use encoder::{EncoderConfig, FeatureEncoder, Transformer};
pub use history::HistoryLookup;
pub use pipeline::{MaintenancePipeline, ModelArtifact, ModelState, TARGET_COLUMN};
pub use predictor::{LinearModel, ModelSpec, RandomForest, RegressionModel, Regressor};
pub use risk::{RiskClassifier, RiskThresholds};
pub use sensor_health::{default_rules, SensorHealthEvaluator, SensorRule};
