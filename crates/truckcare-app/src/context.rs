//! Process-lifetime application context
//!
//! Built once at startup from config, dataset and model, then only
//! borrowed immutably by the services.

use tracing::{info, warn};

use truckcare_domain::model::{HistoricalDataset, TruckRecord};
use truckcare_domain::repository::{ModelRepository, TruckHistoryRepository};
use truckcare_domain::service::{
    DashboardAggregator, HistoryLookup, MaintenancePipeline, ModelState, RiskClassifier,
    SensorHealthEvaluator,
};
use truckcare_types::Result;

use crate::config::Config;
use crate::repository::{load_threshold_profile, open_history_repo, open_model_repo};

pub struct AppContext {
    config: Config,
    dataset: HistoricalDataset,
    model: ModelState,
    risk: RiskClassifier,
    sensors: SensorHealthEvaluator,
    dashboard: DashboardAggregator,
}

impl AppContext {
    /// Load dataset and model from the configured locations.
    ///
    /// A model that fails to load leaves the context usable for history
    /// and dashboard queries; prediction then reports the reason.
    pub fn initialize(config: Config) -> Result<Self> {
        let records = open_history_repo(&config)?.load_all()?;

        let model = match open_model_repo(&config)?.load_pipeline() {
            Ok(pipeline) => ModelState::Ready(pipeline),
            Err(e) => {
                warn!(error = %e, "model unavailable; predictions disabled");
                ModelState::Unavailable(e.to_string())
            }
        };

        Self::from_parts(config, records, model)
    }

    /// Assemble a context from already-loaded parts
    pub fn from_parts(config: Config, records: Vec<TruckRecord>, model: ModelState) -> Result<Self> {
        let profile = load_threshold_profile(&config)?;

        let (thresholds, rules, escalate) = match &profile {
            Some(p) => (
                p.risk_or(config.risk),
                p.apply_rules(&config.sensor_rules),
                p.escalate_on_critical_sensor
                    .unwrap_or(config.escalate_on_critical_sensor),
            ),
            None => (
                config.risk,
                config.sensor_rules.clone(),
                config.escalate_on_critical_sensor,
            ),
        };

        let risk = RiskClassifier::new(thresholds, escalate)?;
        let sensors = SensorHealthEvaluator::new(rules)?;
        let dashboard = DashboardAggregator::new(config.dashboard.clone(), risk.clone())?;

        let dataset = HistoricalDataset::new(records);
        info!(
            rows = dataset.len(),
            trucks = dataset.distinct_plates(),
            model_ready = model.is_ready(),
            "application context ready"
        );

        Ok(Self {
            config,
            dataset,
            model,
            risk,
            sensors,
            dashboard,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dataset(&self) -> &HistoricalDataset {
        &self.dataset
    }

    pub fn history(&self) -> HistoryLookup<'_> {
        HistoryLookup::new(&self.dataset)
    }

    pub fn model_state(&self) -> &ModelState {
        &self.model
    }

    /// The loaded pipeline, or `ModelUnavailable`
    pub fn pipeline(&self) -> Result<&MaintenancePipeline> {
        self.model.pipeline()
    }

    pub fn risk(&self) -> &RiskClassifier {
        &self.risk
    }

    pub fn sensors(&self) -> &SensorHealthEvaluator {
        &self.sensors
    }

    pub fn dashboard(&self) -> &DashboardAggregator {
        &self.dashboard
    }
}
