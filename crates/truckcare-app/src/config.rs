//! Configuration management for truckcare
//!
//! Config stored at: ~/.config/truckcare/config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use truckcare_domain::service::{default_rules, DashboardConfig, RiskThresholds, SensorRule};
use truckcare_types::{ConfigError, OutputFormat, Result};

const APP_DIR: &str = "truckcare";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Historical dataset CSV (defaults to the data directory)
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,

    /// Model artifact JSON (defaults to the data directory)
    #[serde(default)]
    pub model_path: Option<PathBuf>,

    /// Optional TOML profile overriding thresholds below
    #[serde(default)]
    pub threshold_profile: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    #[serde(default)]
    pub risk: RiskThresholds,

    /// Raise the risk bucket to at least High when any sensor is Critical
    #[serde(default = "default_true")]
    pub escalate_on_critical_sensor: bool,

    #[serde(default = "default_rules")]
    pub sensor_rules: Vec<SensorRule>,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Rows shown by `history` when no limit is given
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_true() -> bool {
    true
}

fn default_history_limit() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: None,
            model_path: None,
            threshold_profile: None,
            output_format: default_output_format(),
            risk: RiskThresholds::default(),
            escalate_on_critical_sensor: true,
            sensor_rules: default_rules(),
            dashboard: DashboardConfig::default(),
            history_limit: default_history_limit(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(data_dir)
    }

    /// Resolved dataset path
    pub fn dataset_path(&self) -> Result<PathBuf> {
        match &self.dataset_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("truck_history.csv")),
        }
    }

    /// Resolved model artifact path
    pub fn model_path(&self) -> Result<PathBuf> {
        match &self.model_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("model.json")),
        }
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

fn display_path(path: Result<PathBuf>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|_| "(error)".to_string())
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Truckcare Configuration")?;
        writeln!(f, "=======================")?;
        writeln!(f)?;
        writeln!(f, "Dataset:        {}", display_path(self.dataset_path()))?;
        writeln!(f, "Model:          {}", display_path(self.model_path()))?;
        writeln!(
            f,
            "Profile:        {}",
            self.threshold_profile
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        )?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(
            f,
            "Risk (days):    critical <= {}, high <= {}, medium <= {}",
            self.risk.critical_max_days, self.risk.high_max_days, self.risk.medium_max_days
        )?;
        writeln!(f, "Escalate:       {}", self.escalate_on_critical_sensor)?;
        writeln!(f, "History limit:  {}", self.history_limit)?;
        writeln!(f)?;
        writeln!(f, "Sensor rules:")?;
        for rule in &self.sensor_rules {
            writeln!(
                f,
                "  {:<24} warning {:>6}  critical {:>6}",
                rule.sensor.name(),
                rule.warning,
                rule.critical
            )?;
        }

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
