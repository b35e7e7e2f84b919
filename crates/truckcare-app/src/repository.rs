//! Repository adapters for the infrastructure layer

use truckcare_infra::persistence::{FileHistoryRepository, FileModelRepository};
use truckcare_infra::ThresholdProfile;
use truckcare_types::Result;

use crate::config::Config;

/// Open file-based history repository at the configured dataset path
pub fn open_history_repo(config: &Config) -> Result<FileHistoryRepository> {
    Ok(FileHistoryRepository::new(config.dataset_path()?))
}

/// Open file-based model repository at the configured artifact path
pub fn open_model_repo(config: &Config) -> Result<FileModelRepository> {
    Ok(FileModelRepository::new(config.model_path()?))
}

/// Load the configured threshold profile, if any
pub fn load_threshold_profile(config: &Config) -> Result<Option<ThresholdProfile>> {
    config
        .threshold_profile
        .as_deref()
        .map(ThresholdProfile::load_from_file)
        .transpose()
}
