//! File-based implementation of ModelRepository

use std::path::{Path, PathBuf};

use truckcare_domain::repository::ModelRepository;
use truckcare_domain::service::MaintenancePipeline;
use truckcare_types::Error;

use crate::model_loader::load_model;

/// Model artifact stored as a JSON file
pub struct FileModelRepository {
    artifact_path: PathBuf,
}

impl FileModelRepository {
    pub fn new(artifact_path: PathBuf) -> Self {
        Self { artifact_path }
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }
}

impl ModelRepository for FileModelRepository {
    fn load_pipeline(&self) -> Result<MaintenancePipeline, Error> {
        load_model(&self.artifact_path)
    }
}
