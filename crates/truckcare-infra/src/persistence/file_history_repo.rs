//! File-based implementation of TruckHistoryRepository

use std::path::{Path, PathBuf};

use tracing::warn;

use truckcare_domain::model::TruckRecord;
use truckcare_domain::repository::TruckHistoryRepository;
use truckcare_types::Error;

use crate::csv_loader::load_truck_history;

/// Historical dataset stored as a CSV file
pub struct FileHistoryRepository {
    csv_path: PathBuf,
}

impl FileHistoryRepository {
    pub fn new(csv_path: PathBuf) -> Self {
        Self { csv_path }
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

impl TruckHistoryRepository for FileHistoryRepository {
    fn load_all(&self) -> Result<Vec<TruckRecord>, Error> {
        if !self.csv_path.exists() {
            warn!(
                path = %self.csv_path.display(),
                "historical dataset not found; continuing with an empty dataset"
            );
            return Ok(Vec::new());
        }
        Ok(load_truck_history(&self.csv_path)?)
    }
}
