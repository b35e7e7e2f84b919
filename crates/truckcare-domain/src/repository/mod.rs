//! Repository trait definitions for data sources

use crate::model::TruckRecord;
use crate::service::MaintenancePipeline;
use truckcare_types::Error;

/// Source of historical service rows
pub trait TruckHistoryRepository {
    /// Load every row. A missing source yields an empty list.
    fn load_all(&self) -> Result<Vec<TruckRecord>, Error>;
}

/// Source of the trained prediction pipeline
pub trait ModelRepository {
    /// Load and validate the pipeline
    fn load_pipeline(&self) -> Result<MaintenancePipeline, Error>;
}
