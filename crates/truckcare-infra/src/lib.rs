//! Infrastructure layer: file loaders and repository implementations

pub mod csv_loader;
pub mod model_loader;
pub mod persistence;
pub mod threshold_profile;

pub use csv_loader::{load_truck_history, load_truck_history_from_str, CsvLoaderError};
pub use model_loader::{fingerprint, load_model, load_model_from_str};
pub use persistence::{FileHistoryRepository, FileModelRepository};
pub use threshold_profile::ThresholdProfile;
