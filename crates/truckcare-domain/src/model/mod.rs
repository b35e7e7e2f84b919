//! Domain model types

pub mod dataset;
pub mod feature;
pub mod field;
pub mod prediction;
pub mod sensor;
pub mod truck_record;

pub use dataset::{normalize_plate, HistoricalDataset};
pub use feature::FeatureVector;
pub use field::{CategoricalField, NumericField};
pub use prediction::{PredictionResult, RangeWarning, SensorBadges};
pub use sensor::{Direction, Sensor};
pub use truck_record::{parse_service_date, TruckRecord};
