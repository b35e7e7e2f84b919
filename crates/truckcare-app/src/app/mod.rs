//! Application Layer
//!
//! Use cases that sit between the CLI and the domain/infrastructure layers:
//! - `prediction_service`: build a request record and predict maintenance timing
//! - `query_service`: history, record browsing, dashboard and category queries

pub mod prediction_service;
pub mod query_service;

pub use prediction_service::{
    parse_overrides, predict, predict_request, prepare_record, PredictionRequest,
    PredictionServiceError,
};
pub use query_service::{
    get_category_options, get_dashboard, get_history, get_plates, get_records, CategoryOptions,
    RecordPage,
};
