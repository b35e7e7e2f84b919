//! Persistence implementations
//!
//! File-based implementations of the domain repository traits.

mod file_history_repo;
mod file_model_repo;

pub use file_history_repo::FileHistoryRepository;
pub use file_model_repo::FileModelRepository;
