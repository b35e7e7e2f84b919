//! Application service layer - config, logging, context, use cases

pub mod app;
pub mod config;
pub mod context;
pub mod logging;
pub mod repository;

pub use config::Config;
pub use context::AppContext;
