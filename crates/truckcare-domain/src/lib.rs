//! Domain layer for truck maintenance prediction
//!
//! Models for truck service records, the encode/predict/classify pipeline,
//! sensor grading, history lookup and fleet aggregation. Everything here is
//! pure computation over already-loaded data; file access lives in
//! `truckcare-infra`.

pub mod model;
pub mod repository;
pub mod service;
