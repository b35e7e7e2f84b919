//! End-to-end tests over the sample dataset and model artifact

use std::path::PathBuf;

use tempfile::tempdir;
use truckcare_app::app::{
    get_category_options, get_dashboard, get_history, get_records, predict_request,
    PredictionRequest, PredictionServiceError,
};
use truckcare_app::{AppContext, Config};
use truckcare_domain::model::{CategoricalField, Sensor};
use truckcare_types::{HealthBadge, RiskBucket};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures")
        .join(name)
}

fn fixture_config() -> Config {
    Config {
        dataset_path: Some(fixture("sample_history.csv")),
        model_path: Some(fixture("sample_model.json")),
        ..Default::default()
    }
}

fn context() -> AppContext {
    truckcare_app::logging::init_test();
    AppContext::initialize(fixture_config()).unwrap()
}

fn overrides(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_context_loads_fixtures() {
    let ctx = context();
    assert_eq!(ctx.dataset().len(), 6);
    assert_eq!(ctx.dataset().distinct_plates(), 3);
    let pipeline = ctx.pipeline().unwrap();
    assert_eq!(pipeline.version(), "rf-fixture-1");
    assert_eq!(pipeline.encoder().dimension(), 8);
}

#[test]
fn test_predict_autofilled_healthy_truck() {
    let ctx = context();
    let request = PredictionRequest {
        plate: Some("mh12ab1234".to_string()),
        ..Default::default()
    };
    let result = predict_request(&ctx, &request).unwrap();

    assert_eq!(result.plate, "mh12ab1234");
    assert_eq!(result.predicted_days, 65.0);
    assert_eq!(result.predicted_hours, 65.0 * 24.0);
    assert_eq!(result.risk_bucket, RiskBucket::Low);
    assert!(result
        .sensor_badges
        .values()
        .all(|b| *b == HealthBadge::Healthy));
    assert_eq!(result.model_version, "rf-fixture-1");
}

#[test]
fn test_hot_engine_low_oil_is_critical() {
    let ctx = context();
    let request = PredictionRequest {
        plate: Some("MH12AB1234".to_string()),
        input: None,
        overrides: overrides(&[("engine_temperature_c", "145"), ("oil_life_percent", "8")]),
    };
    let result = predict_request(&ctx, &request).unwrap();

    assert_eq!(result.predicted_days, 9.0);
    assert_eq!(result.risk_bucket, RiskBucket::Critical);
    assert_eq!(
        result.sensor_badges[&Sensor::EngineTemperatureC],
        HealthBadge::Critical
    );
    assert_eq!(
        result.sensor_badges[&Sensor::OilLifePercent],
        HealthBadge::Critical
    );
    assert_eq!(result.range_warnings.len(), 1);
    assert_eq!(result.range_warnings[0].clamped_to, 140.0);
}

#[test]
fn test_unknown_plate_has_no_history_but_predicts() {
    let ctx = context();
    assert!(get_history(&ctx, "XYZ123", None).is_empty());

    let request = PredictionRequest {
        plate: Some("XYZ123".to_string()),
        ..Default::default()
    };
    let result = predict_request(&ctx, &request).unwrap();
    assert!(result.predicted_days >= 0.0);
    assert!(result
        .sensor_badges
        .values()
        .all(|b| *b == HealthBadge::Unknown));
}

#[test]
fn test_invalid_override_rejected() {
    let ctx = context();
    let request = PredictionRequest {
        plate: Some("MH12AB1234".to_string()),
        input: None,
        overrides: overrides(&[("coolant_level", "3")]),
    };
    assert!(matches!(
        predict_request(&ctx, &request),
        Err(PredictionServiceError::InvalidInput(_))
    ));
}

#[test]
fn test_history_most_recent_first_with_limit() {
    let ctx = context();
    let rows = get_history(&ctx, " mh12ab1234 ", None);
    let ids: Vec<_> = rows.iter().filter_map(|r| r.record_id.as_deref()).collect();
    assert_eq!(ids, vec!["R005", "R002", "R001"]);

    assert_eq!(get_history(&ctx, "MH12AB1234", Some(1)).len(), 1);
}

#[test]
fn test_records_paged_in_file_order() {
    let ctx = context();
    let page = get_records(&ctx, 0, None);
    assert_eq!(page.total, 6);
    let ids: Vec<_> = page.records.iter().filter_map(|r| r.record_id.as_deref()).collect();
    assert_eq!(ids, vec!["R001", "R002", "R003", "R004", "R005", "R006"]);

    let page = get_records(&ctx, 4, Some(10));
    let ids: Vec<_> = page.records.iter().filter_map(|r| r.record_id.as_deref()).collect();
    assert_eq!(ids, vec!["R005", "R006"]);
    assert_eq!(page.offset, 4);

    assert!(get_records(&ctx, 10, Some(5)).records.is_empty());
}

#[test]
fn test_dashboard_over_fixture() {
    let ctx = context();
    let stats = get_dashboard(&ctx).unwrap();
    assert_eq!(stats.record_count, 6);
    assert_eq!(stats.distinct_plates, 3);
    assert!((stats.mean_days_until_service.unwrap() - 193.0 / 6.0).abs() < 1e-9);
    assert!((stats.critical_fraction.unwrap() - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(stats.risk_distribution[&RiskBucket::Medium], 1);
    assert_eq!(stats.risk_distribution[&RiskBucket::Low], 1);
    assert!(stats.mean_predicted_days.unwrap() >= 0.0);
    assert_eq!(stats.temperature_vibration_heatmap.total(), 6);
}

#[test]
fn test_category_options() {
    let ctx = context();
    let options = get_category_options(&ctx);
    let routes = options
        .iter()
        .find(|o| o.field == CategoricalField::RouteType)
        .unwrap();
    assert_eq!(routes.values, vec!["City", "Highway", "Mixed"]);
}

#[test]
fn test_missing_model_keeps_queries_working() {
    truckcare_app::logging::init_test();
    let dir = tempdir().unwrap();
    let config = Config {
        model_path: Some(dir.path().join("absent.json")),
        ..fixture_config()
    };
    let ctx = AppContext::initialize(config).unwrap();
    assert!(!ctx.model_state().is_ready());

    let request = PredictionRequest {
        plate: Some("MH12AB1234".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        predict_request(&ctx, &request),
        Err(PredictionServiceError::ModelUnavailable(_))
    ));
    assert_eq!(get_history(&ctx, "MH12AB1234", None).len(), 3);
    let stats = get_dashboard(&ctx).unwrap();
    assert_eq!(stats.mean_predicted_days, None);
}

#[test]
fn test_missing_dataset_is_empty() {
    truckcare_app::logging::init_test();
    let dir = tempdir().unwrap();
    let config = Config {
        dataset_path: Some(dir.path().join("absent.csv")),
        ..fixture_config()
    };
    let ctx = AppContext::initialize(config).unwrap();
    assert!(ctx.dataset().is_empty());
    assert_eq!(get_dashboard(&ctx).unwrap().record_count, 0);
}

#[test]
fn test_threshold_profile_applied() {
    truckcare_app::logging::init_test();
    let config = Config {
        threshold_profile: Some(fixture("strict_profile.toml")),
        ..fixture_config()
    };
    let ctx = AppContext::initialize(config).unwrap();
    assert_eq!(ctx.risk().thresholds().critical_max_days, 20.0);
    assert_eq!(
        ctx.sensors().grade(Sensor::EngineTemperatureC, Some(112.0)),
        HealthBadge::Critical
    );
}
