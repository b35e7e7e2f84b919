//! Feature encoder: record -> fixed-order feature vector
//!
//! Applies the preprocessing fitted at training time. The transformer list
//! mirrors a column transformer: output columns appear in transformer order,
//! then column order within each transformer.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use truckcare_types::{Error, Result};

use crate::model::{CategoricalField, FeatureVector, NumericField, Sensor, TruckRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardColumn {
    pub field: NumericField,
    pub mean: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxColumn {
    pub field: NumericField,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotColumn {
    pub field: CategoricalField,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transformer {
    StandardScaler { columns: Vec<StandardColumn> },
    MinMaxScaler { columns: Vec<MinMaxColumn> },
    Passthrough { columns: Vec<NumericField> },
    OneHot { columns: Vec<OneHotColumn> },
}

/// Preprocessing parameters fixed at training time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderConfig {
    pub transformers: Vec<Transformer>,
}

/// How one numeric output column is produced
#[derive(Debug, Clone)]
enum NumericStep {
    Standard { mean: f64, scale: f64 },
    MinMax { min: f64, max: f64 },
    Passthrough,
}

impl NumericStep {
    fn apply(&self, value: Option<f64>) -> f64 {
        match (self, value) {
            (NumericStep::Standard { mean, scale }, Some(v)) => (v - mean) / scale,
            (NumericStep::MinMax { min, max }, Some(v)) => (v - min) / (max - min),
            (NumericStep::Passthrough, Some(v)) => v,
            // Missing input imputes the training centre of the column
            (NumericStep::Standard { .. }, None) => 0.0,
            (NumericStep::MinMax { .. }, None) => 0.5,
            (NumericStep::Passthrough, None) => 0.0,
        }
    }
}

#[derive(Debug, Clone)]
enum Block {
    Numeric {
        field: NumericField,
        step: NumericStep,
    },
    OneHot {
        field: CategoricalField,
        index: HashMap<String, usize>,
        width: usize,
    },
}

/// Validated, ready-to-apply encoder
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    blocks: Vec<Block>,
    feature_names: Vec<String>,
}

impl FeatureEncoder {
    pub fn new(config: &EncoderConfig) -> Result<Self> {
        let mut blocks = Vec::new();
        let mut feature_names = Vec::new();
        let mut seen_numeric = HashSet::new();
        let mut seen_categorical = HashSet::new();

        for transformer in &config.transformers {
            match transformer {
                Transformer::StandardScaler { columns } => {
                    for col in columns {
                        claim(&mut seen_numeric, col.field, col.field.name())?;
                        if !col.mean.is_finite() || !col.scale.is_finite() || col.scale <= 0.0 {
                            return Err(Error::InvalidArtifact(format!(
                                "standard scaler for {} has mean {} and scale {}",
                                col.field, col.mean, col.scale
                            )));
                        }
                        feature_names.push(col.field.name().to_string());
                        blocks.push(Block::Numeric {
                            field: col.field,
                            step: NumericStep::Standard {
                                mean: col.mean,
                                scale: col.scale,
                            },
                        });
                    }
                }
                Transformer::MinMaxScaler { columns } => {
                    for col in columns {
                        claim(&mut seen_numeric, col.field, col.field.name())?;
                        if !col.min.is_finite() || !col.max.is_finite() || col.max <= col.min {
                            return Err(Error::InvalidArtifact(format!(
                                "min-max scaler for {} has range {}..{}",
                                col.field, col.min, col.max
                            )));
                        }
                        feature_names.push(col.field.name().to_string());
                        blocks.push(Block::Numeric {
                            field: col.field,
                            step: NumericStep::MinMax {
                                min: col.min,
                                max: col.max,
                            },
                        });
                    }
                }
                Transformer::Passthrough { columns } => {
                    for field in columns {
                        claim(&mut seen_numeric, *field, field.name())?;
                        feature_names.push(field.name().to_string());
                        blocks.push(Block::Numeric {
                            field: *field,
                            step: NumericStep::Passthrough,
                        });
                    }
                }
                Transformer::OneHot { columns } => {
                    for col in columns {
                        claim(&mut seen_categorical, col.field, col.field.name())?;
                        let mut index = HashMap::new();
                        for (pos, category) in col.categories.iter().enumerate() {
                            if index.insert(category.trim().to_string(), pos).is_some() {
                                return Err(Error::InvalidArtifact(format!(
                                    "duplicate category '{}' for {}",
                                    category, col.field
                                )));
                            }
                            feature_names.push(format!("{}={}", col.field, category.trim()));
                        }
                        blocks.push(Block::OneHot {
                            field: col.field,
                            index,
                            width: col.categories.len(),
                        });
                    }
                }
            }
        }

        if feature_names.is_empty() {
            return Err(Error::InvalidArtifact(
                "encoder produces no feature columns".to_string(),
            ));
        }

        Ok(Self {
            blocks,
            feature_names,
        })
    }

    /// Output dimensionality
    pub fn dimension(&self) -> usize {
        self.feature_names.len()
    }

    /// Name of each output column, in order
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Encode a record. Never fails: unseen or missing categories become an
    /// all-zero indicator block, missing numbers are imputed, and sensor
    /// readings are clamped into their plausible range.
    pub fn encode(&self, record: &TruckRecord) -> FeatureVector {
        let mut values = Vec::with_capacity(self.dimension());
        for block in &self.blocks {
            match block {
                Block::Numeric { field, step } => {
                    let raw = record.numeric(*field);
                    let value = match Sensor::from_field(*field) {
                        Some(sensor) => raw.map(|v| sensor.clamp_reading(v)),
                        None => raw,
                    };
                    values.push(step.apply(value));
                }
                Block::OneHot {
                    field,
                    index,
                    width,
                } => {
                    let start = values.len();
                    values.resize(start + width, 0.0);
                    if let Some(pos) = record.categorical(*field).and_then(|c| index.get(c)) {
                        values[start + pos] = 1.0;
                    }
                }
            }
        }
        FeatureVector::new(values)
    }
}

fn claim<T: std::hash::Hash + Eq>(seen: &mut HashSet<T>, key: T, name: &str) -> Result<()> {
    if !seen.insert(key) {
        return Err(Error::InvalidArtifact(format!(
            "column {} appears in more than one transformer",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> EncoderConfig {
        EncoderConfig {
            transformers: vec![
                Transformer::StandardScaler {
                    columns: vec![
                        StandardColumn {
                            field: NumericField::EngineTemperatureC,
                            mean: 100.0,
                            scale: 20.0,
                        },
                        StandardColumn {
                            field: NumericField::OilLifePercent,
                            mean: 50.0,
                            scale: 25.0,
                        },
                    ],
                },
                Transformer::Passthrough {
                    columns: vec![NumericField::CurrentQueueLength],
                },
                Transformer::OneHot {
                    columns: vec![OneHotColumn {
                        field: CategoricalField::RouteType,
                        categories: vec![
                            "City".to_string(),
                            "Highway".to_string(),
                            "Mixed".to_string(),
                        ],
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_dimension_and_names() {
        let encoder = FeatureEncoder::new(&sample_config()).unwrap();
        assert_eq!(encoder.dimension(), 6);
        assert_eq!(
            encoder.feature_names(),
            &[
                "engine_temperature_c",
                "oil_life_percent",
                "current_queue_length",
                "route_type=City",
                "route_type=Highway",
                "route_type=Mixed",
            ]
        );
    }

    #[test]
    fn test_encode_known_values() {
        let encoder = FeatureEncoder::new(&sample_config()).unwrap();
        let mut record = TruckRecord::new("MH12AB1234");
        record.engine_temperature_c = Some(120.0);
        record.oil_life_percent = Some(25.0);
        record.current_queue_length = Some(3);
        record.route_type = Some("Highway".to_string());

        let fv = encoder.encode(&record);
        assert_eq!(fv.values, vec![1.0, -1.0, 3.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_unseen_category_is_all_zero() {
        let encoder = FeatureEncoder::new(&sample_config()).unwrap();
        let mut record = TruckRecord::new("MH12AB1234");
        record.route_type = Some("Off-road".to_string());
        let fv = encoder.encode(&record);
        assert_eq!(fv.len(), 6);
        assert_eq!(&fv.values[3..], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_missing_values_imputed() {
        let encoder = FeatureEncoder::new(&sample_config()).unwrap();
        let fv = encoder.encode(&TruckRecord::new("MH12AB1234"));
        assert_eq!(fv.values, vec![0.0; 6]);
    }

    #[test]
    fn test_sensor_clamped_before_scaling() {
        let encoder = FeatureEncoder::new(&sample_config()).unwrap();
        let mut record = TruckRecord::new("MH12AB1234");
        record.engine_temperature_c = Some(400.0);
        let fv = encoder.encode(&record);
        // clamped to 140 -> (140 - 100) / 20
        assert_eq!(fv.values[0], 2.0);
    }

    #[test]
    fn test_dimension_independent_of_categories() {
        let encoder = FeatureEncoder::new(&sample_config()).unwrap();
        for route in [None, Some("City"), Some("Mixed"), Some("Desert")] {
            let mut record = TruckRecord::new("X");
            record.route_type = route.map(str::to_string);
            assert_eq!(encoder.encode(&record).len(), encoder.dimension());
        }
    }

    #[test]
    fn test_rejects_zero_scale() {
        let config = EncoderConfig {
            transformers: vec![Transformer::StandardScaler {
                columns: vec![StandardColumn {
                    field: NumericField::TotalKmRun,
                    mean: 1.0,
                    scale: 0.0,
                }],
            }],
        };
        assert!(matches!(
            FeatureEncoder::new(&config),
            Err(Error::InvalidArtifact(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_column() {
        let config = EncoderConfig {
            transformers: vec![
                Transformer::Passthrough {
                    columns: vec![NumericField::TotalKmRun],
                },
                Transformer::Passthrough {
                    columns: vec![NumericField::TotalKmRun],
                },
            ],
        };
        assert!(FeatureEncoder::new(&config).is_err());
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "transformers": [
                {"kind": "min_max_scaler", "columns": [{"field": "tyre_health_percent", "min": 0, "max": 100}]},
                {"kind": "one_hot", "columns": [{"field": "load_profile", "categories": ["Light", "Heavy"]}]}
            ]
        }"#;
        let config: EncoderConfig = serde_json::from_str(json).unwrap();
        let encoder = FeatureEncoder::new(&config).unwrap();
        let mut record = TruckRecord::new("X");
        record.tyre_health_percent = Some(25.0);
        record.load_profile = Some("Heavy".to_string());
        assert_eq!(encoder.encode(&record).values, vec![0.25, 0.0, 1.0]);
    }
}
