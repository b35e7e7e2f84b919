//! JSON model artifact loader

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::info;

use truckcare_domain::service::{MaintenancePipeline, ModelArtifact};
use truckcare_types::{Error, Result};

/// Hex SHA-256 of the artifact bytes
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Load and validate a pipeline from an artifact file
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<MaintenancePipeline> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    let pipeline = load_model_from_str(&content)?;
    info!(
        path = %path.display(),
        version = pipeline.version(),
        kind = pipeline.model_kind(),
        features = pipeline.encoder().dimension(),
        "loaded model artifact"
    );
    Ok(pipeline)
}

pub fn load_model_from_str(content: &str) -> Result<MaintenancePipeline> {
    let artifact: ModelArtifact = serde_json::from_str(content)?;
    MaintenancePipeline::from_artifact(&artifact, fingerprint(content.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LINEAR: &str = r#"{
        "version": "lin-1",
        "preprocess": {"transformers": [
            {"kind": "passthrough", "columns": ["km_after_last_service"]}
        ]},
        "model": {"kind": "linear", "coefficients": [-0.01], "intercept": 90.0}
    }"#;

    #[test]
    fn test_fingerprint_is_stable_hex() {
        let a = fingerprint(b"model");
        assert_eq!(a.len(), 64);
        assert_eq!(a, fingerprint(b"model"));
        assert_ne!(a, fingerprint(b"model2"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(LINEAR.as_bytes()).unwrap();

        let pipeline = load_model(file.path()).unwrap();
        assert_eq!(pipeline.version(), "lin-1");
        assert_eq!(pipeline.fingerprint(), fingerprint(LINEAR.as_bytes()));
    }

    #[test]
    fn test_missing_file() {
        let err = load_model("/nonexistent/truckcare/model.json").unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            load_model_from_str("{not json"),
            Err(Error::Json(_))
        ));
    }
}
