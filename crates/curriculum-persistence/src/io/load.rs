//! State loading.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{PersistenceError, Result};
use crate::types::{CURRENT_SCHEMA_VERSION, StateFile};

/// Load a study plan session from a JSON state file.
pub fn load_state(path: &Path) -> Result<StateFile> {
    let text = fs::read_to_string(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    let state = parse_state(&text, path)?;
    tracing::info!("Loaded study plan from {}", path.display());
    Ok(state)
}

/// Parse state file text, checking the schema version before the payload.
pub fn parse_state(text: &str, path: &Path) -> Result<StateFile> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| PersistenceError::Deserialization {
            path: path.to_path_buf(),
            source,
        })?;

    let Some(object) = value.as_object() else {
        return Err(PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "expected a JSON object".to_string(),
        });
    };

    let version = object
        .get("schema_version")
        .and_then(Value::as_u64)
        .ok_or_else(|| PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "missing schema_version".to_string(),
        })?;
    let version = u32::try_from(version).unwrap_or(u32::MAX);

    if version > CURRENT_SCHEMA_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: version,
            max_supported: CURRENT_SCHEMA_VERSION,
            path: path.to_path_buf(),
        });
    }

    serde_json::from_value(value).map_err(|source| PersistenceError::Deserialization {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_newer_versions() {
        let err = parse_state(r#"{"schema_version": 7}"#, Path::new("plan.json")).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::UnsupportedVersion {
                found: 7,
                max_supported: 1,
                ..
            }
        ));
        assert!(!err.is_corrupt());
    }

    #[test]
    fn missing_version_is_invalid() {
        let err = parse_state(r#"{"plan": []}"#, Path::new("plan.json")).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidFormat { .. }));
        assert!(err.is_corrupt());

        let err = parse_state("[1, 2]", Path::new("plan.json")).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidFormat { .. }));
    }

    #[test]
    fn garbage_is_a_deserialization_error() {
        let err = parse_state("not json", Path::new("plan.json")).unwrap_err();
        assert!(matches!(err, PersistenceError::Deserialization { .. }));
        assert!(err.suggestion().is_some());
    }
}
