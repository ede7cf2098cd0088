//! State saving.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{PersistenceError, Result};
use crate::types::StateFile;

/// Save a study plan session to a JSON state file.
///
/// Writes a sibling temp file first and renames it over `path`, so a
/// crash never leaves a half-written plan behind.
pub fn save_state(state: &mut StateFile, path: &Path) -> Result<()> {
    state.touch();
    let bytes = serialize_state(state)?;

    let temp_path = temp_path_for(path);

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(&bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!("Saved study plan to {}", path.display());
    Ok(())
}

/// Pretty-printed JSON with a trailing newline.
pub fn serialize_state(state: &StateFile) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(state)
        .map_err(|source| PersistenceError::Serialization { source })?;
    bytes.push(b'\n');
    Ok(bytes)
}

fn temp_path_for(path: &Path) -> std::path::PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
