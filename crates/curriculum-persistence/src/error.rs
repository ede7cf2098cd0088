//! Persistence error types.
//!
//! Errors carry the file involved and offer a user-facing message plus an
//! optional remediation hint.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parsable JSON that is not a state file.
    #[error("Invalid state file format: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("State file version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    #[error("Failed to serialize study plan")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read study plan from {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The temp file could not be renamed over the target.
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// True when the file exists but its content cannot be used, as opposed
    /// to I/O failures and files written by a newer version.
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat { .. } | Self::Deserialization { .. }
        )
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::InvalidFormat { path, reason } => {
                format!(
                    "The file at {} is not a valid study plan: {}",
                    path.display(),
                    reason
                )
            }
            Self::UnsupportedVersion {
                found,
                max_supported,
                ..
            } => {
                format!(
                    "This study plan was saved by a newer version \
                    (file version {found}, this version supports up to {max_supported}). \
                    Please update the application."
                )
            }
            Self::Serialization { .. } => {
                "An error occurred while saving the study plan.".to_string()
            }
            Self::Deserialization { path, .. } => {
                format!(
                    "The study plan at {} could not be read. The file may be corrupted.",
                    path.display()
                )
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }

    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::InvalidFormat { .. } | Self::Deserialization { .. } => {
                Some("Delete the file or run `studyplan reset` to start a new plan.".into())
            }
            Self::UnsupportedVersion { .. } => {
                Some("Install the latest release, or point --state at another file.".into())
            }
            Self::Serialization { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
