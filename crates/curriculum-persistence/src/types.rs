use chrono::{DateTime, Utc};
use curriculum_core::PlanState;
use serde::{Deserialize, Serialize};

/// Current state file schema version.
///
/// The loader rejects files with a higher version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// On-disk form of a session: the plan state plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateFile {
    pub schema_version: u32,
    /// RFC 3339 timestamp of the last save.
    pub saved_at: String,
    /// SHA-256 of the exam catalog the plan was built against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_fingerprint: Option<String>,
    #[serde(flatten)]
    pub state: PlanState,
}

impl StateFile {
    pub fn new(state: PlanState, catalog_fingerprint: Option<String>) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            saved_at: Utc::now().to_rfc3339(),
            catalog_fingerprint: catalog_fingerprint.filter(|value| !value.is_empty()),
            state,
        }
    }

    /// Update the save timestamp.
    pub fn touch(&mut self) {
        self.saved_at = Utc::now().to_rfc3339();
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.saved_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Whether the plan was saved against the catalog with `fingerprint`.
    ///
    /// Files without a recorded fingerprint match any catalog.
    pub fn catalog_matches(&self, fingerprint: &str) -> bool {
        self.catalog_fingerprint
            .as_deref()
            .is_none_or(|recorded| recorded == fingerprint)
    }
}
