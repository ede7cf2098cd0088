//! Resolution of the catalog and rule files.
//!
//! Precedence: explicit path, then the `CURRICULUM_DATA_DIR` directory,
//! then the embedded defaults.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use curriculum_model::RuleSet;
use tracing::info;

use crate::catalog::Catalog;
use crate::embedded::{EMBEDDED_ORIGIN, EXAMS_CSV, RULES_JSON};
use crate::error::{CatalogError, Result};
use crate::rules::parse_rules;

/// Environment variable naming a directory holding `exams.csv` and `rules.json`.
pub const DATA_ENV_VAR: &str = "CURRICULUM_DATA_DIR";

pub const EXAMS_FILE: &str = "exams.csv";
pub const RULES_FILE: &str = "rules.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Embedded,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Embedded => f.write_str(EMBEDDED_ORIGIN),
        }
    }
}

impl Source {
    /// Source text; `embedded` stands in for [`Source::Embedded`].
    fn read(&self, embedded: &'static str) -> Result<Cow<'static, str>> {
        match self {
            Source::File(path) => std::fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|source| CatalogError::io(path, source)),
            Source::Embedded => Ok(Cow::Borrowed(embedded)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DataSources {
    pub exams: Option<PathBuf>,
    pub rules: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

impl DataSources {
    /// Sources with the data directory taken from [`DATA_ENV_VAR`].
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var_os(DATA_ENV_VAR).map(PathBuf::from),
            ..Self::default()
        }
    }

    pub fn with_exams(mut self, path: Option<PathBuf>) -> Self {
        self.exams = path;
        self
    }

    pub fn with_rules(mut self, path: Option<PathBuf>) -> Self {
        self.rules = path;
        self
    }

    pub fn exams_source(&self) -> Source {
        resolve(self.exams.as_deref(), self.data_dir.as_deref(), EXAMS_FILE)
    }

    pub fn rules_source(&self) -> Source {
        resolve(self.rules.as_deref(), self.data_dir.as_deref(), RULES_FILE)
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        let source = self.exams_source();
        let origin = source.to_string();
        let catalog = Catalog::from_csv(&source.read(EXAMS_CSV)?, &origin)?;
        info!(source = %origin, exams = catalog.len(), "loaded exam catalog");
        Ok(catalog)
    }

    pub fn load_rules(&self) -> Result<RuleSet> {
        let source = self.rules_source();
        let origin = source.to_string();
        let rules = parse_rules(&source.read(RULES_JSON)?, &origin)?;
        info!(source = %origin, "loaded rule set");
        Ok(rules)
    }
}

fn resolve(explicit: Option<&Path>, data_dir: Option<&Path>, file: &str) -> Source {
    if let Some(path) = explicit {
        return Source::File(path.to_path_buf());
    }
    if let Some(dir) = data_dir {
        return Source::File(dir.join(file));
    }
    Source::Embedded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_beats_data_dir() {
        let sources = DataSources {
            exams: Some(PathBuf::from("/tmp/custom.csv")),
            rules: None,
            data_dir: Some(PathBuf::from("/data")),
        };
        assert_eq!(
            sources.exams_source(),
            Source::File(PathBuf::from("/tmp/custom.csv"))
        );
        assert_eq!(
            sources.rules_source(),
            Source::File(PathBuf::from("/data").join(RULES_FILE))
        );
        assert_eq!(DataSources::default().rules_source(), Source::Embedded);
    }
}
