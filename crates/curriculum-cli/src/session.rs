//! Loaded data plus the state file of one CLI invocation.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use curriculum_catalog::{Catalog, DataSources};
use curriculum_core::{PlanManager, PlanState};
use curriculum_model::{AcademicYear, Curriculum, Locale, RuleSet};
use curriculum_persistence::{PersistenceError, StateFile, load_state, save_state};
use tracing::{info, warn};

pub struct Session {
    pub catalog: Catalog,
    pub rules: RuleSet,
    pub locale: Locale,
}

impl Session {
    pub fn new(catalog: Catalog, rules: RuleSet, locale: Locale) -> Self {
        Self {
            catalog,
            rules,
            locale,
        }
    }

    pub fn load(sources: &DataSources, locale: Locale) -> Result<Self> {
        let catalog = sources.load_catalog().context("load exam catalog")?;
        let rules = sources.load_rules().context("load degree rules")?;
        Ok(Self::new(catalog, rules, locale))
    }

    pub fn manager(&self) -> PlanManager<'_, Catalog> {
        PlanManager::new(&self.catalog, &self.rules).with_locale(self.locale)
    }

    /// A seeded plan; the year defaults to the academic year ending this
    /// calendar year.
    pub fn fresh_state(&self, year: Option<AcademicYear>, curriculum: Option<Curriculum>) -> PlanState {
        self.manager().new_state(
            year.unwrap_or_else(AcademicYear::current),
            curriculum.unwrap_or_default(),
        )
    }

    /// Reads the state file, or starts a fresh plan when there is none or
    /// it is unreadable. Files from a newer version are an error.
    pub fn open(&self, path: &Path) -> Result<PlanState> {
        if !path.exists() {
            info!("No state file at {}, starting a new plan", path.display());
            return Ok(self.fresh_state(None, None));
        }
        match load_state(path) {
            Ok(file) => {
                if !file.catalog_matches(self.catalog.fingerprint()) {
                    warn!(
                        path = %path.display(),
                        "exam catalog changed since the plan was saved"
                    );
                }
                let (state, _) = self.manager().restore(file.state);
                Ok(state)
            }
            Err(error) if error.is_corrupt() => {
                warn!(path = %path.display(), "{}", error.user_message());
                Ok(self.fresh_state(None, None))
            }
            Err(error) => Err(describe(error)),
        }
    }

    pub fn save(&self, path: &Path, state: &PlanState) -> Result<()> {
        let fingerprint = Some(self.catalog.fingerprint().to_string());
        let mut file = StateFile::new(state.clone(), fingerprint);
        save_state(&mut file, path).map_err(describe)
    }
}

fn describe(error: PersistenceError) -> anyhow::Error {
    let message = match error.suggestion() {
        Some(hint) => format!("{} {}", error.user_message(), hint),
        None => error.user_message(),
    };
    anyhow!(error).context(message)
}
