//! Degree rule-set JSON loader.

use std::path::Path;

use curriculum_model::{Curriculum, RuleSet};
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};

pub fn parse_rules(text: &str, origin: &str) -> Result<RuleSet> {
    let rules: RuleSet = serde_json::from_str(text).map_err(|source| CatalogError::Json {
        origin: origin.to_string(),
        source,
    })?;
    for curriculum in Curriculum::ALL {
        if rules.program(curriculum).is_none() {
            warn!(origin, %curriculum, "rule set has no program for curriculum");
        }
    }
    debug!(
        origin,
        programs = rules.degree_requirements.programs.len(),
        total_credits = rules.total_credits(),
        "parsed rule set"
    );
    Ok(rules)
}

pub fn load_rules(path: &Path) -> Result<RuleSet> {
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::io(path, source))?;
    parse_rules(&text, &path.display().to_string())
}
