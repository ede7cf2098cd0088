//! Loaders for the exam catalog and the degree rule set.

pub mod catalog;
pub mod embedded;
pub mod error;
pub mod exams;
pub mod hash;
pub mod rules;
pub mod sources;

pub use catalog::{Catalog, DEFAULT_PILLAR, DEFAULT_SUBPILLAR, pillar_of, subpillar_of};
pub use error::{CatalogError, Result};
pub use exams::{load_exams, parse_exams, parse_exams_str};
pub use hash::sha256_hex;
pub use rules::{load_rules, parse_rules};
pub use sources::{DATA_ENV_VAR, DataSources, EXAMS_FILE, RULES_FILE, Source};

/// Loads the embedded default catalog and rule set.
pub fn load_embedded() -> Result<(Catalog, curriculum_model::RuleSet)> {
    let sources = DataSources::default();
    Ok((sources.load_catalog()?, sources.load_rules()?))
}
