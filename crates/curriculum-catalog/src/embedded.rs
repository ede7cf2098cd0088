//! Default catalog data embedded at compile time.
//!
//! Used whenever neither an explicit path nor `CURRICULUM_DATA_DIR`
//! points at other files.

/// Exam catalog (`exams.csv`).
pub const EXAMS_CSV: &str = include_str!("../data/exams.csv");

/// Degree rule set (`rules.json`).
pub const RULES_JSON: &str = include_str!("../data/rules.json");

/// Origin label used in logs and errors for embedded data.
pub const EMBEDDED_ORIGIN: &str = "<embedded>";
