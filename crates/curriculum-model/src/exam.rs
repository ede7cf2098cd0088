use serde::{Deserialize, Serialize};

use crate::ids::{AcademicYear, Curriculum, TableCode};

/// Default credit weight for catalog rows without a usable value.
pub const DEFAULT_EXAM_CREDITS: u32 = 6;

/// Period used for catalog rows without a usable value.
pub const DEFAULT_EXAM_PERIOD: u8 = 1;

/// A catalog exam. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    /// Unique identifier; the catalog uses the exam name.
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub credits: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Scheduling period (four-month term), 1..=3.
    pub period: u8,
    /// Curriculum variants in which the exam is recognized.
    #[serde(default)]
    pub curricula: Vec<Curriculum>,
    /// Pipe-separated table codes, e.g. `A|B`.
    #[serde(default)]
    pub raw_table: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subpillar: Option<String>,
    /// Raw availability rule, see [`AvailabilityRule::parse`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
}

impl Exam {
    /// Creates an exam whose identifier is its name.
    pub fn new(name: impl Into<String>, credits: u32) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            link: None,
            credits,
            language: None,
            period: DEFAULT_EXAM_PERIOD,
            curricula: Vec::new(),
            raw_table: String::new(),
            ssd: None,
            pillar: None,
            subpillar: None,
            availability: None,
        }
    }

    pub fn with_tables(mut self, raw_table: impl Into<String>) -> Self {
        self.raw_table = raw_table.into();
        self
    }

    pub fn with_curricula(mut self, curricula: &[Curriculum]) -> Self {
        self.curricula = curricula.to_vec();
        self
    }

    pub fn with_availability(mut self, availability: impl Into<String>) -> Self {
        self.availability = Some(availability.into());
        self
    }

    pub fn with_period(mut self, period: u8) -> Self {
        self.period = period;
        self
    }

    pub fn with_pillar(mut self, pillar: impl Into<String>, subpillar: impl Into<String>) -> Self {
        self.pillar = Some(pillar.into());
        self.subpillar = Some(subpillar.into());
        self
    }

    /// Table codes declared by the raw table string, in declaration order.
    pub fn table_codes(&self) -> Vec<TableCode> {
        self.raw_table.split('|').filter_map(TableCode::parse).collect()
    }

    pub fn is_recognized_in(&self, curriculum: Curriculum) -> bool {
        self.curricula.contains(&curriculum)
    }

    pub fn availability_rule(&self) -> AvailabilityRule {
        AvailabilityRule::parse(self.availability.as_deref())
    }
}

/// Parsed form of an exam's availability string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityRule {
    /// Absent, blank or `enabled`.
    Always,
    /// `disabled`.
    Never,
    /// `From YYYY/YYYY`: offered from that academic year onwards.
    From(AcademicYear),
    /// Biennial course offered in years starting on an even year.
    BiennialEven,
    /// Biennial course offered in years starting on an odd year.
    BiennialOdd,
    /// Anything else. Treated as always available.
    Unrecognized(String),
}

impl AvailabilityRule {
    /// Parses an availability string (case-insensitive).
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return AvailabilityRule::Always;
        };
        let lower = raw.to_lowercase();
        if lower == "enabled" {
            return AvailabilityRule::Always;
        }
        if lower == "disabled" {
            return AvailabilityRule::Never;
        }
        if raw
            .get(..5)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("from "))
        {
            return AvailabilityRule::From(AcademicYear::new(raw[5..].trim()));
        }
        if lower.contains("biennial") {
            if lower.contains("even") {
                return AvailabilityRule::BiennialEven;
            }
            if lower.contains("odd") {
                return AvailabilityRule::BiennialOdd;
            }
        }
        AvailabilityRule::Unrecognized(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_availability_grammar() {
        assert_eq!(AvailabilityRule::parse(None), AvailabilityRule::Always);
        assert_eq!(AvailabilityRule::parse(Some("  ")), AvailabilityRule::Always);
        assert_eq!(AvailabilityRule::parse(Some("Enabled")), AvailabilityRule::Always);
        assert_eq!(AvailabilityRule::parse(Some("DISABLED")), AvailabilityRule::Never);
        assert_eq!(
            AvailabilityRule::parse(Some("From 2026/2027")),
            AvailabilityRule::From(AcademicYear::new("2026/2027"))
        );
        assert_eq!(
            AvailabilityRule::parse(Some("from 2026/2027")),
            AvailabilityRule::From(AcademicYear::new("2026/2027"))
        );
        assert_eq!(
            AvailabilityRule::parse(Some("Biennial (Even)")),
            AvailabilityRule::BiennialEven
        );
        assert_eq!(
            AvailabilityRule::parse(Some("biennial (odd)")),
            AvailabilityRule::BiennialOdd
        );
        assert_eq!(
            AvailabilityRule::parse(Some("Biennial")),
            AvailabilityRule::Unrecognized("Biennial".to_string())
        );
    }

    #[test]
    fn table_codes_skip_blank_segments() {
        let exam = Exam::new("Compilers", 6).with_tables(" A | |B");
        assert_eq!(
            exam.table_codes(),
            vec![TableCode::Core("A".into()), TableCode::Core("B".into())]
        );
        assert!(Exam::new("Empty", 6).table_codes().is_empty());
    }
}
