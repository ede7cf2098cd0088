#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::ModelError;

/// First academic year offered by the year selector.
pub const FIRST_SELECTABLE_START_YEAR: i32 = 2014;

/// Curriculum variant (ordinamento) a student is enrolled in.
///
/// The two variants are mutually exclusive and carry different table
/// schemas and minimums.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Curriculum {
    /// Enrolled from 2025/26 onwards.
    #[default]
    #[serde(rename = "FBA")]
    Fba,
    /// Enrolled from 2014/15 to 2024/25.
    #[serde(rename = "F94")]
    F94,
}

impl Curriculum {
    pub const ALL: [Curriculum; 2] = [Curriculum::Fba, Curriculum::F94];

    /// Returns the code used in catalog rows and rule files.
    pub fn as_code(&self) -> &'static str {
        match self {
            Curriculum::Fba => "FBA",
            Curriculum::F94 => "F94",
        }
    }
}

impl fmt::Display for Curriculum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for Curriculum {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FBA" => Ok(Curriculum::Fba),
            "F94" => Ok(Curriculum::F94),
            _ => Err(ModelError::UnknownCurriculum(s.to_string())),
        }
    }
}

const MANDATORY_CODE: &str = "Obbligatori";
const FREE_ELECTIVE_CODE: &str = "Facoltativi";
const OVERFLOW_CODE: &str = "Fuori Piano";

/// A credit bucket a plan item can occupy.
///
/// Three tables exist under every curriculum; the remaining ones are
/// declared per variant by the rule set and carried as [`TableCode::Core`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableCode {
    /// Baseline mandatory items (placement test, thesis).
    Mandatory,
    /// Free electives, capped by the common rules.
    FreeElective,
    /// Items that fit nowhere; excluded from the credit total.
    Overflow,
    /// A variant-specific table such as `A` or `1`.
    Core(String),
}

impl TableCode {
    pub fn core(code: impl Into<String>) -> Result<Self, ModelError> {
        let code = code.into();
        Self::parse(&code).ok_or(ModelError::InvalidTableCode(code))
    }

    /// Parses a table code, mapping the well-known codes onto their variants.
    ///
    /// Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed {
            MANDATORY_CODE => TableCode::Mandatory,
            FREE_ELECTIVE_CODE => TableCode::FreeElective,
            OVERFLOW_CODE => TableCode::Overflow,
            other => TableCode::Core(other.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            TableCode::Mandatory => MANDATORY_CODE,
            TableCode::FreeElective => FREE_ELECTIVE_CODE,
            TableCode::Overflow => OVERFLOW_CODE,
            TableCode::Core(code) => code,
        }
    }

    pub fn is_core(&self) -> bool {
        matches!(self, TableCode::Core(_))
    }

    /// Returns true for the tables a catalog item may always be moved into.
    pub fn is_open(&self) -> bool {
        matches!(self, TableCode::FreeElective | TableCode::Overflow)
    }
}

impl fmt::Display for TableCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::core(s)
    }
}

impl Serialize for TableCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TableCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TableCode::parse(&s).ok_or_else(|| serde::de::Error::custom("table code must not be empty"))
    }
}

/// An academic year such as `2025/2026`.
///
/// The value is kept verbatim: unparsable strings are tolerated and simply
/// have no starting year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcademicYear(String);

impl AcademicYear {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn from_start(start: i32) -> Self {
        Self(format!("{start}/{}", i64::from(start) + 1))
    }

    /// The academic year ending in the current calendar year.
    pub fn current() -> Self {
        Self::from_start(chrono::Local::now().year() - 1)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer before the `/`, read like a lenient integer parse: leading
    /// digits count, trailing garbage is ignored.
    ///
    /// `None` means the year is unparsable; every comparison against it is
    /// false.
    pub fn start_year(&self) -> Option<i32> {
        let head = self.0.split('/').next()?.trim();
        let (sign, digits) = match head.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, head.strip_prefix('+').unwrap_or(head)),
        };
        let end = digits
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(digits.len(), |(idx, _)| idx);
        digits[..end].parse::<i32>().ok().map(|value| sign * value)
    }

    /// `self >= other` on starting years; false when either is unparsable.
    pub fn starts_at_or_after(&self, other: &AcademicYear) -> bool {
        match (self.start_year(), other.start_year()) {
            (Some(current), Some(threshold)) => current >= threshold,
            _ => false,
        }
    }

    /// Parity of the starting year; `None` when unparsable.
    pub fn starts_even(&self) -> Option<bool> {
        self.start_year().map(|year| year % 2 == 0)
    }

    /// Short label used in hints, e.g. `2026/27`.
    pub fn short_label(start: i32) -> String {
        format!("{start}/{:02}", (i64::from(start) + 1).rem_euclid(100))
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AcademicYear {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Academic years offered for selection, newest first.
///
/// Runs from 2014/2015 up to the year starting in `calendar_year`.
pub fn selectable_years(calendar_year: i32) -> Vec<AcademicYear> {
    (FIRST_SELECTABLE_START_YEAR..=calendar_year)
        .rev()
        .map(AcademicYear::from_start)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_year_reads_leading_digits() {
        assert_eq!(AcademicYear::new("2025/2026").start_year(), Some(2025));
        assert_eq!(AcademicYear::new(" 2024 /2025").start_year(), Some(2024));
        assert_eq!(AcademicYear::new("2023abc").start_year(), Some(2023));
        assert_eq!(AcademicYear::new("n/a").start_year(), None);
        assert_eq!(AcademicYear::new("").start_year(), None);
    }

    #[test]
    fn unparsable_years_never_compare_true() {
        let bad = AcademicYear::new("soon");
        let good = AcademicYear::new("2025/2026");
        assert!(!bad.starts_at_or_after(&good));
        assert!(!good.starts_at_or_after(&bad));
        assert!(!bad.starts_at_or_after(&bad));
    }

    #[test]
    fn table_code_parses_well_known_codes() {
        assert_eq!(TableCode::parse("Obbligatori"), Some(TableCode::Mandatory));
        assert_eq!(TableCode::parse(" Facoltativi "), Some(TableCode::FreeElective));
        assert_eq!(TableCode::parse("Fuori Piano"), Some(TableCode::Overflow));
        assert_eq!(TableCode::parse("A"), Some(TableCode::Core("A".to_string())));
        assert_eq!(TableCode::parse("  "), None);
        assert!(TableCode::core("").is_err());
    }

    #[test]
    fn curriculum_codes_are_case_insensitive() {
        assert_eq!("fba".parse::<Curriculum>().unwrap(), Curriculum::Fba);
        assert_eq!("F94".parse::<Curriculum>().unwrap(), Curriculum::F94);
        assert!("XYZ".parse::<Curriculum>().is_err());
    }

    #[test]
    fn selectable_years_are_newest_first() {
        let years = selectable_years(2016);
        let labels: Vec<&str> = years.iter().map(AcademicYear::as_str).collect();
        assert_eq!(labels, vec!["2016/2017", "2015/2016", "2014/2015"]);
        assert!(selectable_years(2010).is_empty());
    }

    #[test]
    fn short_label_uses_two_digit_end_year() {
        assert_eq!(AcademicYear::short_label(2026), "2026/27");
        assert_eq!(AcademicYear::short_label(2099), "2099/00");
    }

    #[test]
    fn largest_start_year_does_not_overflow() {
        assert_eq!(AcademicYear::short_label(i32::MAX), "2147483647/48");
        assert_eq!(
            AcademicYear::from_start(i32::MAX).as_str(),
            "2147483647/2147483648"
        );
        assert_eq!(
            AcademicYear::new("2147483647/2147483648").start_year(),
            Some(i32::MAX)
        );
    }
}
