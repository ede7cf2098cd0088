//! Exam catalog CSV loader.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use curriculum_model::{Curriculum, DEFAULT_EXAM_CREDITS, DEFAULT_EXAM_PERIOD, Exam};
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};

const COL_NAME: &str = "Exams";
const COL_LINK: &str = "link";
const COL_CREDITS: &str = "CFU";
const COL_LANGUAGE: &str = "Language";
const COL_PERIOD: &str = "Period";
const COL_CURRICULA: &str = "ordinamento";
const COL_TABLE: &str = "table";
const COL_SSD: &str = "SSD";
const COL_PILLAR: &str = "Pillar";
const COL_SUBPILLAR: &str = "Subpillar";
/// The published catalog misspells this header; both spellings are read.
const COL_AVAILABILITY: [&str; 2] = ["avaiability", "availability"];

/// Column positions resolved from the header row.
struct Columns {
    name: usize,
    link: Option<usize>,
    credits: Option<usize>,
    language: Option<usize>,
    period: Option<usize>,
    curricula: Option<usize>,
    table: Option<usize>,
    ssd: Option<usize>,
    pillar: Option<usize>,
    subpillar: Option<usize>,
    availability: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord, origin: &str) -> Result<Self> {
        let names: Vec<String> = headers
            .iter()
            .map(|header| header.trim_matches('\u{feff}').trim().to_string())
            .collect();
        let find = |wanted: &str| names.iter().position(|name| name == wanted);
        let name = find(COL_NAME).ok_or_else(|| CatalogError::MissingColumn {
            origin: origin.to_string(),
            column: COL_NAME,
        })?;
        Ok(Self {
            name,
            link: find(COL_LINK),
            credits: find(COL_CREDITS),
            language: find(COL_LANGUAGE),
            period: find(COL_PERIOD),
            curricula: find(COL_CURRICULA),
            table: find(COL_TABLE),
            ssd: find(COL_SSD),
            pillar: find(COL_PILLAR),
            subpillar: find(COL_SUBPILLAR),
            availability: COL_AVAILABILITY.iter().find_map(|column| find(*column)),
        })
    }
}

fn field(record: &StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|idx| record.get(idx)).map_or("", str::trim)
}

fn optional(record: &StringRecord, idx: Option<usize>) -> Option<String> {
    Some(field(record, idx))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Reads a leading integer the way a lenient parser does: optional sign,
/// then digits, anything after is ignored.
fn leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

fn parse_credits(raw: &str) -> u32 {
    leading_int(raw)
        .filter(|value| *value > 0)
        .and_then(|value| u32::try_from(value).ok())
        .unwrap_or(DEFAULT_EXAM_CREDITS)
}

fn parse_period(raw: &str) -> u8 {
    leading_int(raw)
        .filter(|value| (1..=3).contains(value))
        .and_then(|value| u8::try_from(value).ok())
        .unwrap_or(DEFAULT_EXAM_PERIOD)
}

fn parse_curricula(raw: &str, exam: &str) -> Vec<Curriculum> {
    let mut curricula = Vec::new();
    for code in raw.split('|').map(str::trim).filter(|code| !code.is_empty()) {
        match code.parse::<Curriculum>() {
            Ok(curriculum) if !curricula.contains(&curriculum) => curricula.push(curriculum),
            Ok(_) => {}
            Err(_) => warn!(exam, code, "unknown curriculum code in catalog row"),
        }
    }
    curricula
}

/// Parses an exam catalog from CSV.
///
/// Rows with an empty name are skipped. Duplicate names are kept here;
/// [`crate::Catalog`] drops them.
pub fn parse_exams<R: Read>(reader: R, origin: &str) -> Result<Vec<Exam>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|source| CatalogError::Csv {
            origin: origin.to_string(),
            source,
        })?
        .clone();
    let columns = Columns::resolve(&headers, origin)?;

    let mut exams = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|source| CatalogError::Csv {
            origin: origin.to_string(),
            source,
        })?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let name = field(&record, Some(columns.name));
        if name.is_empty() {
            warn!(origin, row = row + 2, "skipping catalog row without exam name");
            continue;
        }
        let mut exam = Exam::new(name, parse_credits(field(&record, columns.credits)));
        exam.link = optional(&record, columns.link);
        exam.language = optional(&record, columns.language);
        exam.period = parse_period(field(&record, columns.period));
        exam.curricula = parse_curricula(field(&record, columns.curricula), name);
        exam.raw_table = field(&record, columns.table).to_string();
        exam.ssd = optional(&record, columns.ssd);
        exam.pillar = optional(&record, columns.pillar);
        exam.subpillar = optional(&record, columns.subpillar);
        exam.availability = optional(&record, columns.availability);
        exams.push(exam);
    }
    debug!(origin, exams = exams.len(), "parsed exam catalog");
    Ok(exams)
}

pub fn parse_exams_str(text: &str, origin: &str) -> Result<Vec<Exam>> {
    parse_exams(text.as_bytes(), origin)
}

pub fn load_exams(path: &Path) -> Result<Vec<Exam>> {
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::io(path, source))?;
    parse_exams_str(&text, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_numbers_fall_back_to_defaults() {
        assert_eq!(parse_credits("9"), 9);
        assert_eq!(parse_credits("12 CFU"), 12);
        assert_eq!(parse_credits(""), DEFAULT_EXAM_CREDITS);
        assert_eq!(parse_credits("0"), DEFAULT_EXAM_CREDITS);
        assert_eq!(parse_credits("-3"), DEFAULT_EXAM_CREDITS);
        assert_eq!(parse_period("3"), 3);
        assert_eq!(parse_period("4"), DEFAULT_EXAM_PERIOD);
        assert_eq!(parse_period("x"), DEFAULT_EXAM_PERIOD);
    }

    #[test]
    fn headers_tolerate_bom_and_padding() {
        let csv = "\u{feff}Exams , CFU,ordinamento,table,availability\nCompilers,9,F94|fba|XX,A|B,From 2026/2027\n";
        let exams = parse_exams_str(csv, "test").expect("parse catalog");
        assert_eq!(exams.len(), 1);
        let exam = &exams[0];
        assert_eq!(exam.name, "Compilers");
        assert_eq!(exam.credits, 9);
        assert_eq!(exam.curricula, vec![Curriculum::F94, Curriculum::Fba]);
        assert_eq!(exam.raw_table, "A|B");
        assert_eq!(exam.availability.as_deref(), Some("From 2026/2027"));
        assert_eq!(exam.period, DEFAULT_EXAM_PERIOD);
    }

    #[test]
    fn missing_name_column_is_an_error() {
        let err = parse_exams_str("Name,CFU\nCompilers,9\n", "test").unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingColumn {
                column: "Exams",
                ..
            }
        ));
    }

    #[test]
    fn rows_without_name_are_skipped() {
        let csv = "Exams,CFU\n,6\nCompilers,9\n,,\n";
        let exams = parse_exams_str(csv, "test").expect("parse catalog");
        let names: Vec<&str> = exams.iter().map(|exam| exam.name.as_str()).collect();
        assert_eq!(names, vec!["Compilers"]);
    }
}
