use std::collections::{BTreeSet, HashMap};

use curriculum_model::{Exam, ExamLookup};
use tracing::warn;

use crate::error::Result;
use crate::exams::parse_exams_str;
use crate::hash::sha256_hex;

/// Pillar used for exams without one.
pub const DEFAULT_PILLAR: &str = "Other";

/// Subpillar used for exams without one.
pub const DEFAULT_SUBPILLAR: &str = "General";

/// Loaded exam catalog, indexed by exam identifier.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    exams: Vec<Exam>,
    index: HashMap<String, usize>,
    fingerprint: String,
}

impl Catalog {
    /// Builds a catalog keeping the first exam of every identifier.
    pub fn from_exams(exams: Vec<Exam>) -> Self {
        let mut catalog = Self::default();
        for exam in exams {
            if catalog.index.contains_key(&exam.id) {
                warn!(exam = %exam.id, "duplicate exam in catalog, keeping the first");
                continue;
            }
            catalog.index.insert(exam.id.clone(), catalog.exams.len());
            catalog.exams.push(exam);
        }
        catalog
    }

    /// Parses CSV text and records its SHA-256 fingerprint.
    pub fn from_csv(text: &str, origin: &str) -> Result<Self> {
        let mut catalog = Self::from_exams(parse_exams_str(text, origin)?);
        catalog.fingerprint = sha256_hex(text.as_bytes());
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&Exam> {
        self.index.get(id).map(|idx| &self.exams[*idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exam> {
        self.exams.iter()
    }

    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    pub fn len(&self) -> usize {
        self.exams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exams.is_empty()
    }

    /// SHA-256 of the source CSV; empty for catalogs built from values.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Sorted pillar names, with [`DEFAULT_PILLAR`] standing in for blanks.
    pub fn pillars(&self) -> Vec<&str> {
        self.exams
            .iter()
            .map(pillar_of)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Exams whose name contains `query`, ignoring case. A blank query
    /// matches everything.
    pub fn search(&self, query: &str) -> Vec<&Exam> {
        let query = query.trim().to_lowercase();
        self.exams
            .iter()
            .filter(|exam| exam.name.to_lowercase().contains(&query))
            .collect()
    }
}

pub fn pillar_of(exam: &Exam) -> &str {
    exam.pillar.as_deref().unwrap_or(DEFAULT_PILLAR)
}

pub fn subpillar_of(exam: &Exam) -> &str {
    exam.subpillar.as_deref().unwrap_or(DEFAULT_SUBPILLAR)
}

impl ExamLookup for Catalog {
    fn exam(&self, id: &str) -> Option<&Exam> {
        self.get(id)
    }
}
