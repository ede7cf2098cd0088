use std::collections::{BTreeMap, HashMap};

use crate::exam::Exam;

/// Read access to the exam catalog by identifier.
///
/// A failed lookup is never an error: callers treat a missing exam as
/// having no allowed tables.
pub trait ExamLookup {
    fn exam(&self, id: &str) -> Option<&Exam>;

    fn contains_exam(&self, id: &str) -> bool {
        self.exam(id).is_some()
    }
}

impl ExamLookup for HashMap<String, Exam> {
    fn exam(&self, id: &str) -> Option<&Exam> {
        self.get(id)
    }
}

impl ExamLookup for BTreeMap<String, Exam> {
    fn exam(&self, id: &str) -> Option<&Exam> {
        self.get(id)
    }
}

/// Linear scan; fine for test fixtures and small catalogs.
impl ExamLookup for [Exam] {
    fn exam(&self, id: &str) -> Option<&Exam> {
        self.iter().find(|exam| exam.id == id)
    }
}

impl ExamLookup for Vec<Exam> {
    fn exam(&self, id: &str) -> Option<&Exam> {
        self.as_slice().exam(id)
    }
}

impl<T: ExamLookup + ?Sized> ExamLookup for &T {
    fn exam(&self, id: &str) -> Option<&Exam> {
        (**self).exam(id)
    }
}
