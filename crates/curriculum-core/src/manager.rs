//! Plan state and the mutation API.
//!
//! [`PlanManager`] holds only read-only collaborators; the mutable session
//! state lives in a [`PlanState`] owned by the caller. Every mutation
//! re-runs the allocator over the whole plan and returns a fresh report.

use std::collections::HashSet;

use curriculum_model::{
    AcademicYear, Curriculum, Exam, ExamLookup, Locale, PlanItem, RuleSet, TableCode,
    ValidationReport,
};
use curriculum_validate::validate_with_locale;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::allocator::allocate;
use crate::availability::{describe_next_availability, is_available};
use crate::tables::allowed_tables;

/// Session state: reference year, curriculum and the ordered plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanState {
    pub year: AcademicYear,
    pub curriculum: Curriculum,
    #[serde(default)]
    pub plan: Vec<PlanItem>,
}

impl PlanState {
    pub fn new(year: AcademicYear, curriculum: Curriculum) -> Self {
        Self {
            year,
            curriculum,
            plan: Vec::new(),
        }
    }

    pub fn item(&self, item_id: &str) -> Option<&PlanItem> {
        self.plan.iter().find(|item| item.id == item_id)
    }

    /// The plan item backed by `exam_id`, if any.
    pub fn item_for_exam(&self, exam_id: &str) -> Option<&PlanItem> {
        self.plan
            .iter()
            .find(|item| item.exam_id() == Some(exam_id))
    }

    pub fn contains_exam(&self, exam_id: &str) -> bool {
        self.item_for_exam(exam_id).is_some()
    }
}

impl Default for PlanState {
    fn default() -> Self {
        Self::new(AcademicYear::current(), Curriculum::default())
    }
}

/// A mutation that was refused. The state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanRejection {
    #[error("exam {0:?} is already in the plan")]
    DuplicateExam(String),
    #[error("{0:?} is a mandatory item and cannot be changed")]
    FixedItem(String),
    #[error("no plan item with id {0:?}")]
    UnknownItem(String),
    #[error("{item:?} cannot be placed in table {table}")]
    TableNotAllowed { item: String, table: TableCode },
}

pub type PlanResult = Result<ValidationReport, PlanRejection>;

/// Operations over a [`PlanState`], bound to a catalog and a rule set.
#[derive(Debug)]
pub struct PlanManager<'a, L: ?Sized> {
    exams: &'a L,
    rules: &'a RuleSet,
    locale: Locale,
}

impl<'a, L: ExamLookup + ?Sized> PlanManager<'a, L> {
    pub fn new(exams: &'a L, rules: &'a RuleSet) -> Self {
        Self {
            exams,
            rules,
            locale: Locale::default(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn rules(&self) -> &RuleSet {
        self.rules
    }

    /// A new state seeded with the mandatory baseline items.
    pub fn new_state(&self, year: AcademicYear, curriculum: Curriculum) -> PlanState {
        let mut state = PlanState::new(year, curriculum);
        self.init_defaults(&mut state);
        state
    }

    /// Seeds one fixed item per baseline entry of the common rules.
    ///
    /// Does nothing when the plan already holds fixed items.
    pub fn init_defaults(&self, state: &mut PlanState) -> ValidationReport {
        if state.plan.iter().any(PlanItem::is_fixed) {
            debug!("plan already seeded with mandatory items");
            return self.refresh(state);
        }
        let mut used: HashSet<String> = state.plan.iter().map(|item| item.id.clone()).collect();
        let mut plan: Vec<PlanItem> = self
            .rules
            .mandatory()
            .iter()
            .map(|entry| {
                let id = unique_id(&mut used, &format!("fixed-{}", slug(&entry.name)));
                PlanItem::fixed(id, entry.name.clone(), entry.credits)
            })
            .collect();
        debug!(items = plan.len(), "seeded mandatory items");
        plan.append(&mut state.plan);
        state.plan = plan;
        self.refresh(state)
    }

    /// Changes the reference year. Only availability depends on it.
    pub fn set_year(&self, state: &mut PlanState, year: AcademicYear) -> ValidationReport {
        info!(from = %state.year, to = %year, "reference year changed");
        state.year = year;
        self.refresh(state)
    }

    /// Switches curriculum, moving every catalog item to its best table
    /// under the new curriculum, or to the free-elective table when it has
    /// none there.
    pub fn set_curriculum(&self, state: &mut PlanState, curriculum: Curriculum) -> ValidationReport {
        info!(from = %state.curriculum, to = %curriculum, "curriculum changed");
        state.curriculum = curriculum;
        for item in &mut state.plan {
            let Some(exam_id) = item.exam_id() else {
                continue;
            };
            let table = self
                .exams
                .exam(exam_id)
                .and_then(|exam| {
                    allowed_tables(exam, curriculum, self.rules)
                        .into_iter()
                        .next()
                })
                .unwrap_or(TableCode::FreeElective);
            debug!(item = %item.id, to = %table, "migrated plan item");
            item.table = table;
        }
        self.refresh(state)
    }

    /// Adds a catalog exam. Without `target` the item starts in its best
    /// allowed table; the allocator has the final say either way.
    pub fn add_exam(
        &self,
        state: &mut PlanState,
        exam: &Exam,
        target: Option<TableCode>,
    ) -> PlanResult {
        if state.contains_exam(&exam.id) || state.item(&exam.id).is_some() {
            return Err(PlanRejection::DuplicateExam(exam.id.clone()));
        }
        let table = target.unwrap_or_else(|| {
            allowed_tables(exam, state.curriculum, self.rules)
                .into_iter()
                .next()
                .unwrap_or(TableCode::FreeElective)
        });
        info!(exam = %exam.id, %table, "added exam");
        state.plan.push(PlanItem::from_exam(exam, table));
        Ok(self.refresh(state))
    }

    /// Adds an exam outside the catalog as a free elective.
    pub fn add_custom_exam(
        &self,
        state: &mut PlanState,
        name: &str,
        credits: u32,
    ) -> ValidationReport {
        let used: HashSet<&str> = state.plan.iter().map(|item| item.id.as_str()).collect();
        let id = (1..)
            .map(|n| format!("custom-{n}"))
            .find(|id| !used.contains(id.as_str()))
            .unwrap_or_else(|| format!("custom-{}", state.plan.len() + 1));
        info!(%id, name, credits, "added custom exam");
        state.plan.push(PlanItem::custom(id, name.trim(), credits));
        self.refresh(state)
    }

    pub fn remove_exam(&self, state: &mut PlanState, item_id: &str) -> PlanResult {
        let idx = self.position(state, item_id)?;
        if state.plan[idx].is_fixed() {
            return Err(PlanRejection::FixedItem(item_id.to_string()));
        }
        let removed = state.plan.remove(idx);
        info!(item = %removed.id, "removed plan item");
        Ok(self.refresh(state))
    }

    /// Moves an item by hand. Custom items go anywhere; catalog items only
    /// to the free-elective or overflow table or one of their allowed tables.
    pub fn move_exam(&self, state: &mut PlanState, item_id: &str, target: TableCode) -> PlanResult {
        let idx = self.position(state, item_id)?;
        let item = &state.plan[idx];
        if item.is_fixed() {
            return Err(PlanRejection::FixedItem(item_id.to_string()));
        }
        if !item.is_custom()
            && !target.is_open()
            && !self.possible_tables(state, item_id).contains(&target)
        {
            return Err(PlanRejection::TableNotAllowed {
                item: item_id.to_string(),
                table: target,
            });
        }
        debug!(item = item_id, to = %target, "moved plan item");
        state.plan[idx].table = target;
        Ok(self.refresh(state))
    }

    /// Removes the exam's item when present, adds it otherwise.
    pub fn toggle_exam(&self, state: &mut PlanState, exam: &Exam) -> PlanResult {
        match state.item_for_exam(&exam.id).map(|item| item.id.clone()) {
            Some(item_id) => self.remove_exam(state, &item_id),
            None => self.add_exam(state, exam, None),
        }
    }

    /// Empties the plan and seeds the mandatory items again.
    pub fn reset(&self, state: &mut PlanState) -> ValidationReport {
        info!("plan reset");
        state.plan.clear();
        self.init_defaults(state)
    }

    /// Adopts a state read from storage.
    ///
    /// Duplicate identifiers are dropped (first wins) and the plan is
    /// re-allocated, so a hand-edited file cannot break plan invariants.
    pub fn restore(&self, mut state: PlanState) -> (PlanState, ValidationReport) {
        let mut ids = HashSet::new();
        let mut exams = HashSet::new();
        state.plan.retain(|item| {
            let fresh_exam = item
                .exam_id()
                .is_none_or(|exam_id| exams.insert(exam_id.to_string()));
            let keep = fresh_exam && ids.insert(item.id.clone());
            if !keep {
                warn!(item = %item.id, "dropping duplicate plan item from stored state");
            }
            keep
        });
        let report = self.refresh(&mut state);
        (state, report)
    }

    /// Re-allocates and re-validates without changing the plan structure.
    pub fn refresh(&self, state: &mut PlanState) -> ValidationReport {
        allocate(&mut state.plan, state.curriculum, self.rules, self.exams);
        self.validate(state)
    }

    pub fn validate(&self, state: &PlanState) -> ValidationReport {
        validate_with_locale(&state.plan, state.curriculum, self.rules, self.locale)
    }

    /// Allowed tables of the item's exam; empty for fixed and custom items.
    pub fn possible_tables(&self, state: &PlanState, item_id: &str) -> Vec<TableCode> {
        state
            .item(item_id)
            .and_then(PlanItem::exam_id)
            .and_then(|exam_id| self.exams.exam(exam_id))
            .map(|exam| allowed_tables(exam, state.curriculum, self.rules))
            .unwrap_or_default()
    }

    pub fn allowed_tables(&self, state: &PlanState, exam: &Exam) -> Vec<TableCode> {
        allowed_tables(exam, state.curriculum, self.rules)
    }

    pub fn is_available(&self, state: &PlanState, exam: &Exam) -> bool {
        is_available(exam, &state.year)
    }

    pub fn describe_next_availability(&self, state: &PlanState, exam: &Exam) -> Option<String> {
        describe_next_availability(exam, &state.year, self.locale)
    }

    fn position(&self, state: &PlanState, item_id: &str) -> Result<usize, PlanRejection> {
        state
            .plan
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| PlanRejection::UnknownItem(item_id.to_string()))
    }
}

/// Lowercase identifier fragment: ASCII alphanumerics, runs of anything
/// else collapsed to `-`.
fn slug(name: &str) -> String {
    let mut slug = String::new();
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "item".to_string()
    } else {
        slug.to_string()
    }
}

fn unique_id(used: &mut HashSet<String>, base: &str) -> String {
    let mut candidate = base.to_string();
    let mut n = 2;
    while used.contains(&candidate) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_lowercase_and_dashed() {
        assert_eq!(slug("English Placement Test"), "english-placement-test");
        assert_eq!(slug("  Thesis (final) "), "thesis-final");
        assert_eq!(slug("???"), "item");
    }

    #[test]
    fn unique_ids_get_numeric_suffixes() {
        let mut used = HashSet::new();
        assert_eq!(unique_id(&mut used, "fixed-thesis"), "fixed-thesis");
        assert_eq!(unique_id(&mut used, "fixed-thesis"), "fixed-thesis-2");
        assert_eq!(unique_id(&mut used, "fixed-thesis"), "fixed-thesis-3");
    }
}
