//! Table allocation.
//!
//! A single greedy pass over the plan in insertion order. Earlier items
//! claim scarce table capacity first; the order is part of the contract
//! and must not be changed by sorting.

use std::collections::HashMap;

use curriculum_model::{Curriculum, ExamLookup, PlanItem, RuleSet, TableCode, TableRule};
use tracing::{debug, warn};

use crate::tables::allowed_tables;

/// Running credit totals per table during one allocation pass.
#[derive(Debug, Default)]
struct Running {
    totals: HashMap<TableCode, u32>,
}

impl Running {
    fn get(&self, table: &TableCode) -> u32 {
        self.totals.get(table).copied().unwrap_or(0)
    }

    fn add(&mut self, table: &TableCode, credits: u32) {
        let total = self.totals.entry(table.clone()).or_insert(0);
        *total = total.saturating_add(credits);
    }

    fn sum(&self, tables: &[TableCode]) -> u32 {
        tables
            .iter()
            .fold(0u32, |sum, table| sum.saturating_add(self.get(table)))
    }
}

/// Rules of the active curriculum, split for quick lookups.
struct Limits {
    minimums: HashMap<TableCode, u32>,
    combined: Vec<(Vec<TableCode>, u32)>,
    free_cap: u32,
}

impl Limits {
    fn new(curriculum: Curriculum, rules: &RuleSet) -> Self {
        let mut minimums = HashMap::new();
        let mut combined = Vec::new();
        for rule in rules.table_rules(curriculum) {
            match rule {
                TableRule::Minimum { table, min_credits } => {
                    minimums.entry(table).or_insert(min_credits);
                }
                TableRule::Combined {
                    tables, min_credits, ..
                } => combined.push((tables, min_credits)),
            }
        }
        Self {
            minimums,
            combined,
            free_cap: rules.free_elective_cap(),
        }
    }

    /// A table accepts while its own minimum, or the minimum of a sum it
    /// belongs to, is still unmet.
    fn accepts(&self, table: &TableCode, running: &Running) -> bool {
        let own = self.minimums.get(table).copied().unwrap_or(0);
        if running.get(table) < own {
            return true;
        }
        self.combined
            .iter()
            .any(|(members, min)| members.contains(table) && running.sum(members) < *min)
    }

    fn fallback(&self, running: &Running) -> TableCode {
        if running.get(&TableCode::FreeElective) < self.free_cap {
            TableCode::FreeElective
        } else {
            TableCode::Overflow
        }
    }
}

/// Custom items keep any table other than the free-elective one.
fn is_pinned(item: &PlanItem) -> bool {
    item.is_custom() && item.table != TableCode::FreeElective
}

/// Rewrites the table of every non-fixed item in place.
///
/// Fixed items and pinned custom items are counted but never moved.
/// Catalog items try their allowed tables in priority order, then the
/// free-elective table while it is under its cap, then overflow. Items
/// whose exam is missing from `exams` have no allowed tables.
pub fn allocate<L>(plan: &mut [PlanItem], curriculum: Curriculum, rules: &RuleSet, exams: &L)
where
    L: ExamLookup + ?Sized,
{
    let limits = Limits::new(curriculum, rules);
    let mut running = Running::default();
    for item in plan.iter().filter(|item| item.is_fixed() || is_pinned(item)) {
        running.add(&item.table, item.credits);
    }

    for item in plan
        .iter_mut()
        .filter(|item| !item.is_fixed() && !is_pinned(item))
    {
        let candidates = match item.exam_id() {
            Some(exam_id) => match exams.exam(exam_id) {
                Some(exam) => allowed_tables(exam, curriculum, rules),
                None => {
                    warn!(item = %item.id, exam = exam_id, "plan item references an unknown exam");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        let table = candidates
            .into_iter()
            .find(|table| limits.accepts(table, &running))
            .unwrap_or_else(|| limits.fallback(&running));
        if item.table != table {
            debug!(item = %item.id, from = %item.table, to = %table, "reallocated plan item");
            item.table = table;
        }
        running.add(&item.table, item.credits);
    }
}
