//! Requirement validation.
//!
//! The validator is total: rules naming unknown tables and tables found
//! only on plan items are tolerated, never reported as errors.

use curriculum_model::{
    Curriculum, Locale, PlanItem, RuleSet, SumStatus, TableCode, TableRule, TableStatus,
    ValidationReport, Violation,
};
use tracing::{debug, warn};

/// Validates `plan` with messages in the default locale.
pub fn validate(plan: &[PlanItem], curriculum: Curriculum, rules: &RuleSet) -> ValidationReport {
    validate_with_locale(plan, curriculum, rules, Locale::default())
}

pub fn validate_with_locale(
    plan: &[PlanItem],
    curriculum: Curriculum,
    rules: &RuleSet,
    locale: Locale,
) -> ValidationReport {
    let mut tables = schema(curriculum, rules);
    let mut total_credits: u32 = 0;
    for item in plan {
        let status = counter(&mut tables, &item.table);
        status.current = status.current.saturating_add(item.credits);
        if item.table != TableCode::Overflow {
            total_credits = total_credits.saturating_add(item.credits);
        }
    }
    counter(&mut tables, &TableCode::Mandatory).min = rules.mandatory_credits();
    counter(&mut tables, &TableCode::FreeElective).min = rules.free_elective_cap();

    let mut sums = Vec::new();
    let mut violations = Vec::new();
    for rule in rules.table_rules(curriculum) {
        match rule {
            TableRule::Combined {
                label,
                tables: members,
                min_credits,
            } => {
                let current = members.iter().fold(0u32, |sum, member| {
                    sum.saturating_add(current_of(&tables, member))
                });
                if current < min_credits {
                    violations.push(Violation::SumShortfall {
                        label: label.clone(),
                        tables: members.clone(),
                        current,
                        min: min_credits,
                    });
                }
                sums.push(SumStatus {
                    label,
                    tables: members,
                    current,
                    min: min_credits,
                });
            }
            TableRule::Minimum { table, min_credits } => {
                let Some(status) = tables.iter_mut().find(|status| status.code == table) else {
                    warn!(%curriculum, %table, "rule references a table outside the schema");
                    continue;
                };
                status.min = min_credits;
                if status.current < status.min {
                    violations.push(Violation::TableShortfall {
                        table,
                        current: status.current,
                        min: status.min,
                    });
                }
            }
        }
    }

    let mandatory_current = current_of(&tables, &TableCode::Mandatory);
    let mandatory_min = rules.mandatory_credits();
    if mandatory_current < mandatory_min {
        violations.push(Violation::MandatoryIncomplete {
            current: mandatory_current,
            min: mandatory_min,
        });
    }
    if total_credits < rules.total_credits() {
        violations.push(Violation::TotalShortfall {
            current: total_credits,
            min: rules.total_credits(),
        });
    }

    let messages: Vec<String> = violations
        .iter()
        .map(|violation| violation.message(locale))
        .collect();
    debug!(
        %curriculum,
        total_credits,
        violations = violations.len(),
        "validated plan"
    );
    ValidationReport {
        total_credits,
        tables,
        sums,
        is_valid: violations.is_empty(),
        violations,
        messages,
    }
}

/// Counters for the curriculum's schema in display order.
fn schema(curriculum: Curriculum, rules: &RuleSet) -> Vec<TableStatus> {
    std::iter::once(TableCode::Mandatory)
        .chain(rules.core_tables(curriculum))
        .chain([TableCode::FreeElective, TableCode::Overflow])
        .map(TableStatus::new)
        .collect()
}

/// Counter of `code`, appended when the table is not in the schema.
fn counter<'a>(tables: &'a mut Vec<TableStatus>, code: &TableCode) -> &'a mut TableStatus {
    let idx = match tables.iter().position(|status| &status.code == code) {
        Some(idx) => idx,
        None => {
            tables.push(TableStatus::new(code.clone()));
            tables.len() - 1
        }
    };
    &mut tables[idx]
}

fn current_of(tables: &[TableStatus], code: &TableCode) -> u32 {
    tables
        .iter()
        .find(|status| &status.code == code)
        .map_or(0, |status| status.current)
}
