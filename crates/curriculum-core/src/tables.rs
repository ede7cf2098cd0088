use curriculum_model::{Curriculum, Exam, Locale, RuleSet, TableCode};

/// Core tables `exam` may occupy under `curriculum`, highest priority first.
///
/// Priority is the curriculum's table schema order, not the order the exam
/// declares its tables in.
pub fn allowed_tables(exam: &Exam, curriculum: Curriculum, rules: &RuleSet) -> Vec<TableCode> {
    let declared = exam.table_codes();
    rules
        .core_tables(curriculum)
        .into_iter()
        .filter(|table| declared.contains(table))
        .collect()
}

/// Label listing the tables an exam counts for, e.g. `A | B`; the
/// free-elective label when it counts for none.
pub fn display_tables(
    exam: &Exam,
    curriculum: Curriculum,
    rules: &RuleSet,
    locale: Locale,
) -> String {
    let allowed = allowed_tables(exam, curriculum, rules);
    if allowed.is_empty() {
        return locale.table_label(&TableCode::FreeElective).to_string();
    }
    allowed
        .iter()
        .map(TableCode::as_str)
        .collect::<Vec<_>>()
        .join(" | ")
}
