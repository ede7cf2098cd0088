//! Whether a catalog exam can be added in a given academic year.
//!
//! Unparsable years never satisfy a year-dependent rule: the exam is then
//! unavailable. Unrecognized rule strings are treated as always available.

use curriculum_model::{AcademicYear, AvailabilityRule, Exam, Locale, MessageKey};

pub fn is_available(exam: &Exam, year: &AcademicYear) -> bool {
    rule_allows(&exam.availability_rule(), year)
}

fn rule_allows(rule: &AvailabilityRule, year: &AcademicYear) -> bool {
    match rule {
        AvailabilityRule::Always | AvailabilityRule::Unrecognized(_) => true,
        AvailabilityRule::Never => false,
        AvailabilityRule::From(threshold) => year.starts_at_or_after(threshold),
        AvailabilityRule::BiennialEven => year.starts_even() == Some(true),
        AvailabilityRule::BiennialOdd => year.starts_even() == Some(false),
    }
}

/// Hint shown next to an exam that cannot be added in `year`.
///
/// `None` when the exam is available, disabled outright, or carries a rule
/// string with no known meaning.
pub fn describe_next_availability(
    exam: &Exam,
    year: &AcademicYear,
    locale: Locale,
) -> Option<String> {
    let rule = exam.availability_rule();
    if rule_allows(&rule, year) {
        return None;
    }
    match rule {
        AvailabilityRule::From(threshold) => Some(
            locale.render(MessageKey::AvailableFrom, &[("date", threshold.as_str())]),
        ),
        AvailabilityRule::BiennialEven => {
            biennial_hint(MessageKey::NextActivationEven, true, year, locale)
        }
        AvailabilityRule::BiennialOdd => {
            biennial_hint(MessageKey::NextActivationOdd, false, year, locale)
        }
        AvailabilityRule::Always | AvailabilityRule::Never | AvailabilityRule::Unrecognized(_) => {
            None
        }
    }
}

/// `None` when the next year of the wanted parity is past `i32::MAX`.
fn biennial_hint(
    key: MessageKey,
    even: bool,
    year: &AcademicYear,
    locale: Locale,
) -> Option<String> {
    let from = year
        .start_year()
        .or_else(|| AcademicYear::current().start_year())
        .unwrap_or(0);
    let start = if (from.rem_euclid(2) == 0) == even {
        from
    } else {
        from.checked_add(1)?
    };
    let example = AcademicYear::short_label(start);
    Some(locale.render(key, &[("example", example.as_str())]))
}
