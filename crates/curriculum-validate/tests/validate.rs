//! Requirement validator scenarios.

use curriculum_model::{Curriculum, Locale, PlanItem, RuleSet, TableCode, Violation};
use curriculum_validate::{validate, validate_with_locale};
use proptest::prelude::*;

const RULES: &str = r#"{
    "degree_requirements": {
        "common_rules": {
            "total_credits": 120,
            "free_choice_credits": 12,
            "mandatory": [
                { "name": "English Placement Test", "credits": 3 },
                { "name": "Thesis", "credits": 39 }
            ]
        },
        "programs": {
            "F94": {
                "tables": ["A", "B", "C"],
                "curriculum_rules": [
                    { "source": "A", "min_credits": 18 },
                    { "source": "BC", "tables": ["B", "C"], "label": "Sum Tables B + C", "min_credits": 48 }
                ]
            },
            "FBA": {
                "curriculum_rules": [
                    { "source": "1", "min_credits": 30 },
                    { "source": "2", "min_credits": 36 },
                    { "source": "", "min_credits": 99 }
                ]
            }
        }
    }
}"#;

fn rules() -> RuleSet {
    serde_json::from_str(RULES).expect("parse rules")
}

fn core(code: &str) -> TableCode {
    TableCode::Core(code.to_string())
}

fn item(id: &str, credits: u32, table: TableCode) -> PlanItem {
    let mut item = PlanItem::custom(id, id, credits);
    item.table = table;
    item
}

fn baseline() -> Vec<PlanItem> {
    vec![
        PlanItem::fixed("fixed-english", "English Placement Test", 3),
        PlanItem::fixed("fixed-thesis", "Thesis", 39),
    ]
}

#[test]
fn table_shortfall_then_total_shortfall() {
    let mut plan = baseline();
    plan.push(item("a1", 12, core("A")));
    plan.push(item("b1", 30, core("B")));
    plan.push(item("c1", 18, core("C")));
    plan.push(item("free", 8, TableCode::FreeElective));

    let report = validate(&plan, Curriculum::F94, &rules());
    assert!(!report.is_valid);
    assert_eq!(report.total_credits, 110);
    assert_eq!(
        report.messages,
        vec!["Table A: Missing 6 CFU", "Total: 110/120 CFU"]
    );
    let sum = report.sum("Sum Tables B + C").expect("sum status");
    assert_eq!((sum.current, sum.min), (48, 48));
}

#[test]
fn missing_mandatory_is_reported_between_tables_and_total() {
    let mut plan = vec![PlanItem::fixed("fixed-thesis", "Thesis", 39)];
    plan.push(item("a1", 12, core("A")));
    plan.push(item("free", 8, TableCode::FreeElective));

    let report = validate(&plan, Curriculum::F94, &rules());
    let codes: Vec<&str> = report.violations.iter().map(Violation::code).collect();
    assert_eq!(
        codes,
        vec![
            "table_shortfall",
            "sum_shortfall",
            "mandatory_incomplete",
            "total_shortfall"
        ]
    );
    insta::assert_snapshot!(report.messages.join("\n"), @r"
    Table A: Missing 6 CFU
    Sum of tables B and C insufficient: missing 48 CFU
    Mandatory: Plan incomplete
    Total: 59/120 CFU
    ");
}

#[test]
fn overflow_is_counted_per_table_but_not_in_total() {
    let mut plan = baseline();
    plan.push(item("x", 6, TableCode::Overflow));
    let report = validate(&plan, Curriculum::Fba, &rules());
    assert_eq!(report.total_credits, 42);
    assert_eq!(report.current(&TableCode::Overflow), 6);
    assert_eq!(report.current(&TableCode::Mandatory), 42);
    assert_eq!(report.table(&TableCode::Mandatory).map(|t| t.min), Some(42));
    assert_eq!(report.table(&TableCode::FreeElective).map(|t| t.min), Some(12));
}

#[test]
fn tables_follow_display_order_and_unknown_tables_are_appended() {
    let mut plan = baseline();
    plan.push(item("odd", 6, core("Z")));
    let report = validate(&plan, Curriculum::Fba, &rules());
    let order: Vec<&str> = report.tables.iter().map(|t| t.code.as_str()).collect();
    assert_eq!(
        order,
        vec!["Obbligatori", "1", "2", "Facoltativi", "Fuori Piano", "Z"]
    );
    assert_eq!(report.current(&core("Z")), 6);
    assert_eq!(report.total_credits, 48);
}

#[test]
fn huge_credits_saturate_instead_of_wrapping() {
    let mut plan = baseline();
    plan.push(item("b1", 4_000_000_000, core("B")));
    plan.push(item("c1", 4_000_000_000, core("C")));
    plan.push(item("a1", 4_000_000_000, core("A")));
    plan.push(item("a2", 4_000_000_000, core("A")));
    let report = validate(&plan, Curriculum::F94, &rules());
    assert_eq!(report.current(&core("A")), u32::MAX);
    assert_eq!(report.total_credits, u32::MAX);
    let sum = report.sum("Sum Tables B + C").expect("sum status");
    assert_eq!(sum.current, u32::MAX);
    assert!(report.is_valid, "unexpected messages: {:?}", report.messages);
}

#[test]
fn complete_plan_is_valid() {
    let mut plan = baseline();
    plan.push(item("one", 30, core("1")));
    plan.push(item("two", 36, core("2")));
    plan.push(item("free", 12, TableCode::FreeElective));
    let report = validate(&plan, Curriculum::Fba, &rules());
    assert!(report.is_valid, "unexpected messages: {:?}", report.messages);
    assert!(report.messages.is_empty());
    assert_eq!(report.total_credits, 120);
}

#[test]
fn empty_rule_set_validates_trivially() {
    let report = validate(&[], Curriculum::F94, &RuleSet::default());
    assert!(report.is_valid);
    assert_eq!(report.tables.len(), 3);
}

#[test]
fn messages_are_localized() {
    let plan = baseline();
    let report = validate_with_locale(&plan, Curriculum::Fba, &rules(), Locale::It);
    assert_eq!(
        report.messages,
        vec![
            "Tabella 1: Mancano 30 CFU",
            "Tabella 2: Mancano 36 CFU",
            "Totale: 42/120 CFU"
        ]
    );
    assert_eq!(report.messages_in(Locale::En)[2], "Total: 42/120 CFU");
}

proptest! {
    #[test]
    fn validity_matches_violations(credits in proptest::collection::vec((0u32..12, 0usize..5), 0..20)) {
        let tables = [core("A"), core("B"), core("C"), TableCode::FreeElective, TableCode::Overflow];
        let mut plan = baseline();
        for (idx, (weight, table)) in credits.iter().enumerate() {
            plan.push(item(&format!("item-{idx}"), *weight, tables[*table].clone()));
        }
        let report = validate(&plan, Curriculum::F94, &rules());
        prop_assert_eq!(report.is_valid, report.violations.is_empty());
        prop_assert_eq!(report.messages.len(), report.violations.len());
        let overflow = report.current(&TableCode::Overflow);
        let all: u32 = plan.iter().map(|item| item.credits).sum();
        prop_assert_eq!(report.total_credits + overflow, all);
    }
}
