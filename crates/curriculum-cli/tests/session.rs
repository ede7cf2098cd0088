use curriculum_catalog::{Catalog, load_embedded};
use curriculum_cli::Session;
use curriculum_core::PlanState;
use curriculum_model::{AcademicYear, Curriculum, Locale};

fn session() -> Session {
    let (catalog, rules) = load_embedded().expect("embedded data");
    Session::new(catalog, rules, Locale::En)
}

fn fixed_ids(state: &PlanState) -> Vec<&str> {
    state
        .plan
        .iter()
        .filter(|item| item.is_fixed())
        .map(|item| item.id.as_str())
        .collect()
}

#[test]
fn missing_state_file_starts_a_seeded_plan() {
    let session = session();
    let dir = tempfile::tempdir().expect("tempdir");
    let state = session
        .open(&dir.path().join("study-plan.json"))
        .expect("open");
    assert_eq!(state.year, AcademicYear::current());
    assert_eq!(state.curriculum, Curriculum::Fba);
    assert_eq!(
        fixed_ids(&state),
        vec!["fixed-english-placement-test", "fixed-thesis"]
    );
}

#[test]
fn saved_plan_is_reopened() {
    let session = session();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("study-plan.json");

    let mut state = session.fresh_state(Some(AcademicYear::new("2024/2025")), Some(Curriculum::F94));
    let report = session
        .manager()
        .add_custom_exam(&mut state, "Erasmus course", 6);
    assert!(!report.is_valid);
    session.save(&path, &state).expect("save");

    let reopened = session.open(&path).expect("open");
    assert_eq!(reopened, state);

    let raw = std::fs::read_to_string(&path).expect("read state");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(value["catalog_fingerprint"], session.catalog.fingerprint());
}

#[test]
fn corrupt_state_falls_back_to_defaults() {
    let session = session();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("study-plan.json");
    std::fs::write(&path, "{ not json").expect("write");

    let state = session.open(&path).expect("open");
    assert_eq!(fixed_ids(&state).len(), 2);
    assert_eq!(state.plan.len(), 2);
}

#[test]
fn newer_state_file_is_an_error() {
    let session = session();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("study-plan.json");
    std::fs::write(
        &path,
        r#"{"schema_version": 99, "year": "2025/2026", "curriculum": "FBA", "plan": []}"#,
    )
    .expect("write");

    let err = session.open(&path).unwrap_err();
    assert!(format!("{err:#}").contains("newer version"));
}

#[test]
fn changed_catalog_still_restores_the_plan() {
    let session = session();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("study-plan.json");
    let state = session.fresh_state(Some(AcademicYear::new("2025/2026")), None);
    session.save(&path, &state).expect("save");

    let (_, rules) = load_embedded().expect("embedded data");
    let other = Session::new(Catalog::from_exams(Vec::new()), rules, Locale::It);
    let reopened = other.open(&path).expect("open");
    assert_eq!(reopened.plan, state.plan);
}
