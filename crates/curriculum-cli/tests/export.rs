use curriculum_catalog::Catalog;
use curriculum_cli::{default_export_name, export_rows, export_to_path, write_csv};
use curriculum_core::PlanState;
use curriculum_model::{AcademicYear, Curriculum, Exam, PlanItem, TableCode};

fn catalog() -> Catalog {
    let mut compilers = Exam::new("Compilers", 9)
        .with_tables("A|B")
        .with_period(2)
        .with_pillar("Software", "Languages");
    compilers.link = Some("https://example.org/compilers".into());
    Catalog::from_exams(vec![compilers, Exam::new("Robotics", 6).with_tables("1")])
}

fn state(catalog: &Catalog) -> PlanState {
    let mut state = PlanState::new(AcademicYear::new("2025/2026"), Curriculum::F94);
    state.plan.push(PlanItem::fixed("fixed-thesis", "Thesis", 39));
    let compilers = catalog.get("Compilers").expect("compilers in catalog");
    state
        .plan
        .push(PlanItem::from_exam(compilers, TableCode::Core("A".into())));
    state
        .plan
        .push(PlanItem::custom("custom-1", "Summer school", 6));
    state
}

#[test]
fn csv_lists_items_in_plan_order() {
    let catalog = catalog();
    let rows = export_rows(&state(&catalog), &catalog);
    let mut buffer = Vec::new();
    write_csv(&mut buffer, &rows).expect("write csv");
    let text = String::from_utf8(buffer).expect("utf8");
    insta::assert_snapshot!(text.trim_end(), @r"
    Exam,CFU,4 month period,Table,Pillar,SubPillar,Type,Link
    Thesis,39,N/D,Obbligatori,N/D,N/D,Mandatory,
    Compilers,9,2,A,Software,Languages,Curricolar,https://example.org/compilers
    Summer school,6,N/D,Facoltativi,N/D,N/D,Extra,
    ");
}

#[test]
fn catalog_items_without_pillar_use_defaults() {
    let catalog = catalog();
    let mut state = state(&catalog);
    let robotics = catalog.get("Robotics").expect("robotics in catalog");
    state
        .plan
        .push(PlanItem::from_exam(robotics, TableCode::FreeElective));
    let rows = export_rows(&state, &catalog);
    let last = rows.last().expect("row");
    assert_eq!(last.pillar, "Other");
    assert_eq!(last.subpillar, "General");
    assert_eq!(last.period, "1");
    assert_eq!(last.link, "");
    assert_eq!(last.kind, "Curricolar");
}

#[test]
fn export_writes_the_file() {
    let catalog = catalog();
    let state = state(&catalog);
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(default_export_name(&state));
    let rows = export_to_path(&state, &catalog, &path).expect("export");
    assert_eq!(rows, 3);
    assert!(path.ends_with("piano_studi_F94_2025-2026.csv"));
    let text = std::fs::read_to_string(&path).expect("read export");
    assert_eq!(text.lines().count(), 4);
}
