//! Loader tests against the embedded data and files on disk.

use std::io::Write;

use curriculum_catalog::{
    CatalogError, DataSources, EXAMS_FILE, RULES_FILE, load_embedded, load_exams, sha256_hex,
};
use curriculum_model::{Curriculum, TableCode};

#[test]
fn embedded_data_loads() {
    let (catalog, rules) = load_embedded().expect("embedded data");
    assert!(!catalog.is_empty());
    assert_eq!(catalog.fingerprint().len(), 64);
    assert_eq!(rules.total_credits(), 120);
    assert_eq!(rules.free_elective_cap(), 12);
    assert_eq!(rules.mandatory_credits(), 42);
    assert_eq!(
        rules.core_tables(Curriculum::F94),
        vec![
            TableCode::Core("A".into()),
            TableCode::Core("B".into()),
            TableCode::Core("C".into()),
        ]
    );
    assert_eq!(
        rules.core_tables(Curriculum::Fba),
        vec![TableCode::Core("1".into()), TableCode::Core("2".into())]
    );

    let compilers = catalog.get("Compilers").expect("compilers in catalog");
    assert_eq!(compilers.credits, 9);
    assert!(compilers.is_recognized_in(Curriculum::F94));
    assert!(catalog.iter().all(|exam| (1..=3).contains(&exam.period)));
}

#[test]
fn data_dir_overrides_embedded_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let exams = "Exams,CFU,ordinamento,table\nCompilers,9,F94,A|B\nCompilers,6,F94,C\n";
    std::fs::write(dir.path().join(EXAMS_FILE), exams).expect("write exams");
    std::fs::write(
        dir.path().join(RULES_FILE),
        r#"{"degree_requirements":{"common_rules":{"total_credits":60}}}"#,
    )
    .expect("write rules");

    let sources = DataSources {
        data_dir: Some(dir.path().to_path_buf()),
        ..DataSources::default()
    };
    let catalog = sources.load_catalog().expect("load catalog");
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("Compilers").map(|exam| exam.credits), Some(9));
    assert_eq!(catalog.fingerprint(), sha256_hex(exams.as_bytes()));

    let rules = sources.load_rules().expect("load rules");
    assert_eq!(rules.total_credits(), 60);
    assert!(rules.table_rules(Curriculum::F94).is_empty());
}

#[test]
fn load_exams_reads_named_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "Exams,CFU,Period").expect("write header");
    writeln!(file, "Databases,abc,7").expect("write row");
    let exams = load_exams(file.path()).expect("load exams");
    assert_eq!(exams.len(), 1);
    assert_eq!(exams[0].credits, 6);
    assert_eq!(exams[0].period, 1);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let sources = DataSources::default().with_rules(Some(dir.path().join("absent.json")));
    let err = sources.load_rules().unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn missing_column_message() {
    let err = curriculum_catalog::parse_exams_str("Name\nCompilers\n", "exams.csv").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"missing required column "Exams" in exams.csv"#);
}
