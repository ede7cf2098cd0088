#![allow(dead_code)]

use curriculum_model::{Curriculum, Exam, RuleSet};

pub const RULES: &str = r#"{
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
                "tables": ["1", "2"],
                "curriculum_rules": [
                    { "source": "1", "min_credits": 30 },
                    { "source": "2", "min_credits": 36 }
                ]
            }
        }
    }
}"#;

pub fn rules() -> RuleSet {
    serde_json::from_str(RULES).expect("parse rules")
}

pub fn catalog() -> Vec<Exam> {
    use Curriculum::{F94, Fba};
    vec![
        Exam::new("X", 6).with_tables("A|B").with_curricula(&[F94]),
        Exam::new("Compilers", 9).with_tables("A|B|1").with_curricula(&[F94, Fba]),
        Exam::new("Databases", 6).with_tables("B|2").with_curricula(&[F94, Fba]),
        Exam::new("Vision", 6).with_tables("C|2").with_curricula(&[F94, Fba]),
        Exam::new("Logic", 6).with_tables("C").with_curricula(&[F94]),
        Exam::new("Robotics", 6).with_tables("1").with_curricula(&[Fba]),
        Exam::new("Internship", 6).with_curricula(&[F94, Fba]),
        Exam::new("Functional Programming", 6)
            .with_tables("B|2")
            .with_curricula(&[F94, Fba])
            .with_availability("Biennial (Even)"),
        Exam::new("Verification", 6)
            .with_tables("1")
            .with_curricula(&[Fba])
            .with_availability("From 2026/2027"),
    ]
}

pub fn exam<'a>(exams: &'a [Exam], id: &str) -> &'a Exam {
    exams
        .iter()
        .find(|exam| exam.id == id)
        .unwrap_or_else(|| panic!("fixture exam {id}"))
}
