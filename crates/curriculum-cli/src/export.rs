//! CSV export of a study plan.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use curriculum_catalog::{pillar_of, subpillar_of};
use curriculum_core::PlanState;
use curriculum_model::{ExamLookup, PlanItem, TableCode};

/// Placeholder for catalog data a plan item does not have.
pub const NOT_AVAILABLE: &str = "N/D";

const HEADER: [&str; 8] = [
    "Exam",
    "CFU",
    "4 month period",
    "Table",
    "Pillar",
    "SubPillar",
    "Type",
    "Link",
];

/// One exported plan line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub exam: String,
    pub credits: u32,
    pub period: String,
    pub table: String,
    pub pillar: String,
    pub subpillar: String,
    pub kind: &'static str,
    pub link: String,
}

impl ExportRow {
    fn record(&self) -> [String; 8] {
        [
            self.exam.clone(),
            self.credits.to_string(),
            self.period.clone(),
            self.table.clone(),
            self.pillar.clone(),
            self.subpillar.clone(),
            self.kind.to_string(),
            self.link.clone(),
        ]
    }
}

fn item_kind(item: &PlanItem) -> &'static str {
    if item.is_fixed() || (item.is_custom() && item.table == TableCode::Mandatory) {
        "Mandatory"
    } else if item.is_custom() {
        "Extra"
    } else {
        "Curricolar"
    }
}

/// Rows in plan order.
pub fn export_rows<L>(state: &PlanState, exams: &L) -> Vec<ExportRow>
where
    L: ExamLookup + ?Sized,
{
    state
        .plan
        .iter()
        .map(|item| {
            let exam = item.exam_id().and_then(|exam_id| exams.exam(exam_id));
            ExportRow {
                exam: item.name.clone(),
                credits: item.credits,
                period: exam.map_or_else(|| NOT_AVAILABLE.to_string(), |e| e.period.to_string()),
                table: item.table.as_str().to_string(),
                pillar: exam.map_or(NOT_AVAILABLE, pillar_of).to_string(),
                subpillar: exam.map_or(NOT_AVAILABLE, subpillar_of).to_string(),
                kind: item_kind(item),
                link: exam.and_then(|e| e.link.clone()).unwrap_or_default(),
            }
        })
        .collect()
}

pub fn write_csv<W: Write>(writer: W, rows: &[ExportRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(HEADER).context("write CSV header")?;
    for row in rows {
        writer
            .write_record(row.record())
            .with_context(|| format!("write CSV row for {}", row.exam))?;
    }
    writer.flush().context("flush CSV output")?;
    Ok(())
}

/// Writes the plan to `path` and returns the number of rows.
pub fn export_to_path<L>(state: &PlanState, exams: &L, path: &Path) -> Result<usize>
where
    L: ExamLookup + ?Sized,
{
    let rows = export_rows(state, exams);
    let file = std::fs::File::create(path)
        .with_context(|| format!("create export file {}", path.display()))?;
    write_csv(file, &rows)?;
    tracing::info!(rows = rows.len(), "Exported study plan to {}", path.display());
    Ok(rows.len())
}

/// `piano_studi_F94_2025-2026.csv` for curriculum F94 and year 2025/2026.
pub fn default_export_name(state: &PlanState) -> String {
    format!(
        "piano_studi_{}_{}.csv",
        state.curriculum,
        state.year.as_str().replace('/', "-")
    )
}
