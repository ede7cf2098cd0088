use std::cmp::Ordering;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use curriculum_catalog::{Catalog, pillar_of, subpillar_of};
use curriculum_core::{PlanManager, PlanState, display_tables};
use curriculum_model::{AcademicYear, Exam, Locale, PlanItem, ValidationReport};

/// Prints the plan grouped by table in display order, then the report.
pub fn print_plan(state: &PlanState, report: &ValidationReport, locale: Locale, total_min: u32) {
    println!("Curriculum: {}", state.curriculum);
    println!("Academic year: {}", state.year);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Item"),
        header_cell("Name"),
        header_cell("CFU"),
        header_cell("Type"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for status in &report.tables {
        for item in state.plan.iter().filter(|item| item.table == status.code) {
            table.add_row(vec![
                Cell::new(locale.table_label(&item.table)).add_attribute(Attribute::Bold),
                dim_cell(&item.id),
                Cell::new(&item.name),
                Cell::new(item.credits),
                kind_cell(item),
            ]);
        }
    }
    if state.plan.is_empty() {
        table.add_row(vec![dim_cell("-"), dim_cell("-"), dim_cell("(empty plan)")]);
    }
    println!("{table}");
    print_requirements(report, locale, total_min);
}

fn print_requirements(report: &ValidationReport, locale: Locale, total_min: u32) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Requirement"),
        header_cell("Current"),
        header_cell("Min"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for status in &report.tables {
        table.add_row(vec![
            Cell::new(locale.table_label(&status.code)),
            Cell::new(status.current),
            min_cell(status.min),
            status_cell(status.is_met()),
        ]);
    }
    for sum in &report.sums {
        table.add_row(vec![
            Cell::new(&sum.label),
            Cell::new(sum.current),
            min_cell(sum.min),
            status_cell(sum.is_met()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.total_credits).add_attribute(Attribute::Bold),
        min_cell(total_min),
        status_cell(report.total_credits >= total_min),
    ]);
    println!("{table}");

    if report.messages.is_empty() {
        println!("All requirements met.");
    } else {
        eprintln!("Unmet requirements:");
        for message in &report.messages {
            eprintln!("- {message}");
        }
    }
}

/// One catalog listing line.
pub struct CatalogRow<'a> {
    pub exam: &'a Exam,
    pub in_plan: bool,
    pub available: bool,
    pub hint: Option<String>,
}

pub fn print_catalog(
    catalog: &Catalog,
    rows: &[CatalogRow<'_>],
    manager: &PlanManager<'_, Catalog>,
    state: &PlanState,
) {
    let mut ordered: Vec<&CatalogRow<'_>> = rows.iter().collect();
    ordered.sort_by(|a, b| catalog_order(a.exam, b.exam));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Pillar"),
        header_cell("Subpillar"),
        header_cell("Period"),
        header_cell("Exam"),
        header_cell("CFU"),
        header_cell("Tables"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    for row in ordered {
        let exam = row.exam;
        let status = if row.in_plan {
            Cell::new("in plan").fg(Color::Green)
        } else if row.available {
            dim_cell("-")
        } else {
            Cell::new(row.hint.as_deref().unwrap_or("unavailable")).fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(pillar_of(exam)),
            Cell::new(subpillar_of(exam)),
            Cell::new(exam.period),
            Cell::new(&exam.name),
            Cell::new(exam.credits),
            Cell::new(display_tables(
                exam,
                state.curriculum,
                manager.rules(),
                manager.locale(),
            )),
            status,
        ]);
    }
    println!("{table}");
    println!(
        "{} of {} exams shown ({} {})",
        rows.len(),
        catalog.len(),
        state.curriculum,
        state.year
    );
}

/// Pillar, subpillar and period, then name within a period.
fn catalog_order(a: &Exam, b: &Exam) -> Ordering {
    (pillar_of(a), subpillar_of(a), a.period)
        .cmp(&(pillar_of(b), subpillar_of(b), b.period))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

pub fn print_years(years: &[AcademicYear], current: &AcademicYear) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Academic year")]);
    apply_table_style(&mut table);
    for year in years {
        if year == current {
            table.add_row(vec![
                Cell::new(format!("{year} (current plan)"))
                    .fg(Color::Cyan)
                    .add_attribute(Attribute::Bold),
            ]);
        } else {
            table.add_row(vec![Cell::new(year)]);
        }
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn min_cell(min: u32) -> Cell {
    if min == 0 { dim_cell("-") } else { Cell::new(min) }
}

fn status_cell(met: bool) -> Cell {
    if met {
        Cell::new("ok").fg(Color::Green)
    } else {
        Cell::new("missing")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn kind_cell(item: &PlanItem) -> Cell {
    if item.is_fixed() {
        dim_cell("mandatory")
    } else if item.is_custom() {
        Cell::new("custom").fg(Color::Yellow)
    } else {
        Cell::new("catalog")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_rows_sort_by_name_within_a_period() {
        let mut exams = vec![
            Exam::new("Robotics", 6).with_pillar("AI", "Core").with_period(2),
            Exam::new("vision", 6).with_pillar("AI", "Core").with_period(1),
            Exam::new("Compilers", 9).with_pillar("Systems", "Core").with_period(1),
            Exam::new("Logic", 6).with_pillar("AI", "Core").with_period(1),
            Exam::new("Databases", 6).with_pillar("AI", "Core").with_period(1),
        ];
        exams.sort_by(catalog_order);
        let names: Vec<&str> = exams.iter().map(|exam| exam.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Databases", "Logic", "vision", "Robotics", "Compilers"]
        );
    }
}
