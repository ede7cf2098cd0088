use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Datelike;
use tracing::{info_span, warn};

use curriculum_catalog::{Catalog, DataSources};
use curriculum_cli::{Session, default_export_name, export_to_path};
use curriculum_core::PlanState;
use curriculum_model::{AcademicYear, Exam, ValidationReport, selectable_years};

use crate::cli::{
    AddArgs, AddCustomArgs, CatalogArgs, Cli, Command, ExamArgs, ExportArgs, InitArgs, ItemArgs,
    MoveArgs, SetCurriculumArgs, SetYearArgs, ShowArgs,
};
use crate::summary::{CatalogRow, print_catalog, print_plan, print_years};

/// Runs the selected command and returns the process exit code.
pub fn run(cli: &Cli) -> Result<i32> {
    let sources = DataSources::from_env()
        .with_exams(cli.exams.clone())
        .with_rules(cli.rules.clone());
    let session = Session::load(&sources, cli.lang)?;
    let ctx = Ctx {
        session: &session,
        state_path: cli.state.clone(),
    };
    let _span = info_span!("command", state = %ctx.state_path.display()).entered();

    match &cli.command {
        Command::Init(args) => ctx.init(args),
        Command::Show(args) => ctx.show(args),
        Command::Catalog(args) => ctx.catalog(args),
        Command::Add(args) => ctx.add(args),
        Command::AddCustom(args) => ctx.add_custom(args),
        Command::Remove(args) => ctx.remove(args),
        Command::Move(args) => ctx.move_item(args),
        Command::Toggle(args) => ctx.toggle(args),
        Command::SetYear(args) => ctx.set_year(args),
        Command::SetCurriculum(args) => ctx.set_curriculum(args),
        Command::Reset => ctx.reset(),
        Command::Export(args) => ctx.export(args),
        Command::Years => ctx.years(),
    }
}

struct Ctx<'a> {
    session: &'a Session,
    state_path: PathBuf,
}

impl Ctx<'_> {
    fn init(&self, args: &InitArgs) -> Result<i32> {
        if self.state_path.exists() && !args.force {
            bail!(
                "{} already exists; pass --force to start a new plan",
                self.state_path.display()
            );
        }
        let state = self
            .session
            .fresh_state(args.year.as_deref().map(AcademicYear::new), args.curriculum);
        self.save(&state)?;
        println!("Created {}", self.state_path.display());
        self.print(&state, &self.session.manager().validate(&state));
        Ok(0)
    }

    fn show(&self, args: &ShowArgs) -> Result<i32> {
        let state = self.open()?;
        let report = self.session.manager().validate(&state);
        if args.json {
            let value = serde_json::json!({
                "year": state.year,
                "curriculum": state.curriculum,
                "plan": state.plan,
                "report": report,
            });
            let text = serde_json::to_string_pretty(&value).context("serialize report")?;
            println!("{text}");
        } else {
            self.print(&state, &report);
        }
        Ok(if args.strict && !report.is_valid { 1 } else { 0 })
    }

    fn catalog(&self, args: &CatalogArgs) -> Result<i32> {
        let state = self.open()?;
        let manager = self.session.manager();
        let rows: Vec<CatalogRow<'_>> = self
            .session
            .catalog
            .search(args.query.as_deref().unwrap_or_default())
            .into_iter()
            .filter(|exam| args.all || exam.is_recognized_in(state.curriculum))
            .map(|exam| CatalogRow {
                exam,
                in_plan: state.contains_exam(&exam.id),
                available: manager.is_available(&state, exam),
                hint: manager.describe_next_availability(&state, exam),
            })
            .collect();
        print_catalog(&self.session.catalog, &rows, &manager, &state);
        Ok(0)
    }

    fn add(&self, args: &AddArgs) -> Result<i32> {
        let mut state = self.open()?;
        let exam = find_exam(&self.session.catalog, &args.exam)?;
        self.ensure_available(&state, exam)?;
        let report = self
            .session
            .manager()
            .add_exam(&mut state, exam, args.table.clone())?;
        self.commit(&state, &report)
    }

    fn add_custom(&self, args: &AddCustomArgs) -> Result<i32> {
        let name = args.name.trim();
        if name.is_empty() {
            bail!("custom exam name must not be empty");
        }
        if args.credits == 0 {
            bail!("custom exam credits must be positive");
        }
        let mut state = self.open()?;
        let report = self
            .session
            .manager()
            .add_custom_exam(&mut state, name, args.credits);
        self.commit(&state, &report)
    }

    fn remove(&self, args: &ItemArgs) -> Result<i32> {
        let mut state = self.open()?;
        let report = self.session.manager().remove_exam(&mut state, &args.item)?;
        self.commit(&state, &report)
    }

    fn move_item(&self, args: &MoveArgs) -> Result<i32> {
        let mut state = self.open()?;
        let manager = self.session.manager();
        let report = manager
            .move_exam(&mut state, &args.item, args.table.clone())
            .with_context(|| {
                let tables: Vec<String> = manager
                    .possible_tables(&state, &args.item)
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                if tables.is_empty() {
                    format!("move {}", args.item)
                } else {
                    format!("move {} (allowed tables: {})", args.item, tables.join(", "))
                }
            })?;
        self.commit(&state, &report)
    }

    fn toggle(&self, args: &ExamArgs) -> Result<i32> {
        let mut state = self.open()?;
        let exam = find_exam(&self.session.catalog, &args.exam)?;
        if !state.contains_exam(&exam.id) {
            self.ensure_available(&state, exam)?;
        }
        let report = self.session.manager().toggle_exam(&mut state, exam)?;
        self.commit(&state, &report)
    }

    fn set_year(&self, args: &SetYearArgs) -> Result<i32> {
        let mut state = self.open()?;
        let year = AcademicYear::new(args.year.trim());
        if year.start_year().is_none() {
            warn!(year = %year, "academic year has no starting year; year-dependent exams will be unavailable");
        }
        let report = self.session.manager().set_year(&mut state, year);
        self.commit(&state, &report)
    }

    fn set_curriculum(&self, args: &SetCurriculumArgs) -> Result<i32> {
        let mut state = self.open()?;
        let report = self
            .session
            .manager()
            .set_curriculum(&mut state, args.curriculum);
        self.commit(&state, &report)
    }

    fn reset(&self) -> Result<i32> {
        let mut state = self.open()?;
        let report = self.session.manager().reset(&mut state);
        self.commit(&state, &report)
    }

    fn export(&self, args: &ExportArgs) -> Result<i32> {
        let state = self.open()?;
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_export_name(&state)));
        let rows = export_to_path(&state, &self.session.catalog, &path)?;
        println!("Exported {rows} items to {}", path.display());
        Ok(0)
    }

    fn years(&self) -> Result<i32> {
        let state = self.open()?;
        let years = selectable_years(chrono::Local::now().year());
        print_years(&years, &state.year);
        Ok(0)
    }

    fn open(&self) -> Result<PlanState> {
        self.session.open(&self.state_path)
    }

    fn save(&self, state: &PlanState) -> Result<()> {
        self.session.save(&self.state_path, state)
    }

    fn commit(&self, state: &PlanState, report: &ValidationReport) -> Result<i32> {
        self.save(state)?;
        self.print(state, report);
        Ok(0)
    }

    fn print(&self, state: &PlanState, report: &ValidationReport) {
        print_plan(
            state,
            report,
            self.session.locale,
            self.session.rules.total_credits(),
        );
    }

    /// Unavailable exams cannot be added by hand.
    fn ensure_available(&self, state: &PlanState, exam: &Exam) -> Result<()> {
        let manager = self.session.manager();
        if manager.is_available(state, exam) {
            return Ok(());
        }
        match manager.describe_next_availability(state, exam) {
            Some(hint) => bail!("{} is not available in {}: {hint}", exam.name, state.year),
            None => bail!("{} is not available in {}", exam.name, state.year),
        }
    }
}

/// Catalog lookup by id, falling back to a case-insensitive name match.
fn find_exam<'a>(catalog: &'a Catalog, name: &str) -> Result<&'a Exam> {
    let name = name.trim();
    catalog
        .get(name)
        .or_else(|| catalog.iter().find(|exam| exam.name.eq_ignore_ascii_case(name)))
        .ok_or_else(|| anyhow!("no exam named {name:?} in the catalog; try `studyplan catalog --query`"))
}
