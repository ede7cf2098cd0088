//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use curriculum_model::{Curriculum, Locale, TableCode};

#[derive(Parser)]
#[command(
    name = "studyplan",
    version,
    about = "Study plan builder - place exams in degree tables and check credit rules",
    long_about = "Build a master's degree study plan from the exam catalog.\n\n\
                  Exams are placed in the tables of the chosen curriculum automatically \
                  and the plan is checked against the degree's credit requirements.\n\
                  The plan is kept in a JSON state file between invocations."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Exam catalog CSV (default: $CURRICULUM_DATA_DIR/exams.csv or the built-in catalog).
    #[arg(long = "exams", value_name = "PATH", global = true)]
    pub exams: Option<PathBuf>,

    /// Degree rules JSON (default: $CURRICULUM_DATA_DIR/rules.json or the built-in rules).
    #[arg(long = "rules", value_name = "PATH", global = true)]
    pub rules: Option<PathBuf>,

    /// Study plan state file.
    #[arg(
        long = "state",
        value_name = "PATH",
        default_value = "study-plan.json",
        global = true
    )]
    pub state: PathBuf,

    /// Language of report messages (en, it).
    #[arg(long = "lang", value_name = "LANG", default_value = "en", global = true)]
    pub lang: Locale,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start a new plan seeded with the mandatory items.
    Init(InitArgs),

    /// Print the plan by table and the requirement report.
    Show(ShowArgs),

    /// List catalog exams for the current curriculum and year.
    Catalog(CatalogArgs),

    /// Add a catalog exam to the plan.
    Add(AddArgs),

    /// Add an exam that is not in the catalog.
    AddCustom(AddCustomArgs),

    /// Remove a plan item.
    Remove(ItemArgs),

    /// Move a plan item to another table.
    Move(MoveArgs),

    /// Add a catalog exam, or remove it when already planned.
    Toggle(ExamArgs),

    /// Change the reference academic year.
    SetYear(SetYearArgs),

    /// Switch curriculum, re-placing every catalog exam.
    SetCurriculum(SetCurriculumArgs),

    /// Clear the plan, keeping year and curriculum.
    Reset,

    /// Export the plan as CSV.
    Export(ExportArgs),

    /// List selectable academic years.
    Years,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Reference academic year, e.g. 2025/2026 (default: the current one).
    #[arg(long = "year", value_name = "YEAR")]
    pub year: Option<String>,

    /// Curriculum variant (FBA, F94).
    #[arg(long = "curriculum", value_name = "CODE")]
    pub curriculum: Option<Curriculum>,

    /// Overwrite an existing state file.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Print the report as JSON.
    #[arg(long = "json")]
    pub json: bool,

    /// Exit with status 1 when a requirement is not met.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Parser)]
pub struct CatalogArgs {
    /// Only exams whose name contains this text (case-insensitive).
    #[arg(long = "query", short = 'q', value_name = "TEXT")]
    pub query: Option<String>,

    /// Include exams not recognized by the current curriculum.
    #[arg(long = "all")]
    pub all: bool,
}

#[derive(Parser)]
pub struct AddArgs {
    /// Exam name as listed in the catalog.
    #[arg(value_name = "EXAM")]
    pub exam: String,

    /// Preferred table; the allocator may still re-place the exam.
    #[arg(long = "table", value_name = "TABLE")]
    pub table: Option<TableCode>,
}

#[derive(Parser)]
pub struct AddCustomArgs {
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Credit weight.
    #[arg(long = "credits", value_name = "CFU", default_value_t = 6)]
    pub credits: u32,
}

#[derive(Parser)]
pub struct ItemArgs {
    /// Plan item id as printed by `show`.
    #[arg(value_name = "ITEM")]
    pub item: String,
}

#[derive(Parser)]
pub struct MoveArgs {
    /// Plan item id as printed by `show`.
    #[arg(value_name = "ITEM")]
    pub item: String,

    /// Target table code, e.g. A, 1, Facoltativi.
    #[arg(value_name = "TABLE")]
    pub table: TableCode,
}

#[derive(Parser)]
pub struct ExamArgs {
    /// Exam name as listed in the catalog.
    #[arg(value_name = "EXAM")]
    pub exam: String,
}

#[derive(Parser)]
pub struct SetYearArgs {
    /// Academic year, e.g. 2025/2026.
    #[arg(value_name = "YEAR")]
    pub year: String,
}

#[derive(Parser)]
pub struct SetCurriculumArgs {
    /// Curriculum variant (FBA, F94).
    #[arg(value_name = "CODE")]
    pub curriculum: Curriculum,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Output file (default: piano_studi_<curriculum>_<year>.csv).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
