//! Library side of the `studyplan` command-line tool.

pub mod export;
pub mod logging;
pub mod session;

pub use export::{ExportRow, default_export_name, export_rows, export_to_path, write_csv};
pub use session::Session;
