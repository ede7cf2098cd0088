//! File I/O for study plan sessions.
//!
//! - Saving with atomic writes
//! - Loading with schema version checks

mod load;
mod save;

pub use load::{load_state, parse_state};
pub use save::{save_state, serialize_state};
