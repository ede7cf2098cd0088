//! Persistence for study plan sessions.
//!
//! A session is stored as a single pretty-printed JSON object:
//!
//! ```json
//! {
//!   "schema_version": 1,
//!   "saved_at": "2026-10-17T09:30:00+00:00",
//!   "catalog_fingerprint": "9f86d0...",
//!   "year": "2025/2026",
//!   "curriculum": "F94",
//!   "plan": [ ... ]
//! }
//! ```
//!
//! `catalog_fingerprint` is the SHA-256 of the exam catalog the plan was
//! built against; callers compare it to detect catalog updates.

#![deny(unsafe_code)]

pub mod error;
pub mod io;
pub mod types;

pub use error::{PersistenceError, Result};
pub use io::{load_state, parse_state, save_state, serialize_state};
pub use types::{CURRENT_SCHEMA_VERSION, StateFile};
