//! Availability evaluation, table allocation and the plan manager.

pub mod allocator;
pub mod availability;
pub mod manager;
pub mod tables;

pub use allocator::allocate;
pub use availability::{describe_next_availability, is_available};
pub use manager::{PlanManager, PlanRejection, PlanResult, PlanState};
pub use tables::{allowed_tables, display_tables};
