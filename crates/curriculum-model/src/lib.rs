pub mod error;
pub mod exam;
pub mod ids;
pub mod locale;
pub mod lookup;
pub mod plan;
pub mod report;
pub mod rules;

pub use error::{ModelError, Result};
pub use exam::{AvailabilityRule, DEFAULT_EXAM_CREDITS, DEFAULT_EXAM_PERIOD, Exam};
pub use ids::{
    AcademicYear, Curriculum, FIRST_SELECTABLE_START_YEAR, TableCode, selectable_years,
};
pub use locale::{Locale, MessageKey};
pub use lookup::ExamLookup;
pub use plan::{ItemOrigin, PlanItem};
pub use report::{SumStatus, TableStatus, ValidationReport, Violation};
pub use rules::{
    CommonRules, DegreeRequirements, MandatoryEntry, ProgramRules, RuleEntry, RuleSet, TableRule,
};
