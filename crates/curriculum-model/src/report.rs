use serde::Serialize;

use crate::ids::TableCode;
use crate::locale::{Locale, MessageKey};

/// Credit counter of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStatus {
    pub code: TableCode,
    pub current: u32,
    pub min: u32,
}

impl TableStatus {
    pub fn new(code: TableCode) -> Self {
        Self {
            code,
            current: 0,
            min: 0,
        }
    }

    pub fn missing(&self) -> u32 {
        self.min.saturating_sub(self.current)
    }

    pub fn is_met(&self) -> bool {
        self.current >= self.min
    }
}

/// Result of a combined-sum rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SumStatus {
    pub label: String,
    pub tables: Vec<TableCode>,
    pub current: u32,
    pub min: u32,
}

impl SumStatus {
    pub fn missing(&self) -> u32 {
        self.min.saturating_sub(self.current)
    }

    pub fn is_met(&self) -> bool {
        self.current >= self.min
    }
}

/// An unmet requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    TableShortfall {
        table: TableCode,
        current: u32,
        min: u32,
    },
    SumShortfall {
        label: String,
        tables: Vec<TableCode>,
        current: u32,
        min: u32,
    },
    MandatoryIncomplete { current: u32, min: u32 },
    TotalShortfall { current: u32, min: u32 },
}

impl Violation {
    /// Stable identifier, e.g. for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            Violation::TableShortfall { .. } => "table_shortfall",
            Violation::SumShortfall { .. } => "sum_shortfall",
            Violation::MandatoryIncomplete { .. } => "mandatory_incomplete",
            Violation::TotalShortfall { .. } => "total_shortfall",
        }
    }

    pub fn missing(&self) -> u32 {
        match self {
            Violation::TableShortfall { current, min, .. }
            | Violation::SumShortfall { current, min, .. }
            | Violation::MandatoryIncomplete { current, min }
            | Violation::TotalShortfall { current, min } => min.saturating_sub(*current),
        }
    }

    pub fn message(&self, locale: Locale) -> String {
        let missing = self.missing().to_string();
        match self {
            Violation::TableShortfall { table, .. } => locale.render(
                MessageKey::TableMissing,
                &[("table", locale.table_label(table)), ("missing", missing.as_str())],
            ),
            Violation::SumShortfall { tables, .. } => {
                let tables = locale.join_tables(tables);
                locale.render(
                    MessageKey::SumMissing,
                    &[("tables", tables.as_str()), ("missing", missing.as_str())],
                )
            }
            Violation::MandatoryIncomplete { .. } => {
                locale.render(MessageKey::MandatoryIncomplete, &[])
            }
            Violation::TotalShortfall { current, min } => {
                let (current, min) = (current.to_string(), min.to_string());
                locale.render(
                    MessageKey::TotalStatus,
                    &[("current", current.as_str()), ("min", min.as_str())],
                )
            }
        }
    }
}

/// Outcome of validating a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Credits counted towards the degree; overflow items excluded.
    pub total_credits: u32,
    /// Table counters in display order: mandatory, variant tables,
    /// free-elective, overflow, then any table only found on plan items.
    pub tables: Vec<TableStatus>,
    pub sums: Vec<SumStatus>,
    pub is_valid: bool,
    /// Unmet requirements in report order.
    pub violations: Vec<Violation>,
    /// `violations` rendered in the report's locale.
    pub messages: Vec<String>,
}

impl ValidationReport {
    pub fn table(&self, code: &TableCode) -> Option<&TableStatus> {
        self.tables.iter().find(|status| &status.code == code)
    }

    /// Current credits of a table; zero for tables the report does not know.
    pub fn current(&self, code: &TableCode) -> u32 {
        self.table(code).map_or(0, |status| status.current)
    }

    pub fn sum(&self, label: &str) -> Option<&SumStatus> {
        self.sums.iter().find(|sum| sum.label == label)
    }

    /// Renders the violations again in another locale.
    pub fn messages_in(&self, locale: Locale) -> Vec<String> {
        self.violations
            .iter()
            .map(|violation| violation.message(locale))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_messages_follow_locale() {
        let shortfall = Violation::TableShortfall {
            table: TableCode::Core("A".into()),
            current: 12,
            min: 18,
        };
        assert_eq!(shortfall.missing(), 6);
        assert_eq!(shortfall.message(Locale::En), "Table A: Missing 6 CFU");
        assert_eq!(shortfall.message(Locale::It), "Tabella A: Mancano 6 CFU");

        let sum = Violation::SumShortfall {
            label: "Sum Tables B + C".into(),
            tables: vec![TableCode::Core("B".into()), TableCode::Core("C".into())],
            current: 40,
            min: 48,
        };
        assert_eq!(
            sum.message(Locale::En),
            "Sum of tables B and C insufficient: missing 8 CFU"
        );

        let total = Violation::TotalShortfall {
            current: 62,
            min: 120,
        };
        assert_eq!(total.message(Locale::En), "Total: 62/120 CFU");
        assert_eq!(total.code(), "total_shortfall");
    }

    #[test]
    fn free_elective_shortfall_uses_table_label() {
        let violation = Violation::TableShortfall {
            table: TableCode::FreeElective,
            current: 0,
            min: 12,
        };
        assert_eq!(violation.message(Locale::En), "Table Optional: Missing 12 CFU");
    }
}
