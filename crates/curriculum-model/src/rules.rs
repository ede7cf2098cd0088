//! Degree crediting rules.
//!
//! The serde types mirror the rule file shape; [`TableRule`] is the
//! normalized view the allocator and validator work with. Every numeric
//! field is read leniently: a missing or malformed value becomes zero so
//! a partially broken rule file still yields a usable rule set.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::{Curriculum, TableCode};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub degree_requirements: DegreeRequirements,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeRequirements {
    #[serde(default)]
    pub common_rules: CommonRules,
    /// Per-curriculum rules keyed by curriculum code.
    #[serde(default)]
    pub programs: BTreeMap<String, ProgramRules>,
}

/// Variant-independent requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonRules {
    /// Overall credit requirement.
    #[serde(default, deserialize_with = "lenient_credits")]
    pub total_credits: u32,
    /// Credit cap of the free-elective table.
    #[serde(default, deserialize_with = "lenient_credits")]
    pub free_choice_credits: u32,
    /// Baseline items seeded into every plan.
    #[serde(default)]
    pub mandatory: Vec<MandatoryEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MandatoryEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_credits")]
    pub credits: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramRules {
    /// Variant table schema in priority order. Derived from the rules when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<String>,
    #[serde(default)]
    pub curriculum_rules: Vec<RuleEntry>,
}

/// One rule as written in the rule file.
///
/// An entry with a `tables` list is a combined-sum rule; otherwise `source`
/// names the single table the minimum applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient_credits")]
    pub min_credits: u32,
}

/// Normalized table requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRule {
    /// `table` must reach `min_credits` on its own.
    Minimum { table: TableCode, min_credits: u32 },
    /// The sum over `tables` must reach `min_credits`.
    Combined {
        label: String,
        tables: Vec<TableCode>,
        min_credits: u32,
    },
}

impl RuleEntry {
    /// Normalizes the entry; `None` when it names no table at all.
    pub fn to_rule(&self) -> Option<TableRule> {
        if !self.tables.is_empty() {
            let tables: Vec<TableCode> = self
                .tables
                .iter()
                .filter_map(|code| TableCode::parse(code))
                .collect();
            if tables.is_empty() {
                return None;
            }
            let label = self
                .label
                .clone()
                .filter(|label| !label.trim().is_empty())
                .unwrap_or_else(|| {
                    tables
                        .iter()
                        .map(TableCode::as_str)
                        .collect::<Vec<_>>()
                        .join(" + ")
                });
            return Some(TableRule::Combined {
                label,
                tables,
                min_credits: self.min_credits,
            });
        }
        TableCode::parse(&self.source).map(|table| TableRule::Minimum {
            table,
            min_credits: self.min_credits,
        })
    }
}

impl TableRule {
    pub fn min_credits(&self) -> u32 {
        match self {
            TableRule::Minimum { min_credits, .. } | TableRule::Combined { min_credits, .. } => {
                *min_credits
            }
        }
    }
}

impl RuleSet {
    pub fn program(&self, curriculum: Curriculum) -> Option<&ProgramRules> {
        self.degree_requirements
            .programs
            .iter()
            .find(|(code, _)| code.trim().eq_ignore_ascii_case(curriculum.as_code()))
            .map(|(_, program)| program)
    }

    /// Table rules of a curriculum in declaration order.
    ///
    /// Entries naming no table are dropped.
    pub fn table_rules(&self, curriculum: Curriculum) -> Vec<TableRule> {
        self.program(curriculum)
            .map(|program| {
                program
                    .curriculum_rules
                    .iter()
                    .filter_map(RuleEntry::to_rule)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Variant-specific tables in priority order.
    ///
    /// Uses the program's explicit `tables` list when present, otherwise
    /// the core tables referenced by its rules, first occurrence first.
    pub fn core_tables(&self, curriculum: Curriculum) -> Vec<TableCode> {
        let Some(program) = self.program(curriculum) else {
            return Vec::new();
        };
        let mut tables: Vec<TableCode> = Vec::new();
        let mut push = |table: TableCode| {
            if table.is_core() && !tables.contains(&table) {
                tables.push(table);
            }
        };
        if !program.tables.is_empty() {
            program
                .tables
                .iter()
                .filter_map(|code| TableCode::parse(code))
                .for_each(&mut push);
            return tables;
        }
        let rules: Vec<TableRule> = program
            .curriculum_rules
            .iter()
            .filter_map(RuleEntry::to_rule)
            .collect();
        for rule in &rules {
            if let TableRule::Minimum { table, .. } = rule {
                push(table.clone());
            }
        }
        for rule in rules {
            if let TableRule::Combined { tables: members, .. } = rule {
                members.into_iter().for_each(&mut push);
            }
        }
        tables
    }

    /// Minimum of a single-table rule; zero when the table has none.
    pub fn minimum_for(&self, curriculum: Curriculum, table: &TableCode) -> u32 {
        self.table_rules(curriculum)
            .into_iter()
            .find_map(|rule| match rule {
                TableRule::Minimum {
                    table: ruled,
                    min_credits,
                } if &ruled == table => Some(min_credits),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn mandatory(&self) -> &[MandatoryEntry] {
        &self.degree_requirements.common_rules.mandatory
    }

    /// Sum of the baseline mandatory credit weights.
    pub fn mandatory_credits(&self) -> u32 {
        self.mandatory()
            .iter()
            .fold(0u32, |sum, entry| sum.saturating_add(entry.credits))
    }

    pub fn free_elective_cap(&self) -> u32 {
        self.degree_requirements.common_rules.free_choice_credits
    }

    pub fn total_credits(&self) -> u32 {
        self.degree_requirements.common_rules.total_credits
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn lenient_credits<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = match LenientNumber::deserialize(deserializer)? {
        LenientNumber::Unsigned(value) => u32::try_from(value).unwrap_or(u32::MAX),
        LenientNumber::Signed(_) => 0,
        LenientNumber::Float(value) if value.is_finite() && value > 0.0 => value as u32,
        LenientNumber::Float(_) => 0,
        LenientNumber::Text(text) => text.trim().parse().unwrap_or(0),
        LenientNumber::Other(_) => 0,
    };
    Ok(value)
}
