use serde::{Deserialize, Serialize};

use crate::exam::Exam;
use crate::ids::TableCode;

/// Where a plan item comes from, which decides how it may be moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemOrigin {
    /// Baseline mandatory entry; never reallocated, never removable.
    Fixed,
    /// User-added exam outside the catalog.
    Custom,
    /// Backed by a catalog exam and reallocated against its allowed tables.
    Catalog { exam_id: String },
}

/// An entry of the study plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanItem {
    /// Unique within a plan. Catalog items reuse the exam identifier.
    pub id: String,
    #[serde(flatten)]
    pub origin: ItemOrigin,
    pub name: String,
    pub credits: u32,
    pub table: TableCode,
}

impl PlanItem {
    pub fn fixed(id: impl Into<String>, name: impl Into<String>, credits: u32) -> Self {
        Self {
            id: id.into(),
            origin: ItemOrigin::Fixed,
            name: name.into(),
            credits,
            table: TableCode::Mandatory,
        }
    }

    pub fn custom(id: impl Into<String>, name: impl Into<String>, credits: u32) -> Self {
        Self {
            id: id.into(),
            origin: ItemOrigin::Custom,
            name: name.into(),
            credits,
            table: TableCode::FreeElective,
        }
    }

    pub fn from_exam(exam: &Exam, table: TableCode) -> Self {
        Self {
            id: exam.id.clone(),
            origin: ItemOrigin::Catalog {
                exam_id: exam.id.clone(),
            },
            name: exam.name.clone(),
            credits: exam.credits,
            table,
        }
    }

    pub fn exam_id(&self) -> Option<&str> {
        match &self.origin {
            ItemOrigin::Catalog { exam_id } => Some(exam_id),
            _ => None,
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self.origin, ItemOrigin::Fixed)
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.origin, ItemOrigin::Custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_item_serializes_flat() {
        let exam = Exam::new("Compilers", 9);
        let item = PlanItem::from_exam(&exam, TableCode::Core("A".into()));
        let json = serde_json::to_value(&item).expect("serialize item");
        assert_eq!(json["kind"], "catalog");
        assert_eq!(json["exam_id"], "Compilers");
        assert_eq!(json["table"], "A");

        let back: PlanItem = serde_json::from_value(json).expect("deserialize item");
        assert_eq!(back, item);
    }

    #[test]
    fn fixed_items_start_in_mandatory_table() {
        let item = PlanItem::fixed("fixed-thesis", "Thesis", 39);
        assert!(item.is_fixed());
        assert_eq!(item.table, TableCode::Mandatory);
        assert_eq!(item.exam_id(), None);
    }
}
