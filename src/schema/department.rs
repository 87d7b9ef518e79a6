use serde::Deserialize;
use serde_json::json;

use super::{Schema, lenient_amount, non_empty, optional_text};
use crate::clients::protocol::WireFields;
use crate::domain::DepartmentId;
use crate::models::department::{Department, DepartmentDraft};

pub const TABLE: &str = "department_c";

/// A `department_c` row. `name_c` wins over `Name` when both are present.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentRecord {
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Name", default)]
    pub name: Option<String>,

    #[serde(rename = "name_c", default)]
    pub name_c: Option<String>,

    #[serde(rename = "description_c", default)]
    pub description: Option<String>,

    #[serde(rename = "head_of_department_c", default)]
    pub head: Option<String>,

    #[serde(rename = "budget_c", default, deserialize_with = "lenient_amount")]
    pub budget: u64,
}

impl Schema for Department {
    const TABLE: &'static str = TABLE;
    const ENTITY: &'static str = "Department";
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "name_c",
        "description_c",
        "head_of_department_c",
        "budget_c",
    ];
    const DEFAULT_ORDER: &'static str = "Id";
    const PAGE_LIMIT: u32 = 100;

    type Wire = DepartmentRecord;
    type Draft = DepartmentDraft;

    fn to_domain(wire: DepartmentRecord) -> Self {
        Self {
            id: DepartmentId::new(wire.id),
            name: non_empty(wire.name_c)
                .or_else(|| non_empty(wire.name))
                .unwrap_or_default(),
            description: wire.description.unwrap_or_default(),
            head: non_empty(wire.head),
            budget: wire.budget,
        }
    }

    fn to_wire(draft: &DepartmentDraft) -> WireFields {
        let mut fields = WireFields::new();
        fields.insert("Name".to_string(), json!(draft.name));
        fields.insert("name_c".to_string(), json!(draft.name));
        fields.insert("description_c".to_string(), json!(draft.description));
        fields.insert(
            "head_of_department_c".to_string(),
            optional_text(draft.head.as_ref()),
        );
        fields.insert("budget_c".to_string(), json!(draft.budget));
        fields
    }

    fn record_id(&self) -> i64 {
        self.id.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn name_prefers_schema_field() {
        let record: DepartmentRecord = serde_json::from_value(json!({
            "Id": 1,
            "Name": "eng",
            "name_c": "Engineering",
            "budget_c": 1000
        }))
        .unwrap();
        let dept = Department::to_domain(record);
        assert_eq!(dept.name, "Engineering");
        assert_eq!(dept.description, "");
        assert_eq!(dept.head, None);
    }

    #[test]
    fn round_trip() {
        let original = json!({
            "Id": 4,
            "Name": "Finance",
            "name_c": "Finance",
            "description_c": "Money",
            "head_of_department_c": "Lena Ortiz",
            "budget_c": 350000
        });
        let dept = Department::to_domain(serde_json::from_value(original.clone()).unwrap());
        let written = Department::to_wire(&dept.draft());
        for key in ["Name", "name_c", "description_c", "head_of_department_c", "budget_c"] {
            assert_eq!(written[key], original[key], "field {key}");
        }
        assert_eq!(written.get("Id"), None::<&Value>);
    }
}
