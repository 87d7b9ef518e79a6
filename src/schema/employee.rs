use serde::Deserialize;
use serde_json::{Value, json};

use super::{
    Lookup, Schema, lenient_amount, non_empty, optional_text, parse_date, parse_timestamp,
};
use crate::clients::protocol::WireFields;
use crate::domain::{DepartmentId, EmployeeId};
use crate::models::employee::{Employee, EmployeeDraft, EmployeeStatus};

pub const TABLE: &str = "employee_c";
pub const DEPARTMENT_FIELD: &str = "department_c";
pub const STATUS_FIELD: &str = "status_c";

/// An `employee_c` row.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeRecord {
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Name", default)]
    pub name: Option<String>,

    #[serde(rename = "first_name_c", default)]
    pub first_name: Option<String>,

    #[serde(rename = "last_name_c", default)]
    pub last_name: Option<String>,

    #[serde(rename = "email_c", default)]
    pub email: Option<String>,

    #[serde(rename = "phone_c", default)]
    pub phone: Option<String>,

    #[serde(rename = "position_c", default)]
    pub position: Option<String>,

    #[serde(rename = "department_c", default)]
    pub department: Option<Lookup>,

    #[serde(rename = "start_date_c", default)]
    pub start_date: Option<String>,

    #[serde(rename = "status_c", default)]
    pub status: Option<String>,

    #[serde(rename = "salary_c", default, deserialize_with = "lenient_amount")]
    pub salary: u64,

    #[serde(rename = "manager_c", default)]
    pub manager: Option<String>,

    #[serde(rename = "created_at_c", default)]
    pub created_at: Option<String>,

    #[serde(rename = "updated_at_c", default)]
    pub updated_at: Option<String>,

    #[serde(rename = "CreatedOn", default)]
    pub created_on: Option<String>,

    #[serde(rename = "ModifiedOn", default)]
    pub modified_on: Option<String>,
}

impl Schema for Employee {
    const TABLE: &'static str = TABLE;
    const ENTITY: &'static str = "Employee";
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "first_name_c",
        "last_name_c",
        "email_c",
        "phone_c",
        "position_c",
        "start_date_c",
        "status_c",
        "salary_c",
        "manager_c",
        "created_at_c",
        "updated_at_c",
        "department_c",
        "CreatedOn",
        "ModifiedOn",
    ];
    const DEFAULT_ORDER: &'static str = "Id";
    const PAGE_LIMIT: u32 = 100;

    type Wire = EmployeeRecord;
    type Draft = EmployeeDraft;

    fn to_domain(wire: EmployeeRecord) -> Self {
        let (department_id, department_name) = wire
            .department
            .map(Lookup::into_parts)
            .unwrap_or_default();

        let first_name = wire.first_name.unwrap_or_default();
        let last_name = wire.last_name.unwrap_or_default();
        let display_name = non_empty(wire.name).unwrap_or_else(|| {
            format!("{first_name} {last_name}").trim().to_string()
        });

        Self {
            id: EmployeeId::new(wire.id),
            display_name,
            first_name,
            last_name,
            email: wire.email.unwrap_or_default(),
            phone: wire.phone.unwrap_or_default(),
            position: wire.position.unwrap_or_default(),
            department_id: department_id.map(DepartmentId::new),
            department_name,
            start_date: parse_date(wire.start_date.as_deref()),
            status: wire
                .status
                .and_then(|s| s.parse().ok())
                .unwrap_or(EmployeeStatus::Active),
            salary: wire.salary,
            manager: non_empty(wire.manager),
            created_at: parse_timestamp(wire.created_at.as_deref())
                .or_else(|| parse_timestamp(wire.created_on.as_deref())),
            updated_at: parse_timestamp(wire.updated_at.as_deref())
                .or_else(|| parse_timestamp(wire.modified_on.as_deref())),
        }
    }

    fn to_wire(draft: &EmployeeDraft) -> WireFields {
        let mut fields = WireFields::new();
        fields.insert("Name".to_string(), json!(draft.display_name()));
        fields.insert("first_name_c".to_string(), json!(draft.first_name));
        fields.insert("last_name_c".to_string(), json!(draft.last_name));
        fields.insert("email_c".to_string(), json!(draft.email));
        fields.insert("phone_c".to_string(), json!(draft.phone));
        fields.insert("position_c".to_string(), json!(draft.position));
        fields.insert(
            "start_date_c".to_string(),
            draft.start_date.map_or(Value::Null, |d| {
                Value::String(d.format("%Y-%m-%d").to_string())
            }),
        );
        fields.insert(STATUS_FIELD.to_string(), json!(draft.status.as_str()));
        fields.insert("salary_c".to_string(), json!(draft.salary));
        fields.insert("manager_c".to_string(), optional_text(draft.manager.as_ref()));
        fields.insert(
            DEPARTMENT_FIELD.to_string(),
            draft.department_id.map_or(Value::Null, |id| json!(id.value())),
        );
        fields
    }

    fn record_id(&self) -> i64 {
        self.id.value()
    }
}
