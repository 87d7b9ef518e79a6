//! Wire types of the generic record-storage API.
//!
//! Field casing mirrors what the storage service expects, which is why the
//! serde renames below are a mix of `PascalCase` and `camelCase`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type WireFields = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub field: FieldName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

impl FieldSpec {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            field: FieldName {
                name: name.to_string(),
            },
        }
    }

    #[must_use]
    pub fn list(names: &[&str]) -> Vec<Self> {
        names.iter().map(|n| Self::named(n)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    EqualTo,
    NotEqualTo,
    Contains,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WhereClause {
    pub field_name: String,
    pub operator: Operator,
    pub values: Vec<Value>,
}

impl WhereClause {
    #[must_use]
    pub fn equal_to(field: &str, value: impl Into<Value>) -> Self {
        Self {
            field_name: field.to_string(),
            operator: Operator::EqualTo,
            values: vec![value.into()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortType {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    #[serde(rename = "sorttype")]
    pub sort_type: SortType,
}

impl OrderBy {
    #[must_use]
    pub fn new(field: &str, sort_type: SortType) -> Self {
        Self {
            field_name: field.to_string(),
            sort_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchParams {
    pub fields: Vec<FieldSpec>,

    #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
    pub where_clauses: Vec<WhereClause>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging_info: Option<PagingInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetParams {
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordsPayload {
    pub records: Vec<WireFields>,
}

impl From<WireFields> for RecordsPayload {
    fn from(record: WireFields) -> Self {
        Self {
            records: vec![record],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePayload {
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<i64>,
}

/// Per-record outcome inside a batch mutation response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordResult {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Value>,
}

impl RecordResult {
    /// Server message, falling back to the first structured error.
    #[must_use]
    pub fn failure_message(&self) -> Option<String> {
        self.message.clone().or_else(|| {
            self.errors.first().map(|e| match e {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        })
    }
}

/// `{success, message?, data?, results?}` returned by every call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<RecordResult>>,
}

impl Envelope {
    #[must_use]
    pub const fn ok(data: Value) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            results: None,
        }
    }

    #[must_use]
    pub const fn batch(results: Vec<RecordResult>) -> Self {
        Self {
            success: true,
            message: None,
            data: None,
            results: Some(results),
        }
    }

    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            results: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fetch_params_wire_shape() {
        let params = FetchParams {
            fields: FieldSpec::list(&["Name", "email_c"]),
            where_clauses: vec![WhereClause::equal_to("status_c", "active")],
            order_by: vec![OrderBy::new("Id", SortType::Desc)],
            paging_info: Some(PagingInfo {
                limit: 100,
                offset: 0,
            }),
        };

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({
                "fields": [{"field": {"Name": "Name"}}, {"field": {"Name": "email_c"}}],
                "where": [{"FieldName": "status_c", "Operator": "EqualTo", "Values": ["active"]}],
                "orderBy": [{"fieldName": "Id", "sorttype": "DESC"}],
                "pagingInfo": {"limit": 100, "offset": 0}
            })
        );
    }

    #[test]
    fn envelope_tolerates_missing_fields() {
        let env: Envelope = serde_json::from_value(json!({"success": false})).unwrap();
        assert!(!env.success);
        assert!(env.message.is_none());
        assert!(env.results.is_none());
    }

    #[test]
    fn failure_message_falls_back_to_errors() {
        let result: RecordResult = serde_json::from_value(json!({
            "success": false,
            "errors": ["email_c is invalid"]
        }))
        .unwrap();
        assert_eq!(result.failure_message().as_deref(), Some("email_c is invalid"));
    }
}
