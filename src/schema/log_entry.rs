use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Lookup, Schema, parse_timestamp};
use crate::clients::protocol::WireFields;
use crate::domain::{EmployeeId, LogEntryId};
use crate::models::log_entry::{LogDraft, LogEntry, LogLevel, default_log_name};

pub const TABLE: &str = "logger_c";
pub const LEVEL_FIELD: &str = "log_level_c";
pub const EMPLOYEE_FIELD: &str = "employee_c";

/// A `logger_c` row.
#[derive(Debug, Clone, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Name", default)]
    pub name: Option<String>,

    #[serde(rename = "Tags", default)]
    pub tags: Option<String>,

    #[serde(rename = "timestamp_c", default)]
    pub timestamp: Option<String>,

    #[serde(rename = "log_level_c", default)]
    pub level: Option<String>,

    #[serde(rename = "message_c", default)]
    pub message: Option<String>,

    #[serde(rename = "employee_c", default)]
    pub employee: Option<Lookup>,

    #[serde(rename = "CreatedOn", default)]
    pub created_on: Option<String>,
}

impl Schema for LogEntry {
    const TABLE: &'static str = TABLE;
    const ENTITY: &'static str = "Logger entry";
    const FIELDS: &'static [&'static str] = &[
        "Name",
        "Tags",
        "CreatedOn",
        "ModifiedOn",
        "timestamp_c",
        "log_level_c",
        "message_c",
        "employee_c",
    ];
    const DEFAULT_ORDER: &'static str = "timestamp_c";
    const PAGE_LIMIT: u32 = 50;

    type Wire = LogRecord;
    type Draft = LogDraft;

    fn to_domain(wire: LogRecord) -> Self {
        let (employee_id, employee_name) =
            wire.employee.map(Lookup::into_parts).unwrap_or_default();
        let level = wire
            .level
            .and_then(|l| l.parse().ok())
            .unwrap_or(LogLevel::Info);
        let timestamp = parse_timestamp(wire.timestamp.as_deref())
            .or_else(|| parse_timestamp(wire.created_on.as_deref()))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Self {
            id: LogEntryId::new(wire.id),
            name: wire
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| default_log_name(level, timestamp)),
            timestamp,
            level,
            message: wire.message.unwrap_or_default(),
            employee_id: employee_id.map(EmployeeId::new),
            employee_name,
            tags: wire.tags.unwrap_or_default(),
        }
    }

    fn to_wire(draft: &LogDraft) -> WireFields {
        let mut fields = WireFields::new();
        fields.insert("Name".to_string(), json!(draft.name));
        fields.insert("Tags".to_string(), json!(draft.tags));
        fields.insert(
            "timestamp_c".to_string(),
            json!(draft.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        fields.insert(LEVEL_FIELD.to_string(), json!(draft.level.as_str()));
        fields.insert("message_c".to_string(), json!(draft.message));
        fields.insert(
            EMPLOYEE_FIELD.to_string(),
            draft.employee_id.map_or(Value::Null, |id| json!(id.value())),
        );
        fields
    }

    fn record_id(&self) -> i64 {
        self.id.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let original = json!({
            "Id": 11,
            "Name": "info - 2024-01-01 10:00:00",
            "Tags": "employee,create,activity",
            "timestamp_c": "2024-01-01T10:00:00Z",
            "log_level_c": "info",
            "message_c": "Employee created: Jane Doe",
            "employee_c": {"Id": 7, "Name": "Jane Doe"},
            "CreatedOn": "2024-01-01T10:00:01Z"
        });
        let entry = LogEntry::to_domain(serde_json::from_value(original.clone()).unwrap());
        assert_eq!(entry.employee_id, Some(EmployeeId::new(7)));
        assert_eq!(entry.employee_name.as_deref(), Some("Jane Doe"));

        let written = LogEntry::to_wire(&entry.draft());
        for key in ["Name", "Tags", "timestamp_c", "log_level_c", "message_c"] {
            assert_eq!(written[key], original[key], "field {key}");
        }
        assert_eq!(written["employee_c"], json!(7));
        assert!(!written.contains_key("CreatedOn"));
    }

    #[test]
    fn missing_timestamp_falls_back_to_created_on() {
        let entry = LogEntry::to_domain(
            serde_json::from_value(json!({
                "Id": 1,
                "log_level_c": "warning",
                "CreatedOn": "2024-05-01T12:00:00Z"
            }))
            .unwrap(),
        );
        assert_eq!(entry.level, LogLevel::Warning);
        assert_eq!(entry.name, "warning - 2024-05-01 12:00:00");
        assert_eq!(entry.employee_id, None);
    }
}
