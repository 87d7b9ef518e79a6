use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::{EmployeeId, LogEntryId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Info,
    Warning,
    Error,
    Debug,
}

impl LogLevel {
    pub const ALL: [Self; 4] = [Self::Info, Self::Warning, Self::Error, Self::Debug];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "debug" => Ok(Self::Debug),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: LogEntryId,

    pub name: String,

    pub timestamp: DateTime<Utc>,

    pub level: LogLevel,

    pub message: String,

    pub employee_id: Option<EmployeeId>,

    pub employee_name: Option<String>,

    /// Comma separated, stored verbatim.
    pub tags: String,
}

impl LogEntry {
    #[must_use]
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    #[must_use]
    pub fn draft(&self) -> LogDraft {
        LogDraft {
            name: self.name.clone(),
            timestamp: self.timestamp,
            level: self.level,
            message: self.message.clone(),
            employee_id: self.employee_id,
            tags: self.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDraft {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub employee_id: Option<EmployeeId>,
    pub tags: String,
}

impl LogDraft {
    /// A draft stamped with `timestamp` and the default `level - time` label.
    #[must_use]
    pub fn new(level: LogLevel, message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: default_log_name(level, timestamp),
            timestamp,
            level,
            message: message.into(),
            employee_id: None,
            tags: String::new(),
        }
    }

    #[must_use]
    pub const fn with_employee(mut self, employee_id: Option<EmployeeId>) -> Self {
        self.employee_id = employee_id;
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }
}

#[must_use]
pub fn default_log_name(level: LogLevel, timestamp: DateTime<Utc>) -> String {
    format!("{level} - {}", timestamp.format("%Y-%m-%d %H:%M:%S"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogForm {
    pub name: String,
    pub tags: String,
    /// `YYYY-MM-DDTHH:MM` (seconds optional) or RFC 3339. Empty means now.
    pub timestamp: String,
    pub level: String,
    pub message: String,
    pub employee: String,
}

impl LogForm {
    #[must_use]
    pub fn from_entry(entry: &LogEntry) -> Self {
        Self {
            name: entry.name.clone(),
            tags: entry.tags.clone(),
            timestamp: entry.timestamp.format("%Y-%m-%dT%H:%M").to_string(),
            level: entry.level.as_str().to_string(),
            message: entry.message.clone(),
            employee: entry
                .employee_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }
}
