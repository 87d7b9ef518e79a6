//! Events emitted after a successful employee mutation.
//!
//! Side-channel consumers (activity log, SMS notification) subscribe to these
//! through [`crate::services::activity::ActivitySink`].

use serde::Serialize;

use super::EmployeeId;
use crate::models::employee::Employee;
use crate::models::log_entry::LogLevel;

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum EmployeeEvent {
    Created {
        employee: Employee,
        /// Phone number as submitted; the stored record may be normalised.
        phone: String,
    },
    Updated {
        employee: Employee,
    },
    Deleted {
        id: EmployeeId,
        /// `First Last`, or `Unknown Employee` when the record could not be read.
        name: String,
    },
}

impl EmployeeEvent {
    #[must_use]
    pub fn employee_id(&self) -> EmployeeId {
        match self {
            Self::Created { employee, .. } | Self::Updated { employee } => employee.id,
            Self::Deleted { id, .. } => *id,
        }
    }

    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Created { .. } => "create",
            Self::Updated { .. } => "update",
            Self::Deleted { .. } => "delete",
        }
    }

    #[must_use]
    pub const fn level(&self) -> LogLevel {
        match self {
            Self::Deleted { .. } => LogLevel::Warning,
            _ => LogLevel::Info,
        }
    }

    /// Human readable activity line written to the log table.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Created { employee, .. } => {
                format!("Employee created: {}", employee.full_name())
            }
            Self::Updated { employee } => format!("Employee updated: {}", employee.full_name()),
            Self::Deleted { name, .. } => format!("Employee deleted: {name}"),
        }
    }

    #[must_use]
    pub fn tags(&self) -> String {
        format!("employee,{},activity", self.action())
    }
}
