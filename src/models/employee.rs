use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::{DepartmentId, EmployeeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
    OnLeave,
}

impl EmployeeStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::OnLeave];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::OnLeave => "on-leave",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::OnLeave => "On Leave",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "on-leave" | "on_leave" | "onleave" => Ok(Self::OnLeave),
            other => Err(format!("unknown employee status: {other}")),
        }
    }
}

/// An employee as the dashboard sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,

    /// Storage display label, normally `first last`.
    pub display_name: String,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    pub phone: String,

    pub position: String,

    pub department_id: Option<DepartmentId>,

    /// Resolved department label. Older schema revisions only carry this.
    pub department_name: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub status: EmployeeStatus,

    pub salary: u64,

    pub manager: Option<String>,

    pub created_at: Option<DateTime<Utc>>,

    pub updated_at: Option<DateTime<Utc>>,
}

impl Employee {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// The writable part of the record, as resupplied on every update.
    #[must_use]
    pub fn draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            position: self.position.clone(),
            department_id: self.department_id,
            start_date: self.start_date,
            status: self.status,
            salary: self.salary,
            manager: self.manager.clone(),
        }
    }
}

/// Full set of writable employee fields. Updates replace the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department_id: Option<DepartmentId>,
    pub start_date: Option<NaiveDate>,
    pub status: EmployeeStatus,
    pub salary: u64,
    pub manager: Option<String>,
}

impl EmployeeDraft {
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Raw employee form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub start_date: String,
    pub status: String,
    pub salary: String,
    pub manager: String,
}

impl EmployeeForm {
    /// Prefills the edit form from a cached record.
    #[must_use]
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            position: employee.position.clone(),
            department: employee
                .department_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            start_date: employee
                .start_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            status: employee.status.as_str().to_string(),
            salary: if employee.salary > 0 {
                employee.salary.to_string()
            } else {
                String::new()
            },
            manager: employee.manager.clone().unwrap_or_default(),
        }
    }
}
