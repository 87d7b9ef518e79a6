//! Page controllers.
//!
//! Each view owns the cache for its page, loads it once, and applies
//! mutations locally after the remote call succeeds. The dashboard and
//! reports pages are read-only summaries built from a single load.

pub mod dashboard;
pub mod departments;
pub mod employees;
pub mod logger;
pub mod reports;

pub use dashboard::DashboardSummary;
pub use departments::{DepartmentStats, DepartmentsView};
pub use employees::EmployeesView;
pub use logger::LoggerView;
pub use reports::ReportSummary;

use crate::domain::DepartmentId;
use crate::models::{Department, Employee};

/// Where a page is in its load cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loaded,
    Failed(String),
}

/// Whether `employee` belongs to `department`. Matches on id; employees
/// that only carry a label fall back to the department name.
pub(crate) fn belongs_to(employee: &Employee, department: &Department) -> bool {
    match employee.department_id {
        Some(id) => id == department.id,
        None => employee.department_name.as_deref() == Some(department.name.as_str()),
    }
}

/// Fills in department labels for employees whose reference came back as a
/// bare id.
pub(crate) fn label_departments(employees: &mut [Employee], departments: &[Department]) {
    for employee in employees.iter_mut() {
        if employee.department_name.is_none() {
            employee.department_name = department_name(employee.department_id, departments);
        }
    }
}

pub(crate) fn department_name(
    id: Option<DepartmentId>,
    departments: &[Department],
) -> Option<String> {
    let id = id?;
    departments
        .iter()
        .find(|d| d.id == id)
        .map(|d| d.name.clone())
}

/// Sum of salaries or budgets, saturating at `u64::MAX`.
pub(crate) fn total_amount<I>(amounts: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    amounts.into_iter().fold(0, u64::saturating_add)
}

/// `part / whole` as a percentage rounded to the nearest integer.
#[must_use]
pub fn percent_of(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pct = ((part as f64 / whole as f64) * 100.0).round() as u32;
    pct
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::{DepartmentId, EmployeeId};
    use crate::models::{Department, Employee, EmployeeStatus};
    use chrono::{TimeZone, Utc};

    pub fn employee(id: i64, dept: Option<i64>, status: EmployeeStatus, salary: u64) -> Employee {
        Employee {
            id: EmployeeId::new(id),
            display_name: format!("Employee {id}"),
            first_name: "Employee".to_string(),
            last_name: id.to_string(),
            email: format!("e{id}@co.com"),
            phone: String::new(),
            position: "Staff".to_string(),
            department_id: dept.map(DepartmentId::new),
            department_name: None,
            start_date: None,
            status,
            salary,
            manager: None,
            created_at: Utc.timestamp_opt(1_700_000_000 + id * 60, 0).single(),
            updated_at: None,
        }
    }

    pub fn department(id: i64, name: &str, budget: u64) -> Department {
        Department {
            id: DepartmentId::new(id),
            name: name.to_string(),
            description: String::new(),
            head: None,
            budget,
        }
    }
}
