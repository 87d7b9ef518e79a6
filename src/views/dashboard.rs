use std::cmp::Reverse;
use std::sync::Arc;

use super::belongs_to;
use crate::models::{Department, Employee, EmployeeStatus};
use crate::services::{DepartmentService, EmployeeService, ServiceError};

const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentHeadcount {
    pub name: String,
    pub headcount: usize,
    pub budget: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_employees: usize,
    pub active_employees: usize,
    pub total_departments: usize,
    pub on_leave_employees: usize,
    /// Newest first by creation time.
    pub recent_employees: Vec<Employee>,
    pub departments: Vec<DepartmentHeadcount>,
}

impl DashboardSummary {
    pub async fn load(
        employees: &Arc<dyn EmployeeService>,
        departments: &Arc<dyn DepartmentService>,
    ) -> Result<Self, ServiceError> {
        let (mut employees, departments) = tokio::try_join!(employees.list(), departments.list())?;
        super::label_departments(&mut employees, &departments);
        Ok(Self::build(&employees, &departments))
    }

    #[must_use]
    pub fn build(employees: &[Employee], departments: &[Department]) -> Self {
        let with_status = |status: EmployeeStatus| employees.iter().filter(|e| e.status == status).count();

        let mut recent: Vec<Employee> = employees.to_vec();
        // Records without a creation time go last.
        recent.sort_by_key(|e| Reverse(e.created_at));
        recent.truncate(RECENT_LIMIT);

        Self {
            total_employees: employees.len(),
            active_employees: with_status(EmployeeStatus::Active),
            total_departments: departments.len(),
            on_leave_employees: with_status(EmployeeStatus::OnLeave),
            recent_employees: recent,
            departments: departments
                .iter()
                .map(|d| DepartmentHeadcount {
                    name: d.name.clone(),
                    headcount: employees.iter().filter(|e| belongs_to(e, d)).count(),
                    budget: d.budget,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures::{department, employee};

    #[test]
    fn totals_and_recent() {
        let mut employees: Vec<Employee> = (1..=7)
            .map(|id| employee(id, Some(1 + id % 2), EmployeeStatus::Active, 0))
            .collect();
        employees[0].status = EmployeeStatus::OnLeave;
        employees[1].created_at = None;

        let departments = vec![department(1, "Engineering", 10), department(2, "Sales", 20)];
        let summary = DashboardSummary::build(&employees, &departments);

        assert_eq!(summary.total_employees, 7);
        assert_eq!(summary.active_employees, 6);
        assert_eq!(summary.on_leave_employees, 1);
        assert_eq!(summary.total_departments, 2);

        let recent: Vec<i64> = summary.recent_employees.iter().map(|e| e.id.value()).collect();
        assert_eq!(recent, vec![7, 6, 5, 4, 3]);

        assert_eq!(summary.departments[0].headcount, 3);
        assert_eq!(summary.departments[1].headcount, 4);
        assert_eq!(summary.departments[1].budget, 20);
    }
}
