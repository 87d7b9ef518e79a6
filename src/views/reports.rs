use std::sync::Arc;

use super::{belongs_to, percent_of, total_amount};
use crate::models::{Department, Employee, EmployeeStatus};
use crate::services::{DepartmentService, EmployeeService, ServiceError};

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentAnalytics {
    pub name: String,
    pub headcount: usize,
    pub total_salary: u64,
    pub average_salary: f64,
    pub budget: u64,
    /// Salary spend as a percentage of budget; zero when there is no budget.
    pub utilization: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusDistribution {
    pub active: usize,
    pub inactive: usize,
    pub on_leave: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub total_employees: usize,
    pub active_employees: usize,
    pub total_salary: u64,
    pub average_salary: f64,
    pub departments: Vec<DepartmentAnalytics>,
    pub status: StatusDistribution,
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl ReportSummary {
    pub async fn load(
        employees: &Arc<dyn EmployeeService>,
        departments: &Arc<dyn DepartmentService>,
    ) -> Result<Self, ServiceError> {
        let (employees, departments) = tokio::try_join!(employees.list(), departments.list())?;
        Ok(Self::build(&employees, &departments))
    }

    #[must_use]
    pub fn build(employees: &[Employee], departments: &[Department]) -> Self {
        let total_salary = total_amount(employees.iter().map(|e| e.salary));
        let count = |status: EmployeeStatus| employees.iter().filter(|e| e.status == status).count();

        let departments = departments
            .iter()
            .map(|d| {
                let members: Vec<&Employee> =
                    employees.iter().filter(|e| belongs_to(e, d)).collect();
                let salary = total_amount(members.iter().map(|e| e.salary));
                DepartmentAnalytics {
                    name: d.name.clone(),
                    headcount: members.len(),
                    total_salary: salary,
                    average_salary: ratio(salary, members.len() as u64),
                    budget: d.budget,
                    utilization: ratio(salary, d.budget) * 100.0,
                }
            })
            .collect();

        Self {
            total_employees: employees.len(),
            active_employees: count(EmployeeStatus::Active),
            total_salary,
            average_salary: ratio(total_salary, employees.len() as u64),
            departments,
            status: StatusDistribution {
                active: count(EmployeeStatus::Active),
                inactive: count(EmployeeStatus::Inactive),
                on_leave: count(EmployeeStatus::OnLeave),
            },
        }
    }

    #[must_use]
    pub fn active_percent(&self) -> u32 {
        percent_of(self.active_employees, self.total_employees)
    }

    /// Share of the workforce in `status`, rounded.
    #[must_use]
    pub fn status_percent(&self, status: EmployeeStatus) -> u32 {
        let n = match status {
            EmployeeStatus::Active => self.status.active,
            EmployeeStatus::Inactive => self.status.inactive,
            EmployeeStatus::OnLeave => self.status.on_leave,
        };
        percent_of(n, self.total_employees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures::{department, employee};

    #[test]
    fn salary_and_utilization() {
        let employees = vec![
            employee(1, Some(1), EmployeeStatus::Active, 100_000),
            employee(2, Some(1), EmployeeStatus::Inactive, 50_000),
            employee(3, Some(2), EmployeeStatus::OnLeave, 60_000),
        ];
        let departments = vec![
            department(1, "Engineering", 300_000),
            department(2, "Sales", 0),
            department(3, "Empty", 1000),
        ];

        let report = ReportSummary::build(&employees, &departments);
        assert_eq!(report.total_salary, 210_000);
        assert!((report.average_salary - 70_000.0).abs() < f64::EPSILON);
        assert_eq!(report.active_percent(), 33);
        assert_eq!(report.status_percent(EmployeeStatus::OnLeave), 33);

        let eng = &report.departments[0];
        assert_eq!(eng.headcount, 2);
        assert!((eng.average_salary - 75_000.0).abs() < f64::EPSILON);
        assert!((eng.utilization - 50.0).abs() < 1e-9);

        assert!(report.departments[1].utilization.abs() < f64::EPSILON);
        assert_eq!(report.departments[2].headcount, 0);
        assert!(report.departments[2].average_salary.abs() < f64::EPSILON);
    }

    #[test]
    fn huge_salaries_saturate_instead_of_overflowing() {
        let employees = vec![
            employee(1, Some(1), EmployeeStatus::Active, u64::MAX),
            employee(2, Some(1), EmployeeStatus::Active, u64::MAX),
        ];
        let departments = vec![department(1, "Engineering", 1000)];

        let report = ReportSummary::build(&employees, &departments);
        assert_eq!(report.total_salary, u64::MAX);
        assert_eq!(report.departments[0].total_salary, u64::MAX);
    }

    #[test]
    fn empty_workforce() {
        let report = ReportSummary::build(&[], &[]);
        assert_eq!(report.total_employees, 0);
        assert!(report.average_salary.abs() < f64::EPSILON);
        assert_eq!(report.active_percent(), 0);
    }
}
