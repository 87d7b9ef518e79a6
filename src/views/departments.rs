use std::sync::Arc;
use tracing::warn;

use super::{LoadState, belongs_to, total_amount};
use crate::cache::RecordCache;
use crate::domain::DepartmentId;
use crate::models::{Department, DepartmentForm, Employee, EmployeeStatus};
use crate::services::{DepartmentService, EmployeeService, ServiceError};
use crate::validation::validate_department;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentStats {
    pub department: Department,
    pub total: usize,
    pub active: usize,
    pub on_leave: usize,
    pub inactive: usize,
}

impl DepartmentStats {
    #[must_use]
    pub fn compute(department: &Department, employees: &[Employee]) -> Self {
        let members: Vec<&Employee> = employees
            .iter()
            .filter(|e| belongs_to(e, department))
            .collect();
        let count = |status: EmployeeStatus| members.iter().filter(|e| e.status == status).count();

        Self {
            department: department.clone(),
            total: members.len(),
            active: count(EmployeeStatus::Active),
            on_leave: count(EmployeeStatus::OnLeave),
            inactive: count(EmployeeStatus::Inactive),
        }
    }
}

pub struct DepartmentsView {
    departments: Arc<dyn DepartmentService>,
    employees: Arc<dyn EmployeeService>,
    cache: RecordCache<Department>,
    employee_list: Vec<Employee>,
    state: LoadState,
}

impl DepartmentsView {
    #[must_use]
    pub fn new(departments: Arc<dyn DepartmentService>, employees: Arc<dyn EmployeeService>) -> Self {
        Self {
            departments,
            employees,
            cache: RecordCache::new(),
            employee_list: Vec::new(),
            state: LoadState::Idle,
        }
    }

    pub async fn load(&mut self) -> Result<(), ServiceError> {
        match tokio::try_join!(self.departments.list(), self.employees.list()) {
            Ok((departments, employees)) => {
                self.cache.replace_all(departments);
                self.employee_list = employees;
                self.state = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load departments");
                self.state =
                    LoadState::Failed("Failed to load departments. Please try again.".to_string());
                Err(e)
            }
        }
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub fn departments(&self) -> &[Department] {
        self.cache.items()
    }

    #[must_use]
    pub fn stats(&self) -> Vec<DepartmentStats> {
        self.cache
            .items()
            .iter()
            .map(|d| DepartmentStats::compute(d, &self.employee_list))
            .collect()
    }

    #[must_use]
    pub fn total_employees(&self) -> usize {
        self.employee_list.len()
    }

    #[must_use]
    pub fn total_budget(&self) -> u64 {
        total_amount(self.cache.items().iter().map(|d| d.budget))
    }

    pub async fn save(
        &mut self,
        editing: Option<DepartmentId>,
        form: &DepartmentForm,
    ) -> Result<Department, ServiceError> {
        let draft = validate_department(form, self.cache.items(), editing)?;
        let ticket = self.cache.begin();

        let saved = match editing {
            Some(id) => self.departments.update(id, draft).await?,
            None => self.departments.create(draft).await?,
        };
        self.cache.upsert_with(ticket, saved.clone());
        Ok(saved)
    }

    pub async fn delete(&mut self, id: DepartmentId) -> Result<bool, ServiceError> {
        let ticket = self.cache.begin();
        let deleted = self.departments.delete(id).await?;
        if deleted {
            self.cache.remove_with(ticket, id);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures::{department, employee};

    #[test]
    fn stats_count_by_status() {
        let eng = department(1, "Engineering", 100);
        let employees = vec![
            employee(1, Some(1), EmployeeStatus::Active, 0),
            employee(2, Some(1), EmployeeStatus::OnLeave, 0),
            employee(3, Some(1), EmployeeStatus::Active, 0),
            employee(4, Some(2), EmployeeStatus::Inactive, 0),
        ];

        let stats = DepartmentStats::compute(&eng, &employees);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.on_leave, 1);
        assert_eq!(stats.inactive, 0);
    }
}
