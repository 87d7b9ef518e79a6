use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{LoadState, department_name, label_departments};
use crate::cache::{EmployeeFilter, EmployeeSortKey, RecordCache};
use crate::domain::{DepartmentId, EmployeeId, SortOrder};
use crate::models::{Department, Employee, EmployeeForm};
use crate::services::{DepartmentService, EmployeeService, ServiceError};
use crate::validation::validate_employee;

/// The employees page: a filtered, sortable table plus the add/edit form.
pub struct EmployeesView {
    employees: Arc<dyn EmployeeService>,
    departments: Arc<dyn DepartmentService>,
    cache: RecordCache<Employee>,
    department_list: Vec<Department>,
    state: LoadState,
    pub filter: EmployeeFilter,
    pub sort_key: EmployeeSortKey,
    pub sort_order: SortOrder,
}

impl EmployeesView {
    #[must_use]
    pub fn new(employees: Arc<dyn EmployeeService>, departments: Arc<dyn DepartmentService>) -> Self {
        Self {
            employees,
            departments,
            cache: RecordCache::new(),
            department_list: Vec::new(),
            state: LoadState::Idle,
            filter: EmployeeFilter::default(),
            sort_key: EmployeeSortKey::default(),
            sort_order: SortOrder::default(),
        }
    }

    /// Loads employees and departments concurrently. On failure the previous
    /// cache contents are kept and the error is also recorded in
    /// [`state`](Self::state).
    pub async fn load(&mut self) -> Result<(), ServiceError> {
        let result = tokio::try_join!(self.employees.list(), self.departments.list());
        match result {
            Ok((mut employees, departments)) => {
                label_departments(&mut employees, &departments);
                debug!(
                    employees = employees.len(),
                    departments = departments.len(),
                    "Employees page loaded"
                );
                self.cache.replace_all(employees);
                self.department_list = departments;
                self.state = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load employees");
                self.state = LoadState::Failed("Failed to load employees. Please try again.".to_string());
                Err(e)
            }
        }
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub fn cache(&self) -> &RecordCache<Employee> {
        &self.cache
    }

    #[must_use]
    pub fn departments(&self) -> &[Department] {
        &self.department_list
    }

    /// Rows to display under the current filter and sort.
    #[must_use]
    pub fn visible(&self) -> Vec<&Employee> {
        self.cache
            .query(&self.filter, Some((self.sort_key, self.sort_order)))
    }

    /// Header click: same column flips direction, new column starts ascending.
    pub fn sort_by(&mut self, key: EmployeeSortKey) {
        if self.sort_key == key {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_key = key;
            self.sort_order = SortOrder::Ascending;
        }
    }

    /// `(id, label)` pairs for the department picker.
    #[must_use]
    pub fn department_options(&self) -> Vec<(DepartmentId, String)> {
        self.department_list
            .iter()
            .map(|d| (d.id, d.name.clone()))
            .collect()
    }

    /// Distinct labels for the department filter, from the loaded employees.
    #[must_use]
    pub fn department_labels(&self) -> Vec<String> {
        self.cache
            .items()
            .iter()
            .filter_map(|e| e.department_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.cache.get(id)
    }

    /// Validates and writes the form. `editing` selects update over create.
    pub async fn save(
        &mut self,
        editing: Option<EmployeeId>,
        form: &EmployeeForm,
    ) -> Result<Employee, ServiceError> {
        let draft = validate_employee(form)?;
        let ticket = self.cache.begin();

        let mut saved = match editing {
            Some(id) => self.employees.update(id, draft).await?,
            None => self.employees.create(draft).await?,
        };
        if saved.department_name.is_none() {
            saved.department_name = department_name(saved.department_id, &self.department_list);
        }

        self.cache.upsert_with(ticket, saved.clone());
        Ok(saved)
    }

    pub async fn delete(&mut self, id: EmployeeId) -> Result<bool, ServiceError> {
        let ticket = self.cache.begin();
        let known_name = self.cache.get(id).map(Employee::full_name);

        let deleted = self.employees.delete(id, known_name).await?;
        if deleted {
            self.cache.remove_with(ticket, id);
        }
        Ok(deleted)
    }
}
