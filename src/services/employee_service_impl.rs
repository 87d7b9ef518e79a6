//! Record-API implementation of the `EmployeeService` trait.

use async_trait::async_trait;
use tracing::{debug, info};

use super::{ActivityDispatcher, EmployeeService, ServiceError};
use crate::domain::events::EmployeeEvent;
use crate::domain::{DepartmentId, EmployeeId};
use crate::gateway::{ListQuery, RecordGateway};
use crate::models::employee::{Employee, EmployeeDraft, EmployeeStatus};
use crate::schema::employee::{DEPARTMENT_FIELD, STATUS_FIELD};

const UNKNOWN_EMPLOYEE: &str = "Unknown Employee";

pub struct RemoteEmployeeService {
    employees: RecordGateway<Employee>,
    activity: ActivityDispatcher,
}

impl RemoteEmployeeService {
    #[must_use]
    pub const fn new(employees: RecordGateway<Employee>, activity: ActivityDispatcher) -> Self {
        Self {
            employees,
            activity,
        }
    }

    async fn name_for_delete(&self, id: EmployeeId, known_name: Option<String>) -> String {
        if let Some(name) = known_name.filter(|n| !n.trim().is_empty()) {
            return name;
        }
        match self.employees.get_by_id(id.value()).await {
            Ok(employee) => employee.full_name(),
            Err(e) => {
                debug!(employee_id = %id, error = %e, "Could not resolve name before delete");
                UNKNOWN_EMPLOYEE.to_string()
            }
        }
    }
}

#[async_trait]
impl EmployeeService for RemoteEmployeeService {
    async fn list(&self) -> Result<Vec<Employee>, ServiceError> {
        Ok(self.employees.list(ListQuery::default()).await?)
    }

    async fn get(&self, id: EmployeeId) -> Result<Employee, ServiceError> {
        Ok(self.employees.get_by_id(id.value()).await?)
    }

    async fn create(&self, draft: EmployeeDraft) -> Result<Employee, ServiceError> {
        let employee = self.employees.create(&draft).await?;
        info!(employee_id = %employee.id, name = %employee.full_name(), "Employee created");

        self.activity
            .dispatch(&EmployeeEvent::Created {
                employee: employee.clone(),
                phone: draft.phone,
            })
            .await;
        Ok(employee)
    }

    async fn update(
        &self,
        id: EmployeeId,
        draft: EmployeeDraft,
    ) -> Result<Employee, ServiceError> {
        let employee = self.employees.update(id.value(), &draft).await?;
        info!(employee_id = %id, "Employee updated");

        self.activity
            .dispatch(&EmployeeEvent::Updated {
                employee: employee.clone(),
            })
            .await;
        Ok(employee)
    }

    async fn delete(
        &self,
        id: EmployeeId,
        known_name: Option<String>,
    ) -> Result<bool, ServiceError> {
        let name = self.name_for_delete(id, known_name).await;
        let deleted = self.employees.delete(id.value()).await?;
        info!(employee_id = %id, name = %name, "Employee deleted");

        if deleted {
            self.activity
                .dispatch(&EmployeeEvent::Deleted { id, name })
                .await;
        }
        Ok(deleted)
    }

    async fn by_department(&self, id: DepartmentId) -> Result<Vec<Employee>, ServiceError> {
        Ok(self
            .employees
            .list(ListQuery::where_equal(DEPARTMENT_FIELD, id.value()))
            .await?)
    }

    async fn by_status(&self, status: EmployeeStatus) -> Result<Vec<Employee>, ServiceError> {
        Ok(self
            .employees
            .list(ListQuery::where_equal(STATUS_FIELD, status.as_str()))
            .await?)
    }
}
