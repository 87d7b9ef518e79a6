//! Domain service for employee records.

use async_trait::async_trait;

use super::ServiceError;
use crate::domain::{DepartmentId, EmployeeId};
use crate::models::employee::{Employee, EmployeeDraft, EmployeeStatus};

#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Newest first, one page.
    async fn list(&self) -> Result<Vec<Employee>, ServiceError>;

    async fn get(&self, id: EmployeeId) -> Result<Employee, ServiceError>;

    /// Creates the record, then emits the activity event.
    async fn create(&self, draft: EmployeeDraft) -> Result<Employee, ServiceError>;

    /// Full replace of every writable field.
    async fn update(&self, id: EmployeeId, draft: EmployeeDraft)
    -> Result<Employee, ServiceError>;

    /// Deletes the record. `known_name` (usually from a cache) saves the
    /// lookup used to label the activity entry.
    async fn delete(
        &self,
        id: EmployeeId,
        known_name: Option<String>,
    ) -> Result<bool, ServiceError>;

    async fn by_department(&self, id: DepartmentId) -> Result<Vec<Employee>, ServiceError>;

    async fn by_status(&self, status: EmployeeStatus) -> Result<Vec<Employee>, ServiceError>;
}
