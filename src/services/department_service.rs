use async_trait::async_trait;

use super::ServiceError;
use crate::domain::DepartmentId;
use crate::models::department::{Department, DepartmentDraft};

#[async_trait]
pub trait DepartmentService: Send + Sync {
    async fn list(&self) -> Result<Vec<Department>, ServiceError>;

    async fn get(&self, id: DepartmentId) -> Result<Department, ServiceError>;

    async fn create(&self, draft: DepartmentDraft) -> Result<Department, ServiceError>;

    async fn update(
        &self,
        id: DepartmentId,
        draft: DepartmentDraft,
    ) -> Result<Department, ServiceError>;

    /// Employees referencing the department are left untouched.
    async fn delete(&self, id: DepartmentId) -> Result<bool, ServiceError>;
}
