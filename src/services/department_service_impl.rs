use async_trait::async_trait;
use tracing::info;

use super::{DepartmentService, ServiceError};
use crate::domain::DepartmentId;
use crate::gateway::{ListQuery, RecordGateway};
use crate::models::department::{Department, DepartmentDraft};

pub struct RemoteDepartmentService {
    departments: RecordGateway<Department>,
}

impl RemoteDepartmentService {
    #[must_use]
    pub const fn new(departments: RecordGateway<Department>) -> Self {
        Self { departments }
    }
}

#[async_trait]
impl DepartmentService for RemoteDepartmentService {
    async fn list(&self) -> Result<Vec<Department>, ServiceError> {
        Ok(self.departments.list(ListQuery::default()).await?)
    }

    async fn get(&self, id: DepartmentId) -> Result<Department, ServiceError> {
        Ok(self.departments.get_by_id(id.value()).await?)
    }

    async fn create(&self, draft: DepartmentDraft) -> Result<Department, ServiceError> {
        let department = self.departments.create(&draft).await?;
        info!(department_id = %department.id, name = %department.name, "Department created");
        Ok(department)
    }

    async fn update(
        &self,
        id: DepartmentId,
        draft: DepartmentDraft,
    ) -> Result<Department, ServiceError> {
        let department = self.departments.update(id.value(), &draft).await?;
        info!(department_id = %id, "Department updated");
        Ok(department)
    }

    async fn delete(&self, id: DepartmentId) -> Result<bool, ServiceError> {
        let deleted = self.departments.delete(id.value()).await?;
        info!(department_id = %id, "Department deleted");
        Ok(deleted)
    }
}
