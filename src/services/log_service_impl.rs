use async_trait::async_trait;
use tracing::info;

use super::{LogService, ServiceError};
use crate::domain::{EmployeeId, LogEntryId};
use crate::gateway::{ListQuery, RecordGateway};
use crate::models::log_entry::{LogDraft, LogEntry, LogLevel};
use crate::schema::log_entry::{EMPLOYEE_FIELD, LEVEL_FIELD};

pub struct RemoteLogService {
    logs: RecordGateway<LogEntry>,
}

impl RemoteLogService {
    #[must_use]
    pub const fn new(logs: RecordGateway<LogEntry>) -> Self {
        Self { logs }
    }
}

#[async_trait]
impl LogService for RemoteLogService {
    async fn list(&self) -> Result<Vec<LogEntry>, ServiceError> {
        Ok(self.logs.list(ListQuery::default()).await?)
    }

    async fn get(&self, id: LogEntryId) -> Result<LogEntry, ServiceError> {
        Ok(self.logs.get_by_id(id.value()).await?)
    }

    async fn create(&self, draft: LogDraft) -> Result<LogEntry, ServiceError> {
        let entry = self.logs.create(&draft).await?;
        info!(log_id = %entry.id, level = %entry.level, "Log entry created");
        Ok(entry)
    }

    async fn update(&self, id: LogEntryId, draft: LogDraft) -> Result<LogEntry, ServiceError> {
        let entry = self.logs.update(id.value(), &draft).await?;
        info!(log_id = %id, "Log entry updated");
        Ok(entry)
    }

    async fn delete(&self, id: LogEntryId) -> Result<bool, ServiceError> {
        let deleted = self.logs.delete(id.value()).await?;
        info!(log_id = %id, "Log entry deleted");
        Ok(deleted)
    }

    async fn by_level(&self, level: LogLevel) -> Result<Vec<LogEntry>, ServiceError> {
        Ok(self
            .logs
            .list(ListQuery::where_equal(LEVEL_FIELD, level.as_str()))
            .await?)
    }

    async fn by_employee(&self, id: EmployeeId) -> Result<Vec<LogEntry>, ServiceError> {
        Ok(self
            .logs
            .list(ListQuery::where_equal(EMPLOYEE_FIELD, id.value()))
            .await?)
    }
}
