use async_trait::async_trait;

use super::ServiceError;
use crate::domain::{EmployeeId, LogEntryId};
use crate::models::log_entry::{LogDraft, LogEntry, LogLevel};

/// Direct access to the log table, used by the logger page. Activity
/// entries written by employee mutations go through
/// [`crate::services::ActivityLogSink`] instead.
#[async_trait]
pub trait LogService: Send + Sync {
    /// Most recent first, one page.
    async fn list(&self) -> Result<Vec<LogEntry>, ServiceError>;

    async fn get(&self, id: LogEntryId) -> Result<LogEntry, ServiceError>;

    async fn create(&self, draft: LogDraft) -> Result<LogEntry, ServiceError>;

    async fn update(&self, id: LogEntryId, draft: LogDraft) -> Result<LogEntry, ServiceError>;

    async fn delete(&self, id: LogEntryId) -> Result<bool, ServiceError>;

    async fn by_level(&self, level: LogLevel) -> Result<Vec<LogEntry>, ServiceError>;

    async fn by_employee(&self, id: EmployeeId) -> Result<Vec<LogEntry>, ServiceError>;
}
