use chrono::Utc;
use std::sync::Arc;
use tracing::warn;

use super::LoadState;
use crate::cache::{LogFilter, LogSortKey, RecordCache};
use crate::domain::{EmployeeId, LogEntryId, SortOrder};
use crate::models::{Employee, LogEntry, LogForm};
use crate::services::{EmployeeService, LogService, ServiceError};
use crate::validation::validate_log;

/// The logger page. Every successful mutation is followed by a full reload,
/// so the list reflects server order.
pub struct LoggerView {
    logs: Arc<dyn LogService>,
    employees: Arc<dyn EmployeeService>,
    cache: RecordCache<LogEntry>,
    employee_list: Vec<Employee>,
    state: LoadState,
    pub filter: LogFilter,
    pub sort: Option<(LogSortKey, SortOrder)>,
}

impl LoggerView {
    #[must_use]
    pub fn new(logs: Arc<dyn LogService>, employees: Arc<dyn EmployeeService>) -> Self {
        Self {
            logs,
            employees,
            cache: RecordCache::new(),
            employee_list: Vec::new(),
            state: LoadState::Idle,
            filter: LogFilter::default(),
            sort: None,
        }
    }

    pub async fn load(&mut self) -> Result<(), ServiceError> {
        match tokio::try_join!(self.logs.list(), self.employees.list()) {
            Ok((entries, employees)) => {
                self.cache.replace_all(entries);
                self.employee_list = employees;
                self.state = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load log entries");
                self.state = LoadState::Failed("Failed to load logs. Please try again.".to_string());
                Err(e)
            }
        }
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub fn visible(&self) -> Vec<&LogEntry> {
        self.cache.query(&self.filter, self.sort)
    }

    #[must_use]
    pub fn get(&self, id: LogEntryId) -> Option<&LogEntry> {
        self.cache.get(id)
    }

    /// `(id, full name)` pairs for the employee picker.
    #[must_use]
    pub fn employee_options(&self) -> Vec<(EmployeeId, String)> {
        self.employee_list
            .iter()
            .map(|e| (e.id, e.full_name()))
            .collect()
    }

    pub async fn create(&mut self, form: &LogForm) -> Result<LogEntry, ServiceError> {
        let draft = validate_log(form, Utc::now())?;
        let entry = self.logs.create(draft).await?;
        self.refresh().await;
        Ok(entry)
    }

    pub async fn update(&mut self, id: LogEntryId, form: &LogForm) -> Result<LogEntry, ServiceError> {
        let draft = validate_log(form, Utc::now())?;
        let entry = self.logs.update(id, draft).await?;
        self.refresh().await;
        Ok(entry)
    }

    pub async fn delete(&mut self, id: LogEntryId) -> Result<bool, ServiceError> {
        let deleted = self.logs.delete(id).await?;
        self.refresh().await;
        Ok(deleted)
    }

    /// Reload after a committed write. A failure lands in [`state`](Self::state)
    /// and never turns the write into an error.
    async fn refresh(&mut self) {
        if let Err(e) = self.load().await {
            warn!(error = %e, "Log entry saved but the list could not be reloaded");
        }
    }
}
