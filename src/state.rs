//! Service wiring shared by every command.

use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use crate::clients::{HttpRecordClient, InMemoryRecordClient, RecordClient};
use crate::config::{Config, StorageMode};
use crate::gateway::RecordGateway;
use crate::services::{
    ActivityDispatcher, ActivityLogSink, DepartmentService, EmployeeService, LogService,
    RemoteDepartmentService, RemoteEmployeeService, RemoteLogService, SmsNotifier,
};
use crate::views::{DepartmentsView, EmployeesView, LoggerView};

/// Services are built once here and handed to views by `Arc`.
#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub client: Arc<dyn RecordClient>,
    pub employees: Arc<dyn EmployeeService>,
    pub departments: Arc<dyn DepartmentService>,
    pub logs: Arc<dyn LogService>,
}

impl AppContext {
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let client: Arc<dyn RecordClient> = match config.remote.mode {
            StorageMode::Remote => {
                info!(base_url = %config.remote.base_url, "Using remote record storage");
                Arc::new(
                    HttpRecordClient::new(config.remote.api_config())
                        .context("Failed to build HTTP client")?,
                )
            }
            StorageMode::Memory => {
                info!("Using in-memory demo storage");
                Arc::new(InMemoryRecordClient::demo().context("Demo dataset is malformed")?)
            }
        };
        Ok(Self::with_client(config, client))
    }

    #[must_use]
    pub fn with_client(config: Config, client: Arc<dyn RecordClient>) -> Self {
        let activity = activity_dispatcher(&config, &client);

        Self {
            employees: Arc::new(RemoteEmployeeService::new(
                RecordGateway::new(client.clone()),
                activity,
            )),
            departments: Arc::new(RemoteDepartmentService::new(RecordGateway::new(
                client.clone(),
            ))),
            logs: Arc::new(RemoteLogService::new(RecordGateway::new(client.clone()))),
            client,
            config,
        }
    }

    #[must_use]
    pub fn employees_view(&self) -> EmployeesView {
        EmployeesView::new(self.employees.clone(), self.departments.clone())
    }

    #[must_use]
    pub fn departments_view(&self) -> DepartmentsView {
        DepartmentsView::new(self.departments.clone(), self.employees.clone())
    }

    #[must_use]
    pub fn logger_view(&self) -> LoggerView {
        LoggerView::new(self.logs.clone(), self.employees.clone())
    }
}

/// The welcome SMS goes out before the activity row is written.
fn activity_dispatcher(config: &Config, client: &Arc<dyn RecordClient>) -> ActivityDispatcher {
    let mut activity = ActivityDispatcher::default();
    if !config.notifications.sms_function.is_empty() {
        activity = activity.with_sink(Arc::new(SmsNotifier::new(
            client.clone(),
            config.notifications.sms_function.clone(),
        )));
    }
    if config.notifications.activity_log {
        activity = activity.with_sink(Arc::new(ActivityLogSink::new(RecordGateway::new(
            client.clone(),
        ))));
    }
    activity
}
