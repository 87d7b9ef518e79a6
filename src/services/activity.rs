//! Best-effort side effects of employee mutations.
//!
//! The primary write has already succeeded by the time an event reaches the
//! dispatcher, so nothing here may fail the caller. Every sink error is
//! logged and dropped.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::clients::{RecordClient, TransportError};
use crate::domain::EmployeeId;
use crate::domain::events::EmployeeEvent;
use crate::gateway::{GatewayError, RecordGateway};
use crate::models::log_entry::{LogDraft, LogEntry, LogLevel};

#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("Activity log write failed: {0}")]
    Log(#[from] GatewayError),

    #[error("Notification failed: {0}")]
    Notify(#[from] TransportError),
}

#[async_trait]
pub trait ActivitySink: Send + Sync {
    fn name(&self) -> &'static str;

    async fn record(&self, event: &EmployeeEvent) -> Result<(), ActivityError>;
}

/// Writes one log-table entry per employee event.
pub struct ActivityLogSink {
    logs: RecordGateway<LogEntry>,
}

impl ActivityLogSink {
    #[must_use]
    pub const fn new(logs: RecordGateway<LogEntry>) -> Self {
        Self { logs }
    }

    pub async fn record_activity(
        &self,
        level: LogLevel,
        message: &str,
        employee_id: Option<EmployeeId>,
        tags: Option<&str>,
    ) -> Result<LogEntry, GatewayError> {
        let draft = LogDraft::new(level, message, Utc::now())
            .with_employee(employee_id)
            .with_tags(tags.unwrap_or_default());
        self.logs.create(&draft).await
    }
}

#[async_trait]
impl ActivitySink for ActivityLogSink {
    fn name(&self) -> &'static str {
        "activity-log"
    }

    async fn record(&self, event: &EmployeeEvent) -> Result<(), ActivityError> {
        let entry = self
            .record_activity(
                event.level(),
                &event.message(),
                Some(event.employee_id()),
                Some(&event.tags()),
            )
            .await?;
        debug!(log_id = %entry.id, action = event.action(), "Recorded employee activity");
        Ok(())
    }
}

/// Sends a welcome SMS through a server-side function when an employee is
/// created with a phone number.
pub struct SmsNotifier {
    client: Arc<dyn RecordClient>,
    function: String,
}

impl SmsNotifier {
    #[must_use]
    pub fn new(client: Arc<dyn RecordClient>, function: impl Into<String>) -> Self {
        Self {
            client,
            function: function.into(),
        }
    }
}

#[async_trait]
impl ActivitySink for SmsNotifier {
    fn name(&self) -> &'static str {
        "sms"
    }

    async fn record(&self, event: &EmployeeEvent) -> Result<(), ActivityError> {
        let EmployeeEvent::Created { employee, phone } = event else {
            return Ok(());
        };
        let phone = phone.trim();
        let first_name = employee.first_name.trim();
        if phone.is_empty() || first_name.is_empty() || self.function.is_empty() {
            return Ok(());
        }

        let body = json!({ "firstName": first_name, "phoneNumber": phone });
        self.client.invoke_function(&self.function, &body).await?;
        debug!(employee_id = %employee.id, function = %self.function, "SMS notification sent");
        Ok(())
    }
}

/// Fans an event out to every sink in order.
#[derive(Clone, Default)]
pub struct ActivityDispatcher {
    sinks: Vec<Arc<dyn ActivitySink>>,
}

impl ActivityDispatcher {
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn ActivitySink>>) -> Self {
        Self { sinks }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ActivitySink>) -> Self {
        self.sinks.push(sink);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Sink names in dispatch order.
    #[must_use]
    pub fn sink_names(&self) -> Vec<&'static str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    pub async fn dispatch(&self, event: &EmployeeEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.record(event).await {
                warn!(
                    sink = sink.name(),
                    action = event.action(),
                    employee_id = %event.employee_id(),
                    error = %e,
                    "Activity side effect failed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::InMemoryRecordClient;
    use crate::gateway::ListQuery;
    use crate::models::employee::Employee;

    fn sample(client: &Arc<InMemoryRecordClient>) -> RecordGateway<Employee> {
        RecordGateway::new(client.clone())
    }

    #[tokio::test]
    async fn log_sink_writes_tagged_entry() {
        let client = Arc::new(InMemoryRecordClient::demo().unwrap());
        let employee = sample(&client).get_by_id(1).await.unwrap();
        let logs: RecordGateway<LogEntry> = RecordGateway::new(client.clone());
        let sink = ActivityLogSink::new(logs.clone());

        sink.record(&EmployeeEvent::Updated { employee }).await.unwrap();

        let entries = logs.list(ListQuery::default()).await.unwrap();
        let newest = &entries[0];
        assert_eq!(newest.message, "Employee updated: Sarah Johnson");
        assert_eq!(newest.tags, "employee,update,activity");
        assert_eq!(newest.level, LogLevel::Info);
        assert_eq!(newest.employee_id, Some(EmployeeId::new(1)));
    }

    #[tokio::test]
    async fn sms_only_for_created_with_phone() {
        let client = Arc::new(InMemoryRecordClient::demo().unwrap());
        let mut employee = sample(&client).get_by_id(2).await.unwrap();
        let sms = SmsNotifier::new(client.clone(), "send_welcome_sms");

        sms.record(&EmployeeEvent::Updated {
            employee: employee.clone(),
        })
        .await
        .unwrap();
        sms.record(&EmployeeEvent::Created {
            employee: employee.clone(),
            phone: "  ".to_string(),
        })
        .await
        .unwrap();
        assert!(client.invocations().await.is_empty());

        employee.first_name = "Mike".to_string();
        sms.record(&EmployeeEvent::Created {
            employee,
            phone: "555-0102".to_string(),
        })
        .await
        .unwrap();

        let calls = client.invocations().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "send_welcome_sms");
        assert_eq!(
            calls[0].1,
            json!({"firstName": "Mike", "phoneNumber": "555-0102"})
        );
    }

    #[tokio::test]
    async fn dispatcher_swallows_sink_failures() {
        let client = Arc::new(InMemoryRecordClient::demo().unwrap());
        client.fail_writes("logger_c", "Log table is read-only").await;
        client.fail_functions("SMS gateway down").await;

        let employee = sample(&client).get_by_id(1).await.unwrap();
        let dispatcher = ActivityDispatcher::default()
            .with_sink(Arc::new(ActivityLogSink::new(RecordGateway::new(
                client.clone(),
            ))))
            .with_sink(Arc::new(SmsNotifier::new(client.clone(), "sms")));
        assert_eq!(dispatcher.len(), 2);

        dispatcher
            .dispatch(&EmployeeEvent::Created {
                employee,
                phone: "555-0101".to_string(),
            })
            .await;

        assert_eq!(client.records("logger_c").await.len(), 1);
    }
}
