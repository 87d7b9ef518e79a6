//! Typed CRUD over one storage table.
//!
//! [`RecordGateway`] turns domain calls into record-API requests and
//! interprets the `{success, message, data, results}` envelope. The wire
//! mapping itself lives in [`crate::schema`].

use serde_json::{Value, json};
use std::marker::PhantomData;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::clients::protocol::{
    DeletePayload, Envelope, FetchParams, FieldSpec, GetParams, OrderBy, PagingInfo,
    RecordResult, RecordsPayload, SortType, WhereClause,
};
use crate::clients::{RecordClient, TransportError};
use crate::schema::Schema;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Malformed {entity} record: {message}")]
    Decode {
        entity: &'static str,
        message: String,
    },

    #[error("Storage returned no record")]
    EmptyResult,
}

/// Optional list parameters. Anything left unset falls back to the table's
/// default order and page size.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filters: Vec<WhereClause>,
    pub order: Option<OrderBy>,
    pub page: Option<PagingInfo>,
}

impl ListQuery {
    #[must_use]
    pub fn where_equal(field: &str, value: impl Into<Value>) -> Self {
        Self {
            filters: vec![WhereClause::equal_to(field, value)],
            ..Self::default()
        }
    }
}

pub struct RecordGateway<E: Schema> {
    client: Arc<dyn RecordClient>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Schema> Clone for RecordGateway<E> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            _entity: PhantomData,
        }
    }
}

impl<E: Schema> RecordGateway<E> {
    #[must_use]
    pub fn new(client: Arc<dyn RecordClient>) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    pub async fn list(&self, query: ListQuery) -> Result<Vec<E>, GatewayError> {
        let params = FetchParams {
            fields: FieldSpec::list(E::FIELDS),
            where_clauses: query.filters,
            order_by: vec![
                query
                    .order
                    .unwrap_or_else(|| OrderBy::new(E::DEFAULT_ORDER, SortType::Desc)),
            ],
            paging_info: Some(query.page.unwrap_or(PagingInfo {
                limit: E::PAGE_LIMIT,
                offset: 0,
            })),
        };

        let envelope = self.client.fetch_records(E::TABLE, &params).await?;
        let data = accepted(envelope, E::TABLE)?;

        let rows = match data {
            Some(Value::Array(rows)) => rows,
            None | Some(Value::Null) => Vec::new(),
            Some(other) => {
                return Err(GatewayError::Decode {
                    entity: E::ENTITY,
                    message: format!("expected a list, got {other}"),
                });
            }
        };

        let records = rows
            .into_iter()
            .map(decode::<E>)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(table = E::TABLE, count = records.len(), "Fetched records");
        Ok(records)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<E, GatewayError> {
        let params = GetParams {
            fields: FieldSpec::list(E::FIELDS),
        };
        let envelope = self.client.get_record_by_id(E::TABLE, id, &params).await?;

        match accepted(envelope, E::TABLE)? {
            Some(Value::Null) | None => Err(GatewayError::NotFound {
                entity: E::ENTITY,
                id,
            }),
            Some(row) => decode::<E>(row),
        }
    }

    pub async fn create(&self, draft: &E::Draft) -> Result<E, GatewayError> {
        let payload = RecordsPayload::from(E::to_wire(draft));
        let envelope = self.client.create_records(E::TABLE, &payload).await?;
        let record = single_result::<E>(envelope)?;
        debug!(table = E::TABLE, id = record.record_id(), "Created record");
        Ok(record)
    }

    /// Replaces every writable field of record `id`.
    pub async fn update(&self, id: i64, draft: &E::Draft) -> Result<E, GatewayError> {
        let mut fields = E::to_wire(draft);
        fields.insert("Id".to_string(), json!(id));
        let envelope = self
            .client
            .update_records(E::TABLE, &RecordsPayload::from(fields))
            .await?;
        let record = single_result::<E>(envelope)?;
        debug!(table = E::TABLE, id, "Updated record");
        Ok(record)
    }

    /// Returns `true` when storage confirmed the deletion.
    pub async fn delete(&self, id: i64) -> Result<bool, GatewayError> {
        let payload = DeletePayload {
            record_ids: vec![id],
        };
        let envelope = self.client.delete_records(E::TABLE, &payload).await?;
        if !envelope.success {
            return Err(rejected(envelope.message, E::TABLE));
        }

        let results = envelope.results.unwrap_or_default();
        if let Some(failure) = first_failure(&results) {
            return Err(GatewayError::Rejected(failure));
        }
        debug!(table = E::TABLE, id, "Deleted record");
        Ok(true)
    }
}

fn decode<E: Schema>(row: Value) -> Result<E, GatewayError> {
    serde_json::from_value::<E::Wire>(row)
        .map(E::to_domain)
        .map_err(|e| GatewayError::Decode {
            entity: E::ENTITY,
            message: e.to_string(),
        })
}

fn rejected(message: Option<String>, table: &str) -> GatewayError {
    let message = message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "Request was rejected".to_string());
    warn!(table, message = %message, "Record request rejected");
    GatewayError::Rejected(message)
}

fn accepted(envelope: Envelope, table: &str) -> Result<Option<Value>, GatewayError> {
    if envelope.success {
        Ok(envelope.data)
    } else {
        Err(rejected(envelope.message, table))
    }
}

fn first_failure(results: &[RecordResult]) -> Option<String> {
    results.iter().find(|r| !r.success).map(|r| {
        r.failure_message()
            .unwrap_or_else(|| "Record operation failed".to_string())
    })
}

/// Interprets a single-record create/update response.
fn single_result<E: Schema>(envelope: Envelope) -> Result<E, GatewayError> {
    if !envelope.success {
        return Err(rejected(envelope.message, E::TABLE));
    }

    let results = envelope.results.unwrap_or_default();
    if let Some(failure) = first_failure(&results) {
        warn!(table = E::TABLE, message = %failure, "Record write failed");
        return Err(GatewayError::Rejected(failure));
    }

    results
        .into_iter()
        .find_map(|r| r.data)
        .filter(|d| !d.is_null())
        .ok_or(GatewayError::EmptyResult)
        .and_then(decode::<E>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::InMemoryRecordClient;
    use crate::domain::DepartmentId;
    use crate::models::department::{Department, DepartmentDraft};
    use crate::models::employee::{Employee, EmployeeStatus};

    fn gateway<E: Schema>(client: InMemoryRecordClient) -> RecordGateway<E> {
        RecordGateway::new(Arc::new(client))
    }

    fn draft(name: &str) -> DepartmentDraft {
        DepartmentDraft {
            name: name.to_string(),
            description: String::new(),
            head: None,
            budget: 1000,
        }
    }

    #[tokio::test]
    async fn list_orders_by_id_descending() {
        let departments: RecordGateway<Department> = gateway(InMemoryRecordClient::demo().unwrap());
        let list = departments.list(ListQuery::default()).await.unwrap();
        let ids: Vec<i64> = list.iter().map(|d| d.id.value()).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[tokio::test]
    async fn create_then_get_resolves_reference() {
        let client = Arc::new(InMemoryRecordClient::demo().unwrap());
        let employees: RecordGateway<Employee> = RecordGateway::new(client.clone());

        let mut draft = employees.get_by_id(1).await.unwrap().draft();
        draft.email = "new@co.com".to_string();
        draft.department_id = Some(DepartmentId::new(2));

        let created = employees.create(&draft).await.unwrap();
        assert_eq!(created.department_id, Some(DepartmentId::new(2)));
        assert_eq!(created.department_name.as_deref(), Some("Marketing"));

        let fetched = employees.get_by_id(created.id.value()).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn filtered_list() {
        let employees: RecordGateway<Employee> = gateway(InMemoryRecordClient::demo().unwrap());
        let on_leave = employees
            .list(ListQuery::where_equal("status_c", "on-leave"))
            .await
            .unwrap();
        assert!(on_leave.iter().all(|e| e.status == EmployeeStatus::OnLeave));
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let departments: RecordGateway<Department> = gateway(InMemoryRecordClient::demo().unwrap());
        let err = departments.get_by_id(999).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::NotFound {
                entity: "Department",
                id: 999
            }
        ));
        assert_eq!(err.to_string(), "Department with ID 999 not found");
    }

    #[tokio::test]
    async fn update_of_missing_record_is_rejected() {
        let departments: RecordGateway<Department> = gateway(InMemoryRecordClient::demo().unwrap());
        let err = departments.update(999, &draft("Ops")).await.unwrap_err();
        match err {
            GatewayError::Rejected(message) => assert!(message.contains("999")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn rejected_envelope_carries_server_message() {
        let client = InMemoryRecordClient::demo().unwrap();
        client.fail_writes("department_c", "Quota exceeded").await;
        let departments: RecordGateway<Department> = gateway(client);

        let err = departments.create(&draft("Ops")).await.unwrap_err();
        assert!(matches!(err, GatewayError::Rejected(ref m) if m == "Quota exceeded"));
    }

    #[tokio::test]
    async fn delete_reports_outcome() {
        let departments: RecordGateway<Department> = gateway(InMemoryRecordClient::demo().unwrap());
        assert!(departments.delete(4).await.unwrap());
        assert!(departments.delete(4).await.is_err());
        assert_eq!(departments.list(ListQuery::default()).await.unwrap().len(), 3);
    }

    #[test]
    fn empty_batch_is_empty_result() {
        let err = single_result::<Department>(Envelope::batch(Vec::new())).unwrap_err();
        assert!(matches!(err, GatewayError::EmptyResult));
    }
}
