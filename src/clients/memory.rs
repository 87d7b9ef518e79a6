//! In-process record store speaking the same envelope protocol as the
//! remote service. Backs the offline demo mode and the test-suite.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;
use tracing::debug;

use super::protocol::{
    DeletePayload, Envelope, FetchParams, FieldSpec, GetParams, Operator, RecordResult,
    RecordsPayload, SortType, WhereClause, WireFields,
};
use super::{RecordClient, TransportError};

const DEMO_RECORDS: &str = include_str!("fixtures/demo_records.json");

#[derive(Debug, Clone)]
struct Reference {
    table: String,
    field: String,
    target: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    tables: HashMap<String, Vec<WireFields>>,
    next_ids: HashMap<String, i64>,
    references: Vec<Reference>,
    failing_writes: HashMap<String, String>,
    failing_functions: Option<String>,
    invocations: Vec<(String, Value)>,
}

impl MemoryState {
    fn allocate_id(&mut self, table: &str) -> i64 {
        let highest = self
            .tables
            .get(table)
            .into_iter()
            .flatten()
            .filter_map(record_id)
            .max()
            .unwrap_or(0);
        let next = self.next_ids.entry(table.to_string()).or_insert(0);
        *next = (*next).max(highest) + 1;
        *next
    }

    /// Expands integer reference fields into `{Id, Name}` lookups.
    fn resolve(&self, table: &str, record: &WireFields) -> WireFields {
        let mut out = record.clone();
        for reference in self.references.iter().filter(|r| r.table == table) {
            let Some(id) = out.get(&reference.field).and_then(Value::as_i64) else {
                continue;
            };
            let name = self
                .tables
                .get(&reference.target)
                .and_then(|rows| rows.iter().find(|r| record_id(r) == Some(id)))
                .and_then(|r| r.get("Name").cloned())
                .unwrap_or(Value::Null);
            out.insert(reference.field.clone(), json!({ "Id": id, "Name": name }));
        }
        out
    }
}

fn record_id(record: &WireFields) -> Option<i64> {
    record.get("Id").and_then(Value::as_i64)
}

fn project(record: WireFields, fields: &[FieldSpec]) -> WireFields {
    if fields.is_empty() {
        return record;
    }
    let wanted: HashSet<&str> = fields.iter().map(|f| f.field.name.as_str()).collect();
    record
        .into_iter()
        .filter(|(k, _)| k == "Id" || wanted.contains(k.as_str()))
        .collect()
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        // Reference fields hold an id; allow matching a stringly id.
        (Value::Number(x), Value::String(s)) | (Value::String(s), Value::Number(x)) => {
            s.trim().parse::<f64>().ok() == x.as_f64()
        }
        _ => a == b,
    }
}

fn matches_clause(record: &WireFields, clause: &WhereClause) -> bool {
    let value = record.get(&clause.field_name).unwrap_or(&Value::Null);
    match clause.operator {
        Operator::EqualTo => clause.values.iter().any(|v| values_equal(value, v)),
        Operator::NotEqualTo => !clause.values.iter().any(|v| values_equal(value, v)),
        Operator::Contains => {
            let Some(haystack) = value.as_str().map(str::to_lowercase) else {
                return false;
            };
            clause
                .values
                .iter()
                .filter_map(Value::as_str)
                .any(|needle| haystack.contains(&needle.to_lowercase()))
        }
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

/// Record store kept entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryRecordClient {
    state: Mutex<MemoryState>,
}

impl InMemoryRecordClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the bundled demo dataset and the standard
    /// employee → department and log → employee references.
    pub fn demo() -> Result<Self, serde_json::Error> {
        let tables: HashMap<String, Vec<WireFields>> = serde_json::from_str(DEMO_RECORDS)?;
        let mut client = Self::new().with_standard_references();
        for (table, rows) in tables {
            client = client.seed(&table, rows.into_iter().map(Value::Object).collect());
        }
        Ok(client)
    }

    #[must_use]
    pub fn with_standard_references(self) -> Self {
        self.with_reference("employee_c", "department_c", "department_c")
            .with_reference("logger_c", "employee_c", "employee_c")
    }

    /// Declares `table.field` as an integer reference into `target`.
    #[must_use]
    pub fn with_reference(mut self, table: &str, field: &str, target: &str) -> Self {
        self.state.get_mut().references.push(Reference {
            table: table.to_string(),
            field: field.to_string(),
            target: target.to_string(),
        });
        self
    }

    /// Inserts rows verbatim. Rows without an `Id` get one assigned.
    #[must_use]
    pub fn seed(mut self, table: &str, rows: Vec<Value>) -> Self {
        let state = self.state.get_mut();
        for row in rows {
            let Value::Object(mut record) = row else {
                continue;
            };
            if record_id(&record).is_none() {
                let id = state.allocate_id(table);
                record.insert("Id".to_string(), json!(id));
            }
            state
                .tables
                .entry(table.to_string())
                .or_default()
                .push(record);
        }
        self
    }

    /// Every subsequent create/update/delete on `table` is rejected.
    pub async fn fail_writes(&self, table: &str, message: &str) {
        self.state
            .lock()
            .await
            .failing_writes
            .insert(table.to_string(), message.to_string());
    }

    pub async fn fail_functions(&self, message: &str) {
        self.state.lock().await.failing_functions = Some(message.to_string());
    }

    /// Raw stored rows, references unresolved.
    pub async fn records(&self, table: &str) -> Vec<WireFields> {
        self.state
            .lock()
            .await
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn invocations(&self) -> Vec<(String, Value)> {
        self.state.lock().await.invocations.clone()
    }
}

#[async_trait]
impl RecordClient for InMemoryRecordClient {
    async fn fetch_records(
        &self,
        table: &str,
        params: &FetchParams,
    ) -> Result<Envelope, TransportError> {
        let state = self.state.lock().await;
        let mut rows: Vec<&WireFields> = state
            .tables
            .get(table)
            .into_iter()
            .flatten()
            .filter(|r| params.where_clauses.iter().all(|c| matches_clause(r, c)))
            .collect();

        for order in params.order_by.iter().rev() {
            rows.sort_by(|a, b| {
                let ord = compare_values(a.get(&order.field_name), b.get(&order.field_name));
                match order.sort_type {
                    SortType::Asc => ord,
                    SortType::Desc => ord.reverse(),
                }
            });
        }

        let (offset, limit) = params
            .paging_info
            .map_or((0, usize::MAX), |p| (p.offset as usize, p.limit as usize));

        let data: Vec<Value> = rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|r| Value::Object(project(state.resolve(table, r), &params.fields)))
            .collect();

        debug!(table, count = data.len(), "In-memory fetch");
        Ok(Envelope::ok(Value::Array(data)))
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        params: &GetParams,
    ) -> Result<Envelope, TransportError> {
        let state = self.state.lock().await;
        let found = state
            .tables
            .get(table)
            .and_then(|rows| rows.iter().find(|r| record_id(r) == Some(id)))
            .map(|r| Value::Object(project(state.resolve(table, r), &params.fields)));

        Ok(Envelope {
            success: true,
            data: found,
            ..Envelope::default()
        })
    }

    async fn create_records(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<Envelope, TransportError> {
        let mut state = self.state.lock().await;
        if let Some(message) = state.failing_writes.get(table) {
            return Ok(Envelope::rejected(message.clone()));
        }

        let now = Utc::now().to_rfc3339();
        let mut results = Vec::with_capacity(payload.records.len());
        for incoming in &payload.records {
            let id = state.allocate_id(table);
            let mut record: WireFields = incoming
                .iter()
                .filter(|(k, _)| k.as_str() != "Id")
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            record.insert("Id".to_string(), json!(id));
            record.insert("CreatedOn".to_string(), json!(now));
            record.insert("ModifiedOn".to_string(), json!(now));

            let resolved = state.resolve(table, &record);
            state
                .tables
                .entry(table.to_string())
                .or_default()
                .push(record);
            results.push(RecordResult {
                success: true,
                data: Some(Value::Object(resolved)),
                ..RecordResult::default()
            });
        }

        Ok(Envelope::batch(results))
    }

    async fn update_records(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<Envelope, TransportError> {
        let mut state = self.state.lock().await;
        if let Some(message) = state.failing_writes.get(table) {
            return Ok(Envelope::rejected(message.clone()));
        }

        let now = Utc::now().to_rfc3339();
        let mut results = Vec::with_capacity(payload.records.len());
        for incoming in &payload.records {
            let Some(id) = record_id(incoming) else {
                results.push(failed("Id is required for update"));
                continue;
            };

            let updated = state
                .tables
                .get_mut(table)
                .and_then(|rows| rows.iter_mut().find(|r| record_id(r) == Some(id)))
                .map(|row| {
                    for (k, v) in incoming {
                        row.insert(k.clone(), v.clone());
                    }
                    row.insert("ModifiedOn".to_string(), json!(now));
                    row.clone()
                });

            match updated {
                Some(row) => results.push(RecordResult {
                    success: true,
                    data: Some(Value::Object(state.resolve(table, &row))),
                    ..RecordResult::default()
                }),
                None => results.push(failed(&format!("Record with Id {id} does not exist"))),
            }
        }

        Ok(Envelope::batch(results))
    }

    async fn delete_records(
        &self,
        table: &str,
        payload: &DeletePayload,
    ) -> Result<Envelope, TransportError> {
        let mut state = self.state.lock().await;
        if let Some(message) = state.failing_writes.get(table) {
            return Ok(Envelope::rejected(message.clone()));
        }

        let rows = state.tables.entry(table.to_string()).or_default();
        let results = payload
            .record_ids
            .iter()
            .map(|&id| match rows.iter().position(|r| record_id(r) == Some(id)) {
                Some(index) => {
                    rows.remove(index);
                    RecordResult {
                        success: true,
                        ..RecordResult::default()
                    }
                }
                None => failed(&format!("Record with Id {id} does not exist")),
            })
            .collect();

        Ok(Envelope::batch(results))
    }

    async fn invoke_function(&self, name: &str, body: &Value) -> Result<Value, TransportError> {
        let mut state = self.state.lock().await;
        if let Some(message) = &state.failing_functions {
            return Err(TransportError::Status {
                status: 500,
                body: message.clone(),
            });
        }
        state.invocations.push((name.to_string(), body.clone()));
        Ok(json!({ "success": true }))
    }
}

fn failed(message: &str) -> RecordResult {
    RecordResult {
        success: false,
        message: Some(message.to_string()),
        ..RecordResult::default()
    }
}
