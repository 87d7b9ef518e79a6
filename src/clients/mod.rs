//! Bindings to the record-storage service.
//!
//! [`RecordClient`] is the only seam the rest of the crate talks to. The HTTP
//! binding is used in production; the in-memory binding backs demos and tests.

pub mod memory;
pub mod protocol;
pub mod record_api;

pub use memory::InMemoryRecordClient;
pub use record_api::HttpRecordClient;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use protocol::{DeletePayload, Envelope, FetchParams, GetParams, RecordsPayload};

/// Failures below the envelope level: the request never produced a usable
/// `{success, ...}` body.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

#[async_trait]
pub trait RecordClient: Send + Sync {
    async fn fetch_records(
        &self,
        table: &str,
        params: &FetchParams,
    ) -> Result<Envelope, TransportError>;

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        params: &GetParams,
    ) -> Result<Envelope, TransportError>;

    async fn create_records(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<Envelope, TransportError>;

    async fn update_records(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<Envelope, TransportError>;

    async fn delete_records(
        &self,
        table: &str,
        payload: &DeletePayload,
    ) -> Result<Envelope, TransportError>;

    /// Calls a named server-side function with a JSON body.
    async fn invoke_function(&self, name: &str, body: &Value) -> Result<Value, TransportError>;
}
