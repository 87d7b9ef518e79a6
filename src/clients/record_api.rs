use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::protocol::{DeletePayload, Envelope, FetchParams, GetParams, RecordsPayload};
use super::{RecordClient, TransportError};

const PUBLIC_KEY_HEADER: &str = "X-Apper-Public-Key";

#[derive(Debug, Clone)]
pub struct RecordApiConfig {
    pub base_url: String,

    pub project_id: String,

    pub public_key: String,

    pub timeout_seconds: u64,
}

impl Default for RecordApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            project_id: String::new(),
            public_key: String::new(),
            timeout_seconds: 30,
        }
    }
}

/// Record-storage binding over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpRecordClient {
    client: Client,
    config: RecordApiConfig,
}

impl HttpRecordClient {
    pub fn new(config: RecordApiConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("staffdesk/0.1")
            .build()?;

        Ok(Self::with_client(client, config))
    }

    /// Reuses an existing connection pool.
    #[must_use]
    pub const fn with_client(client: Client, config: RecordApiConfig) -> Self {
        Self { client, config }
    }

    fn project_url(&self, path: &str) -> Result<Url, TransportError> {
        let base = self.config.base_url.trim_end_matches('/');
        let url = format!("{base}/v1/projects/{}/{path}", self.config.project_id);
        Ok(Url::parse(&url)?)
    }

    fn table_url(&self, table: &str, suffix: &str) -> Result<Url, TransportError> {
        self.project_url(&format!("tables/{table}/records{suffix}"))
    }

    async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<Envelope, TransportError> {
        debug!(%method, %url, "Record API request");

        let response = self
            .client
            .request(method, url)
            .header(PUBLIC_KEY_HEADER, &self.config.public_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        // Rejections usually still carry an envelope with the server message.
        match serde_json::from_str::<Envelope>(&text) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            }),
            Err(e) => Err(TransportError::Decode(e.to_string())),
        }
    }
}

#[async_trait]
impl RecordClient for HttpRecordClient {
    async fn fetch_records(
        &self,
        table: &str,
        params: &FetchParams,
    ) -> Result<Envelope, TransportError> {
        let url = self.table_url(table, "/query")?;
        self.send(Method::POST, url, params).await
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        params: &GetParams,
    ) -> Result<Envelope, TransportError> {
        let url = self.table_url(table, &format!("/{id}/query"))?;
        let envelope = self.send(Method::POST, url, params).await;

        // A missing record is a successful lookup with no data.
        match envelope {
            Err(TransportError::Status { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16() =>
            {
                Ok(Envelope {
                    success: true,
                    ..Envelope::default()
                })
            }
            other => other,
        }
    }

    async fn create_records(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<Envelope, TransportError> {
        let url = self.table_url(table, "")?;
        self.send(Method::POST, url, payload).await
    }

    async fn update_records(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<Envelope, TransportError> {
        let url = self.table_url(table, "")?;
        self.send(Method::PUT, url, payload).await
    }

    async fn delete_records(
        &self,
        table: &str,
        payload: &DeletePayload,
    ) -> Result<Envelope, TransportError> {
        let url = self.table_url(table, "")?;
        self.send(Method::DELETE, url, payload).await
    }

    async fn invoke_function(&self, name: &str, body: &Value) -> Result<Value, TransportError> {
        let url = self.project_url(&format!("functions/{name}/invoke"))?;
        debug!(function = name, "Invoking remote function");

        let response = self
            .client
            .post(url)
            .header(PUBLIC_KEY_HEADER, &self.config.public_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))
    }
}
