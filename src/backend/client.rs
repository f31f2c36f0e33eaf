//! Authenticated HTTP client for the Task API.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};

use super::types::{
    ApiErrorEnvelope, CallCreate, CallStatus, Health, ScheduledCall, Task, TaskCreate, TaskStatus,
    User, UserCreate,
};

/// Build default headers carrying the shared secret.
///
/// The value is marked sensitive so it never appears in debug output.
fn api_key_headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let mut value = HeaderValue::from_str(api_key)
        .map_err(|_| BridgeError::Configuration("API key is not a valid header value".into()))?;
    value.set_sensitive(true);
    headers.insert("X-API-Key", value);
    Ok(headers)
}

/// HTTP client bound to the Task API's base URL and shared secret.
///
/// Holds one `reqwest::Client` (connection pool included) for the process
/// lifetime; safe to share across concurrent tool invocations. Every
/// operation is a single attempt — no retries, no backoff.
#[derive(Debug, Clone)]
pub struct TaskApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl TaskApiClient {
    /// Build a client from startup configuration.
    ///
    /// The secret header is installed once here; callers of this client
    /// never handle the credential again.
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(api_key_headers(&config.api_key)?)
            .build()
            .map_err(|e| BridgeError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
    }

    /// Map a backend failure response onto the error taxonomy.
    ///
    /// The machine message comes from the `{"success": false, "message"}`
    /// envelope when present, falling back to the raw body.
    async fn failure(status: StatusCode, response: Response) -> BridgeError {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
            .map(|envelope| envelope.message)
            .unwrap_or_else(|_| body.trim().to_string());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BridgeError::Authentication {
                status: status.as_u16(),
            },
            StatusCode::NOT_FOUND => BridgeError::NotFound(message),
            _ => BridgeError::api(status.as_u16(), message),
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::failure(status, response).await);
        }
        Ok(response.json::<T>().await?)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        debug!(path, "POST");
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::decode(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        debug!(path, "GET");
        let response = self.request(Method::GET, path).query(query).send().await?;
        Self::decode(response).await
    }

    async fn patch_status<T: DeserializeOwned>(&self, path: &str, new_status: String) -> Result<T> {
        debug!(path, %new_status, "PATCH");
        let response = self
            .request(Method::PATCH, path)
            .query(&[("new_status", new_status)])
            .send()
            .await?;
        Self::decode(response).await
    }

    // ── Users ──────────────────────────────────────────────────────────

    pub async fn create_user(&self, payload: &UserCreate) -> Result<User> {
        self.post("/users", payload).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.get_json("/users", &[]).await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        self.get_json(&format!("/users/{user_id}"), &[]).await
    }

    // ── Calls ──────────────────────────────────────────────────────────

    pub async fn create_call(&self, payload: &CallCreate) -> Result<ScheduledCall> {
        self.post("/calls", payload).await
    }

    pub async fn list_calls(
        &self,
        user_id: Option<&str>,
        status: Option<CallStatus>,
    ) -> Result<Vec<ScheduledCall>> {
        let mut query = Vec::new();
        if let Some(user_id) = user_id {
            query.push(("user_id", user_id.to_string()));
        }
        if let Some(status) = status {
            query.push(("status_filter", status.to_string()));
        }
        self.get_json("/calls", &query).await
    }

    pub async fn update_call_status(
        &self,
        call_id: &str,
        new_status: CallStatus,
    ) -> Result<ScheduledCall> {
        self.patch_status(&format!("/calls/{call_id}/status"), new_status.to_string())
            .await
    }

    // ── Tasks ──────────────────────────────────────────────────────────

    pub async fn create_task(&self, payload: &TaskCreate) -> Result<Task> {
        self.post("/tasks", payload).await
    }

    pub async fn list_tasks(
        &self,
        user_id: Option<&str>,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Task>> {
        let mut query = Vec::new();
        if let Some(user_id) = user_id {
            query.push(("user_id", user_id.to_string()));
        }
        if let Some(status) = status {
            query.push(("status_filter", status.to_string()));
        }
        self.get_json("/tasks", &query).await
    }

    pub async fn update_task_status(&self, task_id: &str, new_status: TaskStatus) -> Result<Task> {
        self.patch_status(&format!("/tasks/{task_id}/status"), new_status.to_string())
            .await
    }

    // ── Health ─────────────────────────────────────────────────────────

    /// Unauthenticated liveness probe. The secret header is still attached
    /// (it is a default header); the backend ignores it for this route.
    pub async fn health(&self) -> Result<Health> {
        self.get_json("/health", &[]).await
    }
}
