//! # Student API Client
//!
//! HTTP client for the `/students` REST surface.

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use student_crud::{Student, StudentId, StudentPayload};
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Connection settings for [`StudentClient`].
///
/// ```rust
/// use student_cli::ClientConfig;
///
/// let config = ClientConfig::default();
/// assert_eq!(config.base_url, "http://localhost:8080");
/// assert_eq!(config.timeout_ms, 30000);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server root, without the `/students` suffix.
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 30000,
        }
    }
}

#[derive(Clone, Debug)]
pub struct StudentClient {
    client: Client,
    base_url: Url,
}

impl StudentClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("Invalid base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "Invalid base URL: {}",
                config.base_url
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(format!("student-cli/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(base_url = %base_url, timeout_ms = config.timeout_ms, "Created student API client");
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Config(format!("Invalid request path '{}': {}", path, e)))
    }

    pub async fn get_all_students(&self) -> ClientResult<Vec<Student>> {
        let response = self.client.get(self.url("students")?).send().await?;
        self.handle_response(response, "list students").await
    }

    /// `None` when the server has no student with this id.
    pub async fn get_student_by_id(&self, id: StudentId) -> ClientResult<Option<Student>> {
        let response = self
            .client
            .get(self.url(&format!("students/{}", id))?)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.handle_response(response, "get student").await.map(Some)
    }

    pub async fn create_student(&self, payload: &StudentPayload) -> ClientResult<Student> {
        let response = self
            .client
            .post(self.url("students")?)
            .json(payload)
            .send()
            .await?;
        self.handle_response(response, "create student").await
    }

    pub async fn update_student(
        &self,
        id: StudentId,
        payload: &StudentPayload,
    ) -> ClientResult<Student> {
        let response = self
            .client
            .put(self.url(&format!("students/{}", id))?)
            .json(payload)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::StudentNotFound { id });
        }
        self.handle_response(response, "update student").await
    }

    pub async fn delete_student(&self, id: StudentId) -> ClientResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("students/{}", id))?)
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::StudentNotFound { id });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::api_error(status.as_u16(), message));
        }
        debug!(id, "deleted student");
        Ok(())
    }

    /// Whether `/health` answers 200.
    pub async fn health(&self) -> ClientResult<bool> {
        let response = self.client.get(self.url("health")?).send().await?;
        Ok(response.status().is_success())
    }

    async fn handle_response<T>(&self, response: reqwest::Response, operation: &str) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            debug!("Successfully completed operation: {}", operation);
            return Ok(serde_json::from_str(&body)?);
        }
        Err(ClientError::api_error(status.as_u16(), error_message(&body)))
    }
}

/// Pull `error.message` out of the server's JSON envelope; fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
