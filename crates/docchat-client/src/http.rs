//! HttpBackend - reqwest implementation of the document backend contract.
//!
//! Three endpoints: `POST /upload` (multipart, field `file`), `POST /ask`
//! (JSON `{file_id, question}`), `DELETE /delete/{file_id}`. Error bodies
//! carry a JSON `detail` field; when it is absent or unparsable the raw body
//! text (or a generic fallback) is used instead.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use docchat_core::backend::{DocumentBackend, FilePayload};
use docchat_core::error::{DocChatError, Result};

use crate::config::BackendConfig;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Backend implementation that talks to the docchat HTTP API.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Creates a backend for the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a backend with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a backend from a loaded configuration.
    pub fn from_config(config: &BackendConfig) -> Self {
        Self::with_timeout(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turns a non-success response into a backend error, extracting the
    /// JSON `detail` field when the body carries one.
    async fn error_from_response(response: Response, fallback: &str) -> DocChatError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|parsed| parsed.detail)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    fallback.to_string()
                } else {
                    body
                }
            });
        DocChatError::backend(status.as_u16(), message)
    }
}

#[async_trait]
impl DocumentBackend for HttpBackend {
    async fn upload(&self, payload: FilePayload) -> Result<String> {
        let form = Form::new().part(
            "file",
            Part::bytes(payload.bytes).file_name(payload.name.clone()),
        );

        debug!(file = %payload.name, "uploading file");
        let response = self
            .client
            .post(self.endpoint("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, "Upload failed").await);
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|err| DocChatError::network(format!("Invalid upload response: {err}")))?;
        Ok(parsed.file_id)
    }

    async fn ask(&self, file_id: &str, question: &str) -> Result<String> {
        let request = AskRequest { file_id, question };

        debug!(file_id = %file_id, "asking question");
        let response = self
            .client
            .post(self.endpoint("/ask"))
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, "Server error").await);
        }

        let parsed: AskResponse = response
            .json()
            .await
            .map_err(|err| DocChatError::network(format!("Invalid ask response: {err}")))?;
        Ok(parsed.answer)
    }

    async fn delete(&self, file_id: &str) -> Result<()> {
        debug!(file_id = %file_id, "deleting file");
        let response = self
            .client
            .delete(self.endpoint(&format!("/delete/{file_id}")))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, "Delete failed").await);
        }
        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> DocChatError {
    DocChatError::network(err.to_string())
}

#[derive(Serialize)]
struct AskRequest<'a> {
    file_id: &'a str,
    question: &'a str,
}

#[derive(Deserialize)]
struct UploadResponse {
    file_id: String,
}

#[derive(Deserialize)]
struct AskResponse {
    answer: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}
