//! reqwest implementation of `ContentApi`.

use super::envelope::{envelope_data, parse_envelope, ApiError, Submission};
use super::ContentApi;
use crate::content_store::{EntityKind, StoredEntity};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// HTTP client for the content API.
pub struct HttpContentClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpContentClient {
    /// # Arguments
    /// * `base_url` - Server root (e.g., "http://localhost:3001")
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(base_url: &str, timeout_sec: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, kind: EntityKind) -> String {
        format!("{}/api/{}", self.base_url, kind.collection())
    }

    fn multipart(submission: Submission) -> Result<Form, ApiError> {
        let data = serde_json::to_string(&submission.data)
            .map_err(|e| ApiError::Encoding(format!("record: {}", e)))?;
        let mut form = Form::new().text("data", data);

        for attachment in submission.attachments {
            let field = attachment.field_name();
            let mime = infer::get(&attachment.bytes)
                .map(|kind| kind.mime_type())
                .unwrap_or("application/octet-stream");
            let part = Part::bytes(attachment.bytes)
                .file_name(attachment.file_name)
                .mime_str(mime)
                .map_err(|e| ApiError::Encoding(format!("attachment: {}", e)))?;
            form = form.part(field, part);
        }
        Ok(form)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!("Content API replied {} ({} bytes)", status, body.len());
        parse_envelope(status, &body)
    }

    fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ApiError> {
        serde_json::from_value(value).map_err(|e| ApiError::Transport {
            status: 200,
            detail: format!("unexpected response shape: {}", e),
        })
    }
}

#[async_trait]
impl ContentApi for HttpContentClient {
    async fn list(&self, kind: EntityKind) -> Result<Vec<StoredEntity>, ApiError> {
        let value = self.send(self.client.get(self.collection_url(kind))).await?;
        Self::decode(envelope_data(value)?)
    }

    async fn get(&self, kind: EntityKind, id: &str) -> Result<StoredEntity, ApiError> {
        let url = format!("{}/{}", self.collection_url(kind), id);
        let value = self.send(self.client.get(url)).await?;
        Self::decode(envelope_data(value)?)
    }

    async fn create(
        &self,
        kind: EntityKind,
        submission: Submission,
    ) -> Result<StoredEntity, ApiError> {
        let form = Self::multipart(submission)?;
        let request = self.client.post(self.collection_url(kind)).multipart(form);
        let value = self.send(request).await?;
        Self::decode(envelope_data(value)?)
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        submission: Submission,
    ) -> Result<StoredEntity, ApiError> {
        let form = Self::multipart(submission)?;
        let url = format!("{}/{}", self.collection_url(kind), id);
        let value = self.send(self.client.put(url).multipart(form)).await?;
        Self::decode(envelope_data(value)?)
    }

    async fn delete(&self, kind: EntityKind, ids: &[String]) -> Result<usize, ApiError> {
        let request = self
            .client
            .delete(self.collection_url(kind))
            .json(&json!({ "ids": ids }));
        let value = self.send(request).await?;
        Ok(value
            .get("deletedCount")
            .and_then(Value::as_u64)
            .unwrap_or(0) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = HttpContentClient::new("http://localhost:3001/", 30).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3001");
        assert_eq!(
            client.collection_url(EntityKind::Blog),
            "http://localhost:3001/api/blogs"
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let client = HttpContentClient::new("http://127.0.0.1:1", 2).unwrap();
        let err = client.list(EntityKind::Class).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
