//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per content API endpoint and returns the
//! raw responses so tests can assert on status codes.
//!
//! When API routes or request formats change, update only this file.

#![allow(dead_code)]

use super::constants::*;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    fn url(&self, collection: &str, rest: &str) -> String {
        format!("{}/api/{}{}", self.base_url, collection, rest)
    }

    /// Builds the multipart body the admin forms send: `data` JSON plus
    /// named image parts.
    pub fn form<T: Serialize>(record: &T, files: &[(&str, &str, &[u8])]) -> Form {
        let data = serde_json::to_string(record).expect("Failed to encode record");
        let mut form = Form::new().text("data", data);
        for (field, file_name, bytes) in files {
            let part = Part::bytes(bytes.to_vec())
                .file_name(file_name.to_string())
                .mime_str("image/png")
                .expect("Invalid mime type");
            form = form.part(field.to_string(), part);
        }
        form
    }

    // ========================================================================
    // Server info
    // ========================================================================

    /// GET /
    pub async fn home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Home request failed")
    }

    /// GET /media/{path}
    pub async fn media(&self, public_path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, public_path))
            .send()
            .await
            .expect("Media request failed")
    }

    // ========================================================================
    // Entity endpoints
    // ========================================================================

    /// GET /api/{collection}
    pub async fn list(&self, collection: &str) -> Response {
        self.client
            .get(self.url(collection, ""))
            .send()
            .await
            .expect("List request failed")
    }

    /// GET /api/{collection}/{id}
    pub async fn get(&self, collection: &str, id: &str) -> Response {
        self.client
            .get(self.url(collection, &format!("/{}", id)))
            .send()
            .await
            .expect("Get request failed")
    }

    /// GET /api/{collection}/slug/{slug}
    pub async fn get_by_slug(&self, collection: &str, slug: &str) -> Response {
        self.client
            .get(self.url(collection, &format!("/slug/{}", slug)))
            .send()
            .await
            .expect("Get by slug request failed")
    }

    /// GET /api/{collection}/slugs
    pub async fn slugs(&self, collection: &str) -> Response {
        self.client
            .get(self.url(collection, "/slugs"))
            .send()
            .await
            .expect("Slugs request failed")
    }

    /// POST /api/{collection}
    pub async fn create(&self, collection: &str, form: Form) -> Response {
        self.client
            .post(self.url(collection, ""))
            .multipart(form)
            .send()
            .await
            .expect("Create request failed")
    }

    /// PUT /api/{collection}/{id}
    pub async fn update(&self, collection: &str, id: &str, form: Form) -> Response {
        self.client
            .put(self.url(collection, &format!("/{}", id)))
            .multipart(form)
            .send()
            .await
            .expect("Update request failed")
    }

    /// DELETE /api/{collection} with `{ids}`
    pub async fn delete_many(&self, collection: &str, ids: &[&str]) -> Response {
        self.client
            .delete(self.url(collection, ""))
            .json(&json!({ "ids": ids }))
            .send()
            .await
            .expect("Bulk delete request failed")
    }

    /// DELETE /api/{collection}/{id}
    pub async fn delete_one(&self, collection: &str, id: &str) -> Response {
        self.client
            .delete(self.url(collection, &format!("/{}", id)))
            .send()
            .await
            .expect("Delete request failed")
    }

    // ========================================================================
    // Class seed migration
    // ========================================================================

    /// GET /api/classes/migrate
    pub async fn preview_migration(&self) -> Response {
        self.client
            .get(self.url("classes", "/migrate"))
            .send()
            .await
            .expect("Migration preview request failed")
    }

    /// POST /api/classes/migrate
    pub async fn run_migration(&self) -> Response {
        self.client
            .post(self.url("classes", "/migrate"))
            .send()
            .await
            .expect("Migration request failed")
    }
}
