//! Client side of the content API, used by the dashboard controllers.

mod envelope;
mod http_client;
#[cfg(test)]
pub(crate) mod mock;

pub use envelope::{envelope_data, parse_envelope, ApiError, Attachment, Submission};
pub use http_client::HttpContentClient;

use crate::content_store::{EntityKind, StoredEntity};
use async_trait::async_trait;

/// Operations the dashboard issues against the content API.
#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn list(&self, kind: EntityKind) -> Result<Vec<StoredEntity>, ApiError>;

    async fn get(&self, kind: EntityKind, id: &str) -> Result<StoredEntity, ApiError>;

    /// POST a new record.
    async fn create(
        &self,
        kind: EntityKind,
        submission: Submission,
    ) -> Result<StoredEntity, ApiError>;

    /// PUT a full replacement of the record `id`.
    async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        submission: Submission,
    ) -> Result<StoredEntity, ApiError>;

    /// Returns the number of records removed.
    async fn delete(&self, kind: EntityKind, ids: &[String]) -> Result<usize, ApiError>;
}
