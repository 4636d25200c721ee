//! EntityStore trait definition.

use super::models::{EntityKind, NewEntity, StoredEntity};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} with slug '{slug}' already exists")]
    DuplicateSlug { kind: EntityKind, slug: String },

    #[error("{kind} with id '{id}' not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("Invalid stored document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for managed content entities.
///
/// Every operation is scoped to one entity kind; slugs are unique per kind.
pub trait EntityStore: Send + Sync {
    // =========================================================================
    // Reads
    // =========================================================================

    /// Whether an entity with this slug exists.
    fn exists(&self, kind: EntityKind, slug: &str) -> StoreResult<bool>;

    /// All entities of a kind, newest first.
    fn list(&self, kind: EntityKind) -> StoreResult<Vec<StoredEntity>>;

    fn get(&self, kind: EntityKind, id: &str) -> StoreResult<Option<StoredEntity>>;

    fn find_by_slug(&self, kind: EntityKind, slug: &str) -> StoreResult<Option<StoredEntity>>;

    /// Slugs of every entity of a kind, for page renderers.
    fn list_slugs(&self, kind: EntityKind) -> StoreResult<Vec<String>>;

    fn count(&self, kind: EntityKind) -> StoreResult<usize>;

    // =========================================================================
    // Writes
    // =========================================================================

    /// Insert a new entity and return its id.
    /// Fails with `StoreError::DuplicateSlug` when the slug is taken.
    fn create(&self, entity: &NewEntity) -> StoreResult<String>;

    /// Replace the whole document of an existing entity. The stored slug is
    /// kept regardless of the slug carried by `entity`.
    fn update(&self, id: &str, entity: &NewEntity) -> StoreResult<StoredEntity>;

    /// Hard-delete the given ids, returning how many rows were removed.
    fn delete(&self, kind: EntityKind, ids: &[String]) -> StoreResult<usize>;
}
