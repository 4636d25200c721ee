//! In-memory `ContentApi` used by controller tests.

use super::{ApiError, ContentApi, Submission};
use crate::content_store::{generate_object_id, EntityKind, StoredEntity};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

/// Records every call and answers from an in-memory collection.
pub struct MockContentApi {
    entities: Mutex<Vec<StoredEntity>>,
    submissions: Mutex<Vec<Submission>>,
    call_counts: Mutex<HashMap<String, usize>>,
    next_error: Mutex<Option<ApiError>>,
}

impl MockContentApi {
    pub fn new() -> Self {
        Self {
            entities: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
            call_counts: Mutex::new(HashMap::new()),
            next_error: Mutex::new(None),
        }
    }

    pub fn add_entity(&self, entity: StoredEntity) {
        self.entities.lock().unwrap().push(entity);
    }

    /// Makes the next call fail with `error`.
    pub fn fail_next(&self, error: ApiError) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        *self.call_counts.lock().unwrap().get(method).unwrap_or(&0)
    }

    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    pub fn last_submission(&self) -> Option<Submission> {
        self.submissions.lock().unwrap().last().cloned()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.lock().unwrap().len()
    }

    fn increment_call(&self, method: &str) -> Result<(), ApiError> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
        match self.next_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContentApi for MockContentApi {
    async fn list(&self, kind: EntityKind) -> Result<Vec<StoredEntity>, ApiError> {
        self.increment_call("list")?;
        Ok(self
            .entities
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect())
    }

    async fn get(&self, kind: EntityKind, id: &str) -> Result<StoredEntity, ApiError> {
        self.increment_call("get")?;
        self.entities
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.kind == kind && e.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Application {
                status: 404,
                message: format!("{} not found", id),
            })
    }

    async fn create(
        &self,
        kind: EntityKind,
        submission: Submission,
    ) -> Result<StoredEntity, ApiError> {
        self.increment_call("create")?;
        let now = Utc::now();
        let entity = StoredEntity {
            id: generate_object_id(now),
            kind,
            created_at: now,
            updated_at: now,
            document: submission.data.clone(),
        };
        self.submissions.lock().unwrap().push(submission);
        self.entities.lock().unwrap().push(entity.clone());
        Ok(entity)
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        submission: Submission,
    ) -> Result<StoredEntity, ApiError> {
        self.increment_call("update")?;
        let mut entities = self.entities.lock().unwrap();
        let entity = entities
            .iter_mut()
            .find(|e| e.kind == kind && e.id == id)
            .ok_or_else(|| ApiError::Application {
                status: 404,
                message: format!("{} not found", id),
            })?;
        entity.document = submission.data.clone();
        entity.updated_at = Utc::now();
        self.submissions.lock().unwrap().push(submission);
        Ok(entity.clone())
    }

    async fn delete(&self, kind: EntityKind, ids: &[String]) -> Result<usize, ApiError> {
        self.increment_call("delete")?;
        let mut entities = self.entities.lock().unwrap();
        let before = entities.len();
        entities.retain(|e| !(e.kind == kind && ids.contains(&e.id)));
        Ok(before - entities.len())
    }
}
