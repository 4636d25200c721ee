//! Seed migration: insert canonical records that are not in the store yet.
//!
//! The migration is insert-only. A record whose slug already exists is
//! reported as skipped and left untouched, even if its content drifted.

mod canonical;

pub use canonical::canonical_classes;

use crate::content_store::validation::validate_entity;
use crate::content_store::{ContentEntity, EntityStore, NewEntity, StoreError};
use serde::Serialize;
use tracing::{debug, info, warn};

pub const CREATED_MESSAGE: &str = "Successfully migrated";
pub const SKIPPED_MESSAGE: &str = "Already exists";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedStatus {
    Created,
    Skipped,
    Error,
}

/// Outcome for one candidate record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeedOutcome {
    pub slug: String,
    pub status: SeedStatus,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeedFailure {
    pub slug: String,
    pub error: String,
}

/// Aggregate result of a seed run. `success` reports that the batch ran to
/// completion; individual failures are listed in `errors`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub success: bool,
    pub total: usize,
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
    pub results: Vec<SeedOutcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<SeedFailure>,
}

impl SeedReport {
    /// True when any record failed, even though the batch completed.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    fn new(total: usize) -> Self {
        SeedReport {
            success: true,
            total,
            created: 0,
            skipped: 0,
            failed: 0,
            results: Vec::with_capacity(total),
            errors: Vec::new(),
        }
    }

    fn record(&mut self, slug: &str, status: SeedStatus, message: String) {
        match status {
            SeedStatus::Created => self.created += 1,
            SeedStatus::Skipped => self.skipped += 1,
            SeedStatus::Error => {
                self.failed += 1;
                self.errors.push(SeedFailure {
                    slug: slug.to_string(),
                    error: message.clone(),
                });
            }
        }
        self.results.push(SeedOutcome {
            slug: slug.to_string(),
            status,
            message,
        });
    }
}

/// Runs a fixed list of candidate records against an entity store.
pub struct SeedRunner<R: ContentEntity> {
    records: Vec<R>,
}

impl<R: ContentEntity> SeedRunner<R> {
    pub fn new(records: Vec<R>) -> Self {
        SeedRunner { records }
    }

    /// The candidate records, for inspection before running.
    pub fn candidates(&self) -> &[R] {
        &self.records
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Processes every candidate in order. A failure on one record never
    /// stops the ones after it.
    pub fn run(&self, store: &dyn EntityStore) -> SeedReport {
        let mut report = SeedReport::new(self.records.len());

        for record in &self.records {
            let slug = record.slug();
            let (status, message) = Self::migrate_one(store, record);
            match status {
                SeedStatus::Error => warn!("Seeding {} '{}' failed: {}", R::KIND, slug, message),
                _ => debug!("Seeding {} '{}': {:?}", R::KIND, slug, status),
            }
            report.record(slug, status, message);
        }

        info!(
            "Seed run for {} done: {} created, {} skipped, {} failed",
            R::KIND,
            report.created,
            report.skipped,
            report.failed
        );
        report
    }

    fn migrate_one(store: &dyn EntityStore, record: &R) -> (SeedStatus, String) {
        match store.exists(R::KIND, record.slug()) {
            Ok(true) => return (SeedStatus::Skipped, SKIPPED_MESSAGE.to_string()),
            Ok(false) => {}
            Err(e) => return (SeedStatus::Error, e.to_string()),
        }

        let mut record = record.clone();
        record.sanitize();
        if let Err(e) = validate_entity(&record) {
            return (SeedStatus::Error, e.to_string());
        }
        let entity = match NewEntity::from_record(&record) {
            Ok(entity) => entity,
            Err(e) => return (SeedStatus::Error, e.to_string()),
        };

        match store.create(&entity) {
            Ok(_) => (SeedStatus::Created, CREATED_MESSAGE.to_string()),
            // Inserted concurrently between the existence check and create.
            Err(StoreError::DuplicateSlug { .. }) => {
                (SeedStatus::Skipped, SKIPPED_MESSAGE.to_string())
            }
            Err(e) => (SeedStatus::Error, e.to_string()),
        }
    }
}

/// Seed runner over the canonical class pages.
pub fn class_seed() -> SeedRunner<crate::content_store::MusicClass> {
    SeedRunner::new(canonical_classes())
}
