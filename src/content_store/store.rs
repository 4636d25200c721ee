//! SQLite-backed entity store implementation.

use super::models::*;
use super::object_id::generate_object_id;
use super::schema::CONTENT_VERSIONED_SCHEMAS;
use super::trait_def::{EntityStore, StoreError, StoreResult};
use crate::sqlite_persistence::migrate_if_needed;
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

const DEFAULT_READ_POOL_SIZE: usize = 4;

const SELECT_COLUMNS: &str = "id, kind, document, created_at, updated_at";

/// SQLite-backed store for content entities.
#[derive(Clone)]
pub struct SqliteEntityStore {
    read_pool: Vec<Arc<Mutex<Connection>>>,
    write_conn: Arc<Mutex<Connection>>,
    read_index: Arc<AtomicUsize>,
}

fn now_timestamp() -> (DateTime<Utc>, String) {
    let now = Utc::now();
    (now, now.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn parse_timestamp(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Parse a StoredEntity from a row selected with `SELECT_COLUMNS`.
fn parse_entity_row(row: &rusqlite::Row) -> rusqlite::Result<StoredEntity> {
    let kind_str: String = row.get(1)?;
    let kind = EntityKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            format!("unknown entity kind '{}'", kind_str).into(),
        )
    })?;
    let document_str: String = row.get(2)?;
    let document: Value = serde_json::from_str(&document_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(StoredEntity {
        id: row.get(0)?,
        kind,
        created_at: parse_timestamp(row, 3)?,
        updated_at: parse_timestamp(row, 4)?,
        document,
    })
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

impl SqliteEntityStore {
    /// Open (creating if needed) the content database at `db_path`.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        Self::with_read_pool_size(db_path, DEFAULT_READ_POOL_SIZE)
    }

    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    /// * `read_pool_size` - Number of connections for concurrent read operations
    pub fn with_read_pool_size<P: AsRef<Path>>(db_path: P, read_pool_size: usize) -> Result<Self> {
        let db_path_ref = db_path.as_ref();

        let mut write_conn = Connection::open_with_flags(
            db_path_ref,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open content database at {:?}", db_path_ref))?;

        write_conn.pragma_update(None, "journal_mode", "WAL")?;
        migrate_if_needed(&mut write_conn, CONTENT_VERSIONED_SCHEMAS)
            .context("Failed to prepare content database schema")?;

        let entity_count: i64 = write_conn.query_row("SELECT COUNT(*) FROM entities", [], |r| {
            r.get(0)
        })?;
        info!("Opened content database: {} entities", entity_count);

        let mut read_pool = Vec::with_capacity(read_pool_size.max(1));
        for _ in 0..read_pool_size.max(1) {
            let read_conn = Connection::open_with_flags(
                db_path_ref,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY
                    | rusqlite::OpenFlags::SQLITE_OPEN_URI
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            read_pool.push(Arc::new(Mutex::new(read_conn)));
        }

        Ok(SqliteEntityStore {
            write_conn: Arc::new(Mutex::new(write_conn)),
            read_pool,
            read_index: Arc::new(AtomicUsize::new(0)),
        })
    }

    fn get_read_conn(&self) -> Arc<Mutex<Connection>> {
        let index = self.read_index.fetch_add(1, Ordering::SeqCst) % self.read_pool.len();
        self.read_pool[index].clone()
    }

    fn get_inner(conn: &Connection, kind: EntityKind, id: &str) -> StoreResult<Option<StoredEntity>> {
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM entities WHERE kind = ?1 AND id = ?2",
            SELECT_COLUMNS
        ))?;
        Ok(stmt
            .query_row(params![kind.to_db_str(), id], parse_entity_row)
            .optional()?)
    }

    fn exists_inner(conn: &Connection, kind: EntityKind, slug: &str) -> StoreResult<bool> {
        let found = conn
            .query_row(
                "SELECT 1 FROM entities WHERE kind = ?1 AND slug = ?2",
                params![kind.to_db_str(), slug],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

impl EntityStore for SqliteEntityStore {
    fn exists(&self, kind: EntityKind, slug: &str) -> StoreResult<bool> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();
        Self::exists_inner(&conn, kind, slug)
    }

    fn list(&self, kind: EntityKind) -> StoreResult<Vec<StoredEntity>> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM entities WHERE kind = ?1 ORDER BY created_at DESC, rowid DESC",
            SELECT_COLUMNS
        ))?;
        let entities = stmt
            .query_map(params![kind.to_db_str()], parse_entity_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entities)
    }

    fn get(&self, kind: EntityKind, id: &str) -> StoreResult<Option<StoredEntity>> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();
        Self::get_inner(&conn, kind, id)
    }

    fn find_by_slug(&self, kind: EntityKind, slug: &str) -> StoreResult<Option<StoredEntity>> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM entities WHERE kind = ?1 AND slug = ?2",
            SELECT_COLUMNS
        ))?;
        Ok(stmt
            .query_row(params![kind.to_db_str(), slug], parse_entity_row)
            .optional()?)
    }

    fn list_slugs(&self, kind: EntityKind) -> StoreResult<Vec<String>> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();
        let mut stmt =
            conn.prepare_cached("SELECT slug FROM entities WHERE kind = ?1 ORDER BY slug")?;
        let slugs = stmt
            .query_map(params![kind.to_db_str()], |r| r.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(slugs)
    }

    fn count(&self, kind: EntityKind) -> StoreResult<usize> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM entities WHERE kind = ?1",
            params![kind.to_db_str()],
            |r| r.get(0),
        )?;
        Ok(count as usize)
    }

    fn create(&self, entity: &NewEntity) -> StoreResult<String> {
        let conn = self.write_conn.lock().unwrap();

        let duplicate = || StoreError::DuplicateSlug {
            kind: entity.kind,
            slug: entity.slug.clone(),
        };
        if Self::exists_inner(&conn, entity.kind, &entity.slug)? {
            return Err(duplicate());
        }

        let (now, now_str) = now_timestamp();
        let id = generate_object_id(now);
        let document = serde_json::to_string(&entity.document)?;

        match conn.execute(
            "INSERT INTO entities (id, kind, slug, name, document, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![
                id,
                entity.kind.to_db_str(),
                entity.slug,
                entity.name,
                document,
                now_str
            ],
        ) {
            Ok(_) => {
                debug!("Created {} '{}' with id {}", entity.kind, entity.slug, id);
                Ok(id)
            }
            Err(e) if is_constraint_violation(&e) => Err(duplicate()),
            Err(e) => Err(e.into()),
        }
    }

    fn update(&self, id: &str, entity: &NewEntity) -> StoreResult<StoredEntity> {
        let mut conn = self.write_conn.lock().unwrap();
        let tx = conn.transaction()?;

        let stored_slug: Option<String> = tx
            .query_row(
                "SELECT slug FROM entities WHERE kind = ?1 AND id = ?2",
                params![entity.kind.to_db_str(), id],
                |r| r.get(0),
            )
            .optional()?;
        let stored_slug = stored_slug.ok_or_else(|| StoreError::NotFound {
            kind: entity.kind,
            id: id.to_string(),
        })?;

        let mut document = entity.document.clone();
        if let Some(obj) = document.as_object_mut() {
            obj.insert("slug".to_string(), Value::String(stored_slug));
        }
        let (_, now_str) = now_timestamp();

        tx.execute(
            "UPDATE entities SET name = ?1, document = ?2, updated_at = ?3
             WHERE kind = ?4 AND id = ?5",
            params![
                entity.name,
                serde_json::to_string(&document)?,
                now_str,
                entity.kind.to_db_str(),
                id
            ],
        )?;
        let updated = Self::get_inner(&tx, entity.kind, id)?.ok_or_else(|| StoreError::NotFound {
            kind: entity.kind,
            id: id.to_string(),
        })?;
        tx.commit()?;

        debug!("Updated {} {}", entity.kind, id);
        Ok(updated)
    }

    fn delete(&self, kind: EntityKind, ids: &[String]) -> StoreResult<usize> {
        let mut conn = self.write_conn.lock().unwrap();
        let tx = conn.transaction()?;
        let mut deleted = 0;
        {
            let mut stmt = tx.prepare_cached("DELETE FROM entities WHERE kind = ?1 AND id = ?2")?;
            for id in ids {
                deleted += stmt.execute(params![kind.to_db_str(), id])?;
            }
        }
        tx.commit()?;

        debug!("Deleted {} of {} requested {}", deleted, ids.len(), kind);
        Ok(deleted)
    }
}
