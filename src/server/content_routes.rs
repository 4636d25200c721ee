//! CRUD routes for one entity kind, mounted under `/api/{collection}`.

use super::response::{data_response, HandlerError, HandlerResult};
use super::state::{GuardedEntityStore, ServerState};
use super::uploads::UploadStore;
use crate::content_store::validation::{validate_entity, validate_identifier};
use crate::content_store::{ContentEntity, ImageSlot, NewEntity};
use crate::seed::class_seed;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

/// A file part of a multipart submission.
struct Upload {
    slot: ImageSlot,
    file_name: String,
    bytes: Vec<u8>,
}

/// The decoded multipart body: the `data` JSON plus image parts.
struct FormSubmission {
    data: Value,
    uploads: Vec<Upload>,
}

#[derive(Deserialize, Debug)]
struct DeleteBody {
    pub ids: Vec<String>,
}

async fn read_submission(mut multipart: Multipart) -> Result<FormSubmission, HandlerError> {
    let mut data = None;
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "data" {
            let text = field.text().await?;
            let value: Value = serde_json::from_str(&text)
                .map_err(|e| HandlerError::BadRequest(format!("Invalid JSON in 'data': {}", e)))?;
            if !value.is_object() {
                return Err(HandlerError::BadRequest(
                    "'data' must be a JSON object".to_string(),
                ));
            }
            data = Some(value);
        } else if let Some(slot) = ImageSlot::from_field_name(&name) {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let bytes = field.bytes().await?;
            // Empty file inputs are sent as zero-length parts.
            if !bytes.is_empty() {
                uploads.push(Upload {
                    slot,
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            debug!("Ignoring multipart field '{}'", name);
        }
    }

    let data = data.ok_or_else(|| HandlerError::BadRequest("Missing 'data' field".to_string()))?;
    Ok(FormSubmission { data, uploads })
}

/// A validated record together with the uploads stored for it.
struct BuiltRecord<R> {
    record: R,
    stored: Vec<String>,
}

/// Decodes, sanitizes and validates the record, then stores its uploads and
/// points its image fields at them. Nothing is written for a rejected record.
async fn build_record<R: ContentEntity>(
    uploads_store: &UploadStore,
    submission: FormSubmission,
) -> Result<BuiltRecord<R>, HandlerError> {
    let mut record: R = serde_json::from_value(submission.data)
        .map_err(|e| HandlerError::BadRequest(format!("Invalid {} record: {}", R::KIND, e)))?;
    record.sanitize();
    validate_entity(&record)?;

    for upload in &submission.uploads {
        if !R::IMAGE_SLOTS.contains(&upload.slot) {
            return Err(HandlerError::BadRequest(format!(
                "Field '{}' is not accepted for {}",
                upload.slot.field_name(),
                R::KIND
            )));
        }
        uploads_store.check(&upload.file_name, &upload.bytes)?;
    }

    let mut stored = Vec::with_capacity(submission.uploads.len());
    for upload in submission.uploads {
        match uploads_store
            .save(R::KIND, &upload.file_name, &upload.bytes)
            .await
        {
            Ok(path) => {
                stored.push(path.clone());
                record.apply_image(upload.slot, path);
            }
            Err(err) => {
                uploads_store.discard(&stored).await;
                return Err(err.into());
            }
        }
    }

    Ok(BuiltRecord { record, stored })
}

/// Removes the uploads of a record the store refused.
async fn discard_on_error<T>(
    uploads_store: &UploadStore,
    stored: &[String],
    result: Result<T, HandlerError>,
) -> Result<T, HandlerError> {
    if result.is_err() {
        uploads_store.discard(stored).await;
    }
    result
}

fn new_entity<R: ContentEntity>(record: &R) -> Result<NewEntity, HandlerError> {
    NewEntity::from_record(record).map_err(|e| HandlerError::Internal(e.to_string()))
}

async fn list_entities<R: ContentEntity>(State(store): State<GuardedEntityStore>) -> HandlerResult {
    data_response(StatusCode::OK, store.list(R::KIND)?)
}

async fn get_entity<R: ContentEntity>(
    State(store): State<GuardedEntityStore>,
    Path(id): Path<String>,
) -> HandlerResult {
    validate_identifier(&id)?;
    match store.get(R::KIND, &id)? {
        Some(entity) => data_response(StatusCode::OK, entity),
        None => Err(HandlerError::NotFound(format!("{} with id '{}' not found", R::KIND, id))),
    }
}

async fn get_entity_by_slug<R: ContentEntity>(
    State(store): State<GuardedEntityStore>,
    Path(slug): Path<String>,
) -> HandlerResult {
    match store.find_by_slug(R::KIND, &slug)? {
        Some(entity) => data_response(StatusCode::OK, entity),
        None => Err(HandlerError::NotFound(format!(
            "{} with slug '{}' not found",
            R::KIND,
            slug
        ))),
    }
}

async fn list_slugs<R: ContentEntity>(State(store): State<GuardedEntityStore>) -> HandlerResult {
    data_response(StatusCode::OK, store.list_slugs(R::KIND)?)
}

async fn create_entity<R: ContentEntity>(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> HandlerResult {
    let submission = read_submission(multipart).await?;

    // Check before storing uploads so a duplicate leaves no orphan files.
    if let Some(slug) = submission.data.get("slug").and_then(Value::as_str) {
        if state.entity_store.exists(R::KIND, slug)? {
            return Err(HandlerError::Conflict(format!(
                "{} with slug '{}' already exists",
                R::KIND,
                slug
            )));
        }
    }

    let BuiltRecord { record, stored } = build_record::<R>(&state.uploads, submission).await?;
    let store = &state.entity_store;
    let created = new_entity(&record).and_then(|entity| Ok(store.create(&entity)?));
    let id = discard_on_error(&state.uploads, &stored, created).await?;
    info!("Created {} '{}' ({})", R::KIND, record.slug(), id);

    match store.get(R::KIND, &id)? {
        Some(entity) => data_response(StatusCode::CREATED, entity),
        None => Err(HandlerError::Internal(format!("{} {} vanished after create", R::KIND, id))),
    }
}

async fn update_entity<R: ContentEntity>(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> HandlerResult {
    validate_identifier(&id)?;
    let store = &state.entity_store;
    let existing = store
        .get(R::KIND, &id)?
        .ok_or_else(|| HandlerError::NotFound(format!("{} with id '{}' not found", R::KIND, id)))?;

    let mut submission = read_submission(multipart).await?;
    // The slug is immutable once created.
    if let Some(data) = submission.data.as_object_mut() {
        data.insert("slug".to_string(), json!(existing.slug()));
    }

    let BuiltRecord { record, stored } = build_record::<R>(&state.uploads, submission).await?;
    let result = new_entity(&record).and_then(|entity| Ok(store.update(&id, &entity)?));
    let updated = discard_on_error(&state.uploads, &stored, result).await?;
    info!("Updated {} '{}' ({})", R::KIND, updated.slug(), id);
    data_response(StatusCode::OK, updated)
}

async fn delete_entities<R: ContentEntity>(
    State(store): State<GuardedEntityStore>,
    body: Result<Json<DeleteBody>, JsonRejection>,
) -> HandlerResult {
    let Json(body) = body.map_err(|rejection| {
        HandlerError::BadRequest(format!("Invalid delete body: {}", rejection.body_text()))
    })?;
    if body.ids.is_empty() {
        return Err(HandlerError::BadRequest("No ids to delete".to_string()));
    }
    for id in &body.ids {
        validate_identifier(id)?;
    }
    let deleted = store.delete(R::KIND, &body.ids)?;
    info!("Deleted {} of {} requested {}", deleted, body.ids.len(), R::KIND);
    Ok(Json(json!({ "success": true, "deletedCount": deleted })).into_response())
}

async fn delete_entity<R: ContentEntity>(
    State(store): State<GuardedEntityStore>,
    Path(id): Path<String>,
) -> HandlerResult {
    validate_identifier(&id)?;
    match store.delete(R::KIND, std::slice::from_ref(&id))? {
        0 => Err(HandlerError::NotFound(format!("{} with id '{}' not found", R::KIND, id))),
        deleted => Ok(Json(json!({ "success": true, "deletedCount": deleted })).into_response()),
    }
}

async fn preview_class_migration() -> HandlerResult {
    let runner = class_seed();
    Ok(Json(json!({
        "success": true,
        "total": runner.total(),
        "classes": runner.candidates(),
    }))
    .into_response())
}

async fn run_class_migration(State(store): State<GuardedEntityStore>) -> HandlerResult {
    let report = class_seed().run(store.as_ref());
    Ok(Json(report).into_response())
}

/// Routes for one entity kind, relative to `/api/{collection}`.
pub fn make_entity_routes<R: ContentEntity>(state: ServerState) -> Router {
    Router::new()
        .route(
            "/",
            get(list_entities::<R>)
                .post(create_entity::<R>)
                .delete(delete_entities::<R>),
        )
        .route("/slugs", get(list_slugs::<R>))
        .route("/slug/{slug}", get(get_entity_by_slug::<R>))
        .route(
            "/{id}",
            get(get_entity::<R>)
                .put(update_entity::<R>)
                .delete(delete_entity::<R>),
        )
        .with_state(state)
}

/// Seed migration endpoints, relative to `/api/classes`.
pub fn make_migration_routes(state: ServerState) -> Router {
    Router::new()
        .route(
            "/migrate",
            get(preview_class_migration).post(run_class_migration),
        )
        .with_state(state)
}
