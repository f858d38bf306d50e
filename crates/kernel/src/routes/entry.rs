//! Content entry API.
//!
//! `PUT /api/entries/{id}` is version-checked: the body must carry the
//! version the client last read, and a stale one yields 409 with nothing
//! written.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use muse_sdk::types::{ContentEntry, EntryStatus, JsonObject, Page};
use serde::{Deserialize, Serialize};

use crate::content::{EntryFilter, EntryUpdate, NewEntry};
use crate::error::AppError;
use crate::metrics::EntryOp;
use crate::state::AppState;
use crate::store::StoreError;

use super::helpers::{ApiResult, Deleted, non_empty, ok};

/// Query parameters for listing entries.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntriesQuery {
    pub cursor: Option<String>,
    pub limit: Option<usize>,
    pub content_type_id: Option<String>,
    pub status: Option<EntryStatus>,
}

/// Request for creating an entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub content_type_id: Option<String>,
    pub slug: Option<String>,
    pub data: Option<JsonObject>,
}

/// Request for deleting several entries.
#[derive(Debug, Deserialize)]
pub struct DeleteManyRequest {
    pub ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteManyResponse {
    pub deleted_count: usize,
}

/// Create the entry router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/entries", get(list_entries).post(create_entry))
        .route("/api/entries/deleteMany", post(delete_many_entries))
        .route(
            "/api/entries/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .route("/api/entries/{id}/publish", post(publish_entry))
        .route("/api/entries/{id}/unpublish", post(unpublish_entry))
}

/// GET /api/entries?cursor&limit&contentTypeId&status
///
/// Filters apply before pagination, so every page but the last is full.
async fn list_entries(
    State(state): State<AppState>,
    query: Result<Query<ListEntriesQuery>, QueryRejection>,
) -> ApiResult<Page<ContentEntry>> {
    let Query(query) = query?;
    let filter = EntryFilter {
        content_type_id: non_empty(query.content_type_id),
        status: query.status,
    };
    let limit = state.config().clamp_limit(query.limit);
    ok(state
        .entries()
        .list(&filter, query.cursor.as_deref(), limit)?)
}

/// GET /api/entries/{id}
async fn get_entry(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<ContentEntry> {
    let entry = state.entries().get(&id).ok_or_else(AppError::not_found)?;
    ok(entry)
}

/// POST /api/entries
async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> ApiResult<ContentEntry> {
    let Json(body) = payload?;
    let (Some(content_type_id), Some(data)) = (non_empty(body.content_type_id), body.data) else {
        return Err(AppError::BadRequest(
            "contentTypeId and data are required".to_string(),
        ));
    };

    let entry = state.entries().create(NewEntry {
        content_type_id,
        slug: body.slug,
        data,
    })?;
    state.metrics().record_entry_op(EntryOp::Create);
    ok(entry)
}

/// PUT /api/entries/{id}
async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EntryUpdate>, JsonRejection>,
) -> ApiResult<ContentEntry> {
    let Json(update) = payload?;
    match state.entries().update(&id, update) {
        Ok(entry) => {
            state.metrics().record_entry_op(EntryOp::Update);
            ok(entry)
        }
        Err(e @ StoreError::VersionMismatch { .. }) => {
            state.metrics().record_entry_conflict();
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /api/entries/{id}/publish
async fn publish_entry(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<ContentEntry> {
    let entry = state.entries().publish(&id)?;
    state.metrics().record_entry_op(EntryOp::Publish);
    ok(entry)
}

/// POST /api/entries/{id}/unpublish
async fn unpublish_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ContentEntry> {
    let entry = state.entries().unpublish(&id)?;
    state.metrics().record_entry_op(EntryOp::Unpublish);
    ok(entry)
}

/// DELETE /api/entries/{id}
async fn delete_entry(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    let deleted = state.entries().delete(&id);
    if deleted {
        state.metrics().record_entry_op(EntryOp::Delete);
    }
    ok(Deleted { deleted })
}

/// POST /api/entries/deleteMany
async fn delete_many_entries(
    State(state): State<AppState>,
    payload: Result<Json<DeleteManyRequest>, JsonRejection>,
) -> ApiResult<DeleteManyResponse> {
    let Json(body) = payload?;
    let ids = body
        .ids
        .ok_or_else(|| AppError::BadRequest("ids array is required".to_string()))?;
    ok(DeleteManyResponse {
        deleted_count: state.entries().delete_many(&ids),
    })
}
