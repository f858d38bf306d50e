//! Content type API.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use muse_sdk::types::{ContentField, ContentType, Page};
use serde::Deserialize;

use crate::content::{ContentTypePatch, NewContentType};
use crate::error::AppError;
use crate::state::AppState;

use super::helpers::{ApiResult, Deleted, PageQuery, non_empty, ok};

/// Request for creating a content type.
#[derive(Debug, Deserialize)]
pub struct CreateContentTypeRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub fields: Option<Vec<ContentField>>,
}

/// Create the content type router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/content-types", get(list_content_types).post(create_content_type))
        .route(
            "/api/content-types/{id}",
            get(get_content_type)
                .put(update_content_type)
                .delete(delete_content_type),
        )
}

/// GET /api/content-types
async fn list_content_types(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Page<ContentType>> {
    let Query(query) = query?;
    let limit = state.config().clamp_limit(query.limit);
    ok(state.content_types().list(query.cursor.as_deref(), limit)?)
}

/// GET /api/content-types/{id}
async fn get_content_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ContentType> {
    let content_type = state
        .content_types()
        .get(&id)
        .ok_or_else(AppError::not_found)?;
    ok(content_type)
}

/// POST /api/content-types
async fn create_content_type(
    State(state): State<AppState>,
    payload: Result<Json<CreateContentTypeRequest>, JsonRejection>,
) -> ApiResult<ContentType> {
    let Json(body) = payload?;
    let (Some(id), Some(title), Some(fields)) = (non_empty(body.id), non_empty(body.title), body.fields)
    else {
        return Err(AppError::BadRequest(
            "id, title, and fields are required".to_string(),
        ));
    };

    ok(state
        .content_types()
        .create(NewContentType { id, title, fields })?)
}

/// PUT /api/content-types/{id}
///
/// `id` and `slug` in the body are ignored.
async fn update_content_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ContentTypePatch>, JsonRejection>,
) -> ApiResult<ContentType> {
    let Json(patch) = payload?;
    ok(state.content_types().update(&id, patch)?)
}

/// DELETE /api/content-types/{id}
async fn delete_content_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Deleted> {
    ok(Deleted {
        deleted: state.content_types().delete(&id),
    })
}
