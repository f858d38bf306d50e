//! Media API.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use muse_sdk::types::{Media, Page};
use serde::Deserialize;

use crate::content::NewMedia;
use crate::error::AppError;
use crate::state::AppState;

use super::helpers::{ApiResult, Deleted, PageQuery, non_empty, ok};

/// Request for registering a media item.
#[derive(Debug, Deserialize)]
pub struct CreateMediaRequest {
    pub url: Option<String>,
    pub filename: Option<String>,
    pub mime: Option<String>,
    pub size: Option<u64>,
}

/// Create the media router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/media", get(list_media).post(create_media))
        .route("/api/media/{id}", get(get_media).delete(delete_media))
}

/// GET /api/media
async fn list_media(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Page<Media>> {
    let Query(query) = query?;
    let limit = state.config().clamp_limit(query.limit);
    ok(state.media().list(query.cursor.as_deref(), limit)?)
}

/// GET /api/media/{id}
async fn get_media(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Media> {
    let media = state.media().get(&id).ok_or_else(AppError::not_found)?;
    ok(media)
}

/// POST /api/media
async fn create_media(
    State(state): State<AppState>,
    payload: Result<Json<CreateMediaRequest>, JsonRejection>,
) -> ApiResult<Media> {
    let Json(body) = payload?;
    let (Some(url), Some(filename)) = (non_empty(body.url), non_empty(body.filename)) else {
        return Err(AppError::BadRequest(
            "url and filename are required".to_string(),
        ));
    };

    ok(state.media().create(NewMedia {
        url,
        filename,
        mime: body.mime,
        size: body.size,
    })?)
}

/// DELETE /api/media/{id}
///
/// Entries referencing the media keep the now-dangling id.
async fn delete_media(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    ok(Deleted {
        deleted: state.media().delete(&id),
    })
}
