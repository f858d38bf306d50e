//! Shared route helpers.

use axum::Json;
use muse_sdk::types::ApiResponse;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Handler result carrying the success envelope.
pub type ApiResult<T> = AppResult<Json<ApiResponse<T>>>;

/// Wrap `data` in a success envelope.
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::ok(data)))
}

/// `?cursor=&limit=` pagination parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub cursor: Option<String>,
    pub limit: Option<usize>,
}

/// Body returned by single-record deletes.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

/// Treat empty strings the same as missing values.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
