//! Site settings API.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::get;
use axum::{Json, Router};
use muse_sdk::types::Settings;

use crate::content::SettingsPatch;
use crate::state::AppState;

use super::helpers::{ApiResult, ok};

/// Create the settings router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/settings", get(get_settings).post(update_settings))
}

/// GET /api/settings
async fn get_settings(State(state): State<AppState>) -> ApiResult<Settings> {
    ok(state.settings().get())
}

/// POST /api/settings
async fn update_settings(
    State(state): State<AppState>,
    payload: Result<Json<SettingsPatch>, JsonRejection>,
) -> ApiResult<Settings> {
    let Json(patch) = payload?;
    ok(state.settings().update(patch))
}
