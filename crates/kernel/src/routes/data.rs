//! Data management: export, import, and inbound webhooks.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use muse_sdk::types::DataBundle;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::{AppState, ImportSummary};

use super::helpers::{ApiResult, ok};

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub imported: ImportSummary,
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// Create the data management router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/export", get(export_data))
        .route("/api/import", post(import_data))
        .route("/api/webhooks", post(receive_webhook))
}

/// GET /api/export
async fn export_data(State(state): State<AppState>) -> ApiResult<DataBundle> {
    ok(state.export())
}

/// POST /api/import
///
/// Any failure, including an unreadable body, is reported as 400.
async fn import_data(
    State(state): State<AppState>,
    payload: Result<Json<DataBundle>, JsonRejection>,
) -> ApiResult<ImportResponse> {
    let bundle = match payload {
        Ok(Json(bundle)) => bundle,
        Err(rejection) => {
            return Err(AppError::BadRequest(format!(
                "Import failed: {}",
                rejection.body_text()
            )));
        }
    };

    match state.import(bundle) {
        Ok(imported) => ok(ImportResponse {
            message: "Import completed.",
            imported,
        }),
        Err(e) => {
            warn!(error = %e, "import failed");
            Err(AppError::BadRequest(format!("Import failed: {e}")))
        }
    }
}

/// POST /api/webhooks
///
/// Accepts any JSON payload and logs it.
async fn receive_webhook(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> ApiResult<WebhookAck> {
    let Json(payload) = payload?;
    info!(payload = %payload, "webhook received");
    ok(WebhookAck { received: true })
}
