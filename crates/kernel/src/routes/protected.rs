//! Routes under `/api/protected`, gated by the static bearer-token check.

use axum::extract::Extension;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use crate::middleware::{BearerAuth, require_bearer_token};
use crate::state::AppState;

use super::helpers::{ApiResult, ok};

#[derive(Debug, Serialize)]
pub struct WhoAmI {
    pub role: String,
}

/// Create the protected router. The bearer check applies only to the
/// routes declared here.
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/protected/whoami", get(whoami))
        .route_layer(from_fn_with_state(state.clone(), require_bearer_token))
}

/// GET /api/protected/whoami
async fn whoami(Extension(auth): Extension<BearerAuth>) -> ApiResult<WhoAmI> {
    ok(WhoAmI { role: auth.role })
}
