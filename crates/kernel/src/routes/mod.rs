//! HTTP route handlers.
//!
//! Every `/api` handler answers with the `{success, data?, error?}`
//! envelope. Each module exposes a `router()` that [`router`] merges.

pub mod content_type;
pub mod data;
pub mod entry;
pub mod health;
mod helpers;
pub mod media;
pub mod metrics;
pub mod protected;
pub mod settings;

use axum::Router;
use axum::middleware::from_fn_with_state;

use crate::middleware::{ensure_seeded, track_metrics};
use crate::state::AppState;

/// All `/api` routes, behind the lazy-seeding middleware.
pub fn api_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(content_type::router())
        .merge(entry::router())
        .merge(media::router())
        .merge(data::router())
        .merge(settings::router())
        .merge(protected::router(state))
        .layer(from_fn_with_state(state.clone(), ensure_seeded))
}

/// The complete application router with request metrics.
///
/// Transport layers (CORS, tracing, timeouts) are added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(api_router(&state))
        .merge(health::router())
        .merge(metrics::router())
        .layer(from_fn_with_state(state.clone(), track_metrics))
        .with_state(state)
}
