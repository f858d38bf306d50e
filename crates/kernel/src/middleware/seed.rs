//! Lazy fixture seeding for the API.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::state::AppState;

/// Make sure every collection has been seeded before an API call runs.
///
/// After the first request this is a read-lock check per collection.
/// Disabled when `SEED_DATA=false`.
pub async fn ensure_seeded(State(state): State<AppState>, request: Request<Body>, next: Next) -> Response {
    if state.config().seed_data {
        let inserted = state.ensure_seed();
        if inserted > 0 {
            tracing::info!(records = inserted, "fixture data installed");
        }
    }
    next.run(request).await
}
