//! Request metrics middleware.

use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

/// Label used for requests that matched no route, to bound cardinality.
const UNMATCHED_ROUTE: &str = "unmatched";

/// Count and time every request, labelled by its route template.
pub async fn track_metrics(State(state): State<AppState>, request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| UNMATCHED_ROUTE.to_string(), |p| p.as_str().to_string());

    let start = Instant::now();
    let response = next.run(request).await;

    state.metrics().record_request(
        &method,
        &route,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}
