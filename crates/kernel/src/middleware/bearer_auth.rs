//! Bearer token check for `/api/protected/*`.
//!
//! Compares `Authorization: Bearer <token>` against the static tokens in
//! the configuration. This is a placeholder gate, not a credential
//! system: tokens never expire and carry only a role name.

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Identity attached to requests that passed the bearer check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerAuth {
    pub role: String,
}

/// Reject the request with 401 unless it carries a configured token.
///
/// On success a [`BearerAuth`] is inserted into the request extensions.
pub async fn require_bearer_token(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(presented) = presented else {
        debug!(path = %request.uri().path(), "missing bearer token");
        return AppError::Unauthorized.into_response();
    };

    // Check every token so the comparison time doesn't reveal which matched
    let mut role = None;
    for candidate in &state.config().api_tokens {
        if bool::from(candidate.token.as_bytes().ct_eq(presented.as_bytes())) {
            role = Some(candidate.role.clone());
        }
    }

    let Some(role) = role else {
        debug!(path = %request.uri().path(), "invalid bearer token");
        return AppError::Unauthorized.into_response();
    };

    request.extensions_mut().insert(BearerAuth { role });
    next.run(request).await
}
