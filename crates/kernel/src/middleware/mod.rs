//! HTTP middleware components.
//!
//! Provides lazy seeding, request metrics, and the bearer-token stub for
//! the protected API prefix.

pub mod bearer_auth;
pub mod metrics;
pub mod seed;

pub use bearer_auth::{BearerAuth, require_bearer_token};
pub use metrics::track_metrics;
pub use seed::ensure_seeded;
