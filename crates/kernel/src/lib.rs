//! MuseCMS Kernel Library
//!
//! Exposes the store, content services and HTTP routes for integration
//! testing. The server entry point is the `musecms` binary.

pub mod config;
pub mod content;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod snapshot;
pub mod state;
pub mod store;

pub use config::Config;
pub use state::AppState;
