//! MuseCMS SDK
//!
//! Wire types shared between the MuseCMS kernel and its API clients.
//! Every type here serializes to the exact JSON shape the REST API
//! accepts and returns (camelCase field names, epoch-millisecond
//! timestamps).

pub mod types;

pub mod prelude {
    pub use crate::types::*;
}
