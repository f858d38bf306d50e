//! Content management module.
//!
//! This module provides:
//! - ContentTypeRegistry: CRUD over content type definitions
//! - EntryService: versioned entries with the draft/published workflow
//! - MediaService: uploaded-asset metadata
//! - SettingsService: site-wide settings
//! - Entry data validation against content type fields

mod entry_service;
mod media_service;
mod seed;
mod settings;
mod type_registry;
pub mod validation;

pub use entry_service::{EntryFilter, EntryService, EntryUpdate, NewEntry};
pub use media_service::{MediaService, NewMedia};
pub use settings::{SettingsPatch, SettingsService};
pub use type_registry::{ContentTypePatch, ContentTypeRegistry, NewContentType};

/// Current time in epoch milliseconds.
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
