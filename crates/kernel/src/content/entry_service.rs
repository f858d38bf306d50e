//! Content entry service.
//!
//! Entries carry a `version` used as an optimistic-concurrency fence.
//! Every successful mutation (update, publish, unpublish) bumps it by
//! exactly one; an update naming any other version than the stored one is
//! rejected without touching the entry.

use std::sync::Arc;

use muse_sdk::types::{ContentEntry, EntryStatus, JsonObject, Page};
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::type_registry::ContentTypeRegistry;
use super::{now_millis, seed, validation};
use crate::store::{Entity, IndexedStore, StoreError, StoreResult};

impl Entity for ContentEntry {
    const ENTITY_NAME: &'static str = "entry";
    const INDEX_NAME: &'static str = "entries";

    fn id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> Option<u64> {
        Some(self.version)
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    fn seed_data() -> Vec<Self> {
        seed::entries()
    }
}

/// Input for creating an entry.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub content_type_id: String,
    /// Defaults to the generated id.
    pub slug: Option<String>,
    pub data: JsonObject,
}

/// Versioned update submitted by a client.
///
/// `version` must be the version the client last observed. Absent fields
/// keep their stored values.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryUpdate {
    pub version: u64,
    pub data: Option<JsonObject>,
    pub status: Option<EntryStatus>,
    pub slug: Option<String>,
}

/// Listing filter; `None` matches everything.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub content_type_id: Option<String>,
    pub status: Option<EntryStatus>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &ContentEntry) -> bool {
        self.content_type_id
            .as_deref()
            .is_none_or(|t| entry.content_type_id == t)
            && self.status.is_none_or(|s| entry.status == s)
    }
}

/// Move `entry` to `status`.
///
/// `published_at` is stamped only on an actual draft→published transition
/// and only if it was never set; unpublishing leaves it alone.
fn transition(entry: &mut ContentEntry, status: EntryStatus, now: i64) {
    if !entry.status.is_published() && status.is_published() && entry.published_at.is_none() {
        entry.published_at = Some(now);
    }
    entry.status = status;
}

/// Apply a versioned update to `current`, or refuse a stale one.
///
/// The returned entry still carries the old version; the store bumps it.
fn apply_update(current: &ContentEntry, update: EntryUpdate, now: i64) -> StoreResult<ContentEntry> {
    if update.version != current.version {
        return Err(StoreError::VersionMismatch {
            expected: current.version,
            actual: update.version,
        });
    }

    let mut next = current.clone();
    if let Some(data) = update.data {
        next.data = data;
    }
    if let Some(slug) = update.slug {
        next.slug = slug;
    }
    if let Some(status) = update.status {
        transition(&mut next, status, now);
    }
    next.updated_at = now;
    Ok(next)
}

/// Service for entry CRUD and the publish workflow.
#[derive(Debug)]
pub struct EntryService {
    store: IndexedStore<ContentEntry>,
    types: Arc<ContentTypeRegistry>,
    strict_validation: bool,
}

impl EntryService {
    /// Create an entry service.
    ///
    /// With `strict_validation`, entry data is checked against the owning
    /// content type on create and update.
    pub fn new(types: Arc<ContentTypeRegistry>, strict_validation: bool) -> Self {
        Self {
            store: IndexedStore::new(),
            types,
            strict_validation,
        }
    }

    pub fn store(&self) -> &IndexedStore<ContentEntry> {
        &self.store
    }

    pub fn get(&self, id: &str) -> Option<ContentEntry> {
        self.store.get(id)
    }

    pub fn list(
        &self,
        filter: &EntryFilter,
        cursor: Option<&str>,
        limit: Option<usize>,
    ) -> StoreResult<Page<ContentEntry>> {
        self.store
            .list_filtered(cursor, limit, |entry| filter.matches(entry))
    }

    fn validate(&self, content_type_id: &str, data: &JsonObject) -> StoreResult<()> {
        if !self.strict_validation {
            return Ok(());
        }
        let content_type = self.types.get(content_type_id).ok_or_else(|| {
            StoreError::Invalid(format!("unknown content type '{content_type_id}'"))
        })?;
        validation::validate_entry_data(&content_type, data).map_err(StoreError::Invalid)
    }

    /// Create a draft entry at version 1.
    pub fn create(&self, input: NewEntry) -> StoreResult<ContentEntry> {
        self.validate(&input.content_type_id, &input.data)?;

        let id = Uuid::now_v7().to_string();
        let now = now_millis();
        let entry = ContentEntry {
            slug: input.slug.filter(|s| !s.is_empty()).unwrap_or_else(|| id.clone()),
            id,
            content_type_id: input.content_type_id,
            status: EntryStatus::Draft,
            published_at: None,
            created_at: now,
            updated_at: now,
            version: 1,
            data: input.data,
        };

        let created = self.store.create(entry)?;
        info!(entry_id = %created.id, content_type = %created.content_type_id, "entry created");
        Ok(created)
    }

    /// Apply a client update if its version matches the stored one.
    ///
    /// The version compare and the write happen under the entry's lock, so
    /// two clients racing on the same version cannot both succeed.
    pub fn update(&self, id: &str, update: EntryUpdate) -> StoreResult<ContentEntry> {
        let submitted = update.version;
        let result = self.store.try_mutate(id, |current| {
            if let Some(data) = &update.data {
                self.validate(&current.content_type_id, data)?;
            }
            apply_update(current, update, now_millis())
        });

        match &result {
            Ok(entry) => info!(entry_id = %id, version = entry.version, "entry updated"),
            Err(StoreError::VersionMismatch { expected, .. }) => {
                debug!(entry_id = %id, submitted, current = expected, "stale entry update rejected");
            }
            Err(_) => {}
        }
        result
    }

    pub fn publish(&self, id: &str) -> StoreResult<ContentEntry> {
        self.set_status(id, EntryStatus::Published)
    }

    pub fn unpublish(&self, id: &str) -> StoreResult<ContentEntry> {
        self.set_status(id, EntryStatus::Draft)
    }

    fn set_status(&self, id: &str, status: EntryStatus) -> StoreResult<ContentEntry> {
        let entry = self.store.mutate(id, |current| {
            let now = now_millis();
            let mut next = current.clone();
            transition(&mut next, status, now);
            next.updated_at = now;
            next
        })?;
        info!(entry_id = %id, status = %status, version = entry.version, "entry status changed");
        Ok(entry)
    }

    pub fn delete(&self, id: &str) -> bool {
        let deleted = self.store.delete(id);
        if deleted {
            info!(entry_id = %id, "entry deleted");
        }
        deleted
    }

    /// Delete every listed entry that exists; returns how many were removed.
    pub fn delete_many(&self, ids: &[String]) -> usize {
        let count = self.store.delete_many(ids);
        info!(requested = ids.len(), deleted = count, "entries batch deleted");
        count
    }
}
