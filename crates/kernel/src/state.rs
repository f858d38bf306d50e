//! Application state shared across all handlers.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use muse_sdk::types::{ContentType, DataBundle};
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::content::{ContentTypeRegistry, EntryService, MediaService, SettingsService};
use crate::metrics::Metrics;
use crate::snapshot;
use crate::store::{Entity, IndexedStore, StoreError, StoreResult};

/// Record counts written by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub content_types: usize,
    pub entries: usize,
    pub media: usize,
}

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap. Every collection is owned
/// by exactly one service; handlers reach them only through this state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,

    /// Content type registry.
    content_types: Arc<ContentTypeRegistry>,

    /// Entry service.
    entries: Arc<EntryService>,

    /// Media registry.
    media: Arc<MediaService>,

    /// Site settings.
    settings: Arc<SettingsService>,

    /// Prometheus metrics.
    metrics: Arc<Metrics>,
}

impl AppState {
    /// Create application state, restoring the snapshot in
    /// `config.data_file` if there is one.
    pub async fn new(config: &Config) -> Result<Self> {
        let state = Self::in_memory(config);

        if let Some(path) = &config.data_file {
            if let Some(bundle) = snapshot::load(path).await? {
                state.restore(bundle);
            }
        }

        Ok(state)
    }

    /// Create empty in-memory state without touching the filesystem.
    pub fn in_memory(config: &Config) -> Self {
        let content_types = Arc::new(ContentTypeRegistry::new());
        let entries = Arc::new(EntryService::new(
            Arc::clone(&content_types),
            config.strict_entry_validation,
        ));

        Self {
            inner: Arc::new(AppStateInner {
                config: config.clone(),
                content_types,
                entries,
                media: Arc::new(MediaService::new()),
                settings: Arc::new(SettingsService::new(config.site_title.clone())),
                metrics: Arc::new(Metrics::new()),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn content_types(&self) -> &Arc<ContentTypeRegistry> {
        &self.inner.content_types
    }

    pub fn entries(&self) -> &Arc<EntryService> {
        &self.inner.entries
    }

    pub fn media(&self) -> &Arc<MediaService> {
        &self.inner.media
    }

    pub fn settings(&self) -> &Arc<SettingsService> {
        &self.inner.settings
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.inner.metrics
    }

    /// Seed every collection that has never been seeded. Returns the
    /// number of fixture records inserted.
    pub fn ensure_seed(&self) -> usize {
        self.content_types().store().ensure_seed()
            + self.entries().store().ensure_seed()
            + self.media().store().ensure_seed()
    }

    /// Dump all collections and the settings record.
    pub fn export(&self) -> DataBundle {
        DataBundle {
            content_types: self.content_types().store().snapshot(),
            entries: self.entries().store().snapshot(),
            media: self.media().store().snapshot(),
            settings: Some(self.settings().get()),
        }
    }

    /// Insert every record in `bundle`.
    ///
    /// Ids are checked up front, so a bundle colliding with existing data
    /// (or with itself) is refused before anything is written. A writer
    /// that claims one of the ids between the check and the insert makes
    /// the import fail, and whatever it had already inserted is removed
    /// again. Imported content types get `slug = id`.
    pub fn import(&self, bundle: DataBundle) -> StoreResult<ImportSummary> {
        let DataBundle {
            content_types,
            entries,
            media,
            settings,
        } = bundle;

        check_new_ids(self.content_types().store(), &content_types)?;
        check_new_ids(self.entries().store(), &entries)?;
        check_new_ids(self.media().store(), &media)?;
        if let Some(entry) = entries.iter().find(|e| e.version == 0) {
            return Err(StoreError::Invalid(format!(
                "entry '{}' has version 0; versions start at 1",
                entry.id
            )));
        }

        let content_types: Vec<ContentType> = content_types
            .into_iter()
            .map(|t| ContentType {
                slug: t.id.clone(),
                ..t
            })
            .collect();

        let summary = ImportSummary {
            content_types: content_types.len(),
            entries: entries.len(),
            media: media.len(),
        };

        let type_ids = insert_all(self.content_types().store(), content_types)?;
        let entry_ids = match insert_all(self.entries().store(), entries) {
            Ok(ids) => ids,
            Err(e) => {
                self.content_types().store().delete_many(&type_ids);
                return Err(e);
            }
        };
        if let Err(e) = insert_all(self.media().store(), media) {
            self.content_types().store().delete_many(&type_ids);
            self.entries().store().delete_many(&entry_ids);
            return Err(e);
        }

        if let Some(settings) = settings {
            self.settings().replace(settings);
        }

        info!(
            content_types = summary.content_types,
            entries = summary.entries,
            media = summary.media,
            "import completed"
        );
        Ok(summary)
    }

    /// Replace all collections (and settings, if present) with `bundle`.
    pub fn restore(&self, bundle: DataBundle) {
        let content_types = self.content_types().store().restore(bundle.content_types);
        let entries = self.entries().store().restore(bundle.entries);
        let media = self.media().store().restore(bundle.media);
        if let Some(settings) = bundle.settings {
            self.settings().replace(settings);
        }
        info!(content_types, entries, media, "state restored from snapshot");
    }

    /// Write the current state to `config.data_file`, if configured.
    pub async fn persist(&self) -> Result<()> {
        match &self.config().data_file {
            Some(path) => snapshot::save(path, &self.export()).await,
            None => Ok(()),
        }
    }
}

fn check_new_ids<E: Entity>(store: &IndexedStore<E>, records: &[E]) -> StoreResult<()> {
    let mut seen = HashSet::new();
    for record in records {
        if record.id().trim().is_empty() {
            return Err(StoreError::Invalid(format!(
                "{} with a blank id",
                E::ENTITY_NAME
            )));
        }
        if store.exists(record.id()) || !seen.insert(record.id()) {
            return Err(StoreError::DuplicateKey {
                entity: E::ENTITY_NAME,
                id: record.id().to_string(),
            });
        }
    }
    Ok(())
}

/// Create every record, or none: on the first failure the records this
/// call already inserted are deleted again.
fn insert_all<E: Entity>(store: &IndexedStore<E>, records: Vec<E>) -> StoreResult<Vec<String>> {
    let mut inserted = Vec::with_capacity(records.len());
    for record in records {
        let id = record.id().to_string();
        if let Err(e) = store.create(record) {
            store.delete_many(&inserted);
            return Err(e);
        }
        inserted.push(id);
    }
    Ok(inserted)
}
