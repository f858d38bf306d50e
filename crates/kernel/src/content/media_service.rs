//! Media registry.
//!
//! Flat collection of uploaded-asset metadata. Deleting a media record does
//! not touch entries that reference it.

use muse_sdk::types::{Media, Page};
use tracing::info;
use uuid::Uuid;

use super::{now_millis, seed};
use crate::store::{Entity, IndexedStore, StoreResult};

/// MIME type assumed when a client omits one.
const DEFAULT_MIME: &str = "image/jpeg";

impl Entity for Media {
    const ENTITY_NAME: &'static str = "media";
    const INDEX_NAME: &'static str = "media-items";

    fn id(&self) -> &str {
        &self.id
    }

    fn seed_data() -> Vec<Self> {
        seed::media()
    }
}

/// Input for registering a media item.
#[derive(Debug, Clone)]
pub struct NewMedia {
    pub url: String,
    pub filename: String,
    pub mime: Option<String>,
    pub size: Option<u64>,
}

#[derive(Debug, Default)]
pub struct MediaService {
    store: IndexedStore<Media>,
}

impl MediaService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &IndexedStore<Media> {
        &self.store
    }

    pub fn get(&self, id: &str) -> Option<Media> {
        self.store.get(id)
    }

    pub fn list(&self, cursor: Option<&str>, limit: Option<usize>) -> StoreResult<Page<Media>> {
        self.store.list(cursor, limit)
    }

    pub fn create(&self, input: NewMedia) -> StoreResult<Media> {
        let media = Media {
            id: Uuid::now_v7().to_string(),
            url: input.url,
            filename: input.filename,
            mime: input
                .mime
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_MIME.to_string()),
            size: input.size.unwrap_or(0),
            created_at: now_millis(),
        };
        let created = self.store.create(media)?;
        info!(media_id = %created.id, filename = %created.filename, size = created.size, "media registered");
        Ok(created)
    }

    pub fn delete(&self, id: &str) -> bool {
        let deleted = self.store.delete(id);
        if deleted {
            info!(media_id = %id, "media deleted");
        }
        deleted
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_applies_defaults() {
        let service = MediaService::new();
        let media = service
            .create(NewMedia {
                url: "https://cdn.example/a.png".into(),
                filename: "a.png".into(),
                mime: None,
                size: None,
            })
            .unwrap();

        assert_eq!(media.mime, DEFAULT_MIME);
        assert_eq!(media.size, 0);
        assert_eq!(service.get(&media.id).unwrap(), media);
    }

    #[test]
    fn test_delete_reports_existence() {
        let service = MediaService::new();
        service.store().ensure_seed();
        assert!(service.delete("media-1"));
        assert!(!service.delete("media-1"));
        assert_eq!(service.store().len(), 2);
    }
}
