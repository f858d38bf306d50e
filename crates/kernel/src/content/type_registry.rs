//! Content type registry.
//!
//! Stores content type definitions. Changing a type's fields never
//! rewrites or revalidates existing entries.

use muse_sdk::types::{ContentField, ContentType, Page};
use serde::Deserialize;
use tracing::info;

use super::seed;
use crate::store::{Entity, IndexedStore, StoreResult};

impl Entity for ContentType {
    const ENTITY_NAME: &'static str = "content type";
    const INDEX_NAME: &'static str = "content-types";

    fn id(&self) -> &str {
        &self.id
    }

    fn seed_data() -> Vec<Self> {
        seed::content_types()
    }
}

/// Input for creating a content type.
#[derive(Debug, Clone)]
pub struct NewContentType {
    pub id: String,
    pub title: String,
    pub fields: Vec<ContentField>,
}

/// Partial update for a content type. `id` and `slug` are not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentTypePatch {
    pub title: Option<String>,
    pub fields: Option<Vec<ContentField>>,
}

/// Registry of content types.
#[derive(Debug, Default)]
pub struct ContentTypeRegistry {
    store: IndexedStore<ContentType>,
}

impl ContentTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &IndexedStore<ContentType> {
        &self.store
    }

    pub fn get(&self, id: &str) -> Option<ContentType> {
        self.store.get(id)
    }

    pub fn list(&self, cursor: Option<&str>, limit: Option<usize>) -> StoreResult<Page<ContentType>> {
        self.store.list(cursor, limit)
    }

    /// Register a new content type. The slug is always the id.
    pub fn create(&self, input: NewContentType) -> StoreResult<ContentType> {
        let content_type = ContentType {
            slug: input.id.clone(),
            id: input.id,
            title: input.title,
            fields: input.fields,
        };
        let created = self.store.create(content_type)?;
        info!(type_id = %created.id, fields = created.fields.len(), "content type created");
        Ok(created)
    }

    /// Merge `patch` into an existing content type.
    pub fn update(&self, id: &str, patch: ContentTypePatch) -> StoreResult<ContentType> {
        let updated = self.store.mutate(id, |current| ContentType {
            title: patch.title.unwrap_or_else(|| current.title.clone()),
            fields: patch.fields.unwrap_or_else(|| current.fields.clone()),
            ..current.clone()
        })?;
        info!(type_id = %id, "content type updated");
        Ok(updated)
    }

    /// Delete a content type. Entries of this type are left in place.
    pub fn delete(&self, id: &str) -> bool {
        let deleted = self.store.delete(id);
        if deleted {
            info!(type_id = %id, "content type deleted");
        }
        deleted
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use muse_sdk::types::FieldType;

    use super::*;
    use crate::store::StoreError;

    fn post_type() -> NewContentType {
        NewContentType {
            id: "post".into(),
            title: "Post".into(),
            fields: vec![ContentField::new("t", FieldType::Text).label("T")],
        }
    }

    #[test]
    fn test_create_sets_slug_to_id() {
        let registry = ContentTypeRegistry::new();
        let created = registry.create(post_type()).unwrap();
        assert_eq!(created.slug, "post");
        assert_eq!(registry.get("post").unwrap(), created);
    }

    #[test]
    fn test_duplicate_create_is_rejected() {
        let registry = ContentTypeRegistry::new();
        registry.create(post_type()).unwrap();
        let err = registry.create(post_type()).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
    }

    #[test]
    fn test_update_merges_and_keeps_identity() {
        let registry = ContentTypeRegistry::new();
        registry.create(post_type()).unwrap();

        let updated = registry
            .update(
                "post",
                ContentTypePatch {
                    title: Some("Article".into()),
                    fields: None,
                },
            )
            .unwrap();

        assert_eq!(updated.id, "post");
        assert_eq!(updated.slug, "post");
        assert_eq!(updated.title, "Article");
        assert_eq!(updated.fields.len(), 1);
    }

    #[test]
    fn test_update_missing_type_is_not_found() {
        let registry = ContentTypeRegistry::new();
        let err = registry
            .update("ghost", ContentTypePatch::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_seed_contains_blog_post() {
        let registry = ContentTypeRegistry::new();
        registry.store().ensure_seed();
        let blog = registry.get("blog-post").unwrap();
        assert!(blog.field("body").unwrap().required);
    }
}
