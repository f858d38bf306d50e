//! Fixture data installed into empty collections on first use.

use muse_sdk::types::{ContentEntry, ContentField, ContentType, EntryStatus, FieldType, Media};
use serde_json::json;

use super::now_millis;

const DAY_MS: i64 = 86_400_000;

pub(crate) fn content_types() -> Vec<ContentType> {
    vec![ContentType {
        id: "blog-post".into(),
        slug: "blog-post".into(),
        title: "Blog Post".into(),
        fields: vec![
            ContentField::new("title", FieldType::Text).label("Title").required(),
            ContentField::new("slug", FieldType::Slug).label("Slug").required(),
            ContentField::new("body", FieldType::Markdown).label("Body").required(),
            ContentField::new("excerpt", FieldType::Text).label("Excerpt"),
            ContentField::new("coverImage", FieldType::Reference).label("Cover Image"),
            ContentField::new("publishedAt", FieldType::Date).label("Publish Date"),
        ],
    }]
}

pub(crate) fn entries() -> Vec<ContentEntry> {
    let now = now_millis();
    let object = |v: serde_json::Value| v.as_object().cloned().unwrap_or_default();

    vec![
        ContentEntry {
            id: "welcome-to-musecms".into(),
            content_type_id: "blog-post".into(),
            status: EntryStatus::Published,
            slug: "welcome-to-musecms".into(),
            published_at: Some(now - DAY_MS),
            created_at: now - 2 * DAY_MS,
            updated_at: now - DAY_MS,
            version: 1,
            data: object(json!({
                "title": "Welcome to MuseCMS",
                "slug": "welcome-to-musecms",
                "body": "## Hello World!\n\nThis is your first post in your new **beautifully simple** headless CMS. You can edit this entry, create new ones, or define new content types.",
                "excerpt": "Learn how to get started with MuseCMS.",
                "coverImage": "media-1",
            })),
        },
        ContentEntry {
            id: "getting-started".into(),
            content_type_id: "blog-post".into(),
            status: EntryStatus::Draft,
            slug: "getting-started".into(),
            published_at: None,
            created_at: now,
            updated_at: now,
            version: 1,
            data: object(json!({
                "title": "Getting Started Guide",
                "slug": "getting-started",
                "body": "### 1. Define Content Types\n\nGo to the \"Content Types\" section to model your data.\n\n### 2. Create Entries\n\nStart creating content from the \"Content Library\".\n\n### 3. Publish!\n\nUse the API to fetch your published content.",
                "excerpt": "A quick guide to get you up and running.",
            })),
        },
    ]
}

pub(crate) fn media() -> Vec<Media> {
    let now = now_millis();
    let image = |id: &str, url: &str, filename: &str, size: u64| Media {
        id: id.into(),
        url: url.into(),
        filename: filename.into(),
        mime: "image/jpeg".into(),
        size,
        created_at: now,
    };

    vec![
        image(
            "media-1",
            "https://images.unsplash.com/photo-1620641788421-7a1c342ea42e?q=80&w=2874&auto=format&fit=crop",
            "abstract-gradient.jpg",
            1_200_000,
        ),
        image(
            "media-2",
            "https://images.unsplash.com/photo-1557682250-33bd709cbe85?q=80&w=2929&auto=format&fit=crop",
            "purple-blue-blur.jpg",
            980_000,
        ),
        image(
            "media-3",
            "https://images.unsplash.com/photo-1579546929518-9e396f3cc809?q=80&w=2940&auto=format&fit=crop",
            "colorful-blur.jpg",
            1_500_000,
        ),
    ]
}
