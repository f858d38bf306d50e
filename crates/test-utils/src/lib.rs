//! MuseCMS test utilities.
//!
//! Fixture builders producing the JSON request bodies the content API
//! accepts, and assertion helpers for the response envelope.

use muse_sdk::prelude::{ContentField, FieldType, JsonObject};
use serde_json::{Value as JsonValue, json};
use uuid::Uuid;

/// Return `prefix` with a unique suffix, so parallel tests never collide.
pub fn unique_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::now_v7().simple())
}

/// Create a test content type with a single required `title` text field.
pub fn test_content_type(id: &str) -> TestContentType {
    TestContentType {
        id: id.to_string(),
        title: id.to_string(),
        fields: vec![ContentField::new("title", FieldType::Text).required()],
    }
}

/// A content type builder for creating test fixtures.
#[derive(Debug, Clone)]
pub struct TestContentType {
    pub id: String,
    pub title: String,
    pub fields: Vec<ContentField>,
}

impl TestContentType {
    /// Set the display title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Add an optional field.
    pub fn with_field(mut self, name: &str, field_type: FieldType) -> Self {
        self.fields.push(ContentField::new(name, field_type));
        self
    }

    /// Add a required field.
    pub fn with_required_field(mut self, name: &str, field_type: FieldType) -> Self {
        self.fields
            .push(ContentField::new(name, field_type).required());
        self
    }

    /// Request body for `POST /api/content-types`.
    pub fn to_json(&self) -> JsonValue {
        json!({
            "id": self.id,
            "title": self.title,
            "fields": self.fields,
        })
    }
}

/// Create a test entry for `content_type_id` with a `title` value.
pub fn test_entry(content_type_id: &str, title: &str) -> TestEntry {
    let mut data = JsonObject::new();
    data.insert("title".to_string(), json!(title));
    TestEntry {
        content_type_id: content_type_id.to_string(),
        slug: None,
        data,
    }
}

/// An entry builder for creating test fixtures.
#[derive(Debug, Clone)]
pub struct TestEntry {
    pub content_type_id: String,
    pub slug: Option<String>,
    pub data: JsonObject,
}

impl TestEntry {
    /// Set an explicit slug.
    pub fn with_slug(mut self, slug: &str) -> Self {
        self.slug = Some(slug.to_string());
        self
    }

    /// Set a single data value.
    pub fn with_data(mut self, name: &str, value: JsonValue) -> Self {
        self.data.insert(name.to_string(), value);
        self
    }

    /// Remove a data value.
    pub fn without(mut self, name: &str) -> Self {
        self.data.remove(name);
        self
    }

    /// Request body for `POST /api/entries`.
    pub fn to_json(&self) -> JsonValue {
        let mut body = json!({
            "contentTypeId": self.content_type_id,
            "data": self.data,
        });
        if let (Some(slug), Some(obj)) = (&self.slug, body.as_object_mut()) {
            obj.insert("slug".to_string(), json!(slug));
        }
        body
    }
}

/// Request body for `POST /api/media`.
pub fn test_media(filename: &str) -> JsonValue {
    json!({
        "url": format!("https://cdn.example.test/{filename}"),
        "filename": filename,
        "mime": "image/png",
        "size": 2048,
    })
}

/// Assertion helpers for the `{success, data?, error?}` envelope.
pub mod assert {
    use serde_json::Value;

    /// Assert a success envelope and return its `data`.
    pub fn success(body: &Value) -> &Value {
        assert_eq!(
            body.get("success"),
            Some(&Value::Bool(true)),
            "Expected success envelope, got: {body}"
        );
        assert!(
            body.get("error").is_none(),
            "Success envelope carries an error: {body}"
        );
        body.get("data").unwrap_or(&Value::Null)
    }

    /// Assert a failure envelope and return its `error` message.
    pub fn failure(body: &Value) -> &str {
        assert_eq!(
            body.get("success"),
            Some(&Value::Bool(false)),
            "Expected failure envelope, got: {body}"
        );
        assert!(
            body.get("data").is_none(),
            "Failure envelope carries data: {body}"
        );
        body.get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_body_shape() {
        let body = test_content_type("post")
            .with_field("views", FieldType::Number)
            .to_json();
        assert_eq!(body["id"], "post");
        assert_eq!(body["fields"][0]["type"], "text");
        assert_eq!(body["fields"][1]["name"], "views");
    }

    #[test]
    fn test_entry_body_shape() {
        let body = test_entry("post", "Hello").with_slug("hello").to_json();
        assert_eq!(body["contentTypeId"], "post");
        assert_eq!(body["data"]["title"], "Hello");
        assert_eq!(body["slug"], "hello");
    }

    #[test]
    fn test_unique_ids_differ() {
        assert_ne!(unique_id("t"), unique_id("t"));
    }
}
