//! Core types for MuseCMS.
//!
//! These types are used for communication between the kernel and clients.
//! All API bodies are JSON; the response envelope is [`ApiResponse`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open JSON object used for entry payloads and field options.
pub type JsonObject = Map<String, Value>;

/// Response envelope returned by every `/api` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed response carrying an error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Field type for content type definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Slug,
    Markdown,
    Number,
    Date,
    Reference,
}

/// Publication status of a content entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Draft,
    Published,
}

impl EntryStatus {
    pub fn is_published(self) -> bool {
        self == Self::Published
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(format!("unknown entry status '{other}'")),
        }
    }
}

/// A single field within a content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentField {
    pub id: String,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    /// Reserved for type-specific settings such as reference constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<JsonObject>,
}

impl ContentField {
    /// Create a field whose id, name and label are all `name`.
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            id: name.into(),
            name: name.into(),
            label: name.into(),
            field_type,
            required: false,
            options: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.into();
        self
    }
}

/// A content type: the ordered field list describing a kind of entry.
///
/// The `id` doubles as the slug and never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub fields: Vec<ContentField>,
}

impl ContentType {
    /// Look up a field by its `name`.
    pub fn field(&self, name: &str) -> Option<&ContentField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A versioned content entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    pub id: String,
    pub content_type_id: String,
    #[serde(default)]
    pub status: EntryStatus,
    #[serde(default)]
    pub slug: String,
    /// Set on the first draft→published transition and never cleared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    /// Optimistic-concurrency fence; starts at 1.
    pub version: u64,
    #[serde(default)]
    pub data: JsonObject,
}

/// Metadata for an uploaded asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: String,
    pub url: String,
    pub filename: String,
    pub mime: String,
    #[serde(default)]
    pub size: u64,
    pub created_at: i64,
}

/// One page of a cursor-paginated listing.
///
/// `next` is `null` on the last page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

impl<T> Page<T> {
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

/// Full dump of the CMS collections, used by export/import and snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBundle {
    #[serde(default)]
    pub content_types: Vec<ContentType>,
    #[serde(default)]
    pub entries: Vec<ContentEntry>,
    #[serde(default)]
    pub media: Vec<Media>,
    /// Site settings; bundles without it leave settings untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

/// An API key shown on the settings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub key: String,
    pub label: String,
}

/// Site-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub site_title: String,
    #[serde(default)]
    pub api_keys: Vec<ApiKey>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entry_serializes_camel_case() {
        let entry = ContentEntry {
            id: "e1".into(),
            content_type_id: "post".into(),
            status: EntryStatus::Draft,
            slug: "e1".into(),
            published_at: None,
            created_at: 10,
            updated_at: 20,
            version: 1,
            data: JsonObject::new(),
        };

        let v = serde_json::to_value(&entry).unwrap();
        assert_eq!(v["contentTypeId"], "post");
        assert_eq!(v["status"], "draft");
        assert_eq!(v["updatedAt"], 20);
        assert!(v.get("publishedAt").is_none());
    }

    #[test]
    fn field_type_uses_type_key() {
        let field = ContentField::new("title", FieldType::Markdown).required();
        let v = serde_json::to_value(&field).unwrap();
        assert_eq!(v["type"], "markdown");
        assert_eq!(v["required"], true);
        assert!(v.get("options").is_none());
    }

    #[test]
    fn field_required_defaults_to_false() {
        let field: ContentField = serde_json::from_value(json!({
            "id": "t", "name": "t", "label": "T", "type": "text"
        }))
        .unwrap();
        assert!(!field.required);
        assert_eq!(field.field_type, FieldType::Text);
    }

    #[test]
    fn unknown_field_type_is_rejected() {
        let result: Result<ContentField, _> = serde_json::from_value(json!({
            "id": "t", "name": "t", "label": "T", "type": "boolean"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn error_envelope_omits_data() {
        let resp: ApiResponse<()> = ApiResponse::error("not found");
        let v = serde_json::to_value(&resp).unwrap();
        assert_eq!(v, json!({"success": false, "error": "not found"}));
    }

    #[test]
    fn last_page_serializes_null_next() {
        let page: Page<u32> = Page {
            items: vec![1, 2],
            next: None,
        };
        let v = serde_json::to_value(&page).unwrap();
        assert!(v["next"].is_null());
        assert!(page.is_last());
    }

    #[test]
    fn entry_status_parses() {
        assert_eq!("published".parse::<EntryStatus>(), Ok(EntryStatus::Published));
        assert!("archived".parse::<EntryStatus>().is_err());
    }

    #[test]
    fn bundle_sections_default_empty() {
        let bundle: DataBundle = serde_json::from_value(json!({"media": []})).unwrap();
        assert!(bundle.content_types.is_empty());
        assert!(bundle.entries.is_empty());
        assert!(bundle.settings.is_none());
    }

    #[test]
    fn bundle_carries_settings_when_present() {
        let bundle: DataBundle =
            serde_json::from_value(json!({"settings": {"siteTitle": "Docs"}})).unwrap();
        let settings = bundle.settings.unwrap();
        assert_eq!(settings.site_title, "Docs");
        assert!(settings.api_keys.is_empty());
    }
}
