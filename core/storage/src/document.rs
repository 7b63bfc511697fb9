//! Host-owned values handed to the adapter hooks.

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use cfimages_common::{DocumentId, Result};

/// A host document as seen by the adapter.
///
/// Only the id and the remote asset id are interpreted; every other
/// attribute is carried in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Host primary key.
    pub id: DocumentId,
    /// Provider asset id, set after a successful upload.
    #[serde(
        rename = "cloudflareId",
        default,
        deserialize_with = "deserialize_remote_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub cloudflare_id: Option<String>,
    /// Remaining host attributes.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Keeps only non-empty string ids; anything else the host stored is treated as absent.
fn deserialize_remote_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(id)) if !id.is_empty() => Some(id),
        _ => None,
    })
}

impl Document {
    /// Create a document with no remote asset.
    pub fn new(id: impl Into<DocumentId>) -> Self {
        Self {
            id: id.into(),
            cloudflare_id: None,
            extra: Map::new(),
        }
    }

    /// Set the remote asset id.
    pub fn with_cloudflare_id(mut self, image_id: impl Into<String>) -> Self {
        self.cloudflare_id = Some(image_id.into());
        self
    }

    /// Remote asset id, if the document carries a usable one.
    pub fn remote_id(&self) -> Option<&str> {
        self.cloudflare_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Parse host document data.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Convert back into host document data.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// File handed over by the host on upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File contents.
    pub buffer: Bytes,
    /// Original filename.
    pub filename: String,
    /// MIME type reported by the host, if known.
    pub mime_type: Option<String>,
}

impl UploadedFile {
    /// Create a file descriptor without a MIME type.
    pub fn new(buffer: impl Into<Bytes>, filename: impl Into<String>) -> Self {
        Self {
            buffer: buffer.into(),
            filename: filename.into(),
            mime_type: None,
        }
    }

    /// Attach the MIME type sent with the multipart part.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_from_host_data() {
        let doc = Document::from_value(json!({
            "id": 12,
            "cloudflareId": "img-1",
            "alt": "A cat",
            "width": 640
        }))
        .unwrap();

        assert_eq!(doc.id, DocumentId::from(12));
        assert_eq!(doc.remote_id(), Some("img-1"));
        assert_eq!(doc.extra.get("alt"), Some(&json!("A cat")));
        assert_eq!(doc.extra.get("width"), Some(&json!(640)));
    }

    #[test]
    fn test_non_string_remote_id_is_absent() {
        for raw in [json!(null), json!(5), json!(""), json!({"id": "x"}), json!(true)] {
            let doc = Document::from_value(json!({ "id": "doc", "cloudflareId": raw })).unwrap();
            assert_eq!(doc.cloudflare_id, None);
        }
    }

    #[test]
    fn test_missing_remote_id_is_absent() {
        let doc = Document::from_value(json!({ "id": "doc" })).unwrap();
        assert_eq!(doc.remote_id(), None);
    }

    #[test]
    fn test_extra_attributes_round_trip() {
        let data = json!({ "id": "doc", "cloudflareId": "img", "alt": "x", "tags": ["a", "b"] });
        let doc = Document::from_value(data.clone()).unwrap();
        assert_eq!(doc.to_value().unwrap(), data);
    }

    #[test]
    fn test_absent_remote_id_is_not_serialized() {
        let value = Document::new("doc").to_value().unwrap();
        assert_eq!(value, json!({ "id": "doc" }));
    }

    #[test]
    fn test_empty_remote_id_set_directly_is_ignored() {
        let doc = Document::new(1).with_cloudflare_id("");
        assert_eq!(doc.remote_id(), None);
    }

    #[test]
    fn test_missing_id_is_rejected() {
        assert!(Document::from_value(json!({ "cloudflareId": "img" })).is_err());
    }

    #[test]
    fn test_uploaded_file() {
        let file = UploadedFile::new(b"abc".to_vec(), "a.png").with_mime_type("image/png");
        assert_eq!(file.size(), 3);
        assert_eq!(file.filename, "a.png");
        assert_eq!(file.mime_type.as_deref(), Some("image/png"));
    }
}
