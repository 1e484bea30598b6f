//! Result envelope returned by a capability invocation.
//!
//! MCP servers answer `tools/call` with a loosely-typed object: an ordered
//! `content` array of typed blocks plus whatever extra fields the server
//! chooses to add. The envelope keeps the block order and parks every
//! unrecognised top-level field in `raw` so extraction rules can fall back
//! to it.

use serde::Serialize;
use serde_json::{Map, Value};

/// Default MIME type for image blocks that omit `mimeType`.
const DEFAULT_IMAGE_MIME: &str = "image/png";

/// One typed unit of tool output.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    /// `{"type": "text", "text": ...}`
    Text { text: String },
    /// `{"type": "image", "mimeType": ..., "data": <base64>}`
    Image { mime_type: String, data: String },
    /// Anything else, kept verbatim.
    Other(Value),
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::Image {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Classify a raw content item.
    ///
    /// A block that claims a known type but lacks its payload field is
    /// classified as `Other`.
    pub fn from_value(value: Value) -> Self {
        match value.get("type").and_then(Value::as_str) {
            Some("text") => {
                if let Some(text) = value.get("text").and_then(Value::as_str) {
                    return Self::text(text);
                }
            }
            Some("image") => {
                if let Some(data) = value.get("data").and_then(Value::as_str) {
                    let mime_type = value
                        .get("mimeType")
                        .and_then(Value::as_str)
                        .unwrap_or(DEFAULT_IMAGE_MIME);
                    return Self::image(mime_type, data);
                }
            }
            _ => {}
        }
        Self::Other(value)
    }

    /// Short label used in logs and summaries.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::Other(_) => "other",
        }
    }
}

/// Raw result of one capability call, before wrapper-specific extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultEnvelope {
    /// Content blocks in server order.
    pub content: Vec<ContentBlock>,
    /// Status code, when the server reports one.
    pub status_code: Option<i64>,
    /// Set when the server flagged the result as a tool-level error.
    pub is_error: bool,
    /// Remaining top-level fields.
    pub raw: Map<String, Value>,
}

impl ResultEnvelope {
    /// Build an envelope holding only the given blocks.
    pub fn from_blocks(content: Vec<ContentBlock>) -> Self {
        Self {
            content,
            ..Self::default()
        }
    }

    /// Parse a `tools/call` result object.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut raw) = value else {
            return Self::from_blocks(vec![ContentBlock::Other(value)]);
        };

        let content = match raw.remove("content") {
            Some(Value::Array(items)) => items.into_iter().map(ContentBlock::from_value).collect(),
            Some(other) => vec![ContentBlock::Other(other)],
            None => Vec::new(),
        };

        let is_error = raw
            .remove("isError")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let status_code = ["status", "statusCode"]
            .iter()
            .find_map(|key| raw.get(*key).and_then(Value::as_i64));

        Self {
            content,
            status_code,
            is_error,
            raw,
        }
    }

    /// Text of the first text block, in order.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Image { .. } | ContentBlock::Other(_) => None,
        })
    }

    /// MIME type and base64 payload of the first image block, in order.
    pub fn first_image(&self) -> Option<(&str, &str)> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Image { mime_type, data } => Some((mime_type.as_str(), data.as_str())),
            ContentBlock::Text { .. } | ContentBlock::Other(_) => None,
        })
    }

    pub fn raw_bool(&self, key: &str) -> Option<bool> {
        self.raw.get(key).and_then(Value::as_bool)
    }

    pub fn raw_str(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str)
    }

    /// Non-negative integer field that fits in `u32`.
    pub fn raw_u32(&self, key: &str) -> Option<u32> {
        self.raw
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    }

    /// Compact description of the envelope that never includes payloads.
    pub fn summary(&self) -> EnvelopeSummary {
        EnvelopeSummary {
            blocks: self
                .content
                .iter()
                .map(|block| BlockSummary {
                    kind: block.kind(),
                    len: match block {
                        ContentBlock::Text { text } => text.chars().count(),
                        ContentBlock::Image { data, .. } => data.len(),
                        ContentBlock::Other(_) => 0,
                    },
                })
                .collect(),
            status_code: self.status_code,
            is_error: self.is_error,
            extra_fields: self.raw.keys().cloned().collect(),
        }
    }
}

/// Size-only view of an envelope, safe to hand back to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeSummary {
    pub blocks: Vec<BlockSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<i64>,
    pub is_error: bool,
    pub extra_fields: Vec<String>,
}

/// Kind and payload length of one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSummary {
    pub kind: &'static str,
    /// Characters for text, base64 bytes for images.
    pub len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_text_and_image_blocks_in_order() {
        let envelope = ResultEnvelope::from_value(json!({
            "content": [
                {"type": "text", "text": "Screenshot taken"},
                {"type": "image", "mimeType": "image/jpeg", "data": "aGVsbG8="},
                {"type": "resource", "uri": "file:///tmp/x"}
            ]
        }));

        assert_eq!(envelope.content.len(), 3);
        assert_eq!(envelope.first_text(), Some("Screenshot taken"));
        assert_eq!(envelope.first_image(), Some(("image/jpeg", "aGVsbG8=")));
        assert!(matches!(envelope.content[2], ContentBlock::Other(_)));
    }

    #[test]
    fn test_first_image_skips_leading_text() {
        let envelope = ResultEnvelope::from_blocks(vec![
            ContentBlock::text("status"),
            ContentBlock::image("image/png", "Zmlyc3Q="),
            ContentBlock::image("image/png", "c2Vjb25k"),
        ]);
        assert_eq!(envelope.first_image(), Some(("image/png", "Zmlyc3Q=")));
    }

    #[test]
    fn test_image_without_data_is_other() {
        let block = ContentBlock::from_value(json!({"type": "image", "mimeType": "image/png"}));
        assert!(matches!(block, ContentBlock::Other(_)));
    }

    #[test]
    fn test_image_without_mime_defaults_to_png() {
        let block = ContentBlock::from_value(json!({"type": "image", "data": "AA=="}));
        assert_eq!(block, ContentBlock::image("image/png", "AA=="));
    }

    #[test]
    fn test_extra_fields_kept_in_raw() {
        let envelope = ResultEnvelope::from_value(json!({
            "content": [],
            "isError": false,
            "status": 201,
            "success": true,
            "width": 1024
        }));

        assert_eq!(envelope.status_code, Some(201));
        assert!(!envelope.is_error);
        assert_eq!(envelope.raw_bool("success"), Some(true));
        assert_eq!(envelope.raw_u32("width"), Some(1024));
        assert!(!envelope.raw.contains_key("content"));
        assert!(!envelope.raw.contains_key("isError"));
    }

    #[test]
    fn test_is_error_flag() {
        let envelope = ResultEnvelope::from_value(json!({
            "content": [{"type": "text", "text": "No element found"}],
            "isError": true
        }));
        assert!(envelope.is_error);
    }

    #[test]
    fn test_non_object_result() {
        let envelope = ResultEnvelope::from_value(json!("plain"));
        assert_eq!(envelope.content, vec![ContentBlock::Other(json!("plain"))]);
        assert!(envelope.first_text().is_none());
    }

    #[test]
    fn test_summary_omits_payloads() {
        let envelope = ResultEnvelope::from_blocks(vec![
            ContentBlock::text("héllo"),
            ContentBlock::image("image/png", "AAAA"),
        ]);
        let summary = envelope.summary();
        assert_eq!(summary.blocks[0].len, 5);
        assert_eq!(summary.blocks[1].kind, "image");
        assert_eq!(summary.blocks[1].len, 4);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("AAAA"));
        assert!(!json.contains("statusCode"));
    }
}
