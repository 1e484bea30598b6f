//! Result extraction rules.
//!
//! Each wrapper turns a [`ResultEnvelope`] into its own small result type
//! with one of the rules below. The rules never fail: when the envelope does
//! not carry the expected field they fall back to the defaults in
//! [`ExtractionPolicy`].

use serde::Serialize;
use toolbridge_core::{ContentBlock, ResultEnvelope};

/// Report success when nothing in the envelope says otherwise.
pub const OPTIMISTIC_SUCCESS: bool = true;
/// Image width used when the server does not report one.
pub const DEFAULT_WIDTH: u32 = 800;
/// Image height used when the server does not report one.
pub const DEFAULT_HEIGHT: u32 = 600;
/// Page status used when the server does not report one.
pub const DEFAULT_STATUS: u16 = 200;
/// Page title used when the server returns no text.
pub const UNKNOWN_TITLE: &str = "Unknown";
/// Longest documentation snippet handed back, in characters.
pub const SNIPPET_MAX_CHARS: usize = 500;

/// Defaults applied when an envelope lacks a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionPolicy {
    pub optimistic_success: bool,
    pub default_width: u32,
    pub default_height: u32,
    pub default_status: u16,
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        Self {
            optimistic_success: OPTIMISTIC_SUCCESS,
            default_width: DEFAULT_WIDTH,
            default_height: DEFAULT_HEIGHT,
            default_status: DEFAULT_STATUS,
        }
    }
}

impl ExtractionPolicy {
    /// Require positive evidence before reporting success.
    pub const fn strict() -> Self {
        Self {
            optimistic_success: false,
            default_width: DEFAULT_WIDTH,
            default_height: DEFAULT_HEIGHT,
            default_status: DEFAULT_STATUS,
        }
    }
}

// ============================================================================
// Action rules
// ============================================================================

/// Decide whether an action (click, fill, ...) succeeded.
///
/// In order: the first text block mentions `keyword`, then an explicit
/// `success` field, then the policy default. A tool that fails silently is
/// reported as successful under the optimistic policy.
pub fn action_succeeded(envelope: &ResultEnvelope, keyword: &str, policy: &ExtractionPolicy) -> bool {
    if envelope
        .first_text()
        .is_some_and(|text| text.contains(keyword))
    {
        return true;
    }
    envelope
        .raw_bool("success")
        .unwrap_or(policy.optimistic_success)
}

/// Page title: the first non-empty text block.
pub fn page_title(envelope: &ResultEnvelope) -> String {
    envelope
        .first_text()
        .filter(|text| !text.is_empty())
        .unwrap_or(UNKNOWN_TITLE)
        .to_string()
}

/// HTTP-style status reported by the server, or the policy default.
///
/// A reported 0 counts as absent.
pub fn status_code(envelope: &ResultEnvelope, policy: &ExtractionPolicy) -> u16 {
    envelope
        .status_code
        .and_then(|code| u16::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(policy.default_status)
}

// ============================================================================
// Image rules
// ============================================================================

/// Base64 payload of the first image block, else a top-level `data` or
/// `base64` field.
pub fn image_payload(envelope: &ResultEnvelope) -> Option<&str> {
    let from_blocks = envelope.content.iter().find_map(|block| match block {
        ContentBlock::Image { data, .. } => Some(data.as_str()),
        ContentBlock::Text { .. } | ContentBlock::Other(_) => None,
    });

    from_blocks
        .or_else(|| envelope.raw_str("data"))
        .or_else(|| envelope.raw_str("base64"))
}

/// Image `(width, height)` reported by the server, each falling back to the
/// policy default independently. A reported 0 counts as absent.
pub fn image_dimensions(envelope: &ResultEnvelope, policy: &ExtractionPolicy) -> (u32, u32) {
    let reported = |key: &str| envelope.raw_u32(key).filter(|n| *n != 0);
    (
        reported("width").unwrap_or(policy.default_width),
        reported("height").unwrap_or(policy.default_height),
    )
}

// ============================================================================
// Documentation rules
// ============================================================================

/// One documentation snippet handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSnippet {
    pub title: String,
    pub snippet: String,
    pub relevance_score: f64,
    pub source: String,
}

/// Sections found in a documentation text and the ones kept.
#[derive(Debug, Clone, PartialEq)]
pub struct DocSections {
    /// Number of non-empty sections in the whole text.
    pub total: usize,
    /// The first `max` sections, truncated.
    pub snippets: Vec<CodeSnippet>,
}

/// Full documentation text: the first text block, else a top-level `text`
/// field, else empty.
pub fn doc_text(envelope: &ResultEnvelope) -> &str {
    envelope
        .first_text()
        .or_else(|| envelope.raw_str("text"))
        .unwrap_or_default()
}

/// Split documentation on blank lines and keep the first `max` sections.
///
/// Relevance is positional: 1.0 for the first section, 0.1 less for each
/// following one, never below zero.
pub fn doc_sections(text: &str, max: usize, source: &str) -> DocSections {
    let sections: Vec<&str> = text
        .split("\n\n")
        .filter(|section| !section.trim().is_empty())
        .collect();

    let snippets = sections
        .iter()
        .take(max)
        .enumerate()
        .map(|(index, section)| CodeSnippet {
            title: format!("Section {}", index + 1),
            snippet: truncate_chars(section, SNIPPET_MAX_CHARS),
            relevance_score: relevance(index),
            source: source.to_string(),
        })
        .collect();

    DocSections {
        total: sections.len(),
        snippets,
    }
}

#[allow(clippy::cast_precision_loss)] // Index is at most max_results
fn relevance(index: usize) -> f64 {
    0.1f64.mul_add(-(index as f64), 1.0).max(0.0)
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
