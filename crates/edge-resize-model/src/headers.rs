//! CloudFront header map representation.
//!
//! CloudFront keys headers by their lower-cased name and carries a list of
//! `{ key, value }` pairs for each, where `key` preserves the display casing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Header map keyed by lower-cased header name.
pub type HeaderMap = BTreeMap<String, Vec<HeaderEntry>>;

/// A single header value with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    /// Header name as it should appear on the wire (e.g. `Content-Type`).
    ///
    /// CloudFront omits this on some inbound headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Header value.
    pub value: String,
}

impl HeaderEntry {
    /// Create a header entry with a display name.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
        }
    }
}
