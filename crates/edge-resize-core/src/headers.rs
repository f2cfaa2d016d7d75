//! Response header synthesis.
//!
//! Two mutually exclusive modes:
//!
//! - **Transformed**: only `Content-Type`, from the sniffed type. Stored
//!   metadata describes the original bytes and is dropped.
//! - **Passthrough**: every attribute present on the stored object, and
//!   nothing else.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use edge_resize_model::{HeaderEntry, HeaderMap};
use regex::Regex;

use crate::origin::ObjectMetadata;
use crate::sniff::SniffedType;

/// A word character followed by an upper-case letter.
static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)([A-Z])").expect("valid word-boundary regex"));

/// Hyphenate a PascalCase attribute name at its word boundaries
/// (`ContentDisposition` -> `Content-Disposition`).
#[must_use]
pub fn to_header_key(attribute: &str) -> String {
    WORD_BOUNDARY.replace_all(attribute, "$1-$2").into_owned()
}

/// Lower-cased [`to_header_key`] (`ContentDisposition` -> `content-disposition`).
#[must_use]
pub fn to_kebab_case(attribute: &str) -> String {
    to_header_key(attribute).to_lowercase()
}

/// Format a timestamp as an IMF-fixdate (`Sun, 06 Nov 1994 08:49:37 GMT`).
#[must_use]
pub fn http_date(value: &DateTime<Utc>) -> String {
    value.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Headers for a transformed object.
#[must_use]
pub fn transformed_headers(sniffed: &SniffedType) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, "Content-Type", &sniffed.mime);
    headers
}

/// Headers for an object served as stored.
#[must_use]
pub fn passthrough_headers(metadata: &ObjectMetadata) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for (attribute, value) in metadata.named_attributes() {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            headers.insert(
                to_kebab_case(attribute),
                vec![HeaderEntry::new(to_header_key(attribute), value)],
            );
        }
    }

    if let Some(e_tag) = metadata.e_tag.as_deref().filter(|v| !v.is_empty()) {
        insert(&mut headers, "ETag", e_tag);
    }
    if let Some(expires) = &metadata.expires {
        insert(&mut headers, "Expires", &http_date(expires));
    }
    if let Some(last_modified) = &metadata.last_modified {
        insert(&mut headers, "Last-Modified", &http_date(last_modified));
    }

    headers
}

fn insert(headers: &mut HeaderMap, key: &str, value: &str) {
    headers.insert(key.to_lowercase(), vec![HeaderEntry::new(key, value)]);
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn keys(headers: &HeaderMap) -> Vec<&str> {
        headers.keys().map(String::as_str).collect()
    }

    fn entry<'a>(headers: &'a HeaderMap, name: &str) -> &'a HeaderEntry {
        let values = headers.get(name).expect("header present");
        assert_eq!(values.len(), 1);
        &values[0]
    }

    #[test]
    fn test_should_kebab_case_attribute_names() {
        assert_eq!(to_kebab_case("ContentDisposition"), "content-disposition");
        assert_eq!(to_header_key("ContentDisposition"), "Content-Disposition");
        assert_eq!(to_kebab_case("CacheControl"), "cache-control");
        assert_eq!(to_header_key("ContentType"), "Content-Type");
    }

    #[test]
    fn test_should_hyphenate_non_overlapping_boundaries() {
        assert_eq!(to_header_key("ETag"), "E-Tag");
        assert_eq!(to_header_key("ABC"), "A-BC");
        assert_eq!(to_header_key("Expires"), "Expires");
    }

    #[test]
    fn test_should_format_imf_fixdate() {
        let t = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
        assert_eq!(http_date(&t), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_should_emit_only_content_type_when_transformed() {
        let headers = transformed_headers(&SniffedType {
            mime: "image/webp".to_owned(),
            extension: "webp".to_owned(),
        });
        assert_eq!(keys(&headers), ["content-type"]);
        let ct = entry(&headers, "content-type");
        assert_eq!(ct.key.as_deref(), Some("Content-Type"));
        assert_eq!(ct.value, "image/webp");
    }

    #[test]
    fn test_should_reflect_present_metadata_only() {
        let metadata = ObjectMetadata {
            cache_control: Some("max-age=3600".to_owned()),
            e_tag: Some("\"abc123\"".to_owned()),
            ..ObjectMetadata::default()
        };
        let headers = passthrough_headers(&metadata);
        assert_eq!(keys(&headers), ["cache-control", "etag"]);
        assert_eq!(entry(&headers, "cache-control").value, "max-age=3600");
        let etag = entry(&headers, "etag");
        assert_eq!(etag.key.as_deref(), Some("ETag"));
        assert_eq!(etag.value, "\"abc123\"");
    }

    #[test]
    fn test_should_emit_all_metadata_headers() {
        let expires = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let modified = Utc.with_ymd_and_hms(2024, 3, 5, 17, 4, 9).unwrap();
        let metadata = ObjectMetadata {
            cache_control: Some("no-cache".to_owned()),
            content_disposition: Some("attachment; filename=\"a.txt\"".to_owned()),
            content_encoding: Some("gzip".to_owned()),
            content_language: Some("en".to_owned()),
            content_type: Some("text/plain".to_owned()),
            e_tag: Some("\"e\"".to_owned()),
            expires: Some(expires),
            last_modified: Some(modified),
        };
        let headers = passthrough_headers(&metadata);

        assert_eq!(
            keys(&headers),
            [
                "cache-control",
                "content-disposition",
                "content-encoding",
                "content-language",
                "content-type",
                "etag",
                "expires",
                "last-modified",
            ]
        );
        assert_eq!(
            entry(&headers, "content-disposition").key.as_deref(),
            Some("Content-Disposition")
        );
        assert_eq!(
            entry(&headers, "expires").value,
            "Tue, 01 Jan 2030 00:00:00 GMT"
        );
        let lm = entry(&headers, "last-modified");
        assert_eq!(lm.key.as_deref(), Some("Last-Modified"));
        assert_eq!(lm.value, "Tue, 05 Mar 2024 17:04:09 GMT");
    }

    #[test]
    fn test_should_skip_empty_metadata_values() {
        let metadata = ObjectMetadata {
            content_type: Some(String::new()),
            e_tag: Some(String::new()),
            ..ObjectMetadata::default()
        };
        assert!(passthrough_headers(&metadata).is_empty());
    }
}
