//! Content-type detection from payload bytes.
//!
//! The key's extension and the stored `Content-Type` are ignored; only the
//! leading magic bytes decide. No match is a normal outcome (text, unknown
//! formats, empty objects).
//!
//! A signature only counts when this build can decode the format. Several
//! formats are recognised by loose ASCII prefixes (PNM's `P1`..`P7`, for
//! one), so plain text can look like an image the transformer cannot read.

use std::fmt;

use image::ImageFormat;

/// A detected content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SniffedType {
    /// MIME type, e.g. `image/png`.
    pub mime: String,
    /// Canonical file extension, e.g. `png`.
    pub extension: String,
}

/// Detects content types from bytes.
pub trait ContentSniffer: Send + Sync + fmt::Debug {
    /// Return the detected type, or `None` if the bytes are not recognised.
    fn sniff(&self, bytes: &[u8]) -> Option<SniffedType>;
}

/// Recognises the image formats the `image` crate can decode in this build.
#[derive(Debug, Clone, Copy, Default)]
pub struct MagicSniffer;

impl ContentSniffer for MagicSniffer {
    fn sniff(&self, bytes: &[u8]) -> Option<SniffedType> {
        let format = image::guess_format(bytes)
            .ok()
            .filter(ImageFormat::reading_enabled)?;
        Some(SniffedType {
            mime: format.to_mime_type().to_owned(),
            extension: format
                .extensions_str()
                .first()
                .copied()
                .unwrap_or_default()
                .to_owned(),
        })
    }
}
