//! Query-string normalization.
//!
//! The only recognised option is `size`, written `<width>x<height>`,
//! `<width>x`, or `x<height>` (the separator is case-insensitive). A query
//! without a usable `size` yields no [`TransformRequest`], and the request is
//! forwarded untouched.
//!
//! Dimension strings that are not integers are kept as
//! [`Dimension::Invalid`] rather than rejected here. They make the request
//! count as a transform request; the transform step refuses them.

use std::fmt;

/// Query parameter carrying the target size.
pub const SIZE_PARAM: &str = "size";

/// One requested side of the output image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dimension {
    /// A number of pixels.
    Pixels(u32),
    /// The raw text of a value that is not a non-negative integer.
    Invalid(String),
}

impl Dimension {
    /// Parse one side of a `size` value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<u32>()
            .map_or_else(|_| Self::Invalid(raw.to_owned()), Self::Pixels)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(px) => write!(f, "{px}"),
            Self::Invalid(raw) => write!(f, "{raw:?}"),
        }
    }
}

/// Requested output dimensions. An unset side preserves the aspect ratio.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformRequest {
    /// Target width.
    pub width: Option<Dimension>,
    /// Target height.
    pub height: Option<Dimension>,
}

impl TransformRequest {
    /// Whether neither side is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }
}

/// Parse a `size` value.
///
/// The value is split on `x`/`X`. The first piece is the width, the second
/// the height, and anything after a second separator is ignored. Empty pieces
/// leave their side unset.
///
/// ```
/// use edge_resize_core::params::{parse_size, Dimension};
///
/// let req = parse_size("100x");
/// assert_eq!(req.width, Some(Dimension::Pixels(100)));
/// assert_eq!(req.height, None);
/// ```
#[must_use]
pub fn parse_size(value: &str) -> TransformRequest {
    let mut parts = value.split(['x', 'X']);
    let mut side = || {
        parts
            .next()
            .filter(|part| !part.is_empty())
            .map(Dimension::parse)
    };
    let width = side();
    let height = side();
    TransformRequest { width, height }
}

/// Derive the transform request from a raw query string.
///
/// Returns `None` when no transformation is requested: `size` is missing,
/// empty, or sets neither side. Only the first `size` occurrence counts.
#[must_use]
pub fn normalize_parameters(query: &str) -> Option<TransformRequest> {
    let size = form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == SIZE_PARAM)
        .map(|(_, value)| value)?;

    let request = parse_size(&size);
    (!request.is_empty()).then_some(request)
}
