//! Image transformation.
//!
//! [`ImageTransformer`] is the engine seam; [`ResizeTransformer`] implements
//! it with the `image` crate. [`dispatch_transform`] runs an engine off the
//! async executor and folds its failures into [`EdgeError`].
//!
//! Resize rules:
//!
//! | width | height | result |
//! |-------|--------|--------|
//! | set | set | scale to cover, then centre-crop to exactly `width x height` |
//! | set | unset | scale to `width`, keep aspect ratio |
//! | unset | set | scale to `height`, keep aspect ratio |
//! | unset | unset | re-encode unchanged |
//!
//! The output is encoded in the input's format. Requests whose output (or,
//! for a cover, the scaled image before cropping) would exceed
//! [`MAX_OUTPUT_SIDE`] or [`MAX_OUTPUT_PIXELS`] are rejected before any
//! pixel buffer is allocated.

use std::fmt;
use std::io::Cursor;
use std::sync::Arc;

use bytes::Bytes;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, info};

use crate::error::{EdgeError, EdgeResult};
use crate::params::{Dimension, TransformRequest};

/// Largest width or height a transform may produce.
pub const MAX_OUTPUT_SIDE: u32 = 8192;

/// Largest pixel count a transform may produce.
pub const MAX_OUTPUT_PIXELS: u64 = 16_777_216;

/// Transformation failures.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// A requested side is not a positive integer.
    #[error("expected positive integer for {side} but received {value}")]
    InvalidDimension {
        /// `width` or `height`.
        side: &'static str,
        /// The offending value.
        value: Dimension,
    },

    /// The requested output is larger than the allowed maximum.
    #[error(
        "requested output {width}x{height} exceeds the limit of {side}px per side and {pixels} pixels",
        side = MAX_OUTPUT_SIDE,
        pixels = MAX_OUTPUT_PIXELS
    )]
    TooLarge {
        /// Output width in pixels.
        width: u32,
        /// Output height in pixels.
        height: u32,
    },

    /// The input could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// The output could not be encoded.
    #[error("failed to encode {format:?} image: {source}")]
    Encode {
        /// Target format.
        format: ImageFormat,
        /// Encoder error.
        #[source]
        source: image::ImageError,
    },
}

/// Applies a [`TransformRequest`] to an encoded image.
pub trait ImageTransformer: Send + Sync + fmt::Debug {
    /// Transform `bytes`, returning the encoded result.
    fn transform(&self, bytes: &[u8], request: &TransformRequest) -> Result<Bytes, TransformError>;
}

/// [`ImageTransformer`] that resizes with the `image` crate.
#[derive(Debug, Clone, Copy)]
pub struct ResizeTransformer {
    filter: FilterType,
}

impl ResizeTransformer {
    /// Create a transformer using the given resampling filter.
    #[must_use]
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl Default for ResizeTransformer {
    fn default() -> Self {
        Self::new(FilterType::Lanczos3)
    }
}

impl ImageTransformer for ResizeTransformer {
    fn transform(&self, bytes: &[u8], request: &TransformRequest) -> Result<Bytes, TransformError> {
        let width = resolve_side("width", request.width.as_ref())?;
        let height = resolve_side("height", request.height.as_ref())?;

        let format = image::guess_format(bytes).map_err(TransformError::Decode)?;
        let source =
            image::load_from_memory_with_format(bytes, format).map_err(TransformError::Decode)?;

        let resized = match (width, height) {
            (Some(w), Some(h)) => {
                check_output(w, h)?;
                let (cover_w, cover_h) = cover_dimensions(source.width(), source.height(), w, h);
                check_output(cover_w, cover_h)?;
                source.resize_to_fill(w, h, self.filter)
            }
            (Some(w), None) => {
                let h = scale_side(source.height(), w, source.width());
                check_output(w, h)?;
                source.resize_exact(w, h, self.filter)
            }
            (None, Some(h)) => {
                let w = scale_side(source.width(), h, source.height());
                check_output(w, h)?;
                source.resize_exact(w, h, self.filter)
            }
            (None, None) => source,
        };

        encode(&resized, format)
    }
}

/// Check a requested side. Zero and invalid values are rejected.
fn resolve_side(side: &'static str, value: Option<&Dimension>) -> Result<Option<u32>, TransformError> {
    match value {
        None => Ok(None),
        Some(Dimension::Pixels(px)) if *px > 0 => Ok(Some(*px)),
        Some(other) => Err(TransformError::InvalidDimension {
            side,
            value: other.clone(),
        }),
    }
}

/// Scale `other` by `target / current`, rounding to nearest and never below 1.
fn scale_side(other: u32, target: u32, current: u32) -> u32 {
    let current = u64::from(current.max(1));
    let scaled = (u64::from(other) * u64::from(target) + current / 2) / current;
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}

/// Size `source` is scaled to before `resize_to_fill` crops it to `width x height`.
fn cover_dimensions(source_width: u32, source_height: u32, width: u32, height: u32) -> (u32, u32) {
    let (sw, sh) = (source_width.max(1), source_height.max(1));
    if u64::from(width) * u64::from(sh) >= u64::from(height) * u64::from(sw) {
        (width, scale_side(sh, width, sw))
    } else {
        (scale_side(sw, height, sh), height)
    }
}

fn check_output(width: u32, height: u32) -> Result<(), TransformError> {
    if width > MAX_OUTPUT_SIDE
        || height > MAX_OUTPUT_SIDE
        || u64::from(width) * u64::from(height) > MAX_OUTPUT_PIXELS
    {
        return Err(TransformError::TooLarge { width, height });
    }
    Ok(())
}

fn encode(image: &DynamicImage, format: ImageFormat) -> Result<Bytes, TransformError> {
    let mut out = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut out), format)
        .map_err(|source| TransformError::Encode { format, source })?;
    Ok(Bytes::from(out))
}

/// Run `transformer` on a blocking thread.
///
/// Engine failures become [`EdgeError::Transform`]; a panicked or cancelled
/// task becomes [`EdgeError::Unexpected`].
pub async fn dispatch_transform(
    transformer: Arc<dyn ImageTransformer>,
    bytes: Bytes,
    request: TransformRequest,
) -> EdgeResult<Bytes> {
    if request.is_empty() {
        debug!("no dimensions requested, re-encoding in source format");
    } else {
        info!(
            width = ?request.width,
            height = ?request.height,
            input_size = bytes.len(),
            "resizing image"
        );
    }

    let output = tokio::task::spawn_blocking(move || transformer.transform(&bytes, &request))
        .await
        .map_err(|e| EdgeError::Unexpected(format!("transform task failed: {e}")))??;

    debug!(output_size = output.len(), "transform complete");
    Ok(output)
}
