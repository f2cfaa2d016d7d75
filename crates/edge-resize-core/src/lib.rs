//! On-the-fly image resizing for CloudFront edge functions.
//!
//! An [`EdgeResizer`] receives the request CloudFront intercepted. If the
//! query string asks for a `size`, it fetches the object from the S3 origin,
//! resizes it when the payload is a recognised image, and answers with the
//! bytes plus headers describing them. Otherwise the request is handed back
//! unchanged and CloudFront carries on to the origin.
//!
//! # Architecture
//!
//! ```text
//! EdgeResizer (handler)
//!   ├── params      query string -> TransformRequest
//!   ├── origin      ObjectFetcher (S3ObjectFetcher)
//!   ├── sniff       ContentSniffer (MagicSniffer)
//!   ├── transform   ImageTransformer (ResizeTransformer)
//!   ├── headers     transformed / passthrough header sets
//!   └── response    success and error responses
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod headers;
pub mod origin;
pub mod params;
pub mod response;
pub mod sniff;
pub mod transform;

pub use config::EdgeConfig;
pub use error::{EdgeError, EdgeResult};
pub use handler::EdgeResizer;
pub use origin::{ObjectFetcher, ObjectLocation, ObjectMetadata, OriginObject, S3ObjectFetcher};
pub use params::{Dimension, TransformRequest, normalize_parameters};
pub use sniff::{ContentSniffer, MagicSniffer, SniffedType};
pub use transform::{ImageTransformer, ResizeTransformer, TransformError};
