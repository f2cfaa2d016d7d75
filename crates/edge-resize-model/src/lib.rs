//! Wire types for CloudFront edge functions.
//!
//! The hosting edge runtime hands the function a JSON event
//! (`Records[0].cf.request`) and expects either the request back, to let
//! CloudFront continue to the origin, or a generated response that
//! short-circuits it. This crate models both sides:
//!
//! - [`CloudFrontEvent`] and [`CloudFrontRequest`] for the inbound event.
//! - [`EdgeResponse`] for a generated response.
//! - [`EdgeOutcome`] for the value returned to the runtime.
//!
//! Request fields this crate does not model are retained verbatim, so a
//! request that is forwarded serializes back to the same JSON document.

pub mod event;
pub mod headers;
pub mod request;
pub mod response;

pub use event::{CloudFrontConfig, CloudFrontEvent, CloudFrontPayload, CloudFrontRecord};
pub use headers::{HeaderEntry, HeaderMap};
pub use request::{CloudFrontRequest, CustomOrigin, Origin, S3Origin};
pub use response::{BodyEncoding, EdgeOutcome, EdgeResponse};
