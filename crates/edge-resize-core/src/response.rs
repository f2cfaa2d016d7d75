//! Mapping of results and failures to generated responses.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use edge_resize_model::{BodyEncoding, EdgeResponse, HeaderMap};

use crate::error::EdgeError;

/// A `200 OK` response carrying `body` base64-encoded.
#[must_use]
pub fn success_response(body: &[u8], headers: HeaderMap) -> EdgeResponse {
    EdgeResponse {
        status: 200,
        status_description: Some("OK".to_owned()),
        body: Some(STANDARD.encode(body)),
        body_encoding: Some(BodyEncoding::Base64),
        headers,
    }
}

/// The response for a failed invocation.
///
/// An origin failure with a status of its own is replayed as that status with
/// no body and no headers. Everything else is a `500` with the error text as
/// the body.
#[must_use]
pub fn error_response(err: &EdgeError) -> EdgeResponse {
    if let Some(status) = err.origin_status() {
        return EdgeResponse::status_only(status);
    }

    EdgeResponse {
        body: Some(err.to_string()),
        body_encoding: Some(BodyEncoding::Text),
        ..EdgeResponse::status_only(500)
    }
}
