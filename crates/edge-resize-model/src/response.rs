//! Generated responses and the value returned to the edge runtime.

use serde::{Deserialize, Serialize};

use crate::headers::HeaderMap;
use crate::request::CloudFrontRequest;

/// How [`EdgeResponse::body`] is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    /// Body is a base64 string of arbitrary bytes.
    Base64,
    /// Body is UTF-8 text.
    Text,
}

/// A response generated at the edge instead of fetching from the origin.
///
/// Serializes to the shape CloudFront expects:
/// `{ status, statusDescription, body, bodyEncoding, headers }`, with absent
/// parts omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeResponse {
    /// HTTP status code.
    pub status: u16,
    /// HTTP reason phrase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_description: Option<String>,
    /// Response body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Encoding of `body`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_encoding: Option<BodyEncoding>,
    /// Response headers.
    #[serde(default, skip_serializing_if = "HeaderMap::is_empty")]
    pub headers: HeaderMap,
}

impl EdgeResponse {
    /// A response carrying only a status code.
    #[must_use]
    pub fn status_only(status: u16) -> Self {
        Self {
            status,
            status_description: None,
            body: None,
            body_encoding: None,
            headers: HeaderMap::new(),
        }
    }
}

/// What the function hands back to CloudFront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeOutcome {
    /// Let CloudFront continue with the (unmodified) request.
    Forward(CloudFrontRequest),
    /// Short-circuit with a generated response.
    Respond(EdgeResponse),
}

impl EdgeOutcome {
    /// The generated response, if this outcome is one.
    #[must_use]
    pub fn response(&self) -> Option<&EdgeResponse> {
        match self {
            Self::Respond(r) => Some(r),
            Self::Forward(_) => None,
        }
    }
}
