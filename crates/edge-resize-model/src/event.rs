//! The event envelope CloudFront delivers to an edge function.

use serde::{Deserialize, Serialize};

use crate::request::CloudFrontRequest;

/// Top-level edge event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudFrontEvent {
    /// Event records. CloudFront always sends exactly one.
    #[serde(rename = "Records", default)]
    pub records: Vec<CloudFrontRecord>,
}

impl CloudFrontEvent {
    /// Consume the event and return the request of its first record.
    #[must_use]
    pub fn into_request(self) -> Option<CloudFrontRequest> {
        self.records.into_iter().next().map(|r| r.cf.request)
    }
}

/// A single event record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudFrontRecord {
    /// CloudFront payload.
    pub cf: CloudFrontPayload,
}

/// The `cf` object of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudFrontPayload {
    /// Distribution metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<CloudFrontConfig>,
    /// The intercepted request.
    pub request: CloudFrontRequest,
}

/// Distribution metadata attached to each record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudFrontConfig {
    /// Distribution domain, e.g. `d111111abcdef8.cloudfront.net`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_domain_name: Option<String>,
    /// Distribution ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_id: Option<String>,
    /// Trigger, e.g. `origin-request`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Per-request ID assigned by CloudFront.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}
