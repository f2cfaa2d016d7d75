//! Inbound CloudFront request descriptor.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::headers::HeaderMap;

/// The request CloudFront passes to an origin-request or viewer-request
/// function.
///
/// Fields not modelled here (`body`, future additions) are kept in
/// [`CloudFrontRequest::extra`] so that forwarding the request returns it
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudFrontRequest {
    /// Viewer IP address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    /// Request headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeaderMap>,
    /// HTTP method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Origin the distribution would forward to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    /// Raw query string, without the leading `?`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub querystring: Option<String>,
    /// Request path, starting with `/`.
    pub uri: String,
    /// Unmodelled fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CloudFrontRequest {
    /// The query string, or `""` when the request carries none.
    #[must_use]
    pub fn query(&self) -> &str {
        self.querystring.as_deref().unwrap_or_default()
    }

    /// Domain name of whichever origin the request targets.
    #[must_use]
    pub fn origin_domain_name(&self) -> Option<&str> {
        let origin = self.origin.as_ref()?;
        origin
            .s3
            .as_ref()
            .map(|s3| s3.domain_name.as_str())
            .or_else(|| origin.custom.as_ref().map(|c| c.domain_name.as_str()))
    }
}

/// Origin descriptor. CloudFront populates exactly one of `s3` or `custom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    /// S3 origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3Origin>,
    /// Custom (HTTP) origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomOrigin>,
    /// Unmodelled fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// S3 bucket origin, e.g. `my-bucket.s3.amazonaws.com`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Origin {
    /// Bucket endpoint domain name.
    pub domain_name: String,
    /// Path prefix configured on the origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Unmodelled fields (`authMethod`, `customHeaders`, `region`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Custom HTTP origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomOrigin {
    /// Origin domain name.
    pub domain_name: String,
    /// Path prefix configured on the origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Unmodelled fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
