//! Edge resizer configuration.
//!
//! Provides [`EdgeConfig`], loaded from environment variables. Edge
//! deployments usually run without an environment, so every value has a
//! default that works for a single S3 origin.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Default region of the storage client.
pub const DEFAULT_S3_REGION: &str = "eu-west-1";

/// Edge resizer configuration.
///
/// # Examples
///
/// ```
/// use edge_resize_core::config::EdgeConfig;
///
/// let config = EdgeConfig::default();
/// assert_eq!(config.s3_region, "eu-west-1");
/// assert!(config.s3_endpoint_url.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct EdgeConfig {
    /// Region the storage client signs requests for.
    #[builder(default = String::from(DEFAULT_S3_REGION))]
    pub s3_region: String,

    /// Endpoint override for S3-compatible stores (e.g. `http://localhost:4566`).
    #[builder(default)]
    pub s3_endpoint_url: Option<String>,

    /// Whether to use path-style bucket addressing.
    #[builder(default = false)]
    pub s3_force_path_style: bool,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    #[builder(default = true)]
    pub log_json: bool,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            s3_region: String::from(DEFAULT_S3_REGION),
            s3_endpoint_url: None,
            s3_force_path_style: false,
            log_level: String::from("info"),
            log_json: true,
        }
    }
}

impl EdgeConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `EDGE_S3_REGION` | `eu-west-1` |
    /// | `EDGE_S3_ENDPOINT_URL` | *(unset)* |
    /// | `EDGE_S3_FORCE_PATH_STYLE` | `false` |
    /// | `LOG_LEVEL` | `info` |
    /// | `LOG_FORMAT` | `json` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("EDGE_S3_REGION") {
            config.s3_region = v;
        }
        if let Ok(v) = std::env::var("EDGE_S3_ENDPOINT_URL") {
            if !v.is_empty() {
                config.s3_endpoint_url = Some(v);
            }
        }
        if let Ok(v) = std::env::var("EDGE_S3_FORCE_PATH_STYLE") {
            config.s3_force_path_style = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("LOG_FORMAT") {
            config.log_json = !v.eq_ignore_ascii_case("text");
        }

        config
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
