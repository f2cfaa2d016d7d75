//! Origin object retrieval.
//!
//! The resizer reads the object addressed by the request path from the
//! bucket behind the distribution's S3 origin. [`ObjectFetcher`] is the seam;
//! [`S3ObjectFetcher`] is the production implementation on `aws-sdk-s3`.

use std::fmt;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use bytes::Bytes;
use chrono::{DateTime, NaiveDateTime, Utc};
use edge_resize_model::CloudFrontRequest;
use tracing::debug;

use crate::config::EdgeConfig;
use crate::error::{EdgeError, EdgeResult};

/// Bucket and key an edge request resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    /// Bucket name.
    pub bucket: String,
    /// Object key, without a leading `/`.
    pub key: String,
}

impl ObjectLocation {
    /// Resolve the location for an edge request.
    ///
    /// The bucket is the first label of the origin's domain name
    /// (`my-bucket.s3.amazonaws.com` -> `my-bucket`); the key is the URI
    /// without its leading `/`.
    pub fn from_request(request: &CloudFrontRequest) -> EdgeResult<Self> {
        let domain = request
            .origin_domain_name()
            .ok_or_else(|| EdgeError::InvalidEvent("request has no origin domain name".to_owned()))?;
        let bucket = domain.split('.').next().unwrap_or_default();
        if bucket.is_empty() {
            return Err(EdgeError::InvalidEvent(format!(
                "cannot derive bucket from origin domain {domain:?}"
            )));
        }

        let key = request.uri.strip_prefix('/').unwrap_or(&request.uri);

        Ok(Self {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
        })
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// Storage attributes of an object. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    /// `Cache-Control`.
    pub cache_control: Option<String>,
    /// `Content-Disposition`.
    pub content_disposition: Option<String>,
    /// `Content-Encoding`.
    pub content_encoding: Option<String>,
    /// `Content-Language`.
    pub content_language: Option<String>,
    /// `Content-Type`.
    pub content_type: Option<String>,
    /// Entity tag, quotes included.
    pub e_tag: Option<String>,
    /// `Expires`.
    pub expires: Option<DateTime<Utc>>,
    /// `Last-Modified`.
    pub last_modified: Option<DateTime<Utc>>,
}

impl ObjectMetadata {
    /// The string attributes copied to headers by name, paired with their
    /// storage attribute names.
    #[must_use]
    pub fn named_attributes(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("CacheControl", self.cache_control.as_deref()),
            ("ContentDisposition", self.content_disposition.as_deref()),
            ("ContentEncoding", self.content_encoding.as_deref()),
            ("ContentLanguage", self.content_language.as_deref()),
            ("ContentType", self.content_type.as_deref()),
        ]
    }
}

/// A fetched object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginObject {
    /// Object payload.
    pub bytes: Bytes,
    /// Storage attributes.
    pub metadata: ObjectMetadata,
}

/// Retrieves objects from the origin store.
///
/// Failures that carry an HTTP status from the store must be reported as
/// [`EdgeError::Origin`] with that status.
#[async_trait]
pub trait ObjectFetcher: Send + Sync + fmt::Debug {
    /// Fetch the object at `location`.
    async fn fetch(&self, location: &ObjectLocation) -> EdgeResult<OriginObject>;
}

/// [`ObjectFetcher`] backed by an S3 client.
///
/// The client holds only configuration and a connection pool, so one instance
/// is shared by every invocation in the process.
#[derive(Debug, Clone)]
pub struct S3ObjectFetcher {
    client: aws_sdk_s3::Client,
}

impl S3ObjectFetcher {
    /// Wrap an existing client.
    #[must_use]
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient AWS credentials and [`EdgeConfig`].
    pub async fn from_config(config: &EdgeConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.s3_region.clone()));
        if let Some(endpoint) = &config.s3_endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.s3_force_path_style)
            .build();

        Self::new(aws_sdk_s3::Client::from_conf(s3_config))
    }
}

#[async_trait]
impl ObjectFetcher for S3ObjectFetcher {
    async fn fetch(&self, location: &ObjectLocation) -> EdgeResult<OriginObject> {
        let output = self
            .client
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .map_err(|err| EdgeError::Origin {
                status: err.raw_response().map(|raw| raw.status().as_u16()),
                message: DisplayErrorContext(&err).to_string(),
            })?;

        let metadata = ObjectMetadata {
            cache_control: output.cache_control().map(ToOwned::to_owned),
            content_disposition: output.content_disposition().map(ToOwned::to_owned),
            content_encoding: output.content_encoding().map(ToOwned::to_owned),
            content_language: output.content_language().map(ToOwned::to_owned),
            content_type: output.content_type().map(ToOwned::to_owned),
            e_tag: output.e_tag().map(ToOwned::to_owned),
            expires: output.expires_string().and_then(parse_http_date),
            last_modified: output
                .last_modified()
                .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos())),
        };

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| EdgeError::Unexpected(format!("failed to read {location}: {e}")))?
            .into_bytes();

        debug!(%location, size = bytes.len(), "fetched origin object");

        Ok(OriginObject { bytes, metadata })
    }
}

/// Parse an `Expires` value. Stores keep it as free text, so anything that is
/// not an HTTP date is dropped.
fn parse_http_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%a, %d %b %Y %H:%M:%S GMT") {
        return Some(dt.and_utc());
    }
    DateTime::parse_from_rfc2822(s)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
