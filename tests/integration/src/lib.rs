//! Integration tests for the edge resizer.
//!
//! These tests require an S3-compatible server at `localhost:4566` (or
//! `S3_ENDPOINT_URL`). They are marked `#[ignore]` so they don't run during
//! normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p edge-resize-integration -- --ignored
//! ```

use std::sync::{Arc, Once};

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use edge_resize_core::{EdgeResizer, S3ObjectFetcher};
use edge_resize_model::CloudFrontRequest;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the server.
fn endpoint_url() -> String {
    std::env::var("S3_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4566".to_owned())
}

/// Create a configured S3 client pointing at the local server.
#[must_use]
pub fn s3_client() -> aws_sdk_s3::Client {
    init_tracing();

    let creds = Credentials::new("test", "test", None, None, "integration-test");

    let config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(creds)
        .endpoint_url(endpoint_url())
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(config)
}

/// Create a resizer that fetches through `client`.
#[must_use]
pub fn resizer(client: &aws_sdk_s3::Client) -> EdgeResizer {
    EdgeResizer::new(Arc::new(S3ObjectFetcher::new(client.clone())))
}

/// Build the request CloudFront would send for `bucket` + `uri`.
#[must_use]
pub fn edge_request(bucket: &str, uri: &str, querystring: &str) -> CloudFrontRequest {
    serde_json::from_value(serde_json::json!({
        "clientIp": "203.0.113.178",
        "headers": {},
        "method": "GET",
        "origin": {
            "s3": {
                "authMethod": "none",
                "customHeaders": {},
                "domainName": format!("{bucket}.s3.amazonaws.com"),
                "path": ""
            }
        },
        "querystring": querystring,
        "uri": uri
    }))
    .unwrap_or_else(|e| panic!("invalid edge request: {e}"))
}

/// Generate a unique bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create a bucket and return its name. Caller is responsible for cleanup.
pub async fn create_test_bucket(client: &aws_sdk_s3::Client, prefix: &str) -> String {
    let name = test_bucket_name(prefix);
    client
        .create_bucket()
        .bucket(&name)
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to create bucket {name}: {e}"));
    name
}

/// Delete all objects in a bucket, then delete the bucket.
pub async fn cleanup_bucket(client: &aws_sdk_s3::Client, bucket: &str) {
    let Ok(resp) = client.list_objects_v2().bucket(bucket).send().await else {
        return;
    };

    for obj in resp.contents() {
        if let Some(key) = obj.key() {
            let _ = client.delete_object().bucket(bucket).key(key).send().await;
        }
    }

    let _ = client.delete_bucket().bucket(bucket).send().await;
}

mod test_resize;
