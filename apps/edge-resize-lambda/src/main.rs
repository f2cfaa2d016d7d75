//! Edge resizer bootstrap for the Lambda custom runtime.
//!
//! Builds the S3 client once, then serves invocations one at a time until the
//! execution environment is torn down.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AWS_LAMBDA_RUNTIME_API` | *(set by Lambda)* | Runtime API address |
//! | `EDGE_S3_REGION` | `eu-west-1` | Storage client region |
//! | `EDGE_S3_ENDPOINT_URL` | *(unset)* | Endpoint override |
//! | `EDGE_S3_FORCE_PATH_STYLE` | `false` | Path-style addressing |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `LOG_FORMAT` | `json` | `json` or `text` |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod runtime;

use std::sync::Arc;

use anyhow::{Context, Result};
use edge_resize_core::{EdgeConfig, EdgeResizer, S3ObjectFetcher};
use edge_resize_model::CloudFrontEvent;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::runtime::{ErrorReport, Invocation, RuntimeClient};

/// Version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(config: &EdgeConfig) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("invalid log level filter: {}", config.log_level))?
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false);

    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}

/// Run one invocation and post its outcome.
///
/// Payloads that are not edge events are reported as invocation errors.
async fn process(runtime: &RuntimeClient, resizer: &EdgeResizer, invocation: Invocation) -> Result<()> {
    let Invocation {
        request_id,
        payload,
    } = invocation;
    debug!(%request_id, size = payload.len(), "received invocation");

    let event = match serde_json::from_slice::<CloudFrontEvent>(&payload) {
        Ok(event) => event,
        Err(e) => {
            error!(%request_id, error = %e, "payload is not a CloudFront event");
            return runtime
                .send_error(&request_id, &ErrorReport::new("InvalidEvent", &e))
                .await;
        }
    };

    let outcome = resizer.handle_event(event).await;
    runtime.send_response(&request_id, &outcome).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = EdgeConfig::from_env();

    init_tracing(&config)?;

    let runtime = RuntimeClient::from_env()?;

    info!(
        s3_region = %config.s3_region,
        s3_endpoint_url = ?config.s3_endpoint_url,
        s3_force_path_style = config.s3_force_path_style,
        version = VERSION,
        "starting edge resizer",
    );

    let fetcher = S3ObjectFetcher::from_config(&config).await;
    let resizer = EdgeResizer::new(Arc::new(fetcher));

    loop {
        let invocation = runtime.next_invocation().await?;
        let request_id = invocation.request_id.clone();

        if let Err(e) = process(&runtime, &resizer, invocation).await {
            error!(%request_id, error = %format!("{e:#}"), "failed to complete invocation");
        }
    }
}
