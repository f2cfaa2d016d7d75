//! Minimal client for the Lambda runtime API.
//!
//! The bootstrap polls `invocation/next`, runs the handler, and posts either
//! `invocation/{id}/response` or `invocation/{id}/error`.

use anyhow::{Context, Result};
use bytes::Bytes;
use serde::Serialize;

/// Runtime API version segment.
pub const RUNTIME_API_VERSION: &str = "2018-06-01";

/// Header carrying the invocation's request ID.
const REQUEST_ID_HEADER: &str = "lambda-runtime-aws-request-id";

/// Header classifying a reported error.
const ERROR_TYPE_HEADER: &str = "lambda-runtime-function-error-type";

/// A pending invocation.
#[derive(Debug)]
pub struct Invocation {
    /// Request ID to answer to.
    pub request_id: String,
    /// Raw event payload.
    pub payload: Bytes,
}

/// Error body accepted by the runtime API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    /// Short error classification.
    pub error_type: String,
    /// Error detail.
    pub error_message: String,
}

impl ErrorReport {
    /// Build a report from a type label and any displayable error.
    pub fn new(error_type: impl Into<String>, error: &impl std::fmt::Display) -> Self {
        Self {
            error_type: error_type.into(),
            error_message: error.to_string(),
        }
    }
}

/// Runtime API client.
#[derive(Debug, Clone)]
pub struct RuntimeClient {
    http: reqwest::Client,
    base_url: String,
}

impl RuntimeClient {
    /// Create a client for the runtime API at `api` (`host:port`).
    #[must_use]
    pub fn new(api: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("http://{api}/{RUNTIME_API_VERSION}/runtime"),
        }
    }

    /// Create a client from `AWS_LAMBDA_RUNTIME_API`.
    pub fn from_env() -> Result<Self> {
        let api = std::env::var("AWS_LAMBDA_RUNTIME_API")
            .context("AWS_LAMBDA_RUNTIME_API is not set; not running inside Lambda?")?;
        Ok(Self::new(&api))
    }

    fn invocation_url(&self, request_id: &str, action: &str) -> String {
        format!("{}/invocation/{request_id}/{action}", self.base_url)
    }

    /// Block until the next invocation arrives.
    pub async fn next_invocation(&self) -> Result<Invocation> {
        let response = self
            .http
            .get(format!("{}/invocation/next", self.base_url))
            .send()
            .await
            .context("failed to poll next invocation")?
            .error_for_status()
            .context("runtime API rejected next-invocation poll")?;

        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned)
            .context("invocation is missing its request ID")?;

        let payload = response
            .bytes()
            .await
            .with_context(|| format!("failed to read payload of invocation {request_id}"))?;

        Ok(Invocation {
            request_id,
            payload,
        })
    }

    /// Post the result of an invocation.
    pub async fn send_response<T: Serialize + ?Sized>(&self, request_id: &str, body: &T) -> Result<()> {
        self.http
            .post(self.invocation_url(request_id, "response"))
            .json(body)
            .send()
            .await
            .with_context(|| format!("failed to post response for {request_id}"))?
            .error_for_status()
            .with_context(|| format!("runtime API rejected response for {request_id}"))?;
        Ok(())
    }

    /// Report a failed invocation.
    pub async fn send_error(&self, request_id: &str, report: &ErrorReport) -> Result<()> {
        self.http
            .post(self.invocation_url(request_id, "error"))
            .header(ERROR_TYPE_HEADER, &report.error_type)
            .json(report)
            .send()
            .await
            .with_context(|| format!("failed to post error for {request_id}"))?
            .error_for_status()
            .with_context(|| format!("runtime API rejected error for {request_id}"))?;
        Ok(())
    }
}
