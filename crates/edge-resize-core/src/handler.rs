//! The per-request edge handler.
//!
//! ```text
//! query string ──> normalize_parameters ──(none)──> forward request unchanged
//!                          │
//!                          v
//!                  ObjectFetcher::fetch
//!                          │
//!                          v
//!                  ContentSniffer::sniff ──(none)──> stored bytes + metadata headers
//!                          │
//!                          v
//!                  dispatch_transform ──> transformed bytes + Content-Type
//! ```
//!
//! Any failure after normalization is mapped by
//! [`error_response`](crate::response::error_response).

use std::sync::Arc;

use edge_resize_model::{CloudFrontEvent, CloudFrontRequest, EdgeOutcome, EdgeResponse};
use tracing::{debug, error, warn};

use crate::error::{EdgeError, EdgeResult};
use crate::headers::{passthrough_headers, transformed_headers};
use crate::origin::{ObjectFetcher, ObjectLocation};
use crate::params::{TransformRequest, normalize_parameters};
use crate::response::{error_response, success_response};
use crate::sniff::{ContentSniffer, MagicSniffer};
use crate::transform::{ImageTransformer, ResizeTransformer, dispatch_transform};

/// Edge resizer.
///
/// Holds only shared, read-only collaborators, so one instance serves every
/// invocation in the process and may be used concurrently.
#[derive(Debug, Clone)]
pub struct EdgeResizer {
    fetcher: Arc<dyn ObjectFetcher>,
    sniffer: Arc<dyn ContentSniffer>,
    transformer: Arc<dyn ImageTransformer>,
}

impl EdgeResizer {
    /// Create a resizer with the default sniffer and transformer.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ObjectFetcher>) -> Self {
        Self {
            fetcher,
            sniffer: Arc::new(MagicSniffer),
            transformer: Arc::new(ResizeTransformer::default()),
        }
    }

    /// Replace the content sniffer.
    #[must_use]
    pub fn with_sniffer(mut self, sniffer: Arc<dyn ContentSniffer>) -> Self {
        self.sniffer = sniffer;
        self
    }

    /// Replace the transformation engine.
    #[must_use]
    pub fn with_transformer(mut self, transformer: Arc<dyn ImageTransformer>) -> Self {
        self.transformer = transformer;
        self
    }

    /// Handle a full edge event.
    pub async fn handle_event(&self, event: CloudFrontEvent) -> EdgeOutcome {
        match event.into_request() {
            Some(request) => self.handle_request(request).await,
            None => {
                let err = EdgeError::InvalidEvent("event contains no records".to_owned());
                error!(error = %err, "rejecting edge event");
                EdgeOutcome::Respond(error_response(&err))
            }
        }
    }

    /// Handle one edge request.
    ///
    /// Returns the request itself when no transformation is asked for.
    pub async fn handle_request(&self, request: CloudFrontRequest) -> EdgeOutcome {
        let params = normalize_parameters(request.query());
        debug!(uri = %request.uri, ?params, "normalized parameters");

        let Some(params) = params else {
            return EdgeOutcome::Forward(request);
        };

        match self.respond(&request, params).await {
            Ok(response) => EdgeOutcome::Respond(response),
            Err(err) => {
                match err.origin_status() {
                    Some(status) => warn!(uri = %request.uri, status, error = %err, "origin rejected request"),
                    None => error!(uri = %request.uri, error = %err, "edge resize failed"),
                }
                EdgeOutcome::Respond(error_response(&err))
            }
        }
    }

    async fn respond(
        &self,
        request: &CloudFrontRequest,
        params: TransformRequest,
    ) -> EdgeResult<EdgeResponse> {
        let location = ObjectLocation::from_request(request)?;
        let object = self.fetcher.fetch(&location).await?;

        if let Some(sniffed) = self.sniffer.sniff(&object.bytes) {
            debug!(%location, mime = %sniffed.mime, "transforming recognised object");
            let body = dispatch_transform(self.transformer.clone(), object.bytes, params).await?;
            return Ok(success_response(&body, transformed_headers(&sniffed)));
        }

        debug!(%location, "object not recognised, serving as stored");
        Ok(success_response(
            &object.bytes,
            passthrough_headers(&object.metadata),
        ))
    }
}
