// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based logging layer for the per-network RPC clients.
//!
//! Every JSON-RPC packet sent to a node is wrapped in an `rpc_call` span carrying
//! the network name and JSON-RPC method, with the round-trip time recorded once
//! the response arrives.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Instant,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket};
use alloy_transport::TransportError;
use tower::Layer;
use tracing::{debug, trace, warn, Instrument};

/// A Tower layer that adds logging/tracing to RPC requests.
///
/// # Example
///
/// ```rust,ignore
/// use tokenmeta::transport::LoggingLayer;
/// use alloy_rpc_client::ClientBuilder;
///
/// let client = ClientBuilder::default()
///     .layer(LoggingLayer::for_network("arbitrum"))
///     .http(rpc_url);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LoggingLayer {
    network: Option<Arc<str>>,
    /// Whether to log full request and response packets (can be verbose)
    log_payloads: bool,
}

impl LoggingLayer {
    /// Creates a logging layer that records timing and errors only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a logging layer whose spans are labelled with `network`.
    pub fn for_network(network: impl Into<Arc<str>>) -> Self {
        Self {
            network: Some(network.into()),
            log_payloads: false,
        }
    }

    /// Enables trace-level logging of request and response packets.
    pub fn with_payload_logging(mut self) -> Self {
        self.log_payloads = true;
        self
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, service: S) -> Self::Service {
        LoggingService {
            service,
            network: self.network.clone(),
            log_payloads: self.log_payloads,
        }
    }
}

/// A Tower service that logs RPC requests and responses.
#[derive(Clone, Debug)]
pub struct LoggingService<S> {
    service: S,
    network: Option<Arc<str>>,
    log_payloads: bool,
}

impl<S> tower::Service<RequestPacket> for LoggingService<S>
where
    S: tower::Service<RequestPacket, Response = ResponsePacket, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = ResponsePacket;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: RequestPacket) -> Self::Future {
        let log_payloads = self.log_payloads;
        let mut service = self.service.clone();
        let method = extract_method(&request);

        let span = tracing::debug_span!(
            "rpc_call",
            network = self.network.as_deref().unwrap_or("unknown"),
            method = %method,
            duration_ms = tracing::field::Empty,
        );

        Box::pin(
            async move {
                let start = Instant::now();

                if log_payloads {
                    trace!(request = ?request, "RPC request");
                } else {
                    debug!("RPC request: {method}");
                }

                let result = service.call(request).await;
                let duration = start.elapsed();

                tracing::Span::current().record("duration_ms", duration.as_millis() as u64);

                match &result {
                    Ok(response) if log_payloads => {
                        trace!(response = ?response, "RPC response");
                    }
                    Ok(_) => {
                        debug!(duration_ms = %duration.as_millis(), "RPC response: {method}");
                    }
                    Err(e) => {
                        warn!(
                            error = %e,
                            duration_ms = %duration.as_millis(),
                            "RPC error: {method}"
                        );
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

/// Extract the RPC method name from a request packet.
fn extract_method(request: &RequestPacket) -> String {
    match request {
        RequestPacket::Single(req) => req.method().to_string(),
        RequestPacket::Batch(reqs) => match reqs.as_slice() {
            [] => "batch(empty)".to_string(),
            [only] => only.method().to_string(),
            many => format!("batch({} calls)", many.len()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_layer_default() {
        let layer = LoggingLayer::new();
        assert!(layer.network.is_none());
        assert!(!layer.log_payloads);
    }

    #[test]
    fn test_logging_layer_for_network() {
        let layer = LoggingLayer::for_network("base").with_payload_logging();
        assert_eq!(layer.network.as_deref(), Some("base"));
        assert!(layer.log_payloads);
    }
}
