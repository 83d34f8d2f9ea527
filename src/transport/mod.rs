//! Transport abstraction for issuing push requests.
//!
//! The engine never talks HTTP directly: it submits requests through a
//! [`PushTransport`] and later drains the captured outcomes. The split lets
//! one implementation fire requests concurrently while another defers all
//! I/O until drain, and lets tests substitute a recording fake.

mod http;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::request::PushRequest;

pub use http::HttpTransport;

/// Outcome of one submitted request.
///
/// A transport-level failure (connect error, timeout) is recorded as
/// `transport_failed = true` with no status or headers; it is never raised
/// as an error past the transport.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    /// Index of the request in submission order.
    pub request_index: usize,
    /// HTTP status code, when a response was obtained.
    pub status: Option<u16>,
    /// Response headers, when a response was obtained.
    pub headers: Option<HashMap<String, String>>,
    /// True when the transport failed before obtaining any response.
    pub transport_failed: bool,
}

impl DispatchOutcome {
    /// Outcome for a request that completed with an HTTP response.
    pub fn completed(
        request_index: usize,
        status: u16,
        headers: HashMap<String, String>,
    ) -> Self {
        Self {
            request_index,
            status: Some(status),
            headers: Some(headers),
            transport_failed: false,
        }
    }

    /// Outcome for a request lost to a transport-level failure.
    pub fn failed(request_index: usize) -> Self {
        Self {
            request_index,
            status: None,
            headers: None,
            transport_failed: true,
        }
    }
}

/// An injectable client capable of issuing POST requests.
///
/// `submit` must not wait for a response; the actual I/O may overlap other
/// submissions or be deferred entirely. `drain` blocks until every submitted
/// request has completed and returns the outcomes. A dispatch cycle is
/// submit* then exactly one drain; instances are not meant to be shared by
/// concurrent dispatch cycles.
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Submit a request for delivery, tagged with its dispatch index.
    async fn submit(&self, index: usize, request: PushRequest);

    /// Wait for all submitted requests and return their outcomes.
    async fn drain(&self) -> Vec<DispatchOutcome>;
}
