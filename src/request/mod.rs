//! Wire-level request construction.
//!
//! Builders turn classified notifications into transport-ready requests:
//! `gcm` groups recipient identifiers into bounded batches for the legacy
//! aggregator, `webpush` builds one encrypted request per endpoint.

pub mod gcm;
pub mod webpush;

pub use gcm::{build_batches, GCM_SEND_URL, MAX_BATCH_RECIPIENTS};
pub use webpush::build_request;

/// A transport-ready POST request.
#[derive(Debug, Clone)]
pub struct PushRequest {
    /// Target URL.
    pub url: String,
    /// Header name/value pairs, applied in order.
    pub headers: Vec<(&'static str, String)>,
    /// Request body bytes.
    pub body: Vec<u8>,
}

impl PushRequest {
    /// Look up a header value by name (case-sensitive, first match).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header_name, _)| *header_name == name)
            .map(|(_, value)| value.as_str())
    }
}
