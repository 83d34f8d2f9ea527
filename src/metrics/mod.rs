//! Prometheus metrics for the delivery engine:
//! - Request metrics (submitted, completed, transport failures by service)
//! - Encryption metrics (payloads encrypted)
//! - Send metrics (batch calls, aggregate failures)

use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "ara_push";

lazy_static! {
    // ============================================================================
    // Request Metrics
    // ============================================================================

    /// Total wire requests submitted to the transport, by service class
    pub static ref REQUESTS_SUBMITTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_requests_submitted_total", METRIC_PREFIX),
        "Total wire requests submitted to the transport",
        &["service"]
    ).unwrap();

    /// Total requests that completed with an HTTP response
    pub static ref REQUESTS_COMPLETED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_requests_completed_total", METRIC_PREFIX),
        "Total requests that completed with an HTTP response"
    ).unwrap();

    /// Total requests lost to transport-level failures
    pub static ref TRANSPORT_FAILURES_TOTAL: IntCounter = register_int_counter!(
        format!("{}_transport_failures_total", METRIC_PREFIX),
        "Total requests that failed at the transport level"
    ).unwrap();

    // ============================================================================
    // Encryption Metrics
    // ============================================================================

    /// Total payloads encrypted
    pub static ref PAYLOADS_ENCRYPTED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_payloads_encrypted_total", METRIC_PREFIX),
        "Total notification payloads encrypted"
    ).unwrap();

    // ============================================================================
    // Send Metrics
    // ============================================================================

    /// Total send calls, by overall outcome
    pub static ref SENDS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_sends_total", METRIC_PREFIX),
        "Total send calls by aggregate outcome",
        &["outcome"]
    ).unwrap();
}

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}
