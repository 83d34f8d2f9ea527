use serde::{Deserialize, Serialize};

use super::Notification;

/// Endpoint prefix identifying the legacy GCM aggregator.
pub const GCM_ENDPOINT_PREFIX: &str = "https://android.googleapis.com/gcm/send";

/// The push service a given endpoint belongs to.
///
/// Exactly one class per endpoint; anything not matching a known prefix is
/// delivered as standard web push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceClass {
    /// Legacy GCM aggregator: batched `registration_ids` requests.
    GcmBatch,
    /// Standard web push: one encrypted request per endpoint.
    WebPush,
}

/// Prefixes tested in priority order; first match assigns the class.
const SERVICE_PREFIXES: &[(ServiceClass, &str)] = &[(ServiceClass::GcmBatch, GCM_ENDPOINT_PREFIX)];

impl ServiceClass {
    /// Classify a single endpoint URL.
    pub fn of(endpoint: &str) -> ServiceClass {
        for (class, prefix) in SERVICE_PREFIXES {
            if endpoint.starts_with(prefix) {
                return *class;
            }
        }
        ServiceClass::WebPush
    }

    /// Label used in metrics and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceClass::GcmBatch => "gcm",
            ServiceClass::WebPush => "webpush",
        }
    }
}

impl std::fmt::Display for ServiceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notifications partitioned by service class, input order preserved
/// inside each bucket. Dispatch iterates the GCM bucket first.
#[derive(Debug, Default)]
pub struct Partitioned {
    pub gcm: Vec<Notification>,
    pub web_push: Vec<Notification>,
}

/// Stable partition of notifications by endpoint service class.
pub fn classify(notifications: Vec<Notification>) -> Partitioned {
    let mut partitioned = Partitioned::default();

    for notification in notifications {
        match ServiceClass::of(&notification.endpoint) {
            ServiceClass::GcmBatch => partitioned.gcm.push(notification),
            ServiceClass::WebPush => partitioned.web_push.push(notification),
        }
    }

    tracing::debug!(
        gcm = partitioned.gcm.len(),
        web_push = partitioned.web_push.len(),
        "Classified notification endpoints"
    );

    partitioned
}

/// Recipient identifier for the batch aggregator: the trailing path segment
/// of the endpoint URL.
pub fn registration_id(endpoint: &str) -> &str {
    endpoint.rsplit('/').next().unwrap_or(endpoint)
}
