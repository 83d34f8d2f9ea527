use serde::{Deserialize, Serialize};

/// A single push notification to deliver.
///
/// One `Notification` is one logical message: the subscriber's push endpoint,
/// an optional payload, and (when a payload is present) the subscriber's
/// base64-encoded P-256 public key used to encrypt it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Push service endpoint URL.
    pub endpoint: String,
    /// Raw payload bytes; delivered encrypted. None sends a bare wake-up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Vec<u8>>,
    /// Subscriber's `p256dh` public key (base64). Required with a payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_key: Option<String>,
}

impl Notification {
    /// Create a payload-less notification for an endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            payload: None,
            recipient_key: None,
        }
    }

    /// Create a builder for an endpoint.
    pub fn builder(endpoint: impl Into<String>) -> NotificationBuilder {
        NotificationBuilder::new(endpoint)
    }
}

/// Builder for notifications
#[derive(Debug, Clone)]
pub struct NotificationBuilder {
    endpoint: String,
    payload: Option<Vec<u8>>,
    recipient_key: Option<String>,
}

impl NotificationBuilder {
    /// Create a new notification builder
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            payload: None,
            recipient_key: None,
        }
    }

    /// Set the payload bytes
    pub fn payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Set the recipient's base64-encoded P-256 public key
    pub fn recipient_key(mut self, key: impl Into<String>) -> Self {
        self.recipient_key = Some(key.into());
        self
    }

    /// Build the notification
    pub fn build(self) -> Notification {
        Notification {
            endpoint: self.endpoint,
            payload: self.payload,
            recipient_key: self.recipient_key,
        }
    }
}
