//! Top-level push client.
//!
//! Ties the pipeline together: classify the batch, build wire requests per
//! service class, dispatch them through the transport, and aggregate the
//! outcomes into one `SendResult`.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{ClientConfig, Settings};
use crate::delivery::{aggregate, Dispatcher, SendResult};
use crate::error::{PushError, Result};
use crate::metrics::{REQUESTS_SUBMITTED_TOTAL, SENDS_TOTAL};
use crate::notification::{classify, Notification, ServiceClass};
use crate::request::{self, PushRequest};
use crate::transport::{HttpTransport, PushTransport};

/// Client for sending encrypted push notifications.
///
/// The transport is injected, so embedding services and tests can substitute
/// their own; [`PushClient::from_settings`] wires up the production HTTP
/// transport.
pub struct PushClient {
    config: ClientConfig,
    dispatcher: Dispatcher,
}

impl PushClient {
    /// Create a client over an injected transport.
    pub fn new(config: ClientConfig, transport: Arc<dyn PushTransport>) -> Self {
        Self {
            config,
            dispatcher: Dispatcher::new(transport),
        }
    }

    /// Create a client with the production HTTP transport configured from
    /// settings (uniform request timeout, GCM credential, default TTL).
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let config = ClientConfig::from(settings);
        let transport = HttpTransport::new(Duration::from_secs(config.request_timeout))?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    /// Send a single notification.
    pub async fn send(&self, notification: Notification) -> Result<SendResult> {
        self.send_batch(vec![notification]).await
    }

    /// Send a batch of notifications and aggregate all outcomes into one
    /// result.
    ///
    /// Pre-flight checks run before anything touches the network: a batch
    /// containing any GCM-classified endpoint fails with `MissingCredential`
    /// when no API key is configured, and an invalid recipient key on any
    /// notification aborts the whole call.
    #[tracing::instrument(
        name = "client.send_batch",
        skip(self, notifications),
        fields(notification_count = notifications.len())
    )]
    pub async fn send_batch(&self, notifications: Vec<Notification>) -> Result<SendResult> {
        if notifications.is_empty() {
            return Ok(SendResult::ok());
        }

        let partitioned = classify(notifications);
        let requests = self.build_requests(&partitioned.gcm, &partitioned.web_push)?;

        let outcomes = self.dispatcher.dispatch(requests).await;
        let result = aggregate(&outcomes);

        SENDS_TOTAL
            .with_label_values(&[if result.success { "success" } else { "failure" }])
            .inc();
        tracing::info!(
            requests = outcomes.len(),
            success = result.success,
            status_code = result.status_code,
            "Send completed"
        );

        Ok(result)
    }

    /// Build all wire requests for one send call, GCM batches first.
    fn build_requests(
        &self,
        gcm: &[Notification],
        web_push: &[Notification],
    ) -> Result<Vec<PushRequest>> {
        let mut requests = Vec::new();

        if !gcm.is_empty() {
            let api_key = self
                .config
                .gcm_api_key
                .as_deref()
                .filter(|key| !key.is_empty())
                .ok_or(PushError::MissingCredential)?;

            let batches = request::build_batches(gcm, api_key)?;
            REQUESTS_SUBMITTED_TOTAL
                .with_label_values(&[ServiceClass::GcmBatch.as_str()])
                .inc_by(batches.len() as u64);
            requests.extend(batches);
        }

        for notification in web_push {
            requests.push(request::build_request(notification, self.config.default_ttl)?);
        }
        if !web_push.is_empty() {
            REQUESTS_SUBMITTED_TOTAL
                .with_label_values(&[ServiceClass::WebPush.as_str()])
                .inc_by(web_push.len() as u64);
        }

        Ok(requests)
    }
}
