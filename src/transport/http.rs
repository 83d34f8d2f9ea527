//! HTTP transport over a shared `reqwest` client.
//!
//! Each submitted request runs as its own task, so requests overlap without
//! the dispatcher waiting on any of them; `drain` joins the in-flight set.
//! The per-request timeout is configured once on the client and applied
//! uniformly.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::metrics::{REQUESTS_COMPLETED_TOTAL, TRANSPORT_FAILURES_TOTAL};
use crate::request::PushRequest;

use super::{DispatchOutcome, PushTransport};

/// Production transport backed by `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
    inflight: Mutex<Vec<JoinHandle<DispatchOutcome>>>,
}

impl HttpTransport {
    /// Create a transport with the given uniform per-request timeout.
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            client,
            inflight: Mutex::new(Vec::new()),
        })
    }

    async fn execute(
        client: reqwest::Client,
        index: usize,
        request: PushRequest,
    ) -> DispatchOutcome {
        let PushRequest { url, headers, body } = request;

        let mut builder = client.post(&url);
        for (name, value) in &headers {
            builder = builder.header(*name, value.as_str());
        }

        match builder.body(body).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let headers = response
                    .headers()
                    .iter()
                    .filter_map(|(name, value)| {
                        value
                            .to_str()
                            .ok()
                            .map(|v| (name.as_str().to_string(), v.to_string()))
                    })
                    .collect();

                REQUESTS_COMPLETED_TOTAL.inc();
                tracing::debug!(request_index = index, status = status, "Push request completed");
                DispatchOutcome::completed(index, status, headers)
            }
            Err(error) => {
                TRANSPORT_FAILURES_TOTAL.inc();
                tracing::warn!(
                    request_index = index,
                    url = %url,
                    error = %error,
                    "Push request failed at transport level"
                );
                DispatchOutcome::failed(index)
            }
        }
    }
}

#[async_trait]
impl PushTransport for HttpTransport {
    async fn submit(&self, index: usize, request: PushRequest) {
        let handle = tokio::spawn(Self::execute(self.client.clone(), index, request));
        self.inflight.lock().await.push(handle);
    }

    async fn drain(&self) -> Vec<DispatchOutcome> {
        let handles = std::mem::take(&mut *self.inflight.lock().await);

        join_all(handles)
            .await
            .into_iter()
            .enumerate()
            .map(|(position, joined)| match joined {
                Ok(outcome) => outcome,
                Err(join_error) => {
                    // Task panic or cancellation counts as a lost request.
                    TRANSPORT_FAILURES_TOTAL.inc();
                    tracing::error!(
                        request_index = position,
                        error = %join_error,
                        "Push request task failed to complete"
                    );
                    DispatchOutcome::failed(position)
                }
            })
            .collect()
    }
}
