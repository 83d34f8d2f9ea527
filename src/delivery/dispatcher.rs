use std::sync::Arc;

use crate::request::PushRequest;
use crate::transport::{DispatchOutcome, PushTransport};

/// Dispatches wire requests through the injected transport.
///
/// All requests are submitted before anything is waited on, then the
/// transport is drained exactly once. Transport failures come back as
/// sentinel outcomes, never as errors.
pub struct Dispatcher {
    transport: Arc<dyn PushTransport>,
}

impl Dispatcher {
    /// Create a dispatcher over a transport.
    pub fn new(transport: Arc<dyn PushTransport>) -> Self {
        Self { transport }
    }

    /// Send all requests and collect one outcome per request,
    /// ordered by request index.
    #[tracing::instrument(
        name = "dispatcher.dispatch",
        skip(self, requests),
        fields(request_count = requests.len())
    )]
    pub async fn dispatch(&self, requests: Vec<PushRequest>) -> Vec<DispatchOutcome> {
        if requests.is_empty() {
            return Vec::new();
        }

        for (index, request) in requests.into_iter().enumerate() {
            self.transport.submit(index, request).await;
        }

        let mut outcomes = self.transport.drain().await;
        outcomes.sort_by_key(|outcome| outcome.request_index);

        tracing::debug!(
            completed = outcomes.iter().filter(|o| !o.transport_failed).count(),
            transport_failed = outcomes.iter().filter(|o| o.transport_failed).count(),
            "Dispatch cycle finished"
        );

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Records submissions and replies from a canned script.
    struct ScriptedTransport {
        submitted: Mutex<Vec<PushRequest>>,
        statuses: Vec<Option<u16>>,
        drains: Mutex<usize>,
    }

    impl ScriptedTransport {
        fn new(statuses: Vec<Option<u16>>) -> Self {
            Self {
                submitted: Mutex::new(Vec::new()),
                statuses,
                drains: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl PushTransport for ScriptedTransport {
        async fn submit(&self, _index: usize, request: PushRequest) {
            self.submitted.lock().unwrap().push(request);
        }

        async fn drain(&self) -> Vec<DispatchOutcome> {
            *self.drains.lock().unwrap() += 1;
            // Reverse completion order to exercise outcome re-ordering.
            self.statuses
                .iter()
                .enumerate()
                .rev()
                .map(|(index, status)| match status {
                    Some(code) => DispatchOutcome::completed(index, *code, HashMap::new()),
                    None => DispatchOutcome::failed(index),
                })
                .collect()
        }
    }

    fn request(url: &str) -> PushRequest {
        PushRequest {
            url: url.to_string(),
            headers: vec![("Content-Length", "0".to_string())],
            body: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_dispatch_preserves_request_order() {
        let transport = Arc::new(ScriptedTransport::new(vec![Some(200), Some(201), Some(404)]));
        let dispatcher = Dispatcher::new(transport.clone());

        let outcomes = dispatcher
            .dispatch(vec![request("a"), request("b"), request("c")])
            .await;

        let indexes: Vec<_> = outcomes.iter().map(|o| o.request_index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
        assert_eq!(outcomes[2].status, Some(404));

        let submitted = transport.submitted.lock().unwrap();
        let urls: Vec<_> = submitted.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_transport_failure_is_a_sentinel_outcome() {
        let transport = Arc::new(ScriptedTransport::new(vec![Some(200), None]));
        let dispatcher = Dispatcher::new(transport);

        let outcomes = dispatcher.dispatch(vec![request("a"), request("b")]).await;

        assert!(!outcomes[0].transport_failed);
        assert!(outcomes[1].transport_failed);
        assert!(outcomes[1].status.is_none());
    }

    #[tokio::test]
    async fn test_drain_runs_once_per_dispatch() {
        let transport = Arc::new(ScriptedTransport::new(vec![Some(200)]));
        let dispatcher = Dispatcher::new(transport.clone());

        dispatcher.dispatch(vec![request("a")]).await;
        assert_eq!(*transport.drains.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_dispatch_skips_transport() {
        let transport = Arc::new(ScriptedTransport::new(Vec::new()));
        let dispatcher = Dispatcher::new(transport.clone());

        let outcomes = dispatcher.dispatch(Vec::new()).await;
        assert!(outcomes.is_empty());
        assert_eq!(*transport.drains.lock().unwrap(), 0);
    }
}
