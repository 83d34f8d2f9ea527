//! Batch request construction for the legacy GCM aggregator.

use serde::Serialize;

use crate::error::{PushError, Result};
use crate::notification::{registration_id, Notification};

use super::PushRequest;

/// Fixed send URL for the batch aggregator.
pub const GCM_SEND_URL: &str = "https://android.googleapis.com/gcm/send";

/// Maximum recipient identifiers per batch request.
pub const MAX_BATCH_RECIPIENTS: usize = 1000;

#[derive(Serialize)]
struct BatchBody<'a> {
    registration_ids: Vec<&'a str>,
}

/// Build batch requests for GCM-classified notifications.
///
/// Recipient identifiers (trailing endpoint path segments) are grouped into
/// consecutive chunks of at most [`MAX_BATCH_RECIPIENTS`], one request per
/// chunk, input order preserved. Fails with `MissingCredential` when the
/// API key is empty and there is anything to send.
pub fn build_batches(notifications: &[Notification], api_key: &str) -> Result<Vec<PushRequest>> {
    if notifications.is_empty() {
        return Ok(Vec::new());
    }
    if api_key.is_empty() {
        return Err(PushError::MissingCredential);
    }

    let ids: Vec<&str> = notifications
        .iter()
        .map(|notification| registration_id(&notification.endpoint))
        .collect();

    let mut requests = Vec::with_capacity(ids.len().div_ceil(MAX_BATCH_RECIPIENTS));
    for chunk in ids.chunks(MAX_BATCH_RECIPIENTS) {
        let body = serde_json::to_vec(&BatchBody {
            registration_ids: chunk.to_vec(),
        })?;

        requests.push(PushRequest {
            url: GCM_SEND_URL.to_string(),
            headers: vec![
                ("Authorization", format!("key={api_key}")),
                ("Content-Type", "application/json".to_string()),
                ("Content-Length", body.len().to_string()),
            ],
            body,
        });
    }

    tracing::debug!(
        recipients = ids.len(),
        batches = requests.len(),
        "Built GCM batch requests"
    );

    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gcm_notification(id: &str) -> Notification {
        Notification::new(format!("https://android.googleapis.com/gcm/send/{id}"))
    }

    #[test]
    fn test_empty_input_builds_nothing() {
        let requests = build_batches(&[], "").expect("empty input needs no credential");
        assert!(requests.is_empty());
    }

    #[test]
    fn test_missing_credential() {
        let notifications = vec![gcm_notification("reg-1")];
        let err = build_batches(&notifications, "").unwrap_err();
        assert!(matches!(err, PushError::MissingCredential));
    }

    #[test]
    fn test_single_batch_shape() {
        let notifications = vec![gcm_notification("reg-1"), gcm_notification("reg-2")];
        let requests = build_batches(&notifications, "api-key").expect("build");

        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.url, GCM_SEND_URL);
        assert_eq!(request.header("Authorization"), Some("key=api-key"));
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(
            request.header("Content-Length"),
            Some(request.body.len().to_string().as_str())
        );

        let body: serde_json::Value = serde_json::from_slice(&request.body).expect("json body");
        assert_eq!(body["registration_ids"], serde_json::json!(["reg-1", "reg-2"]));
    }

    #[test]
    fn test_chunking_preserves_order() {
        let notifications: Vec<_> = (0..2500).map(|i| gcm_notification(&format!("reg-{i}"))).collect();
        let requests = build_batches(&notifications, "api-key").expect("build");

        // ceil(2500 / 1000) batches
        assert_eq!(requests.len(), 3);

        let mut all_ids = Vec::new();
        for request in &requests {
            let body: serde_json::Value = serde_json::from_slice(&request.body).expect("json body");
            let ids = body["registration_ids"].as_array().expect("array");
            assert!(ids.len() <= MAX_BATCH_RECIPIENTS);
            all_ids.extend(ids.iter().map(|v| v.as_str().unwrap().to_string()));
        }

        let expected: Vec<String> = (0..2500).map(|i| format!("reg-{i}")).collect();
        assert_eq!(all_ids, expected);
        assert_eq!(requests[0].body.len(), requests[0].header("Content-Length").unwrap().parse::<usize>().unwrap());
    }
}
