//! Per-endpoint request construction for standard web push.
//!
//! Uses the `aesgcm128` draft content encoding: the encrypted body travels
//! as `application/octet-stream`, with the ephemeral key and salt carried in
//! the `Encryption-Key` / `Encryption` headers.

use crate::crypto;
use crate::error::{PushError, Result};
use crate::notification::Notification;

use super::PushRequest;

/// Build one request for a standard web push endpoint.
///
/// With a payload, the crypto engine encrypts it for the notification's
/// recipient key (`MissingRecipientKey` when the key is absent). Without a
/// payload the request is a bare wake-up with an empty body. A `ttl` adds
/// the `TTL` header in both cases.
pub fn build_request(notification: &Notification, ttl: Option<u32>) -> Result<PushRequest> {
    let mut headers = Vec::new();

    let body = match &notification.payload {
        Some(payload) => {
            let recipient_key = notification
                .recipient_key
                .as_deref()
                .ok_or(PushError::MissingRecipientKey)?;
            let message = crypto::encrypt(recipient_key, payload)?;

            headers.push(("Content-Type", "application/octet-stream".to_string()));
            headers.push(("Content-Encoding", "aesgcm128".to_string()));
            headers.push((
                "Encryption-Key",
                format!("keyid=p256dh;dh={}", message.ephemeral_key_base64()),
            ));
            headers.push((
                "Encryption",
                format!("keyid=p256dh;salt={}", message.salt_base64()),
            ));
            headers.push(("Content-Length", message.ciphertext.len().to_string()));
            message.ciphertext
        }
        None => {
            headers.push(("Content-Length", "0".to_string()));
            Vec::new()
        }
    };

    if let Some(ttl) = ttl {
        headers.push(("TTL", ttl.to_string()));
    }

    Ok(PushRequest {
        url: notification.endpoint.clone(),
        headers,
        body,
    })
}
