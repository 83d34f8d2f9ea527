//! Payload encryption for web push delivery.
//!
//! Each payload is encrypted end-to-end for exactly one recipient:
//! a fresh ephemeral P-256 key pair is agreed against the recipient's
//! `p256dh` public key (ECDH), the shared X coordinate is run through
//! HMAC-SHA256 with a random 16-byte salt, and the first 16 bytes of the
//! digest key AES-128-GCM with a random 128-bit IV.
//!
//! Nothing is retained between calls; every message gets its own ephemeral
//! key, salt, and IV.

use aes_gcm::aead::generic_array::typenum::U16;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{aes::Aes128, AesGcm, Nonce};
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use hmac::{Hmac, Mac};
use p256::ecdh::EphemeralSecret;
use p256::elliptic_curve::rand_core::OsRng;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::PublicKey;
use rand::RngCore;
use sha2::Sha256;

use crate::error::{PushError, Result};
use crate::metrics::PAYLOADS_ENCRYPTED_TOTAL;

type HmacSha256 = Hmac<Sha256>;

/// AES-128-GCM with the 128-bit IV used by the `aesgcm128` content encoding.
type Aes128GcmLongIv = AesGcm<Aes128, U16>;

/// Salt length in bytes.
const SALT_LENGTH: usize = 16;
/// IV length in bytes (the `aesgcm128` encoding uses a full 128-bit IV).
const IV_LENGTH: usize = 16;
/// AES-128 key length in bytes.
const KEY_LENGTH: usize = 16;

/// An encrypted payload together with the key-agreement parameters the
/// receiver needs to derive the same content-encryption key.
///
/// The wire format carries the ephemeral public key and salt in the
/// `Encryption-Key` / `Encryption` headers; the IV stays on this struct for
/// receiving-side derivation and round-trip verification.
#[derive(Debug, Clone)]
pub struct EncryptedMessage {
    /// Uncompressed SEC1 point (65 bytes: 0x04 || x || y).
    pub ephemeral_public_key: Vec<u8>,
    /// Random per-message HMAC salt.
    pub salt: [u8; SALT_LENGTH],
    /// Random per-message AES-GCM IV.
    pub iv: [u8; IV_LENGTH],
    /// AES-128-GCM ciphertext with the 16-byte authentication tag appended.
    pub ciphertext: Vec<u8>,
}

impl EncryptedMessage {
    /// Ephemeral public key encoded for the `Encryption-Key` header.
    pub fn ephemeral_key_base64(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.ephemeral_public_key)
    }

    /// Salt encoded for the `Encryption` header.
    pub fn salt_base64(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.salt)
    }
}

/// Encrypt `payload` for the recipient identified by `recipient_key`,
/// a base64-encoded uncompressed P-256 public point.
///
/// Fails with `PushError::InvalidKey` when the key does not decode to a
/// valid point on the curve. Thread-safe; consumes OS randomness only.
pub fn encrypt(recipient_key: &str, payload: &[u8]) -> Result<EncryptedMessage> {
    let recipient_point = decode_recipient_key(recipient_key)?;

    let ephemeral = EphemeralSecret::random(&mut OsRng);
    let ephemeral_public_key = ephemeral
        .public_key()
        .to_encoded_point(false)
        .as_bytes()
        .to_vec();

    // ECDH shared secret: the X coordinate of the scalar product,
    // 32 bytes big-endian.
    let shared = ephemeral.diffie_hellman(&recipient_point);

    let mut salt = [0u8; SALT_LENGTH];
    rand::rng().fill_bytes(&mut salt);

    // CEK = first 16 bytes of HMAC-SHA256(key = salt, message = shared X)
    let mut mac = <HmacSha256 as Mac>::new_from_slice(&salt).map_err(|_| PushError::Encryption)?;
    mac.update(shared.raw_secret_bytes());
    let digest = mac.finalize().into_bytes();

    let mut iv = [0u8; IV_LENGTH];
    rand::rng().fill_bytes(&mut iv);

    let cipher =
        Aes128GcmLongIv::new_from_slice(&digest[..KEY_LENGTH]).map_err(|_| PushError::Encryption)?;
    let ciphertext = cipher
        .encrypt(Nonce::<U16>::from_slice(&iv), payload)
        .map_err(|_| PushError::Encryption)?;

    PAYLOADS_ENCRYPTED_TOTAL.inc();
    tracing::debug!(
        payload_bytes = payload.len(),
        ciphertext_bytes = ciphertext.len(),
        "Encrypted push payload"
    );

    Ok(EncryptedMessage {
        ephemeral_public_key,
        salt,
        iv,
        ciphertext,
    })
}

/// Decode and validate a recipient public key.
///
/// Browsers hand out `p256dh` keys in the URL-safe alphabet without padding;
/// keys copied through other systems often arrive standard-encoded. Both are
/// accepted. The decoded bytes must be a valid SEC1 point on P-256.
fn decode_recipient_key(recipient_key: &str) -> Result<PublicKey> {
    let trimmed = recipient_key.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD.decode(recipient_key))
        .map_err(|e| PushError::InvalidKey(format!("not valid base64: {e}")))?;

    PublicKey::from_sec1_bytes(&bytes)
        .map_err(|_| PushError::InvalidKey("not a point on the P-256 curve".to_string()))
}
