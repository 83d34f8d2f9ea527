use thiserror::Error;

/// Errors surfaced by the delivery engine.
///
/// Transport-level failures and non-2xx responses are deliberately *not*
/// represented here: they are carried as data on `DispatchOutcome` and
/// `SendResult` so a single bad response never turns into an exception path.
#[derive(Error, Debug)]
pub enum PushError {
    /// A GCM-classified endpoint was supplied but no API key is configured.
    /// Raised pre-flight, before any request is dispatched.
    #[error("missing GCM API key: batch endpoints require a configured credential")]
    MissingCredential,

    /// The recipient public key did not decode to a valid point on P-256.
    #[error("invalid recipient public key: {0}")]
    InvalidKey(String),

    /// A notification carries a payload but no recipient public key,
    /// so the payload cannot be encrypted.
    #[error("notification has a payload but no recipient public key")]
    MissingRecipientKey,

    /// AEAD encryption failed. Does not happen with a well-formed key and IV.
    #[error("payload encryption failed")]
    Encryption,

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The HTTP client could not be constructed (TLS backend init and
    /// similar). Request-time failures never take this path.
    #[error("failed to initialize HTTP transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PushError>;
