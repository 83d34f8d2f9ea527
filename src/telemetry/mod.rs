//! Tracing initialization for embedding applications.
//!
//! The engine itself only emits `tracing` events; hosts that already install
//! their own subscriber can skip this module entirely.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber with console output.
///
/// Filtering follows `RUST_LOG` when set, defaulting to `info`. Calling this
/// twice panics (a global subscriber can only be installed once), so hosts
/// with their own tracing setup should not call it.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Tracing initialized");
}
