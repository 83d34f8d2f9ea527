// Infrastructure layer (shared components)
pub mod config;
pub mod error;
pub mod metrics;
pub mod telemetry;

// Domain layer (delivery pipeline)
pub mod crypto;
pub mod notification;
pub mod request;

// Application layer
pub mod client;
pub mod delivery;
pub mod transport;
