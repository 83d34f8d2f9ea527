//! Notification types and endpoint classification.
//!
//! A `Notification` is the caller-facing input: endpoint URL plus optional
//! payload and recipient key. `classify` partitions a batch by which push
//! service each endpoint belongs to, which decides how the wire request is
//! built (`crate::request`).

mod classify;
mod types;

pub use classify::{
    classify, registration_id, Partitioned, ServiceClass, GCM_ENDPOINT_PREFIX,
};
pub use types::{Notification, NotificationBuilder};
