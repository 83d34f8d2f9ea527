//! Request dispatch and outcome aggregation.
//!
//! The dispatcher pushes built requests through the transport and collects
//! ordered outcomes; the aggregator reduces those outcomes into the single
//! `SendResult` callers see.

mod aggregate;
mod dispatcher;

pub use aggregate::{aggregate, SendResult};
pub use dispatcher::Dispatcher;
