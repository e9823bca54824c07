//! Topic and service transport between nodes.
//!
//! A topic is a TCP endpoint where one `Publisher` broadcasts messages to any
//! number of `Subscriber`s. A service is a TCP endpoint where a
//! `ServiceServer` answers each request of a `ServiceClient` with exactly one
//! response. Both carry `Codec` messages with the length-prefixed framing
//! from `framing`.

pub mod error;
pub mod framing;
pub mod service;
pub mod topic;

pub use error::ComError;
pub use service::{ServiceClient, ServiceServer};
pub use topic::{Publisher, SUBSCRIBER_BACKLOG, Subscriber};
