//! Network layer - user list fetches and status updates
//!
//! The Network actor receives commands, runs them against the configured
//! user source and sends back responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::HttpUserSource;
