//! Adapters (hexagonal edges).
//!
//! - [`inbound`] drives the application: the command-line interface.
//! - [`outbound`] is driven by it: real subprocess execution.

pub mod inbound;
pub mod outbound;
