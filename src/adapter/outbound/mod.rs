//! Outbound adapters implementing the driven ports.

pub mod process;
