//! Application services (use cases).
//!
//! These services drive the domain through the ports to implement the
//! bootstrap sequence and the configuration checks.

pub mod bootstrapper;
pub mod document;
pub mod installer;
pub mod readiness;
pub mod runtime;
pub mod smoke;
pub mod workspace;

pub use bootstrapper::{BootstrapOptions, Bootstrapper};
