//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! The bootstrapper never touches the host directly: subprocesses go through
//! [`CommandRunner`] and progress goes out through [`Progress`]. The binary
//! wires real adapters; tests wire scripted ones.

pub mod outbound;

pub use outbound::progress::{Event, LogProgress, NullProgress, Progress, Step};
pub use outbound::runner::{CommandOutput, CommandRunner};
