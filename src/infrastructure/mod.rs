//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! business logic: settings, logging, and wiring the real command runner.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root
//! - [`config`] - Settings loading, validation, and logging setup

pub mod bootstrap;
pub mod config;
