//! Assistant setup - environment bootstrapper for the crypto trading
//! assistant.
//!
//! One run takes a machine with a Python 3 interpreter to a ready-to-run
//! assistant workspace:
//!
//! 1. verify a supported interpreter is available,
//! 2. install the pinned Python dependency manifest tier by tier,
//! 3. create the working directories,
//! 4. write the default `config/config.json` if it does not exist,
//! 5. smoke test the imports and the configuration document.
//!
//! # Architecture
//!
//! - [`domain`] - Packages, manifest, layout, the configuration document,
//!   and run reports
//! - [`port`] - Command runner and progress traits
//! - [`application`] - The bootstrap steps and configuration readiness
//! - [`adapter`] - The CLI and the real process runner
//! - [`infrastructure`] - Settings, logging, and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use assistant_setup::adapter::outbound::process::SystemRunner;
//! use assistant_setup::application::{BootstrapOptions, Bootstrapper};
//! use assistant_setup::domain::Layout;
//! use assistant_setup::port::LogProgress;
//!
//! let report = Bootstrapper::new(
//!     SystemRunner,
//!     LogProgress,
//!     Layout::new("."),
//!     BootstrapOptions::default(),
//! )
//! .run()?;
//! println!("{} packages processed", report.installs.packages.len());
//! # Ok::<(), assistant_setup::error::Error>(())
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
