//! Progress reporting port.
//!
//! The bootstrapper emits an [`Event`] at every step boundary and for every
//! package install. The CLI renders them as spinners and status lines;
//! [`LogProgress`] forwards them to `tracing`.

use std::path::PathBuf;

use crate::domain::{
    ConfigStatus, DirectoryStatus, InstallOutcome, InstallStrategy, Package, RuntimeInfo, Tier,
};

/// Top-level bootstrap steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Runtime,
    Install,
    Workspace,
    SmokeTest,
}

impl Step {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Runtime => "Runtime",
            Self::Install => "Dependencies",
            Self::Workspace => "Workspace",
            Self::SmokeTest => "Smoke test",
        }
    }
}

/// Events emitted while bootstrapping.
#[derive(Debug, Clone)]
pub enum Event {
    /// A step is starting.
    StepStarted(Step),
    /// An interpreter satisfying the requirement was found.
    RuntimeFound(RuntimeInfo),
    /// A tier is about to be installed.
    TierStarted { tier: Tier, packages: usize },
    /// An install invocation is about to run.
    InstallStarted {
        package: Package,
        strategy: InstallStrategy,
    },
    /// A package reached its final outcome.
    InstallFinished {
        package: Package,
        outcome: InstallOutcome,
    },
    /// A working directory was checked.
    Directory {
        path: PathBuf,
        status: DirectoryStatus,
    },
    /// The configuration document was checked.
    Config { path: PathBuf, status: ConfigStatus },
    /// A module imported successfully during the smoke test.
    Imported { module: &'static str },
    /// The configuration document parsed during the smoke test.
    ConfigParsed { path: PathBuf },
}

/// Receives bootstrap events. Implementations must return quickly.
pub trait Progress {
    fn notify(&self, event: Event);
}

/// Discards every event.
pub struct NullProgress;

impl Progress for NullProgress {
    fn notify(&self, _event: Event) {}
}

/// Logs events via tracing.
pub struct LogProgress;

impl Progress for LogProgress {
    fn notify(&self, event: Event) {
        use tracing::{debug, info, warn};
        match event {
            Event::StepStarted(step) => debug!(step = step.label(), "Step started"),
            Event::RuntimeFound(runtime) => {
                info!(program = %runtime.program, version = %runtime.version, "Runtime found");
            }
            Event::TierStarted { tier, packages } => {
                info!(tier = %tier, packages, "Installing tier");
            }
            Event::InstallStarted { package, strategy } => {
                debug!(package = %package, ?strategy, "Install started");
            }
            Event::InstallFinished { package, outcome } => match outcome {
                InstallOutcome::Failed { reason, .. } => {
                    warn!(package = %package, reason = %reason, "Install failed");
                }
                other => info!(package = %package, outcome = other.label(), "Install finished"),
            },
            Event::Directory { path, status } => {
                debug!(path = %path.display(), ?status, "Directory checked");
            }
            Event::Config { path, status } => {
                info!(path = %path.display(), ?status, "Config checked");
            }
            Event::Imported { module } => debug!(module, "Imported"),
            Event::ConfigParsed { path } => debug!(path = %path.display(), "Config parsed"),
        }
    }
}

impl<P: Progress + ?Sized> Progress for &P {
    fn notify(&self, event: Event) {
        (**self).notify(event);
    }
}
