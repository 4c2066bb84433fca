//! Renders bootstrap events as terminal output.

use std::sync::Mutex;

use indicatif::ProgressBar;

use super::output;
use crate::domain::{ConfigStatus, DirectoryStatus, InstallOutcome, InstallStrategy};
use crate::port::{Event, LogProgress, Progress};

/// Spinner per package install, status lines for everything else. Every
/// event is also forwarded to `tracing`.
#[derive(Default)]
pub struct ConsoleProgress {
    active: Mutex<Option<ProgressBar>>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn take_active(&self) -> Option<ProgressBar> {
        match self.active.lock() {
            Ok(mut active) => active.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }

    fn set_active(&self, pb: ProgressBar) {
        let previous = match self.active.lock() {
            Ok(mut active) => active.replace(pb),
            Err(poisoned) => poisoned.into_inner().replace(pb),
        };
        if let Some(previous) = previous {
            previous.finish_and_clear();
        }
    }

    fn render(&self, event: &Event) {
        match event {
            Event::StepStarted(step) => output::section(step.label()),
            Event::RuntimeFound(runtime) => {
                output::success(&format!(
                    "Found Python {} ({})",
                    output::highlight(runtime.version),
                    runtime.program
                ));
            }
            Event::TierStarted { tier, packages } => {
                output::note(&format!("{tier} ({packages} packages)"));
            }
            Event::InstallStarted { package, strategy } => match strategy {
                InstallStrategy::Pinned => {
                    self.set_active(output::spinner(&format!("Installing {package}")));
                }
                InstallStrategy::Fallback(_) => {
                    let message = format!("Retrying {} without version pin", package.name);
                    match self.take_active() {
                        Some(pb) => {
                            pb.set_message(message);
                            self.set_active(pb);
                        }
                        None => self.set_active(output::spinner(&message)),
                    }
                }
            },
            Event::InstallFinished { package, outcome } => {
                let pb = self
                    .take_active()
                    .unwrap_or_else(|| output::spinner(&package.to_string()));
                match outcome {
                    InstallOutcome::Installed => {
                        output::spinner_success(&pb, &format!("Installed {package}"));
                    }
                    InstallOutcome::FallbackUsed { .. } => {
                        output::spinner_warn(
                            &pb,
                            &format!("Installed {} (unpinned fallback)", package.name),
                        );
                    }
                    InstallOutcome::Failed { reason, .. } => {
                        output::spinner_fail(&pb, &format!("Failed {package}: {reason}"));
                    }
                    InstallOutcome::Skipped => {
                        pb.finish_and_clear();
                        output::note(&format!("Skipped {package}"));
                    }
                }
            }
            Event::Directory { path, status } => match status {
                DirectoryStatus::Created => {
                    output::action_done("Created", &path.display().to_string());
                }
                DirectoryStatus::Existing => {
                    if output::verbosity() > 0 {
                        output::note(&format!("{} already exists", path.display()));
                    }
                }
            },
            Event::Config { path, status } => match status {
                ConfigStatus::Created => {
                    output::action_done("Created", &path.display().to_string());
                }
                ConfigStatus::AlreadyExists => {
                    output::note(&format!("{} already exists, left unchanged", path.display()));
                }
            },
            Event::Imported { module } => {
                output::success(&format!("import {}", output::muted(module)));
            }
            Event::ConfigParsed { path } => {
                output::success(&format!("{} is valid JSON", path.display()));
            }
        }
    }
}

impl Progress for ConsoleProgress {
    fn notify(&self, event: Event) {
        self.render(&event);
        LogProgress.notify(event);
    }
}

impl Drop for ConsoleProgress {
    fn drop(&mut self) {
        if let Some(pb) = self.take_active() {
            pb.finish_and_clear();
        }
    }
}
