//! Tiered dependency installation.
//!
//! Packages are installed one at a time, tier by tier, with
//! `<python> -m pip install`. A package with a fallback gets exactly one
//! more attempt with the alternate strategy when the pinned install fails;
//! nothing else is retried.
//!
//! What a failure means for the run is decided by [`InstallPolicy`]: the
//! lenient policy records it and moves on, the strict policy stops at the
//! first package that could not be installed.

use tracing::{info, warn};

use crate::domain::manifest::{tier_packages, TIERS};
use crate::domain::{
    InstallOutcome, InstallPolicy, InstallReport, InstallStrategy, Package,
    PackageResult, Tier,
};
use crate::error::InstallError;
use crate::port::{CommandRunner, Event, Progress};

/// Installs a manifest with one interpreter.
pub struct Installer<'a, R: ?Sized, P: ?Sized> {
    runner: &'a R,
    progress: &'a P,
    python: &'a str,
    pip_args: &'a [String],
    policy: InstallPolicy,
    skip_optional: bool,
}

impl<'a, R, P> Installer<'a, R, P>
where
    R: CommandRunner + ?Sized,
    P: Progress + ?Sized,
{
    pub fn new(runner: &'a R, progress: &'a P, python: &'a str) -> Self {
        Self {
            runner,
            progress,
            python,
            pip_args: &[],
            policy: InstallPolicy::default(),
            skip_optional: false,
        }
    }

    #[must_use]
    pub fn policy(mut self, policy: InstallPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn skip_optional(mut self, skip: bool) -> Self {
        self.skip_optional = skip;
        self
    }

    #[must_use]
    pub fn pip_args(mut self, args: &'a [String]) -> Self {
        self.pip_args = args;
        self
    }

    /// Install every package, tier by tier.
    ///
    /// Under [`InstallPolicy::Strict`] the first failed package aborts the
    /// run; under [`InstallPolicy::Lenient`] the report lists every outcome
    /// and this always returns `Ok`.
    pub fn install_all(&self, packages: &[Package]) -> Result<InstallReport, InstallError> {
        let mut report = InstallReport::default();

        for tier in TIERS {
            let members: Vec<&Package> = tier_packages(packages, tier).collect();
            if members.is_empty() {
                continue;
            }

            if tier == Tier::Optional && self.skip_optional {
                info!(tier = %tier, "Skipping optional tier");
                for package in members {
                    self.finish(&mut report, package, InstallOutcome::Skipped);
                }
                continue;
            }

            self.progress.notify(Event::TierStarted {
                tier,
                packages: members.len(),
            });

            for package in members {
                let outcome = self.install_package(package);
                let failure = match &outcome {
                    InstallOutcome::Failed { reason, .. } => Some(reason.clone()),
                    _ => None,
                };
                self.finish(&mut report, package, outcome);

                if let Some(reason) = failure {
                    if self.policy == InstallPolicy::Strict {
                        return Err(InstallError::Failed {
                            package: package.name.to_string(),
                            reason,
                        });
                    }
                    warn!(package = package.name, "Continuing after failed install");
                }
            }
        }

        Ok(report)
    }

    /// Install one package, trying its fallback at most once.
    pub fn install_package(&self, package: &Package) -> InstallOutcome {
        let primary_error = match self.attempt(package, InstallStrategy::Pinned) {
            Ok(()) => return InstallOutcome::Installed,
            Err(reason) => reason,
        };

        let Some(fallback) = package.fallback else {
            return InstallOutcome::Failed {
                reason: primary_error,
                fallback_attempted: false,
            };
        };

        warn!(
            package = package.name,
            error = %primary_error,
            fallback = ?fallback,
            "Pinned install failed, trying fallback"
        );
        match self.attempt(package, InstallStrategy::Fallback(fallback)) {
            Ok(()) => InstallOutcome::FallbackUsed { primary_error },
            Err(reason) => InstallOutcome::Failed {
                reason,
                fallback_attempted: true,
            },
        }
    }

    fn attempt(&self, package: &Package, strategy: InstallStrategy) -> Result<(), String> {
        self.progress.notify(Event::InstallStarted {
            package: package.clone(),
            strategy,
        });

        let args = self.command_args(package, strategy);
        match self.runner.run(self.python, &args) {
            Ok(output) if output.success() => Ok(()),
            Ok(output) => Err(output.failure_reason()),
            Err(e) => Err(format!("failed to start {}: {e}", self.python)),
        }
    }

    fn command_args(&self, package: &Package, strategy: InstallStrategy) -> Vec<String> {
        let mut args = vec!["-m".to_string(), "pip".to_string(), "install".to_string()];
        args.extend(package.install_args(strategy));
        args.extend(self.pip_args.iter().cloned());
        args
    }

    fn finish(&self, report: &mut InstallReport, package: &Package, outcome: InstallOutcome) {
        report.push(PackageResult::new(package, outcome.clone()));
        self.progress.notify(Event::InstallFinished {
            package: package.clone(),
            outcome,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::manifest::PACKAGES;
    use crate::port::NullProgress;
    use crate::testkit::progress::RecordingProgress;
    use crate::testkit::runner::ScriptedRunner;

    #[test]
    fn installs_every_package_in_manifest_order() {
        let runner = ScriptedRunner::new();
        let report = Installer::new(&runner, &NullProgress, "python3")
            .install_all(PACKAGES)
            .expect("install");

        assert!(report.is_clean());
        let installed: Vec<&str> = report.packages.iter().map(|p| p.name).collect();
        let manifest: Vec<&str> = PACKAGES.iter().map(|p| p.name).collect();
        assert_eq!(installed, manifest);

        let installs = runner.installs();
        assert_eq!(installs.len(), PACKAGES.len());
        assert_eq!(installs[0].program, "python3");
        assert_eq!(
            installs[0].args,
            vec!["-m", "pip", "install", "requests==2.31.0"]
        );
    }

    #[test]
    fn numpy_failure_triggers_exactly_one_fallback() {
        let runner = ScriptedRunner::new().failing_install("numpy==1.24.3", "ERROR: no wheel");
        let report = Installer::new(&runner, &NullProgress, "python3")
            .install_all(PACKAGES)
            .expect("install");

        let numpy_calls: Vec<_> = runner
            .installs()
            .into_iter()
            .filter(|c| c.args.iter().any(|a| a.starts_with("numpy")))
            .collect();
        assert_eq!(numpy_calls.len(), 2);
        assert!(numpy_calls[0].has_arg("numpy==1.24.3"));
        assert!(numpy_calls[1].has_arg("--prefer-binary"));

        let numpy = &report.packages[3];
        assert_eq!(numpy.name, "numpy");
        assert_eq!(
            numpy.outcome,
            InstallOutcome::FallbackUsed {
                primary_error: "ERROR: no wheel".into()
            }
        );
    }

    #[test]
    fn fallback_runs_before_the_next_package() {
        let runner = ScriptedRunner::new().failing_install("numpy==1.24.3", "boom");
        Installer::new(&runner, &NullProgress, "python3")
            .install_all(PACKAGES)
            .expect("install");

        let installs = runner.installs();
        let fallback = installs
            .iter()
            .position(|c| c.has_arg("--prefer-binary"))
            .expect("fallback call");
        assert!(installs[fallback + 1].has_arg("pandas==2.0.3"));
    }

    #[test]
    fn failed_fallback_is_recorded_without_further_retries() {
        let runner = ScriptedRunner::new()
            .failing_install("numpy==1.24.3", "pinned failed")
            .on_arg("--prefer-binary", crate::port::CommandOutput::failed(1, "binary failed"));
        let report = Installer::new(&runner, &NullProgress, "python3")
            .install_all(PACKAGES)
            .expect("lenient install");

        assert_eq!(
            report.packages[3].outcome,
            InstallOutcome::Failed {
                reason: "binary failed".into(),
                fallback_attempted: true,
            }
        );
        assert_eq!(runner.installs().len(), PACKAGES.len() + 1);
    }

    #[test]
    fn other_packages_are_never_retried() {
        let runner = ScriptedRunner::new().failing_install("pandas==2.0.3", "nope");
        let report = Installer::new(&runner, &NullProgress, "python3")
            .install_all(PACKAGES)
            .expect("install");

        assert_eq!(runner.installs().len(), PACKAGES.len());
        assert_eq!(report.failure_count(), 1);
        assert_eq!(
            report.packages[4].outcome,
            InstallOutcome::Failed {
                reason: "nope".into(),
                fallback_attempted: false,
            }
        );
    }

    #[test]
    fn lenient_policy_continues_past_failures() {
        let runner = ScriptedRunner::new()
            .failing_install("requests==2.31.0", "offline")
            .failing_install("ccxt==4.1.13", "offline");
        let report = Installer::new(&runner, &NullProgress, "python3")
            .policy(InstallPolicy::Lenient)
            .install_all(PACKAGES)
            .expect("install");

        assert_eq!(report.failure_count(), 2);
        assert_eq!(report.packages.len(), PACKAGES.len());
    }

    #[test]
    fn strict_policy_stops_at_first_failure() {
        let runner = ScriptedRunner::new().failing_install("joblib==1.3.2", "disk full");
        let err = Installer::new(&runner, &NullProgress, "python3")
            .policy(InstallPolicy::Strict)
            .install_all(PACKAGES)
            .unwrap_err();

        assert!(matches!(err, InstallError::Failed { ref package, .. } if package == "joblib"));
        assert_eq!(runner.installs().len(), 3);
    }

    #[test]
    fn strict_policy_accepts_successful_fallback() {
        let runner = ScriptedRunner::new().failing_install("numpy==1.24.3", "no wheel");
        let report = Installer::new(&runner, &NullProgress, "python3")
            .policy(InstallPolicy::Strict)
            .install_all(PACKAGES)
            .expect("fallback recovers");
        assert_eq!(report.fallback_count(), 1);
    }

    #[test]
    fn skip_optional_does_not_invoke_pip() {
        let runner = ScriptedRunner::new();
        let report = Installer::new(&runner, &NullProgress, "python3")
            .skip_optional(true)
            .install_all(PACKAGES)
            .expect("install");

        assert!(!runner.installs().iter().any(|c| c.has_arg("plotly==5.17.0")));
        let skipped = report
            .packages
            .iter()
            .filter(|p| p.outcome == InstallOutcome::Skipped)
            .count();
        assert_eq!(skipped, 2);
    }

    #[test]
    fn pip_args_are_appended() {
        let runner = ScriptedRunner::new();
        let extra = vec!["--index-url".to_string(), "https://mirror/simple".to_string()];
        Installer::new(&runner, &NullProgress, "python")
            .pip_args(&extra)
            .install_all(&PACKAGES[..1])
            .expect("install");

        assert_eq!(
            runner.installs()[0].args,
            vec![
                "-m",
                "pip",
                "install",
                "requests==2.31.0",
                "--index-url",
                "https://mirror/simple"
            ]
        );
    }

    #[test]
    fn unstartable_interpreter_is_a_failure_not_a_panic() {
        let runner = ScriptedRunner::new().missing("python3");
        let outcome = Installer::new(&runner, &NullProgress, "python3")
            .install_package(&PACKAGES[0]);
        assert!(matches!(
            outcome,
            InstallOutcome::Failed { ref reason, .. } if reason.contains("failed to start")
        ));
    }

    #[test]
    fn emits_tier_and_package_events() {
        let runner = ScriptedRunner::new();
        let progress = RecordingProgress::new();
        Installer::new(&runner, &progress, "python3")
            .install_all(PACKAGES)
            .expect("install");

        let tiers = progress
            .events()
            .into_iter()
            .filter(|e| matches!(e, Event::TierStarted { .. }))
            .count();
        assert_eq!(tiers, 4);
        assert_eq!(progress.finished_packages().len(), PACKAGES.len());
    }
}
