//! The bootstrap sequence.
//!
//! `verify_runtime → install_dependencies → ensure_directories →
//! ensure_default_config → smoke_test`, strictly in that order on one
//! thread. The runtime check and the smoke test always gate the run; the
//! install step gates it only under [`InstallPolicy::Strict`].
//!
//! There is no rollback. A run that fails half way leaves whatever it
//! already created, and re-running is safe because every filesystem step
//! is idempotent.

use chrono::Utc;
use tracing::info;

use super::installer::Installer;
use super::{runtime, smoke, workspace};
use crate::domain::manifest::{installed_imports, verified_imports, PACKAGES};
use crate::domain::{
    AssistantConfig, ConfigOutcome, DirectoryOutcome, InstallPolicy, InstallReport, Layout,
    Package, RuntimeInfo, SetupReport, SmokeReport, VersionRequirement,
};
use crate::error::Result;
use crate::port::{CommandRunner, Event, Progress, Step};

/// Knobs for a bootstrap run.
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    pub candidates: Vec<String>,
    pub requirement: VersionRequirement,
    pub policy: InstallPolicy,
    pub skip_optional: bool,
    pub pip_args: Vec<String>,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            candidates: vec!["python3".into(), "python".into()],
            requirement: VersionRequirement::default(),
            policy: InstallPolicy::default(),
            skip_optional: false,
            pip_args: Vec::new(),
        }
    }
}

/// Runs the bootstrap steps against one project root.
pub struct Bootstrapper<R, P> {
    runner: R,
    progress: P,
    layout: Layout,
    options: BootstrapOptions,
    packages: &'static [Package],
    document: AssistantConfig,
}

impl<R: CommandRunner, P: Progress> Bootstrapper<R, P> {
    pub fn new(runner: R, progress: P, layout: Layout, options: BootstrapOptions) -> Self {
        Self {
            runner,
            progress,
            layout,
            options,
            packages: PACKAGES,
            document: AssistantConfig::default(),
        }
    }

    /// Replace the dependency manifest.
    #[must_use]
    pub fn with_packages(mut self, packages: &'static [Package]) -> Self {
        self.packages = packages;
        self
    }

    /// Replace the document written on first run.
    #[must_use]
    pub fn with_document(mut self, document: AssistantConfig) -> Self {
        self.document = document;
        self
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn options(&self) -> &BootstrapOptions {
        &self.options
    }

    /// Find an interpreter that satisfies the requirement.
    pub fn verify_runtime(&self) -> Result<RuntimeInfo> {
        self.progress.notify(Event::StepStarted(Step::Runtime));
        let info = runtime::verify_runtime(
            &self.runner,
            &self.options.candidates,
            self.options.requirement,
        )?;
        self.progress.notify(Event::RuntimeFound(info.clone()));
        Ok(info)
    }

    /// Install the manifest with the selected interpreter.
    pub fn install_dependencies(&self, runtime: &RuntimeInfo) -> Result<InstallReport> {
        self.progress.notify(Event::StepStarted(Step::Install));
        let report = Installer::new(&self.runner, &self.progress, &runtime.program)
            .policy(self.options.policy)
            .skip_optional(self.options.skip_optional)
            .pip_args(&self.options.pip_args)
            .install_all(self.packages)?;
        Ok(report)
    }

    pub fn ensure_directories(&self) -> Result<Vec<DirectoryOutcome>> {
        self.progress.notify(Event::StepStarted(Step::Workspace));
        workspace::ensure_directories(&self.layout, &self.progress)
    }

    pub fn ensure_default_config(&self) -> Result<ConfigOutcome> {
        workspace::ensure_default_config(&self.layout, &self.document, &self.progress)
    }

    /// Import the libraries and parse the configuration document.
    ///
    /// With an install report, optional packages that were installed are
    /// imported too; without one only the verified tiers are.
    pub fn smoke_test(
        &self,
        runtime: &RuntimeInfo,
        installs: Option<&InstallReport>,
    ) -> Result<SmokeReport> {
        self.progress.notify(Event::StepStarted(Step::SmokeTest));
        let modules = match installs {
            Some(installs) => installed_imports(self.packages, installs),
            None => verified_imports(self.packages),
        };
        let report = smoke::smoke_test(
            &self.runner,
            &self.progress,
            &runtime.program,
            &modules,
            &self.layout.config_file(),
        )?;
        Ok(report)
    }

    /// Run every step in order.
    pub fn run(&self) -> Result<SetupReport> {
        let started_at = Utc::now();
        info!(
            root = %self.layout.root().display(),
            policy = %self.options.policy,
            "Bootstrap starting"
        );

        let runtime = self.verify_runtime()?;
        let installs = self.install_dependencies(&runtime)?;
        let directories = self.ensure_directories()?;
        let config = self.ensure_default_config()?;
        let smoke = self.smoke_test(&runtime, Some(&installs))?;

        info!(
            failed = installs.failure_count(),
            fallbacks = installs.fallback_count(),
            "Bootstrap finished"
        );
        Ok(SetupReport {
            started_at,
            finished_at: Utc::now(),
            runtime,
            installs,
            directories,
            config,
            smoke,
        })
    }

    /// Runtime check and smoke test only, for an already provisioned root.
    pub fn check(&self) -> Result<(RuntimeInfo, SmokeReport)> {
        let runtime = self.verify_runtime()?;
        let smoke = self.smoke_test(&runtime, None)?;
        Ok((runtime, smoke))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, RuntimeError};
    use crate::port::NullProgress;
    use crate::testkit::runner::ScriptedRunner;

    fn bootstrapper<'a>(
        runner: &'a ScriptedRunner,
        root: &std::path::Path,
    ) -> Bootstrapper<&'a ScriptedRunner, NullProgress> {
        Bootstrapper::new(runner, NullProgress, Layout::new(root), BootstrapOptions::default())
    }

    #[test]
    fn full_run_reports_every_step() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = ScriptedRunner::python("3.11.4");

        let report = bootstrapper(&runner, dir.path()).run().expect("run");

        assert_eq!(report.runtime.program, "python3");
        assert_eq!(report.installs.packages.len(), PACKAGES.len());
        assert_eq!(report.created_directories(), 8);
        assert_eq!(report.config.status, crate::domain::ConfigStatus::Created);
        assert_eq!(report.smoke.imported.len(), PACKAGES.len());
        assert!(report.finished_at >= report.started_at);
    }

    #[test]
    fn missing_runtime_stops_before_anything_else() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = ScriptedRunner::new().missing("python3").missing("python");

        let err = bootstrapper(&runner, dir.path()).run().unwrap_err();

        assert!(matches!(err, Error::Runtime(RuntimeError::NotFound { .. })));
        assert!(runner.installs().is_empty());
        assert_eq!(
            std::fs::read_dir(dir.path()).expect("read_dir").count(),
            0,
            "no directory may be created"
        );
    }

    #[test]
    fn strict_install_failure_stops_before_scaffolding() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = ScriptedRunner::python("3.11.4").failing_install("ccxt==4.1.13", "offline");
        let options = BootstrapOptions {
            policy: InstallPolicy::Strict,
            ..BootstrapOptions::default()
        };

        let err = Bootstrapper::new(&runner, NullProgress, Layout::new(dir.path()), options)
            .run()
            .unwrap_err();

        assert!(matches!(err, Error::Install(_)));
        assert!(!dir.path().join("config").exists());
    }

    #[test]
    fn lenient_install_failure_is_caught_by_smoke_test() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = ScriptedRunner::python("3.11.4")
            .failing_install("ccxt==4.1.13", "offline")
            .failing_import("ccxt");

        let err = bootstrapper(&runner, dir.path()).run().unwrap_err();

        assert!(matches!(err, Error::Smoke(_)));
        // Scaffolding still happened.
        assert!(dir.path().join("config/config.json").is_file());
    }

    #[test]
    fn steps_are_announced_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = ScriptedRunner::python("3.11.4");
        let progress = crate::testkit::progress::RecordingProgress::new();

        Bootstrapper::new(&runner, &progress, Layout::new(dir.path()), BootstrapOptions::default())
            .run()
            .expect("run");

        let steps: Vec<Step> = progress
            .events()
            .into_iter()
            .filter_map(|event| match event {
                Event::StepStarted(step) => Some(step),
                _ => None,
            })
            .collect();
        assert_eq!(
            steps,
            vec![Step::Runtime, Step::Install, Step::Workspace, Step::SmokeTest]
        );
    }

    #[test]
    fn check_skips_install_and_scaffolding() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("config")).expect("mkdir");
        std::fs::write(dir.path().join("config/config.json"), "{}").expect("write");
        let runner = ScriptedRunner::python("3.12.1");

        let (runtime, smoke) = bootstrapper(&runner, dir.path()).check().expect("check");

        assert_eq!(runtime.version.minor, 12);
        assert_eq!(smoke.imported.len(), 8);
        assert!(runner.installs().is_empty());
        assert!(!dir.path().join("logs").exists());
    }
}
