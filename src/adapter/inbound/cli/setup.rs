//! `assistant-setup` / `assistant-setup setup`: the full bootstrap run.

use serde_json::json;

use super::{output, progress::ConsoleProgress};
use crate::application::{document, readiness};
use crate::domain::layout::NEXT_STEP;
use crate::domain::{ConfigStatus, InstallOutcome, Layout, SetupReport};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Settings;

pub fn execute(layout: Layout, settings: &Settings) -> Result<()> {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Root", layout.root().display());
    output::field("Policy", settings.install.policy);

    let progress = ConsoleProgress::new();
    let bootstrapper = bootstrap::bootstrapper(layout, settings, &progress)?;
    let report = bootstrapper.run()?;

    print_summary(&report);
    print_readiness(bootstrapper.layout());

    output::report("setup_report", serde_json::to_value(&report)?);
    output::success("Environment ready");
    output::hint(&format!("start the assistant with `{NEXT_STEP}`"));
    Ok(())
}

fn print_summary(report: &SetupReport) {
    let installs = &report.installs;
    let installed = installs
        .packages
        .iter()
        .filter(|p| {
            matches!(
                p.outcome,
                InstallOutcome::Installed | InstallOutcome::FallbackUsed { .. }
            )
        })
        .count();

    output::section("Summary");
    output::field(
        "Python",
        format!("{} ({})", report.runtime.version, report.runtime.program),
    );
    output::field(
        "Packages",
        format!("{installed}/{} installed", installs.packages.len()),
    );
    if installs.fallback_count() > 0 {
        output::field("Fallbacks", installs.fallback_count());
    }
    output::field(
        "Directories",
        format!("{} created", report.created_directories()),
    );
    output::field(
        "Config",
        match report.config.status {
            ConfigStatus::Created => "created",
            ConfigStatus::AlreadyExists => "kept existing",
        },
    );
    output::field("Elapsed", format!("{}s", report.elapsed_seconds()));

    for failed in installs.failures() {
        output::warning(&format!(
            "{} {} did not install; the smoke test passed without it",
            failed.name, failed.version
        ));
    }
}

/// Surface what the operator still has to fill in. Never fails the run.
fn print_readiness(layout: &Layout) {
    let Ok(config) = document::load_config(&layout.config_file()) else {
        return;
    };
    let readiness = readiness::assess(&config, layout);
    if readiness.errors.is_empty() && readiness.warnings.is_empty() {
        return;
    }

    output::section("Before starting");
    for message in readiness.errors.iter().chain(&readiness.warnings) {
        output::warning(message);
    }
    output::report(
        "readiness",
        json!({ "errors": readiness.errors, "warnings": readiness.warnings }),
    );
}
