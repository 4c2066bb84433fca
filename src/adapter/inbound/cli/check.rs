//! `assistant-setup check`: verify an already provisioned root.

use serde_json::json;

use super::{output, progress::ConsoleProgress};
use crate::domain::Layout;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Settings;

pub fn execute(layout: Layout, settings: &Settings) -> Result<()> {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Root", layout.root().display());

    let progress = ConsoleProgress::new();
    let (runtime, smoke) = bootstrap::bootstrapper(layout, settings, &progress)?.check()?;

    output::report(
        "check_report",
        json!({ "runtime": runtime, "smoke": smoke }),
    );
    output::success("Environment check passed");
    Ok(())
}
