//! Post-install smoke test: import each expected library, then parse the
//! configuration document.

use std::path::Path;

use tracing::{debug, info};

use super::document::read_document;
use crate::domain::SmokeReport;
use crate::error::SmokeError;
use crate::port::{CommandRunner, Event, Progress};

/// Import every module with `python -c "import <module>"`, stopping at the
/// first failure, then parse `config_path` as JSON.
pub fn smoke_test<R, P>(
    runner: &R,
    progress: &P,
    python: &str,
    modules: &[&'static str],
    config_path: &Path,
) -> Result<SmokeReport, SmokeError>
where
    R: CommandRunner + ?Sized,
    P: Progress + ?Sized,
{
    for &module in modules {
        let args = ["-c".to_string(), format!("import {module}")];
        debug!(module, "Importing");

        let output = runner.run(python, &args).map_err(|e| SmokeError::Import {
            module: module.to_string(),
            reason: format!("failed to start {python}: {e}"),
        })?;
        if !output.success() {
            return Err(SmokeError::Import {
                module: module.to_string(),
                reason: output.failure_reason(),
            });
        }
        progress.notify(Event::Imported { module });
    }

    read_document(config_path)?;
    progress.notify(Event::ConfigParsed {
        path: config_path.to_path_buf(),
    });

    info!(modules = modules.len(), "Smoke test passed");
    Ok(SmokeReport {
        imported: modules.to_vec(),
        config: config_path.to_path_buf(),
    })
}
