//! Composition root: settings in, a wired [`Bootstrapper`] out.

use tracing::debug;

use crate::adapter::outbound::process::SystemRunner;
use crate::application::{BootstrapOptions, Bootstrapper};
use crate::domain::Layout;
use crate::error::Result;
use crate::infrastructure::config::settings::Settings;
use crate::port::Progress;

/// Load `setup.toml` from the project root and apply environment overrides.
pub fn load_settings(layout: &Layout) -> Result<Settings> {
    let path = layout.settings_file();
    let mut settings = Settings::load(&path)?;
    settings.apply_env_overrides()?;
    debug!(path = %path.display(), ?settings, "Settings loaded");
    Ok(settings)
}

/// Translate settings into run options.
pub fn options(settings: &Settings) -> Result<BootstrapOptions> {
    Ok(BootstrapOptions {
        candidates: settings.python.candidates.clone(),
        requirement: settings.requirement()?,
        policy: settings.install.policy,
        skip_optional: settings.install.skip_optional,
        pip_args: settings.install.pip_args.clone(),
    })
}

/// Bootstrapper that runs real processes.
pub fn bootstrapper<P: Progress>(
    layout: Layout,
    settings: &Settings,
    progress: P,
) -> Result<Bootstrapper<SystemRunner, P>> {
    Ok(Bootstrapper::new(
        SystemRunner,
        progress,
        layout,
        options(settings)?,
    ))
}
