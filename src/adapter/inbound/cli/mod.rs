//! CLI module graph and command dispatch.

pub mod check;
pub mod command;
pub mod config;
pub mod diagnostic;
pub mod output;
pub mod progress;
pub mod setup;

use command::{Cli, Commands, ConfigCommand};

use crate::domain::{InstallPolicy, Layout};
use crate::error::Result;
use crate::infrastructure::bootstrap;

/// Run the parsed command line.
///
/// Settings resolve in order: `setup.toml` under `--root`, then
/// `ASSISTANT_SETUP_*` variables, then flags.
pub fn execute(cli: &Cli) -> Result<()> {
    let layout = Layout::new(&cli.root);
    let mut settings = bootstrap::load_settings(&layout)?;
    if cli.strict {
        settings.install.policy = InstallPolicy::Strict;
    }
    if cli.skip_optional {
        settings.install.skip_optional = true;
    }
    settings.logging.init(cli.verbose);

    match &cli.command {
        None | Some(Commands::Setup) => setup::execute(layout, &settings),
        Some(Commands::Check) => check::execute(layout, &settings),
        Some(Commands::Config(ConfigCommand::Show)) => config::execute_show(&layout),
        Some(Commands::Config(ConfigCommand::Validate)) => config::execute_validate(&layout),
    }
}
