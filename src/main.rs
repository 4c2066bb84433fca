use clap::Parser;

use assistant_setup::adapter::inbound::cli::command::{Cli, ColorChoice};
use assistant_setup::adapter::inbound::cli::output::{self, OutputConfig};
use assistant_setup::adapter::inbound::cli::{diagnostic, execute};

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    if let Err(e) = execute(&cli) {
        if output::is_json() {
            output::error(&e.to_string());
        } else {
            eprintln!("{:?}", diagnostic::diagnose(&e));
        }
        std::process::exit(1);
    }
}
