//! [`CommandRunner`] backed by `std::process::Command`.

use std::io;
use std::process::{Command, Stdio};

use tracing::{debug, trace};

use crate::port::{CommandOutput, CommandRunner};

/// Runs real programs, inheriting the caller's environment and working
/// directory. Stdin is closed so pip can never block on a prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        debug!(program, args = ?args, "Spawning");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        trace!(program, code = ?result.code, stderr = %result.stderr, "Finished");
        Ok(result)
    }
}
