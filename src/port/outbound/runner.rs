//! Subprocess execution port.

use std::io;

/// Captured result of a finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A zero-exit output with the given stdout.
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed output with the given exit code and stderr.
    #[must_use]
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Best single-line explanation of a failure.
    ///
    /// Uses the last non-empty stderr line (where Python tracebacks and pip
    /// put the actual error), then stdout, then the exit code.
    #[must_use]
    pub fn failure_reason(&self) -> String {
        last_line(&self.stderr)
            .or_else(|| last_line(&self.stdout))
            .map(str::to_string)
            .unwrap_or_else(|| match self.code {
                Some(code) => format!("exited with status {code}"),
                None => "terminated by signal".to_string(),
            })
    }
}

fn last_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).rfind(|line| !line.is_empty())
}

/// Runs a program to completion and captures its output.
///
/// An `Err` means the program could not be started at all (for example it
/// is not on `PATH`); a program that ran and failed is an `Ok` with a
/// non-zero code.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        (**self).run(program, args)
    }
}
