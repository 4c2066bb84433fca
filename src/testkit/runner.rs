//! Scripted [`CommandRunner`] for tests.
//!
//! Replies are chosen by rules matched against the program name and its
//! arguments. Rules added later take precedence, so a test can start from
//! [`ScriptedRunner::python`] and override individual behaviours. Unmatched
//! invocations succeed with empty output.

use std::io;
use std::sync::Mutex;

use crate::port::{CommandOutput, CommandRunner};

/// What a matched invocation returns.
#[derive(Debug, Clone)]
pub enum Reply {
    /// The program ran and produced this output.
    Output(CommandOutput),
    /// The program could not be started.
    NotFound,
}

/// A recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// True when any argument equals `needle`.
    #[must_use]
    pub fn has_arg(&self, needle: &str) -> bool {
        self.args.iter().any(|a| a == needle)
    }

    /// True for `<python> -m pip install ...`.
    #[must_use]
    pub fn is_install(&self) -> bool {
        self.args.starts_with(&["-m".to_string(), "pip".to_string(), "install".to_string()])
    }

    /// True for `<python> -c "import ..."`.
    #[must_use]
    pub fn is_import(&self) -> bool {
        self.args.first().map(String::as_str) == Some("-c")
    }
}

struct Rule {
    program: Option<String>,
    arg: Option<String>,
    reply: Reply,
}

impl Rule {
    fn matches(&self, program: &str, args: &[String]) -> bool {
        self.program.as_deref().map_or(true, |p| p == program)
            && self
                .arg
                .as_deref()
                .map_or(true, |needle| args.iter().any(|a| a == needle))
    }
}

pub struct ScriptedRunner {
    rules: Vec<Rule>,
    calls: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    /// A runner where every program succeeds silently.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A runner where any program answers `--version` with `Python <version>`.
    pub fn python(version: &str) -> Self {
        Self::new().on_arg("--version", CommandOutput::ok(format!("Python {version}\n")))
    }

    /// Reply with `output` whenever `arg` appears in the arguments.
    pub fn on_arg(mut self, arg: &str, output: CommandOutput) -> Self {
        self.rules.push(Rule {
            program: None,
            arg: Some(arg.to_string()),
            reply: Reply::Output(output),
        });
        self
    }

    /// Reply with `output` when `program` runs with `arg` among its arguments.
    pub fn on(mut self, program: &str, arg: &str, output: CommandOutput) -> Self {
        self.rules.push(Rule {
            program: Some(program.to_string()),
            arg: Some(arg.to_string()),
            reply: Reply::Output(output),
        });
        self
    }

    /// Make `program` impossible to start.
    pub fn missing(mut self, program: &str) -> Self {
        self.rules.push(Rule {
            program: Some(program.to_string()),
            arg: None,
            reply: Reply::NotFound,
        });
        self
    }

    /// Fail the pinned install of `requirement` (e.g. `numpy==1.24.3`).
    pub fn failing_install(self, requirement: &str, stderr: &str) -> Self {
        self.on_arg(requirement, CommandOutput::failed(1, stderr))
    }

    /// Fail `import <module>` with a `ModuleNotFoundError`.
    pub fn failing_import(self, module: &str) -> Self {
        let script = format!("import {module}");
        let stderr = format!("ModuleNotFoundError: No module named '{module}'\n");
        self.on_arg(&script, CommandOutput::failed(1, stderr))
    }

    /// Every invocation so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Install invocations so far, in order.
    pub fn installs(&self) -> Vec<Invocation> {
        self.calls().into_iter().filter(Invocation::is_install).collect()
    }

    /// Import invocations so far, in order.
    pub fn imports(&self) -> Vec<Invocation> {
        self.calls().into_iter().filter(Invocation::is_import).collect()
    }
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        let invocation = Invocation {
            program: program.to_string(),
            args: args.to_vec(),
        };
        match self.calls.lock() {
            Ok(mut calls) => calls.push(invocation),
            Err(poisoned) => poisoned.into_inner().push(invocation),
        }

        let reply = self
            .rules
            .iter()
            .rev()
            .find(|rule| rule.matches(program, args))
            .map(|rule| rule.reply.clone());

        match reply {
            Some(Reply::Output(output)) => Ok(output),
            Some(Reply::NotFound) => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{program}: command not found"),
            )),
            None => Ok(CommandOutput::ok("")),
        }
    }
}
