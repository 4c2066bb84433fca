//! Interpreter discovery.

use tracing::debug;

use crate::domain::{PythonVersion, RuntimeInfo, VersionRequirement};
use crate::error::RuntimeError;
use crate::port::CommandRunner;

/// Probe `candidates` in order and return the first interpreter that
/// satisfies `requirement`.
///
/// A candidate that cannot be started, or whose `--version` output is not
/// recognisable, is skipped. When every candidate is missing the error is
/// [`RuntimeError::NotFound`]; when at least one ran but was too old (or
/// too new) the first such mismatch is reported as
/// [`RuntimeError::Unsupported`].
pub fn verify_runtime<R: CommandRunner + ?Sized>(
    runner: &R,
    candidates: &[String],
    requirement: VersionRequirement,
) -> Result<RuntimeInfo, RuntimeError> {
    let version_arg = ["--version".to_string()];
    let mut mismatch: Option<(String, PythonVersion)> = None;

    for program in candidates {
        let output = match runner.run(program, &version_arg) {
            Ok(output) => output,
            Err(e) => {
                debug!(program = %program, error = %e, "Interpreter not available");
                continue;
            }
        };

        // Python 2 prints its banner on stderr.
        let banner = format!("{}\n{}", output.stdout, output.stderr);
        let Some(version) = PythonVersion::from_banner(&banner) else {
            debug!(program = %program, "Unrecognised version output");
            continue;
        };

        if requirement.matches(version) {
            return Ok(RuntimeInfo {
                program: program.clone(),
                version,
            });
        }

        debug!(program = %program, version = %version, "Interpreter version rejected");
        mismatch.get_or_insert((program.clone(), version));
    }

    Err(match mismatch {
        Some((program, found)) => RuntimeError::Unsupported {
            program,
            found: found.to_string(),
            requirement: requirement.to_string(),
        },
        None => RuntimeError::NotFound {
            requirement: requirement.to_string(),
            tried: candidates.to_vec(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::CommandOutput;
    use crate::testkit::runner::ScriptedRunner;

    fn candidates() -> Vec<String> {
        vec!["python3".into(), "python".into()]
    }

    #[test]
    fn picks_first_matching_candidate() {
        let runner = ScriptedRunner::python("3.11.4");
        let info = verify_runtime(&runner, &candidates(), VersionRequirement::new(3, 8))
            .expect("runtime");
        assert_eq!(info.program, "python3");
        assert_eq!(info.version, PythonVersion::new(3, 11, 4));
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn skips_missing_candidates() {
        let runner = ScriptedRunner::python("3.9.18").missing("python3");
        let info = verify_runtime(&runner, &candidates(), VersionRequirement::new(3, 8))
            .expect("runtime");
        assert_eq!(info.program, "python");
    }

    #[test]
    fn reads_banner_from_stderr() {
        let runner = ScriptedRunner::new().on_arg(
            "--version",
            CommandOutput {
                code: Some(0),
                stdout: String::new(),
                stderr: "Python 3.10.2\n".into(),
            },
        );
        let info = verify_runtime(&runner, &candidates(), VersionRequirement::new(3, 8))
            .expect("runtime");
        assert_eq!(info.version, PythonVersion::new(3, 10, 2));
    }

    #[test]
    fn all_missing_is_not_found() {
        let runner = ScriptedRunner::new().missing("python3").missing("python");
        let err = verify_runtime(&runner, &candidates(), VersionRequirement::new(3, 8))
            .unwrap_err();
        match err {
            RuntimeError::NotFound { requirement, tried } => {
                assert_eq!(requirement, "3.8+");
                assert_eq!(tried, candidates());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn old_interpreter_is_unsupported() {
        let runner = ScriptedRunner::new()
            .on("python3", "--version", CommandOutput::ok("Python 3.6.9"))
            .missing("python");
        let err = verify_runtime(&runner, &candidates(), VersionRequirement::new(3, 8))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Unsupported { ref found, .. } if found == "3.6.9"));
        assert!(err.to_string().contains("3.8+"));
    }

    #[test]
    fn newer_candidate_after_old_one_wins() {
        let runner = ScriptedRunner::new()
            .on("python3", "--version", CommandOutput::ok("Python 2.7.18"))
            .on("python", "--version", CommandOutput::ok("Python 3.12.0"));
        let info = verify_runtime(&runner, &candidates(), VersionRequirement::new(3, 8))
            .expect("runtime");
        assert_eq!(info.program, "python");
    }
}
