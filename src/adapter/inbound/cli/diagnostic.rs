//! Miette-based error diagnostics for CLI error presentation.
//!
//! Converts crate errors into diagnostics with source context and help
//! text. A malformed configuration document is rendered with the offending
//! line labeled; a missing interpreter points at the download page.

use std::path::Path;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::domain::layout::NEXT_STEP;
use crate::domain::runtime::DOWNLOAD_URL;
use crate::error::{Error as CrateError, InstallError, RuntimeError, SettingsError, SmokeError};

/// Document parse error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(assistant_setup::config))]
pub struct ConfigError {
    pub message: String,

    /// The document text.
    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigError {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Any other failure, with an optional suggestion.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(assistant_setup::setup))]
pub struct SetupError {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

impl SetupError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Byte offset of a 1-based `line`/`column` position in `src`, clamped to
/// the text. serde_json reports columns in bytes.
#[must_use]
pub fn offset_of(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let mut offset = (line_start + column.saturating_sub(1)).min(src.len());
    while !src.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Labelled diagnostic for a document that failed to parse.
fn document_diagnostic(
    problem: &str,
    path: &Path,
    contents: &str,
    source: &serde_json::Error,
) -> miette::Report {
    let offset = offset_of(contents, source.line(), source.column());
    let len = usize::from(offset < contents.len());
    miette::Report::new(
        ConfigError::new(
            format!("{problem} in {}: {source}", path.display()),
            contents,
            offset,
            len,
        )
        .with_help(format!(
            "fix the document or delete {} and re-run assistant-setup to regenerate it",
            path.display()
        )),
    )
}

/// Build the diagnostic for a crate error.
#[must_use]
pub fn diagnose(err: &CrateError) -> miette::Report {
    match err {
        CrateError::Smoke(SmokeError::ParseConfig {
            path,
            contents,
            source,
        }) => document_diagnostic("invalid JSON", path, contents, source),
        CrateError::Smoke(SmokeError::Schema {
            path,
            contents,
            source,
        }) => document_diagnostic("invalid value", path, contents, source),
        CrateError::Runtime(RuntimeError::NotFound { .. } | RuntimeError::Unsupported { .. }) => {
            miette::Report::new(
                SetupError::new(err.to_string())
                    .with_help(format!("install Python 3 from {DOWNLOAD_URL}")),
            )
        }
        CrateError::Smoke(SmokeError::Import { module, .. }) => miette::Report::new(
            SetupError::new(err.to_string()).with_help(format!(
                "re-run assistant-setup, or install {module} manually before `{NEXT_STEP}`"
            )),
        ),
        CrateError::Install(InstallError::Failed { .. }) => {
            miette::Report::new(
                SetupError::new(err.to_string())
                    .with_help("re-run without --strict to continue past install failures"),
            )
        }
        CrateError::Settings(SettingsError::Parse(_) | SettingsError::InvalidValue { .. }) => {
            miette::Report::new(
                SetupError::new(err.to_string())
                    .with_help("check setup.toml and the ASSISTANT_SETUP_* variables"),
            )
        }
        other => miette::Report::new(SetupError::new(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn offset_of_first_line() {
        assert_eq!(offset_of("{\"a\": 1}", 1, 3), 2);
    }

    #[test]
    fn offset_of_later_line() {
        let src = "{\n    \"a\": ,\n}";
        // line 2 starts at byte 2
        assert_eq!(offset_of(src, 2, 10), 11);
    }

    #[test]
    fn offset_is_clamped_to_text() {
        assert_eq!(offset_of("{}", 9, 9), 2);
    }

    #[test]
    fn offset_stays_on_char_boundary() {
        let src = "\"幣\"";
        let offset = offset_of(src, 1, 3);
        assert!(src.is_char_boundary(offset));
    }

    #[test]
    fn parse_error_becomes_sourced_diagnostic() {
        let contents = "{\n    \"version\": \"3.0.0\",\n}".to_string();
        let source = serde_json::from_str::<serde_json::Value>(&contents).unwrap_err();
        let err = CrateError::Smoke(SmokeError::ParseConfig {
            path: PathBuf::from("config/config.json"),
            contents,
            source,
        });

        let report = diagnose(&err);
        assert!(report.to_string().contains("invalid JSON in config/config.json"));
        assert!(report.help().is_some());
        assert!(report.labels().is_some());
    }

    #[test]
    fn wrong_typed_value_is_labelled_where_it_sits() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        let contents =
            "{\n    \"monitor\": {\n        \"check_interval_seconds\": \"often\"\n    }\n}\n";
        std::fs::write(&path, contents).expect("write");
        let err = crate::application::document::load_config(&path).unwrap_err();

        let report = diagnose(&CrateError::Smoke(err));
        let message = report.to_string();
        assert!(message.starts_with("invalid value in"), "{message}");
        assert!(message.contains("expected u64"));

        let offset = report
            .labels()
            .and_then(|mut labels| labels.next())
            .map(|label| label.offset())
            .expect("label");
        let value_start = contents.find("\"often\"").expect("value");
        assert!(
            (value_start..value_start + "\"often\"".len()).contains(&offset),
            "label at {offset}, value at {value_start}"
        );
    }

    #[test]
    fn missing_runtime_points_at_download_page() {
        let err = CrateError::Runtime(RuntimeError::NotFound {
            requirement: "3.8+".into(),
            tried: vec!["python3".into()],
        });

        let help = diagnose(&err).help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains(DOWNLOAD_URL));
    }
}
