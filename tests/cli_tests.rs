//! CLI integration tests.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

use assistant_setup::domain::AssistantConfig;

fn assistant_setup() -> Command {
    let mut cmd = cargo_bin_cmd!("assistant-setup");
    cmd.env_remove("ASSISTANT_SETUP_PYTHON")
        .env_remove("ASSISTANT_SETUP_POLICY")
        .env_remove("RUST_LOG");
    cmd
}

fn write_default_config(root: &Path) {
    fs::create_dir_all(root.join("config")).unwrap();
    let text = AssistantConfig::default().to_pretty_json().unwrap();
    fs::write(root.join("config/config.json"), text).unwrap();
}

#[test]
fn test_help() {
    assistant_setup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("assistant-setup"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--strict"));
}

#[test]
fn test_version() {
    assistant_setup()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("assistant-setup"));
}

#[test]
fn test_missing_interpreter_exits_nonzero_without_side_effects() {
    let dir = tempfile::tempdir().unwrap();

    assistant_setup()
        .args(["--root", dir.path().to_str().unwrap(), "--color", "never"])
        .env("ASSISTANT_SETUP_PYTHON", "assistant-setup-no-such-python")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no Python 3.8+"))
        .stderr(predicate::str::contains("python.org/downloads"));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_invalid_policy_env_is_rejected() {
    let dir = tempfile::tempdir().unwrap();

    assistant_setup()
        .args(["check", "--root", dir.path().to_str().unwrap()])
        .env("ASSISTANT_SETUP_POLICY", "reckless")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("install.policy"));
}

#[test]
fn test_config_validate_reports_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("config")).unwrap();
    fs::write(
        dir.path().join("config/config.json"),
        "{\n    \"version\": \"3.0.0\",\n}\n",
    )
    .unwrap();

    assistant_setup()
        .args(["config", "validate", "--root", dir.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn test_config_validate_reports_wrong_typed_value() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("config")).unwrap();
    fs::write(
        dir.path().join("config/config.json"),
        "{\n    \"monitor\": {\n        \"check_interval_seconds\": \"often\"\n    }\n}\n",
    )
    .unwrap();

    assistant_setup()
        .args(["config", "validate", "--root", dir.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid value"))
        .stderr(predicate::str::contains("expected u64"));
}

#[test]
fn test_config_validate_accepts_fresh_workspace() {
    let dir = tempfile::tempdir().unwrap();
    write_default_config(dir.path());
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::create_dir_all(dir.path().join("models")).unwrap();

    assistant_setup()
        .args(["config", "validate", "--root", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is ready"))
        .stdout(predicate::str::contains("okx.api_key"));
}

#[test]
fn test_config_validate_fails_without_model_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_default_config(dir.path());
    fs::create_dir_all(dir.path().join("data")).unwrap();

    assistant_setup()
        .args(["config", "validate", "--root", dir.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("learning.model_path"));
}

#[test]
fn test_config_show_prints_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write_default_config(dir.path());

    assistant_setup()
        .args(["config", "show", "--root", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("幣圈交易輔助系統"))
        .stdout(predicate::str::contains("BTC-USDT, ETH-USDT, SOL-USDT"));
}

#[test]
fn test_config_show_json_masks_credentials() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("config")).unwrap();
    fs::write(
        dir.path().join("config/config.json"),
        r#"{"okx": {"api_key": "live-key"}}"#,
    )
    .unwrap();

    assistant_setup()
        .args(["--json", "config", "show", "--root", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"config\""))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("live-key").not());
}

#[test]
fn test_config_show_without_document_fails() {
    let dir = tempfile::tempdir().unwrap();

    assistant_setup()
        .args(["config", "show", "--root", dir.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read"));
}

#[cfg(unix)]
mod with_fake_interpreter {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// A `python3` stand-in that reports 3.11.4 and accepts every command.
    fn fake_python(dir: &Path) -> String {
        write_interpreter(dir, "")
    }

    /// Like [`fake_python`], but `import <module>` exits 1.
    fn fake_python_without(dir: &Path, module: &str) -> String {
        write_interpreter(
            dir,
            &format!(
                "if [ \"$2\" = \"import {module}\" ]; then \
                 echo \"ModuleNotFoundError: No module named '{module}'\" >&2; exit 1; fi\n"
            ),
        )
    }

    fn write_interpreter(dir: &Path, extra: &str) -> String {
        let path = dir.join("fake-python3");
        let script = format!(
            "#!/bin/sh\n\
             if [ \"$1\" = \"--version\" ]; then echo 'Python 3.11.4'; fi\n\
             {extra}exit 0\n"
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_full_setup_scaffolds_workspace() {
        let bin = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        let python = fake_python(bin.path());

        assistant_setup()
            .args(["--root", root.path().to_str().unwrap(), "--color", "never"])
            .env("ASSISTANT_SETUP_PYTHON", &python)
            .assert()
            .success()
            .stdout(predicate::str::contains("Environment ready"))
            .stdout(predicate::str::contains("python start.py"));

        for name in [
            "config", "data", "logs", "models", "backtest", "monitor", "learning", "utils",
        ] {
            assert!(root.path().join(name).is_dir(), "{name} missing");
        }
        let text = fs::read_to_string(root.path().join("config/config.json")).unwrap();
        let parsed: AssistantConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, AssistantConfig::default());
    }

    #[test]
    fn test_broken_optional_install_fails_setup() {
        let bin = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        let python = fake_python_without(bin.path(), "seaborn");

        assistant_setup()
            .args(["--root", root.path().to_str().unwrap(), "--color", "never"])
            .env("ASSISTANT_SETUP_PYTHON", &python)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("failed to import seaborn"));
    }

    #[test]
    fn test_rerun_keeps_edited_config() {
        let bin = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        let python = fake_python(bin.path());
        let run = || {
            assistant_setup()
                .args(["--root", root.path().to_str().unwrap(), "--quiet"])
                .env("ASSISTANT_SETUP_PYTHON", &python)
                .assert()
                .success();
        };

        run();
        let path = root.path().join("config/config.json");
        fs::write(&path, "{\"author\": \"me\"}").unwrap();
        run();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"author\": \"me\"}");
    }

    #[test]
    fn test_check_emits_json_report() {
        let bin = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        write_default_config(root.path());
        let python = fake_python(bin.path());

        assistant_setup()
            .args(["--json", "check", "--root", root.path().to_str().unwrap()])
            .env("ASSISTANT_SETUP_PYTHON", &python)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"type\":\"check_report\""))
            .stdout(predicate::str::contains("\"ccxt\""));
    }
}
