//! Integration tests for the `plugforge` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Binary running in `dir`, with config and env isolated from the host.
fn plugforge(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("plugforge").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR")
        .env_remove("PLUGFORGE_CONFIG")
        .env_remove("PLUGFORGE_DEFAULTS__AUTHOR");
    cmd
}

fn file_count(root: &Path) -> usize {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .count()
}

// ── help / version ────────────────────────────────────────────────────────────

#[test]
fn help_flag() {
    let tmp = TempDir::new().unwrap();
    plugforge(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plugforge"))
        .stdout(predicate::str::contains("init-config"));
}

#[test]
fn version_flag() {
    let tmp = TempDir::new().unwrap();
    plugforge(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn bad_arguments_exit_2() {
    let tmp = TempDir::new().unwrap();
    plugforge(tmp.path())
        .args(["new", "x", "--bogus"])
        .assert()
        .code(2);
}

// ── new ───────────────────────────────────────────────────────────────────────

#[test]
fn new_creates_project() {
    let tmp = TempDir::new().unwrap();
    plugforge(tmp.path())
        .args(["new", "basic_math", "--category", "tool", "--author", "acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("basic_math"));

    let root = tmp.path().join("basic_math");
    let tool = std::fs::read_to_string(root.join("tools/basic_math.py")).unwrap();
    assert!(tool.contains("class BasicMathTool"));

    let manifest = std::fs::read_to_string(root.join("manifest.yaml")).unwrap();
    assert!(manifest.contains("author: acme"));
    assert!(!manifest.contains("created_at: \"\""));
}

#[test]
fn new_json_reports_files() {
    let tmp = TempDir::new().unwrap();
    let assert = plugforge(tmp.path())
        .args([
            "new", "my_llm", "--category", "model", "--subtype", "llm", "--output", "out",
            "--format", "json",
        ])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let files = report["files"].as_array().unwrap();
    assert_eq!(files.len(), file_count(&tmp.path().join("out")));
    assert!(files.iter().any(|f| f == "models/llm/llm.py"));
}

#[test]
fn dry_run_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    plugforge(tmp.path())
        .args(["new", "basic_math", "--category", "tool", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("manifest.yaml"));

    assert!(!tmp.path().join("basic_math").exists());
}

#[test]
fn invalid_name_exits_2_and_creates_nothing() {
    let tmp = TempDir::new().unwrap();
    plugforge(tmp.path())
        .args(["new", "123-bad", "--category", "tool"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("name"));

    assert!(!tmp.path().join("123-bad").exists());
}

#[test]
fn meta_cannot_override_name() {
    let tmp = TempDir::new().unwrap();
    plugforge(tmp.path())
        .args(["new", "basic_math", "--category", "tool", "--meta", "name=../evil"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("metadata"));

    assert!(!tmp.path().join("basic_math").exists());
    assert_eq!(file_count(tmp.path()), 0);
}

#[test]
fn unknown_subtype_exits_3() {
    let tmp = TempDir::new().unwrap();
    plugforge(tmp.path())
        .args(["new", "x", "--category", "model", "--subtype", "nonexistent"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("plugforge list"));

    assert!(!tmp.path().join("x").exists());
}

#[test]
fn missing_category_exits_2() {
    let tmp = TempDir::new().unwrap();
    plugforge(tmp.path())
        .args(["new", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--category"));
}

#[test]
fn existing_file_needs_force() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("basic_math");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("main.py"), "mine").unwrap();

    plugforge(tmp.path())
        .args(["new", "basic_math", "--category", "tool"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));
    assert_eq!(std::fs::read_to_string(root.join("main.py")).unwrap(), "mine");
    assert_eq!(file_count(&root), 1);

    plugforge(tmp.path())
        .args(["new", "basic_math", "--category", "tool", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overwrote 1"));
    assert_ne!(std::fs::read_to_string(root.join("main.py")).unwrap(), "mine");
}

#[test]
fn quiet_suppresses_stdout() {
    let tmp = TempDir::new().unwrap();
    plugforge(tmp.path())
        .args(["-q", "new", "basic_math", "--category", "tool"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn verbose_emits_info_logs() {
    let tmp = TempDir::new().unwrap();
    plugforge(tmp.path())
        .args(["-v", "new", "basic_math", "--category", "tool"])
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO"));
}

// ── config ────────────────────────────────────────────────────────────────────

#[test]
fn config_file_supplies_defaults() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("cfg.toml"),
        "[defaults]\nauthor = \"from-config\"\ncategory = \"extension\"\n",
    )
    .unwrap();

    plugforge(tmp.path())
        .args(["--config", "cfg.toml", "new", "hook"])
        .assert()
        .success();

    let manifest = std::fs::read_to_string(tmp.path().join("hook/manifest.yaml")).unwrap();
    assert!(manifest.contains("author: from-config"));
    assert!(tmp.path().join("hook/endpoints/hook.py").exists());
}

#[test]
fn env_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join(".plugforge.toml"),
        "[defaults]\nauthor = \"from-file\"\n",
    )
    .unwrap();

    plugforge(tmp.path())
        .env("PLUGFORGE_DEFAULTS__AUTHOR", "from-env")
        .args(["new", "basic_math", "--category", "tool"])
        .assert()
        .success();

    let manifest = std::fs::read_to_string(tmp.path().join("basic_math/manifest.yaml")).unwrap();
    assert!(manifest.contains("author: from-env"));
}

#[test]
fn missing_config_file_exits_4() {
    let tmp = TempDir::new().unwrap();
    plugforge(tmp.path())
        .args(["--config", "nope.toml", "list"])
        .assert()
        .code(4);
}

#[test]
fn init_config_local_writes_once() {
    let tmp = TempDir::new().unwrap();
    plugforge(tmp.path())
        .args(["init-config", "--local"])
        .assert()
        .success();

    let path = tmp.path().join(".plugforge.toml");
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[output]"));

    std::fs::write(&path, "# edited\n").unwrap();
    plugforge(tmp.path())
        .args(["init-config", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# edited\n");
}

// ── list / completions ────────────────────────────────────────────────────────

#[test]
fn list_shows_pairs() {
    let tmp = TempDir::new().unwrap();
    plugforge(tmp.path())
        .args(["list", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tool/provider"))
        .stdout(predicate::str::contains("model/text-embedding"))
        .stdout(predicate::str::contains("extension/endpoint"));
}

#[test]
fn list_filters_by_category() {
    let tmp = TempDir::new().unwrap();
    plugforge(tmp.path())
        .args(["list", "--category", "tool", "--format", "list"])
        .assert()
        .success()
        .stdout("tool/provider\ntool/tool-action\n");
}

#[test]
fn list_json_is_valid() {
    let tmp = TempDir::new().unwrap();
    let assert = plugforge(tmp.path())
        .args(["list", "--format", "json"])
        .assert()
        .success();
    let entries: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert!(entries.as_array().is_some_and(|a| !a.is_empty()));
}

#[test]
fn shell_completions() {
    let tmp = TempDir::new().unwrap();
    plugforge(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plugforge"));
}
