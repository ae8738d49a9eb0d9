// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn sdk_changelog(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sdk-changelog"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_sdk_changelog_help() {
    let dir = TempDir::new().unwrap();
    let output = sdk_changelog(dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("sdk-changelog"));
    assert!(stdout.contains("new-change"));
    assert!(stdout.contains("crosslinks"));
}

#[test]
fn test_sdk_changelog_version() {
    let dir = TempDir::new().unwrap();
    let output = sdk_changelog(dir.path(), &["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_new_change_release_generate() {
    let dir = TempDir::new().unwrap();

    let output = sdk_changelog(
        dir.path(),
        &[
            "new-change",
            "--type",
            "feature",
            "--category",
            "Amazon S3",
            "--description",
            "Add X",
        ],
    );
    assert!(output.status.success(), "{:?}", output);
    let fragments: Vec<_> = fs::read_dir(dir.path().join(".changes/next-release"))
        .unwrap()
        .collect();
    assert_eq!(fragments.len(), 1);

    let output = sdk_changelog(dir.path(), &["generate", "--no-stage"]);
    assert!(output.status.success(), "{:?}", output);
    let changelog = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert!(changelog.starts_with("# @AWS_JAVA_SDK_VERSION@ "));
    let section = "## __Amazon S3__\n  - ### Features\n    - Add X\n\n";
    assert!(changelog.contains(section));

    let output = sdk_changelog(
        dir.path(),
        &[
            "release",
            "--version",
            "2.1.0",
            "--date",
            "2024-05-02",
            "--no-stage",
        ],
    );
    assert!(output.status.success(), "{:?}", output);
    assert!(dir.path().join(".changes/2.1.0.json").exists());

    // An explicit config file must exist
    let output = sdk_changelog(dir.path(), &["--config", "missing.toml"]);
    assert_eq!(output.status.code(), Some(1));

    // No subcommand means generate
    let output = sdk_changelog(dir.path(), &[]);
    assert!(output.status.success(), "{:?}", output);
    let changelog = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert_eq!(
        changelog,
        "# 2.1.0 2024-05-02\n## __Amazon S3__\n  - ### Features\n    - Add X\n\n"
    );
}

#[test]
fn test_release_without_changes_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let output = sdk_changelog(dir.path(), &["release", "--version", "2.1.0", "--no-stage"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("no unreleased changes"), "{}", stderr);
}

#[test]
fn test_unknown_change_type_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = sdk_changelog(
        dir.path(),
        &[
            "new-change",
            "--type",
            "docs",
            "--category",
            "S3",
            "--description",
            "x",
        ],
    );

    assert!(!output.status.success());
    assert!(!dir.path().join(".changes/next-release").exists());
}
