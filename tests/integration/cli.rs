//! Integration tests for the `dkenv` binary.
//!
//! These never download: they either pre-populate the store or fail before the
//! download stage.

use assert_cmd::Command;
use dkenv::test_utils::TestEnvironment;
use predicates::prelude::*;

/// `dkenv` confined to the scratch home of `env`, without a bin dir.
fn dkenv_in_home(env: &TestEnvironment) -> Command {
    let mut cmd = Command::cargo_bin("dkenv").unwrap();
    cmd.arg("--homedir")
        .arg(&env.home)
        .env_remove("DKENV_CONFIG")
        .env_remove("RUST_LOG")
        .env("DKENV_NO_PROGRESS", "1")
        .env("NO_COLOR", "1");
    cmd
}

/// `dkenv` confined to the scratch home and bin dir of `env`.
fn dkenv(env: &TestEnvironment) -> Command {
    let mut cmd = dkenv_in_home(env);
    cmd.arg("--bindir").arg(&env.bin_dir);
    cmd
}

#[test]
fn test_list_empty_store() {
    let env = TestEnvironment::new();

    dkenv(&env)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No installed Docker binaries found!"));
}

#[test]
fn test_list_numbers_entries_and_marks_active() {
    let env = TestEnvironment::new();
    env.install("1.9.1", b"b");
    env.install("1.8.3", b"a");
    std::fs::write(env.store_dir.join("notes.txt"), b"ignored").unwrap();

    dkenv(&env).args(["client", "1.9.1"]).assert().success();

    let assert = dkenv(&env).arg("list").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();

    assert!(stdout.contains("Found 2 installed docker binaries"), "{stdout}");
    assert!(stdout.contains("1: docker-1.8.3"), "{stdout}");
    assert!(stdout.contains("2: docker-1.9.1"), "{stdout}");
    assert!(stdout.contains("(active)"), "{stdout}");
    assert!(!stdout.contains("notes.txt"), "{stdout}");
}

#[cfg(unix)]
#[test]
fn test_client_switches_between_installed_versions() {
    let env = TestEnvironment::new();
    env.install("1.8.3", b"a");
    env.install("1.9.1", b"b");

    dkenv(&env)
        .args(["client", "1.8.3"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Docker version 1.8.3 already installed!"));
    assert_eq!(env.link_target(), Some(env.store_dir.join("docker-1.8.3")));

    dkenv(&env).args(["client", "1.9.1"]).assert().success();
    assert_eq!(env.link_target(), Some(env.store_dir.join("docker-1.9.1")));

    dkenv(&env)
        .args(["client", "1.9.1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("nothing to do"));
}

#[cfg(unix)]
#[test]
fn test_api_resolves_to_installed_client() {
    let env = TestEnvironment::new();
    env.install("1.9.1", b"b");

    dkenv(&env)
        .args(["api", "1.21"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Found client '1.9.1' for API version '1.21'"));
    assert_eq!(env.link_target(), Some(env.store_dir.join("docker-1.9.1")));
}

#[test]
fn test_unknown_api_fails_without_changes() {
    let env = TestEnvironment::new();

    dkenv(&env)
        .args(["api", "9.99"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid API version '9.99'"))
        .stderr(predicate::str::contains("dkenv apis"));

    assert_eq!(TestEnvironment::count_entries(&env.store_dir), 0);
    assert_eq!(TestEnvironment::count_entries(&env.bin_dir), 0);
}

#[test]
fn test_apis_prints_table() {
    let env = TestEnvironment::new();

    dkenv(&env)
        .arg("apis")
        .assert()
        .success()
        .stdout(predicate::str::contains("1.21"))
        .stdout(predicate::str::contains("1.9.1"))
        .stdout(predicate::str::contains("1.10.1"));
}

#[test]
fn test_missing_bin_dir_is_configuration_error() {
    let env = TestEnvironment::new();

    dkenv_in_home(&env)
        .arg("--bindir")
        .arg(env.home.join("does-not-exist"))
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist or is not a directory"));
}

#[test]
fn test_dkenvdir_is_created() {
    let env = TestEnvironment::new();
    let store = env.home.join("fresh-store");

    dkenv(&env).arg("--dkenvdir").arg(&store).arg("list").assert().success();

    assert!(store.is_dir());
}

#[test]
fn test_dkenvdir_tilde_expands_against_homedir() {
    let env = TestEnvironment::new();

    dkenv(&env).args(["--dkenvdir", "~/custom", "list"]).assert().success();

    assert!(env.home.join("custom").is_dir());
}

#[test]
fn test_empty_version_rejected() {
    let env = TestEnvironment::new();

    dkenv(&env).args(["client", " "]).assert().failure().code(1);
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    Command::cargo_bin("dkenv").unwrap().assert().failure();
}
