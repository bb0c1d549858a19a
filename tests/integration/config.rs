//! Configuration file handling as seen from the binary.

use assert_cmd::Command;
use dkenv::test_utils::TestEnvironment;
use predicates::prelude::*;

fn dkenv(env: &TestEnvironment) -> Command {
    let mut cmd = Command::cargo_bin("dkenv").unwrap();
    cmd.arg("--homedir")
        .arg(&env.home)
        .env_remove("DKENV_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_default_config_location_supplies_bin_dir() {
    let env = TestEnvironment::new();
    env.install("1.8.3", b"a");
    std::fs::write(env.store_dir.join("config.toml"), "bin_dir = \"~/bin\"\n").unwrap();

    dkenv(&env).args(["client", "1.8.3"]).assert().success();

    assert!(env.link_path().symlink_metadata().is_ok());
}

#[test]
fn test_flag_overrides_config() {
    let env = TestEnvironment::new();
    let other_bin = env.home.join("other-bin");
    std::fs::create_dir(&other_bin).unwrap();
    env.install("1.8.3", b"a");
    std::fs::write(env.store_dir.join("config.toml"), "bin_dir = \"~/bin\"\n").unwrap();

    dkenv(&env).arg("--bindir").arg(&other_bin).args(["client", "1.8.3"]).assert().success();

    assert!(other_bin.join("docker").symlink_metadata().is_ok());
    assert!(env.link_path().symlink_metadata().is_err());
}

#[test]
fn test_explicit_config_path_via_env() {
    let env = TestEnvironment::new();
    let config = env.home.join("dkenv.toml");
    let store = env.home.join("elsewhere");
    std::fs::write(&config, "dkenv_dir = \"~/elsewhere\"\n").unwrap();

    dkenv(&env)
        .env("DKENV_CONFIG", &config)
        .arg("--bindir")
        .arg(&env.bin_dir)
        .arg("list")
        .assert()
        .success();

    assert!(store.is_dir());
}

#[test]
fn test_http_mirror_rejected() {
    let env = TestEnvironment::new();
    std::fs::write(
        env.store_dir.join("config.toml"),
        "download_base_url = \"http://mirror.example.com\"\n",
    )
    .unwrap();

    dkenv(&env)
        .arg("--bindir")
        .arg(&env.bin_dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must use https"));
}

#[test]
fn test_malformed_config_rejected() {
    let env = TestEnvironment::new();
    let config = env.home.join("broken.toml");
    std::fs::write(&config, "bin_dir = ").unwrap();

    dkenv(&env)
        .arg("--config")
        .arg(&config)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}
