//! End-to-end fetch-and-switch through the library against a local HTTP origin.

use dkenv::actions::Dkenv;
use dkenv::core::DkenvError;
use dkenv::download::Downloader;
use dkenv::store::InstallStore;
use dkenv::switcher::SwitchOutcome;
use dkenv::test_utils::{TestEnvironment, init_test_logging};
use dkenv::utils::platform::Platform;
use dkenv::version::Version;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dkenv_for(env: &TestEnvironment, server: &MockServer) -> Dkenv {
    let downloader = Downloader::new(InstallStore::new(&env.store_dir))
        .unwrap()
        .with_base_url(server.uri())
        .with_platform(Platform::Linux)
        .show_progress(false);
    Dkenv::with_downloader(downloader, &env.bin_dir)
}

async fn serve(server: &MockServer, version: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/builds/Linux/x86_64/docker-{version}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .expect(1)
        .mount(server)
        .await;
}

#[cfg(unix)]
#[tokio::test]
async fn test_client_version_on_empty_store() {
    use std::os::unix::fs::PermissionsExt;

    init_test_logging(None);
    let env = TestEnvironment::new();
    let server = MockServer::start().await;
    serve(&server, "1.9.1", b"#!/bin/sh\necho docker 1.9.1\n").await;

    let dkenv = dkenv_for(&env, &server);
    let version = Version::parse("1.9.1").unwrap();
    assert!(!dkenv.store().is_installed(&version).unwrap());

    let outcome = dkenv.fetch_version_action("1.9.1", false).await.unwrap();

    assert!(outcome.downloaded);
    assert_eq!(outcome.switch, SwitchOutcome::Created);
    assert!(dkenv.store().is_installed(&version).unwrap());

    let entry = env.store_dir.join("docker-1.9.1");
    assert_eq!(std::fs::read(&entry).unwrap(), b"#!/bin/sh\necho docker 1.9.1\n");
    assert_eq!(std::fs::metadata(&entry).unwrap().permissions().mode() & 0o777, 0o755);
    assert_eq!(env.link_target(), Some(entry));

    // Only the install entry is left behind, no temporary files
    assert_eq!(TestEnvironment::count_entries(&env.store_dir), 1);
}

#[cfg(unix)]
#[tokio::test]
async fn test_api_version_on_empty_store() {
    let env = TestEnvironment::new();
    let server = MockServer::start().await;
    serve(&server, "1.9.1", b"docker").await;

    let dkenv = dkenv_for(&env, &server);
    let outcome = dkenv.fetch_version_action("1.21", true).await.unwrap();

    assert_eq!(outcome.version.as_str(), "1.9.1");
    assert_eq!(env.link_target(), Some(env.store_dir.join("docker-1.9.1")));
}

#[cfg(unix)]
#[tokio::test]
async fn test_unknown_api_version_mutates_nothing() {
    let env = TestEnvironment::new();
    let server = MockServer::start().await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let dkenv = dkenv_for(&env, &server);
    let result = dkenv.fetch_version_action("9.99", true).await;

    assert!(matches!(result, Err(DkenvError::UnknownCompatibilityId { .. })));
    assert_eq!(TestEnvironment::count_entries(&env.store_dir), 0);
    assert_eq!(TestEnvironment::count_entries(&env.bin_dir), 0);
}

#[cfg(unix)]
#[tokio::test]
async fn test_foreign_docker_is_backed_up_once() {
    let env = TestEnvironment::new();
    let server = MockServer::start().await;
    serve(&server, "1.8.3", b"managed").await;
    std::fs::write(env.link_path(), b"system docker").unwrap();

    let dkenv = dkenv_for(&env, &server);
    let outcome = dkenv.fetch_version_action("1.8.3", false).await.unwrap();

    let backup = match outcome.switch {
        SwitchOutcome::BackedUp {
            backup,
        } => backup,
        other => panic!("expected BackedUp, got {other:?}"),
    };
    assert_eq!(std::fs::read(&backup).unwrap(), b"system docker");
    assert_eq!(env.link_target(), Some(env.store_dir.join("docker-1.8.3")));
    // The symlink and exactly one backup
    assert_eq!(TestEnvironment::count_entries(&env.bin_dir), 2);

    // A second run sees the managed symlink and leaves everything alone
    let again = dkenv.fetch_version_action("1.8.3", false).await.unwrap();
    assert!(!again.downloaded);
    assert_eq!(again.switch, SwitchOutcome::Unchanged);
    assert_eq!(TestEnvironment::count_entries(&env.bin_dir), 2);
}

#[cfg(unix)]
#[tokio::test]
async fn test_switching_between_downloaded_versions() {
    let env = TestEnvironment::new();
    let server = MockServer::start().await;
    serve(&server, "1.8.3", b"old").await;
    serve(&server, "1.9.1", b"new").await;

    let dkenv = dkenv_for(&env, &server);
    dkenv.fetch_version_action("1.20", true).await.unwrap();
    let outcome = dkenv.fetch_version_action("1.21", true).await.unwrap();

    assert_eq!(
        outcome.switch,
        SwitchOutcome::Replaced {
            previous: env.store_dir.join("docker-1.8.3")
        }
    );

    let mut names: Vec<_> = dkenv.list_action().unwrap().into_iter().map(|e| (e.name, e.active)).collect();
    names.sort();
    assert_eq!(
        names,
        vec![("docker-1.8.3".to_string(), false), ("docker-1.9.1".to_string(), true)]
    );
}

#[tokio::test]
async fn test_insecure_redirect_installs_nothing() {
    let env = TestEnvironment::new();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/builds/Linux/x86_64/docker-1.9.1"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/mirror", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/mirror"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"x".to_vec()))
        .expect(0)
        .mount(&server)
        .await;

    let dkenv = dkenv_for(&env, &server);
    let result = dkenv.fetch_version_action("1.9.1", false).await;

    assert!(matches!(result, Err(DkenvError::InsecureRedirect { .. })), "{result:?}");
    assert!(!dkenv.store().is_installed(&Version::parse("1.9.1").unwrap()).unwrap());
    assert_eq!(TestEnvironment::count_entries(&env.store_dir), 0);
    assert!(env.link_target().is_none());
}

#[tokio::test]
async fn test_missing_version_reports_status() {
    let env = TestEnvironment::new();
    let server = MockServer::start().await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(404)).mount(&server).await;

    let dkenv = dkenv_for(&env, &server);
    let result = dkenv.fetch_version_action("0.0.1", false).await;

    assert!(matches!(
        result,
        Err(DkenvError::VersionNotFound {
            status: 404,
            ..
        })
    ));
    assert_eq!(TestEnvironment::count_entries(&env.store_dir), 0);
}
