#![allow(dead_code)]

//! Test helpers: build AppState and router for integration tests.
//!
//! WebDAV and notifications go to in-memory fakes; OCS lifecycle calls go to
//! whatever URL the test passes (usually a mockito server).

use axum_test::TestServer;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use unpacker_api::setup::{routes, services};
use unpacker_core::{AppApiCredentials, BaseConfig, Config, ExAppConfig};
use unpacker_processing::test_helpers::{InMemoryStorage, RecordingNotifier, SentNotification};

pub const APP_ID: &str = "unpacker";
pub const APP_VERSION: &str = "1.0.0";
pub const APP_SECRET: &str = "test-secret";

pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<InMemoryStorage>,
    pub notifier: Arc<RecordingNotifier>,
    pub scratch_root: PathBuf,
    pub _temp_dir: TempDir,
}

pub fn test_config(nextcloud_url: &str, scratch_dir: PathBuf, environment: &str) -> Config {
    Config(Box::new(ExAppConfig {
        base: BaseConfig {
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            environment: environment.to_string(),
            http_timeout_secs: 5,
        },
        nextcloud_url: nextcloud_url.to_string(),
        app_id: APP_ID.to_string(),
        app_version: APP_VERSION.to_string(),
        app_secret: APP_SECRET.to_string(),
        scratch_dir,
    }))
}

pub async fn setup_test_app(nextcloud_url: &str) -> TestApp {
    setup_test_app_in(nextcloud_url, "test").await
}

pub async fn setup_test_app_in(nextcloud_url: &str, environment: &str) -> TestApp {
    let temp_dir = tempfile::tempdir().unwrap();
    let scratch_root = temp_dir.path().join("Extracted");
    std::fs::create_dir_all(&scratch_root).unwrap();

    let config = test_config(nextcloud_url, scratch_root.clone(), environment);
    let storage = Arc::new(InMemoryStorage::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let state =
        services::initialize_services_with_notifier(&config, storage.clone(), notifier.clone())
            .unwrap();

    TestApp {
        server: TestServer::new(routes::setup_routes(state)).unwrap(),
        storage,
        notifier,
        scratch_root,
        _temp_dir: temp_dir,
    }
}

/// `AUTHORIZATION-APP-API` value for `user` signed with the test secret.
pub fn auth_value(user: &str) -> String {
    AppApiCredentials::new(APP_ID.into(), APP_VERSION.into(), APP_SECRET.into())
        .authorization_value(user)
}

/// Poll until `count` notifications were sent (jobs run detached).
pub async fn wait_for_notifications(
    notifier: &RecordingNotifier,
    count: usize,
) -> Vec<SentNotification> {
    for _ in 0..200 {
        let sent = notifier.sent();
        if sent.len() >= count {
            return sent;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("expected {} notification(s), got {:?}", count, notifier.sent());
}

pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buffer));
        for (name, data) in entries {
            zip.start_file(*name, zip::write::FileOptions::default())
                .unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }
    buffer
}

pub fn action_payload(directory: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "fileId": 101,
        "name": name,
        "directory": directory,
        "etag": "5f2c",
        "mime": "application/zip",
        "fileType": "file",
        "mtime": 1700000000,
        "size": 2048,
        "favorite": "false",
        "permissions": 27
    })
}
