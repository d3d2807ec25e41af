mod helpers;

use helpers::{auth_value, setup_test_app};
use mockito::Matcher;
use std::time::Duration;

const FILES_MENU_PATH: &str = "/ocs/v1.php/apps/app_api/api/v1/ui/files-actions-menu";

#[tokio::test]
async fn test_enable_registers_menu_actions() {
    let mut nextcloud = mockito::Server::new_async().await;
    let register = nextcloud
        .mock("POST", FILES_MENU_PATH)
        .match_query(Matcher::Any)
        .match_header("EX-APP-ID", helpers::APP_ID)
        .with_status(200)
        .with_body(r#"{"ocs":{"meta":{"statuscode":100}}}"#)
        .expect(2)
        .create_async()
        .await;

    let app = setup_test_app(&nextcloud.url()).await;
    let response = app
        .server
        .put("/enabled")
        .add_query_param("enabled", 1)
        .add_header("AUTHORIZATION-APP-API", auth_value(""))
        .add_header("EX-APP-ID", helpers::APP_ID)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["error"], "");
    register.assert_async().await;
}

#[tokio::test]
async fn test_disable_reports_upstream_error() {
    let mut nextcloud = mockito::Server::new_async().await;
    nextcloud
        .mock("DELETE", FILES_MENU_PATH)
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let app = setup_test_app(&nextcloud.url()).await;
    let response = app
        .server
        .put("/enabled")
        .add_query_param("enabled", 0)
        .add_header("AUTHORIZATION-APP-API", auth_value(""))
        .add_header("EX-APP-ID", helpers::APP_ID)
        .await;

    response.assert_status_ok();
    let error = response.json::<serde_json::Value>()["error"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(!error.is_empty());
}

#[tokio::test]
async fn test_init_reports_full_progress() {
    let mut nextcloud = mockito::Server::new_async().await;
    let status = nextcloud
        .mock("PUT", "/ocs/v1.php/apps/app_api/apps/status/unpacker")
        .match_query(Matcher::Any)
        .match_body(Matcher::Json(serde_json::json!({ "progress": 100 })))
        .with_status(200)
        .create_async()
        .await;

    let app = setup_test_app(&nextcloud.url()).await;
    app.server
        .post("/init")
        .add_header("AUTHORIZATION-APP-API", auth_value(""))
        .add_header("EX-APP-ID", helpers::APP_ID)
        .await
        .assert_status_ok();

    for _ in 0..200 {
        if status.matched_async().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("init progress was never reported");
}

#[tokio::test]
async fn test_init_reports_error_when_progress_is_rejected() {
    let mut nextcloud = mockito::Server::new_async().await;
    nextcloud
        .mock("PUT", "/ocs/v1.php/apps/app_api/apps/status/unpacker")
        .match_query(Matcher::Any)
        .match_body(Matcher::Json(serde_json::json!({ "progress": 100 })))
        .with_status(500)
        .create_async()
        .await;
    let failure = nextcloud
        .mock("PUT", "/ocs/v1.php/apps/app_api/apps/status/unpacker")
        .match_query(Matcher::Any)
        .match_body(Matcher::PartialJson(serde_json::json!({ "progress": 0 })))
        .with_status(200)
        .create_async()
        .await;

    let app = setup_test_app(&nextcloud.url()).await;
    app.server
        .post("/init")
        .add_header("AUTHORIZATION-APP-API", auth_value(""))
        .add_header("EX-APP-ID", helpers::APP_ID)
        .await
        .assert_status_ok();

    for _ in 0..200 {
        if failure.matched_async().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("init failure was never reported");
}
