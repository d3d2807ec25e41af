//! AppAPI user notifications

use async_trait::async_trait;
use rand::{distr::Alphanumeric, Rng};
use reqwest::Method;
use serde_json::{json, Value};
use unpacker_core::constants::NOTIFICATION_OBJECT_ID_LEN;
use unpacker_core::Notifier;

use crate::services::ocs::OcsClient;

const NOTIFICATION_PATH: &str = "/ocs/v1.php/apps/app_api/api/v1/notification";

fn random_object_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(NOTIFICATION_OBJECT_ID_LEN)
        .map(char::from)
        .collect()
}

/// Request body for one notification.
pub fn notification_params(subject: &str, message: &str) -> Value {
    json!({
        "params": {
            "object": "app_api",
            "object_id": random_object_id(),
            "subject_type": "app_api_ex_app",
            "subject_params": {
                "rich_subject": subject,
                "rich_subject_params": {},
                "rich_message": message,
                "rich_message_params": {},
            }
        }
    })
}

#[derive(Clone)]
pub struct OcsNotifier {
    ocs: OcsClient,
}

impl OcsNotifier {
    pub fn new(ocs: OcsClient) -> Self {
        Self { ocs }
    }
}

#[async_trait]
impl Notifier for OcsNotifier {
    #[tracing::instrument(skip(self, message), fields(user = %user_id))]
    async fn notify(&self, user_id: &str, subject: &str, message: &str) -> Result<(), String> {
        let body = notification_params(subject, message);
        self.ocs
            .call(Method::POST, NOTIFICATION_PATH, user_id, Some(&body))
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())?;

        tracing::debug!(subject = %subject, "Notification sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use std::time::Duration;
    use unpacker_core::AppApiCredentials;

    #[test]
    fn test_notification_params_shape() {
        let params = notification_params("a.zip finished!", "Extracted file(s) are waiting for you!");
        let inner = &params["params"];
        assert_eq!(inner["object"], "app_api");
        assert_eq!(inner["subject_type"], "app_api_ex_app");
        assert_eq!(inner["subject_params"]["rich_subject"], "a.zip finished!");
        let object_id = inner["object_id"].as_str().unwrap();
        assert_eq!(object_id.len(), NOTIFICATION_OBJECT_ID_LEN);
        assert!(object_id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_notify_posts_to_app_api() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", NOTIFICATION_PATH)
            .match_query(Matcher::UrlEncoded("format".into(), "json".into()))
            .match_body(Matcher::PartialJson(json!({
                "params": { "subject_params": { "rich_subject": "done" } }
            })))
            .with_status(200)
            .with_body(r#"{"ocs":{"meta":{"statuscode":100}}}"#)
            .create_async()
            .await;

        let ocs = OcsClient::new(
            server.url(),
            AppApiCredentials::new("unpacker".into(), "1.0.0".into(), "secret".into()),
            Duration::from_secs(5),
        )
        .unwrap();
        OcsNotifier::new(ocs)
            .notify("alice", "done", "message")
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
