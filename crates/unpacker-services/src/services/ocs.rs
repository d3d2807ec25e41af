//! Signed OCS client
//!
//! Every call carries the AppAPI headers for the acting user and asks for a
//! JSON response (`format=json`). OCS v1 answers HTTP 200 even for failures, so
//! `ocs.meta.statuscode` is checked as well.

use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use unpacker_core::{AppApiCredentials, Config};

use crate::error::ServiceError;

#[derive(Clone, Debug)]
pub struct OcsClient {
    client: Client,
    base_url: String,
    credentials: AppApiCredentials,
}

impl OcsClient {
    pub fn new(
        base_url: String,
        credentials: AppApiCredentials,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Client(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        Self::new(
            config.nextcloud_url().to_string(),
            config.credentials(),
            Duration::from_secs(config.http_timeout_secs()),
        )
    }

    pub fn credentials(&self) -> &AppApiCredentials {
        &self.credentials
    }

    /// Send one OCS request and return the decoded body (`Value::Null` if empty).
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        user_id: &str,
        json: Option<&Value>,
    ) -> Result<Value, ServiceError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .query(&[("format", "json")]);
        for (name, value) in self.credentials.signed_headers(user_id) {
            request = request.header(name, value);
        }
        if let Some(body) = json {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                method = %method,
                path = %path,
                status = status.as_u16(),
                "OCS request failed"
            );
            return Err(ServiceError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let value: Value = serde_json::from_str(&text)
            .map_err(|e| ServiceError::InvalidResponse(format!("{}: {}", path, e)))?;

        if let Some(statuscode) = value["ocs"]["meta"]["statuscode"].as_i64() {
            if statuscode != 100 && statuscode != 200 {
                let message = value["ocs"]["meta"]["message"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                return Err(ServiceError::Ocs {
                    path: path.to_string(),
                    statuscode,
                    message,
                });
            }
        }

        Ok(value)
    }
}
