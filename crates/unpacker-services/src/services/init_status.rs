//! Init progress reporting (`apps/status/{app_id}`)

use reqwest::Method;
use serde_json::json;

use crate::error::ServiceError;
use crate::services::ocs::OcsClient;

#[derive(Clone)]
pub struct InitStatusReporter {
    ocs: OcsClient,
}

impl InitStatusReporter {
    pub fn new(ocs: OcsClient) -> Self {
        Self { ocs }
    }

    /// Report init progress (0-100). AppAPI enables the app once it sees 100.
    pub async fn report_progress(&self, progress: u8) -> Result<(), ServiceError> {
        let body = json!({ "progress": progress.min(100) });
        self.ocs
            .call(Method::PUT, &self.status_path(), "", Some(&body))
            .await?;
        tracing::info!(progress, "Reported init progress");
        Ok(())
    }

    /// Report a failed initialisation. AppAPI shows `error` to the admin.
    pub async fn report_error(&self, error: &str) -> Result<(), ServiceError> {
        let body = json!({ "progress": 0, "error": error });
        self.ocs
            .call(Method::PUT, &self.status_path(), "", Some(&body))
            .await?;
        tracing::warn!(error, "Reported init failure");
        Ok(())
    }

    fn status_path(&self) -> String {
        format!(
            "/ocs/v1.php/apps/app_api/apps/status/{}",
            self.ocs.credentials().app_id()
        )
    }
}
