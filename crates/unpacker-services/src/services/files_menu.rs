//! Files-actions-menu registration (`ui/files-actions-menu`)

use reqwest::Method;
use serde_json::json;
use unpacker_core::constants::ZIP_MIME;

use crate::error::ServiceError;
use crate::services::ocs::OcsClient;

const FILES_MENU_PATH: &str = "/ocs/v1.php/apps/app_api/api/v1/ui/files-actions-menu";

/// One context-menu entry shown in the Files app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileAction {
    pub name: &'static str,
    pub display_name: &'static str,
    /// ExApp route AppAPI posts the selected file to.
    pub action_handler: &'static str,
    pub mime: &'static str,
}

pub const EXTRACT_ACTIONS: [FileAction; 2] = [
    FileAction {
        name: "extract_to_here",
        display_name: "Extract To Auto",
        action_handler: "/extract_to_auto",
        mime: ZIP_MIME,
    },
    FileAction {
        name: "extract_to_parent",
        display_name: "Extract To Parent",
        action_handler: "/extract_to_parent",
        mime: ZIP_MIME,
    },
];

#[derive(Clone)]
pub struct FilesActionsMenu {
    ocs: OcsClient,
}

impl FilesActionsMenu {
    pub fn new(ocs: OcsClient) -> Self {
        Self { ocs }
    }

    pub async fn register(&self, action: &FileAction) -> Result<(), ServiceError> {
        let body = json!({
            "name": action.name,
            "displayName": action.display_name,
            "actionHandler": action.action_handler,
            "icon": "",
            "mime": action.mime,
            "permissions": 31,
            "order": 0,
        });
        self.ocs
            .call(Method::POST, FILES_MENU_PATH, "", Some(&body))
            .await?;
        tracing::info!(action = action.name, "Registered files menu action");
        Ok(())
    }

    pub async fn unregister(&self, action: &FileAction) -> Result<(), ServiceError> {
        let body = json!({ "name": action.name });
        self.ocs
            .call(Method::DELETE, FILES_MENU_PATH, "", Some(&body))
            .await?;
        tracing::info!(action = action.name, "Unregistered files menu action");
        Ok(())
    }

    /// Register (or unregister) every extraction action, stopping at the first failure.
    pub async fn set_enabled(&self, enabled: bool) -> Result<(), ServiceError> {
        for action in EXTRACT_ACTIONS.iter() {
            if enabled {
                self.register(action).await?;
            } else {
                self.unregister(action).await?;
            }
        }
        Ok(())
    }
}
