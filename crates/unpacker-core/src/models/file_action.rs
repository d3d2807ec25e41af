use serde::{Deserialize, Serialize};

/// Body AppAPI posts to a files-actions-menu handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiActionFileInfo {
    pub file_id: i64,
    pub name: String,
    /// Folder of the file, relative to the acting user's root (e.g. `/Documents`).
    pub directory: String,
    #[serde(default)]
    pub etag: String,
    #[serde(default)]
    pub mime: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub mtime: i64,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub favorite: String,
    #[serde(default)]
    pub permissions: i64,
    #[serde(default)]
    pub share_owner: Option<String>,
    #[serde(default)]
    pub share_owner_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub instance_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_action_payload() {
        let body = serde_json::json!({
            "fileId": 42,
            "name": "report.zip",
            "directory": "/Documents",
            "etag": "abc",
            "mime": "application/zip",
            "fileType": "file",
            "mtime": 1700000000,
            "size": 1024,
            "favorite": "false",
            "permissions": 27,
            "userId": "alice"
        });
        let info: UiActionFileInfo = serde_json::from_value(body).unwrap();
        assert_eq!(info.file_id, 42);
        assert_eq!(info.directory, "/Documents");
        assert_eq!(info.user_id.as_deref(), Some("alice"));
        assert!(info.share_owner.is_none());
    }

    #[test]
    fn test_deserialize_minimal_payload() {
        let body = serde_json::json!({ "fileId": 1, "name": "a.zip", "directory": "/" });
        let info: UiActionFileInfo = serde_json::from_value(body).unwrap();
        assert_eq!(info.size, 0);
        assert!(info.mime.is_empty());
    }
}
