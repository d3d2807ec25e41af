use std::fmt;

use crate::paths::{normalize_remote_path, strip_user_segment};

/// Folder, relative to the user's storage root, that receives extracted members.
///
/// Always normalized (`/`-rooted, no `..`) and never prefixed with the user's
/// own account identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationPath(String);

impl DestinationPath {
    pub fn new(raw: &str, user_id: &str) -> Self {
        DestinationPath(strip_user_segment(&normalize_remote_path(raw), user_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DestinationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
