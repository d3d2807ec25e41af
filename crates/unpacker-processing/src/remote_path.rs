//! Local scratch path to remote path translation

use std::path::Path;
use unpacker_core::models::DestinationPath;
use unpacker_core::paths::{normalize_remote_path, strip_user_segment};
use unpacker_storage::dav_files_path;

use crate::error::JobError;

/// User-relative upload path for a file extracted under `scratch_root`.
///
/// The scratch-root prefix is replaced by `destination`, separators are
/// unified and collapsed, and one leading user segment is dropped. The result
/// is already normalized, so normalizing it again returns it unchanged.
pub fn to_upload_path(
    local_file: &Path,
    scratch_root: &Path,
    destination: &DestinationPath,
    user_id: &str,
) -> Result<String, JobError> {
    let relative = local_file
        .strip_prefix(scratch_root)
        .map_err(|_| JobError::PathOutsideScratch(local_file.display().to_string()))?;

    let joined = format!("{}/{}", destination.as_str(), relative.to_string_lossy());
    Ok(strip_user_segment(&normalize_remote_path(&joined), user_id))
}

/// Server-absolute WebDAV path (`/files/{user}/...`) for a user-relative path.
pub fn to_dav_path(user_id: &str, relative: &str) -> String {
    dav_files_path(user_id, &normalize_remote_path(relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "/tmp/Extracted/20240101120000-abc/extracted";

    fn upload(local: &str, dest: &str, user: &str) -> String {
        to_upload_path(
            Path::new(local),
            Path::new(ROOT),
            &DestinationPath::new(dest, user),
            user,
        )
        .unwrap()
    }

    #[test]
    fn test_replaces_scratch_prefix_with_destination() {
        assert_eq!(
            upload(&format!("{}/report/a.txt", ROOT), "/Documents", "alice"),
            "/Documents/report/a.txt"
        );
        assert_eq!(upload(&format!("{}/a.txt", ROOT), "/", "alice"), "/a.txt");
    }

    #[test]
    fn test_output_is_normalization_fixed_point() {
        for local in ["a.txt", "x//y/z.bin", "deep/./dir/f", "win\\style\\f.txt"] {
            let out = upload(&format!("{}/{}", ROOT, local), "/Documents/", "alice");
            assert_eq!(normalize_remote_path(&out), out);
            assert!(!out.contains("//"));
            assert!(!out.contains('\\'));
        }
    }

    #[test]
    fn test_strips_exactly_one_user_segment() {
        // Destination is the root, so the member's own first segment is the user id.
        assert_eq!(
            upload(&format!("{}/alice/alice/notes.txt", ROOT), "/", "alice"),
            "/alice/notes.txt"
        );
        assert_eq!(
            upload(&format!("{}/alicia/notes.txt", ROOT), "/", "alice"),
            "/alicia/notes.txt"
        );
        assert_eq!(
            upload(&format!("{}/alice/notes.txt", ROOT), "/Documents", "alice"),
            "/Documents/alice/notes.txt"
        );
    }

    #[test]
    fn test_rejects_paths_outside_scratch() {
        let result = to_upload_path(
            Path::new("/etc/passwd"),
            Path::new(ROOT),
            &DestinationPath::new("/", "alice"),
            "alice",
        );
        assert!(matches!(result, Err(JobError::PathOutsideScratch(_))));
    }

    #[test]
    fn test_to_dav_path() {
        assert_eq!(to_dav_path("alice", "/Documents/a.txt"), "/files/alice/Documents/a.txt");
        assert_eq!(to_dav_path("alice", "Documents//a.txt"), "/files/alice/Documents/a.txt");
        assert_eq!(to_dav_path("alice", "/"), "/files/alice");
    }
}
