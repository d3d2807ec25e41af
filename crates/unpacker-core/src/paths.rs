//! User-relative remote path helpers.
//!
//! Remote paths are always rendered with forward slashes and a single leading
//! `/` that stands for the user's storage root. `..` segments never climb
//! above that root.

/// Normalize a remote path: `\` becomes `/`, empty and `.` segments are
/// dropped, `..` pops one segment (stopping at the root), and the result starts
/// with exactly one `/` and has no trailing slash (except the root itself).
pub fn normalize_remote_path(raw: &str) -> String {
    let unified = raw.replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Drop one leading segment equal to `user_id`. The path must be normalized.
pub fn strip_user_segment(path: &str, user_id: &str) -> String {
    if user_id.is_empty() {
        return path.to_string();
    }
    let rest = path.strip_prefix('/').unwrap_or(path);
    match rest.split_once('/') {
        Some((first, tail)) if first == user_id => format!("/{}", tail),
        None if rest == user_id => "/".to_string(),
        _ => path.to_string(),
    }
}

/// Parent folder of a normalized path; the root is its own parent.
pub fn parent_of(path: &str) -> String {
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}

/// Last segment of a normalized path (empty for the root).
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}

/// Leaf name without its last extension, like `Path::file_stem`.
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// The path with the last extension of its leaf removed.
pub fn without_extension(path: &str) -> String {
    let name = file_name(path);
    let stem = file_stem(path);
    if stem.len() == name.len() {
        return path.to_string();
    }
    path[..path.len() - (name.len() - stem.len())].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_remote_path() {
        assert_eq!(normalize_remote_path("Documents//report.zip"), "/Documents/report.zip");
        assert_eq!(normalize_remote_path("\\a\\b\\"), "/a/b");
        assert_eq!(normalize_remote_path(""), "/");
        assert_eq!(normalize_remote_path("/a/./b/../c"), "/a/c");
        assert_eq!(normalize_remote_path("/../../etc"), "/etc");
    }

    #[test]
    fn test_normalize_is_a_fixed_point() {
        for raw in ["a//b", "/x/../y/", "\\\\srv\\share", "/"] {
            let once = normalize_remote_path(raw);
            assert_eq!(normalize_remote_path(&once), once);
        }
    }

    #[test]
    fn test_strip_user_segment() {
        assert_eq!(strip_user_segment("/alice/Documents", "alice"), "/Documents");
        assert_eq!(strip_user_segment("/alice", "alice"), "/");
        assert_eq!(strip_user_segment("/alicia/Documents", "alice"), "/alicia/Documents");
        assert_eq!(strip_user_segment("/alice/alice/x", "alice"), "/alice/x");
        assert_eq!(strip_user_segment("/Documents", ""), "/Documents");
    }

    #[test]
    fn test_parent_and_names() {
        assert_eq!(parent_of("/Documents/report.zip"), "/Documents");
        assert_eq!(parent_of("/report.zip"), "/");
        assert_eq!(parent_of("/"), "/");
        assert_eq!(file_name("/Documents/report.zip"), "report.zip");
        assert_eq!(file_stem("/Documents/report.zip"), "report");
        assert_eq!(file_stem("/a/backup.tar.gz"), "backup.tar");
        assert_eq!(file_stem("/a/.hidden"), ".hidden");
    }

    #[test]
    fn test_without_extension() {
        assert_eq!(without_extension("/Documents/report.zip"), "/Documents/report");
        assert_eq!(without_extension("/noext"), "/noext");
        assert_eq!(without_extension("/v1.2/archive"), "/v1.2/archive");
    }
}
