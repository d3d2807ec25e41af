//! Destination folder inference
//!
//! Decides where an archive's members land so that extracting a
//! self-contained archive (`project.zip` holding `project/...`) does not nest
//! the folder twice.

use unpacker_core::models::{ArchiveLayout, DestinationPath, ExtractionMode};
use unpacker_core::paths::{file_name, file_stem, normalize_remote_path, parent_of, without_extension};

const NO_EXTENSION_SUFFIX: &str = "-extracted";

/// Resolve the destination folder for `source_path` (user-relative).
///
/// For `Auto` the first matching rule wins:
/// 1. root files and root folders: a new folder named after the archive
/// 2. several root folders: a new folder named after the archive
/// 3. one root folder named like the archive, inside a folder also named like
///    the archive: the archive's grandparent
/// 4. one root folder: the archive's folder
/// 5. nothing at all: a new folder named after the archive
///
/// The new folder is the archive path without its extension, or
/// `<name>-extracted` when the name has no extension to drop.
pub fn resolve(
    layout: &ArchiveLayout,
    source_path: &str,
    mode: ExtractionMode,
    user_id: &str,
) -> DestinationPath {
    let source = normalize_remote_path(source_path);
    let parent = parent_of(&source);

    let target = match mode {
        ExtractionMode::Parent => parent,
        ExtractionMode::Auto => {
            let stem = file_stem(&source);
            let folders = layout.root_folder_count();

            // Rules 1 and 2
            if folders > 1 || (layout.has_root_files() && folders == 1) {
                new_folder_for(&source)
            } else if layout.single_root_folder() == Some(stem) && file_name(&parent) == stem {
                parent_of(&parent)
            } else if folders == 1 {
                parent
            } else {
                new_folder_for(&source)
            }
        }
    };

    let destination = DestinationPath::new(&target, user_id);
    tracing::debug!(
        source = %source,
        mode = %mode,
        destination = %destination,
        "Resolved extraction destination"
    );
    destination
}

fn new_folder_for(source: &str) -> String {
    let folder = without_extension(source);
    if folder == source {
        format!("{}{}", source, NO_EXTENSION_SUFFIX)
    } else {
        folder
    }
}

/// Destination used when the archive index cannot be read: its own folder.
pub fn fallback(source_path: &str, user_id: &str) -> DestinationPath {
    DestinationPath::new(&parent_of(&normalize_remote_path(source_path)), user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(names: &[&str]) -> ArchiveLayout {
        ArchiveLayout::from_member_names(names.iter().copied())
    }

    fn auto(names: &[&str], source: &str) -> String {
        resolve(&layout(names), source, ExtractionMode::Auto, "alice").to_string()
    }

    #[test]
    fn test_single_differently_named_folder_goes_to_parent() {
        assert_eq!(auto(&["photos/", "photos/1.jpg"], "/Documents/holiday.zip"), "/Documents");
        // Folder named like the archive, but the parent is not: still the parent.
        assert_eq!(auto(&["report/a.txt", "report/b.txt"], "/Documents/report.zip"), "/Documents");
    }

    #[test]
    fn test_root_files_and_folders_get_new_folder() {
        assert_eq!(
            auto(&["readme.txt", "src/main.rs"], "/Projects/tool.zip"),
            "/Projects/tool"
        );
    }

    #[test]
    fn test_several_root_folders_get_new_folder() {
        assert_eq!(auto(&["a/1", "b/2"], "/x/bundle.zip"), "/x/bundle");
    }

    #[test]
    fn test_self_named_folder_in_self_named_parent_goes_to_grandparent() {
        assert_eq!(auto(&["foo/", "foo/bar.txt"], "/Work/foo/foo.zip"), "/Work");
        assert_eq!(auto(&["foo/bar.txt"], "/foo/foo.zip"), "/");
    }

    #[test]
    fn test_parent_named_like_archive_but_other_root_folder() {
        assert_eq!(auto(&["other/bar.txt"], "/Work/foo/foo.zip"), "/Work/foo");
    }

    #[test]
    fn test_no_folders_gets_new_folder() {
        assert_eq!(auto(&[], "/x/empty.zip"), "/x/empty");
        assert_eq!(auto(&["a.txt", "b.txt"], "/x/flat.zip"), "/x/flat");
    }

    #[test]
    fn test_archive_without_extension_gets_suffixed_folder() {
        assert_eq!(auto(&["a.txt"], "/d/backup"), "/d/backup-extracted");
        assert_eq!(auto(&["a/1", "b/2"], "/d/backup"), "/d/backup-extracted");
        assert_eq!(auto(&[], "/.hidden"), "/.hidden-extracted");
        // Rule 4 does not need a new folder.
        assert_eq!(auto(&["docs/a.txt"], "/d/backup"), "/d");
    }

    #[test]
    fn test_parent_mode_ignores_layout() {
        let names = layout(&["a.txt", "dir/b.txt"]);
        let dest = resolve(&names, "/Documents/report.zip", ExtractionMode::Parent, "alice");
        assert_eq!(dest.as_str(), "/Documents");
    }

    #[test]
    fn test_result_never_starts_with_user_segment() {
        let dest = resolve(&layout(&["a/1"]), "/alice/Documents/a.zip", ExtractionMode::Auto, "alice");
        assert_eq!(dest.as_str(), "/Documents");
        let dest = resolve(&layout(&[]), "/alice.zip", ExtractionMode::Auto, "alice");
        assert_eq!(dest.as_str(), "/");
    }

    #[test]
    fn test_fallback_is_parent_folder() {
        assert_eq!(fallback("/x/bad.zip", "alice").as_str(), "/x");
        assert_eq!(fallback("/bad.zip", "alice").as_str(), "/");
    }
}
