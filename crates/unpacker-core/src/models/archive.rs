use std::collections::BTreeSet;

/// Top-level layout of an archive's member list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveLayout {
    /// Members whose path has no directory separator.
    pub root_file_count: usize,
    /// Distinct first segments of members that do have a separator.
    pub root_folder_names: BTreeSet<String>,
}

impl ArchiveLayout {
    /// Classify member names as stored in the archive index. `\` is treated as a separator.
    pub fn from_member_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut layout = ArchiveLayout::default();
        for name in names {
            let name = name.as_ref().replace('\\', "/");
            let name = name.trim_start_matches("./").trim_start_matches('/');
            if name.is_empty() {
                continue;
            }
            match name.split_once('/') {
                Some((folder, _)) => {
                    layout.root_folder_names.insert(folder.to_string());
                }
                None => layout.root_file_count += 1,
            }
        }
        layout
    }

    pub fn has_root_files(&self) -> bool {
        self.root_file_count > 0
    }

    pub fn root_folder_count(&self) -> usize {
        self.root_folder_names.len()
    }

    /// The folder name when the archive has exactly one top-level folder.
    pub fn single_root_folder(&self) -> Option<&str> {
        if self.root_folder_names.len() == 1 {
            self.root_folder_names.iter().next().map(String::as_str)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_root_folder() {
        let layout = ArchiveLayout::from_member_names(["report/", "report/a.txt", "report/b.txt"]);
        assert_eq!(layout.root_file_count, 0);
        assert_eq!(layout.root_folder_count(), 1);
        assert_eq!(layout.single_root_folder(), Some("report"));
    }

    #[test]
    fn test_mixed_layout_without_directory_entries() {
        let layout = ArchiveLayout::from_member_names(["readme.md", "src/main.rs", "docs/x/y.md"]);
        assert!(layout.has_root_files());
        assert_eq!(layout.root_folder_count(), 2);
        assert_eq!(layout.single_root_folder(), None);
    }

    #[test]
    fn test_folder_names_are_deduplicated_and_order_independent() {
        let a = ArchiveLayout::from_member_names(["b/1", "a/1", "b/2"]);
        let b = ArchiveLayout::from_member_names(["a/1", "b/2", "b/1"]);
        assert_eq!(a, b);
        assert_eq!(a.root_folder_count(), 2);
    }

    #[test]
    fn test_backslash_separators() {
        let layout = ArchiveLayout::from_member_names(["win\\file.txt"]);
        assert_eq!(layout.single_root_folder(), Some("win"));
        assert!(!layout.has_root_files());
    }

    #[test]
    fn test_empty() {
        let layout = ArchiveLayout::from_member_names(Vec::<String>::new());
        assert_eq!(layout, ArchiveLayout::default());
        assert_eq!(layout.single_root_folder(), None);
    }
}
