//! Directory tree walking with ignore filtering.
//!
//! Both the manifest collector and the archive builder walk the root through
//! [`TreeWalker`], so the two passes see entries in the same order.

use crate::PackError;
use crate::Result;
use crate::creation::filters;
use crate::creation::filters::IgnoreSet;
use std::path::Path;
use std::path::PathBuf;
use tracing::trace;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// Walks a root directory and yields its regular files.
///
/// Traversal is depth-first with the entries of each directory sorted by file
/// name. Symlinks are not followed into directories; a symlink whose target
/// is a regular file is reported as a file. Directories and special files are
/// never yielded.
///
/// # Examples
///
/// ```no_run
/// use treepack_core::IgnoreSet;
/// use treepack_core::creation::walker::TreeWalker;
/// use std::path::Path;
///
/// let ignore = IgnoreSet::parse("target");
/// let walker = TreeWalker::new(Path::new("./project"), Some(&ignore));
///
/// for entry in walker.walk() {
///     let entry = entry?;
///     println!("{}", entry.entry_name);
/// }
/// # Ok::<(), treepack_core::PackError>(())
/// ```
pub struct TreeWalker<'a> {
    root: &'a Path,
    ignore: Option<&'a IgnoreSet>,
}

impl<'a> TreeWalker<'a> {
    /// Creates a walker for `root`, optionally filtered by `ignore`.
    #[must_use]
    pub fn new(root: &'a Path, ignore: Option<&'a IgnoreSet>) -> Self {
        Self { root, ignore }
    }

    /// Returns an iterator over the regular files below the root.
    ///
    /// Ignored directories are pruned rather than descended into.
    ///
    /// # Errors
    ///
    /// Entries may error if:
    /// - A directory cannot be read
    /// - File metadata cannot be read
    /// - A path below the root is not valid UTF-8
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry>> + '_ {
        WalkDir::new(self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !self.is_ignored(entry))
            .filter_map(move |entry| match entry {
                Ok(entry) => self.build_file_entry(&entry).transpose(),
                Err(e) => Some(Err(PackError::from(e))),
            })
    }

    fn relative<'p>(&self, path: &'p Path) -> Option<&'p Path> {
        path.strip_prefix(self.root).ok()
    }

    fn is_ignored(&self, entry: &DirEntry) -> bool {
        let Some(ignore) = self.ignore else {
            return false;
        };
        self.relative(entry.path())
            .is_some_and(|relative| ignore.matches(relative))
    }

    /// Returns `Ok(None)` for anything that is not a regular file.
    fn build_file_entry(&self, entry: &DirEntry) -> Result<Option<FileEntry>> {
        let file_type = entry.file_type();
        let size = if file_type.is_file() {
            entry.metadata()?.len()
        } else if file_type.is_symlink() {
            match std::fs::metadata(entry.path()) {
                Ok(target) if target.is_file() => target.len(),
                // dangling links and links to directories are skipped
                _ => return Ok(None),
            }
        } else {
            return Ok(None);
        };

        let path = entry.path().to_path_buf();
        let relative = self
            .relative(&path)
            .map(Path::to_path_buf)
            .ok_or_else(|| PackError::Walk {
                path: path.clone(),
                message: format!("not under root {}", self.root.display()),
            })?;
        let entry_name = filters::entry_name(&relative).ok_or_else(|| PackError::Walk {
            path: path.clone(),
            message: "path is not valid UTF-8".to_string(),
        })?;

        trace!(entry = %entry_name, size, "visited file");

        Ok(Some(FileEntry {
            path,
            relative,
            entry_name,
            size,
        }))
    }
}

/// A regular file found below the packing root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Full filesystem path.
    pub path: PathBuf,

    /// Path relative to the root.
    pub relative: PathBuf,

    /// Relative path with `/` separators, used as the ZIP entry name and in
    /// the manifest.
    pub entry_name: String,

    /// Size in bytes at the time of the walk.
    pub size: u64,
}

/// Collects all files below `root` in traversal order.
///
/// # Errors
///
/// Returns the first traversal error encountered.
pub(crate) fn collect_files(root: &Path, ignore: Option<&IgnoreSet>) -> Result<Vec<FileEntry>> {
    TreeWalker::new(root, ignore).walk().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(entries: &[FileEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.entry_name.as_str()).collect()
    }

    #[test]
    fn test_walker_yields_only_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join("file1.txt"), "content1").unwrap();
        fs::create_dir(root.join("subdir")).unwrap();
        fs::create_dir(root.join("empty")).unwrap();
        fs::write(root.join("subdir/file2.txt"), "content2").unwrap();

        let entries = collect_files(root, None).unwrap();
        assert_eq!(names(&entries), vec!["file1.txt", "subdir/file2.txt"]);
    }

    #[test]
    fn test_walker_order_is_sorted_depth_first() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("b/inner")).unwrap();
        fs::write(root.join("c.txt"), "c").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("b/inner/z.txt"), "z").unwrap();
        fs::write(root.join("b/y.txt"), "y").unwrap();

        let entries = collect_files(root, None).unwrap();
        assert_eq!(
            names(&entries),
            vec!["a.txt", "b/inner/z.txt", "b/y.txt", "c.txt"]
        );
    }

    #[test]
    fn test_walker_prunes_ignored_segments() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join("a.txt"), "a").unwrap();
        fs::create_dir_all(root.join("sub/cache")).unwrap();
        fs::write(root.join("sub/b.txt"), "b").unwrap();
        fs::write(root.join("sub/cache/deep.txt"), "d").unwrap();
        fs::create_dir(root.join("cache")).unwrap();
        fs::write(root.join("cache/c.txt"), "c").unwrap();

        let ignore = IgnoreSet::parse("cache");
        let entries = collect_files(root, Some(&ignore)).unwrap();
        assert_eq!(names(&entries), vec!["a.txt", "sub/b.txt"]);
    }

    #[test]
    fn test_walker_ignores_file_segment() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join("keep.txt"), "k").unwrap();
        fs::write(root.join("secret.env"), "s").unwrap();

        let ignore = IgnoreSet::parse("secret.env");
        let entries = collect_files(root, Some(&ignore)).unwrap();
        assert_eq!(names(&entries), vec!["keep.txt"]);
    }

    #[test]
    fn test_walker_root_ancestors_do_not_match() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("cache");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();

        let ignore = IgnoreSet::parse("cache");
        let entries = collect_files(&root, Some(&ignore)).unwrap();
        assert_eq!(names(&entries), vec!["a.txt"]);
    }

    #[test]
    fn test_walker_records_size_and_paths() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("src")).unwrap();
        fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();

        let entries = collect_files(root, None).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, root.join("src/main.rs"));
        assert_eq!(entries[0].relative, Path::new("src/main.rs"));
        assert_eq!(entries[0].size, 12);
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_symlinks() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join("target.txt"), "content").unwrap();
        fs::create_dir(root.join("dir")).unwrap();
        fs::write(root.join("dir/inside.txt"), "x").unwrap();
        std::os::unix::fs::symlink(root.join("target.txt"), root.join("link.txt")).unwrap();
        std::os::unix::fs::symlink(root.join("dir"), root.join("linkdir")).unwrap();
        std::os::unix::fs::symlink(root.join("missing"), root.join("dangling")).unwrap();

        let entries = collect_files(root, None).unwrap();
        assert_eq!(
            names(&entries),
            vec!["dir/inside.txt", "link.txt", "target.txt"]
        );
    }

    #[test]
    fn test_walker_missing_root_errors() {
        let result = collect_files(Path::new("/nonexistent/path/that/does/not/exist"), None);
        assert!(result.is_err());
    }
}
