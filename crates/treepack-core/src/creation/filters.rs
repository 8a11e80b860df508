//! Path filtering for tree traversal.
//!
//! The ignore set is a flat set of path segment names. A path is ignored when
//! any one of its components matches a segment exactly; there is no glob
//! syntax.

use std::collections::BTreeSet;
use std::path::Component;
use std::path::Path;

/// Separator between segments in the textual form of an ignore set.
pub const SEGMENT_SEPARATOR: char = ':';

/// A set of path segment names to exclude from traversal.
///
/// # Examples
///
/// ```
/// use treepack_core::IgnoreSet;
/// use std::path::Path;
///
/// let ignore = IgnoreSet::parse("cache:target");
/// assert!(ignore.matches(Path::new("cache/c.txt")));
/// assert!(ignore.matches(Path::new("sub/target/debug/app")));
/// assert!(!ignore.matches(Path::new("sub/b.txt")));
/// assert!(!ignore.matches(Path::new("cached/file")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    segments: BTreeSet<String>,
}

impl IgnoreSet {
    /// Creates an empty ignore set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a colon-separated list of segments.
    ///
    /// Empty segments are dropped, so `""`, `":"` and `"a::b:"` are all
    /// valid inputs.
    ///
    /// # Examples
    ///
    /// ```
    /// use treepack_core::IgnoreSet;
    ///
    /// assert!(IgnoreSet::parse("").is_empty());
    /// assert_eq!(IgnoreSet::parse("a::b:").len(), 2);
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Self {
        value
            .split(SEGMENT_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    /// Adds a segment to the set.
    pub fn insert(&mut self, segment: impl Into<String>) {
        self.segments.insert(segment.into());
    }

    /// Returns whether the set has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of distinct segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns whether `segment` is a member of the set.
    #[must_use]
    pub fn contains(&self, segment: &str) -> bool {
        self.segments.contains(segment)
    }

    /// Iterates over the segments in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Returns whether any normal component of `relative` is in the set.
    ///
    /// `relative` is expected to be relative to the packing root. Root,
    /// prefix and `.`/`..` components never match.
    #[must_use]
    pub fn matches(&self, relative: &Path) -> bool {
        if self.segments.is_empty() {
            return false;
        }

        relative.components().any(|component| match component {
            Component::Normal(name) => name.to_str().is_some_and(|name| self.contains(name)),
            _ => false,
        })
    }
}

impl<S: Into<String>> Extend<S> for IgnoreSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for segment in iter {
            self.insert(segment);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Converts a root-relative path into a ZIP entry name.
///
/// Components are joined with `/` regardless of platform. Returns `None` for
/// paths that are not valid UTF-8 or that contain non-normal components.
///
/// # Examples
///
/// ```
/// use treepack_core::creation::filters::entry_name;
/// use std::path::Path;
///
/// assert_eq!(entry_name(Path::new("sub/b.txt")).as_deref(), Some("sub/b.txt"));
/// assert_eq!(entry_name(Path::new("../escape")), None);
/// ```
#[must_use]
pub fn entry_name(relative: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => parts.push(name.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
