//! Archive creation module.
//!
//! Tree walking, ignore filtering, and in-memory ZIP assembly.

pub mod filters;
pub mod walker;

pub mod report;
pub mod zip;

// Re-exports for public API
pub use filters::IgnoreSet;
pub use report::PackReport;
pub use walker::FileEntry;
pub use walker::TreeWalker;
pub use self::zip::BuiltArchive;
pub use self::zip::build_archive;
pub use self::zip::write_archive;
