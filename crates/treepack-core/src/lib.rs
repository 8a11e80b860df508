//! Directory tree packaging into ZIP archives with an embedded manifest.
//!
//! `treepack-core` walks a root directory, records the relative paths of its
//! regular files in a [`Manifest`], and writes the tree plus the manifest
//! (as `metadata.json`) into a deflate-compressed ZIP archive. An existing
//! archive at the output path is moved to a `.bak.zip` sibling first, and the
//! written archive is read back to confirm the manifest.
//!
//! # Examples
//!
//! ```no_run
//! use treepack_core::IgnoreSet;
//! use treepack_core::PackConfig;
//! use treepack_core::pack_tree;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PackConfig::new("./project").with_ignore(IgnoreSet::parse("cache:target"));
//! let report = pack_tree(&config, None)?;
//! println!("Packed {} files", report.files_listed());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod backup;
pub mod config;
pub mod creation;
pub mod error;
pub mod inspection;
pub mod manifest;

// Re-export main API types
pub use api::pack_tree;
pub use config::DEFAULT_ARCHIVE_NAME;
pub use config::IgnoreScope;
pub use config::MANIFEST_ENTRY;
pub use config::PackConfig;
pub use creation::IgnoreSet;
pub use creation::PackReport;
pub use error::PackError;
pub use error::Result;
pub use inspection::list_entries;
pub use inspection::read_manifest;
pub use manifest::Manifest;
pub use manifest::collect_metadata;
