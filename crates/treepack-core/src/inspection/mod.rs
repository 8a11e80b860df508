//! Reading packed archives back.
//!
//! # Examples
//!
//! ```no_run
//! use treepack_core::read_manifest;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = read_manifest("project.zip")?;
//! println!("Archive lists {} files", manifest.file_count());
//! # Ok(())
//! # }
//! ```

pub mod read;

pub use read::list_entries;
pub use read::read_manifest;
pub use read::read_manifest_from;
