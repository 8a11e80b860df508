//! High-level public API for packing a directory tree.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::PackConfig;
use crate::PackError;
use crate::Result;
use crate::backup::backup_existing;
use crate::creation::report::PackReport;
use crate::creation::zip::write_archive;
use crate::inspection::read_manifest;

/// Packs `config.root` into a ZIP archive at `output`.
///
/// When `output` is `None` the archive is written to
/// `<root>/project.zip`. The run:
///
/// 1. Moves an existing file at the output path to its `.bak.zip` sibling
/// 2. Builds the archive in memory and writes it to the output path
/// 3. Reopens the written archive and parses `metadata.json`
/// 4. Checks the parsed manifest against the one that was embedded
///
/// The returned report carries the manifest as read back from disk, and its
/// duration spans all four steps.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The backup rename fails
/// - The tree cannot be read or the archive cannot be written
/// - The written archive cannot be read back, or its manifest differs
///
/// # Examples
///
/// ```no_run
/// use treepack_core::IgnoreSet;
/// use treepack_core::PackConfig;
/// use treepack_core::pack_tree;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PackConfig::new(".").with_ignore(IgnoreSet::parse("target:.git"));
/// let report = pack_tree(&config, None)?;
/// println!("{}: {} files", report.output.display(), report.files_listed());
/// # Ok(())
/// # }
/// ```
pub fn pack_tree(config: &PackConfig, output: Option<&Path>) -> Result<PackReport> {
    let start = Instant::now();
    config.validate()?;

    let output = output.map_or_else(|| config.default_output(), Path::to_path_buf);
    if output.is_dir() {
        return Err(PackError::InvalidOutput { path: output });
    }

    let backup = backup_existing(&output)?;
    let mut report = write_archive(config, &output)?;
    report.backup = backup;

    let read_back = read_manifest(&output)?;
    if read_back != report.manifest {
        return Err(PackError::ManifestMismatch { archive: output });
    }
    report.manifest = read_back;
    report.duration = start.elapsed();

    info!(
        output = %report.output.display(),
        files = report.files_listed(),
        "tree packed"
    );

    Ok(report)
}
