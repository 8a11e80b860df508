//! Manifest read-back.

use crate::PackError;
use crate::Result;
use crate::config::MANIFEST_ENTRY;
use crate::manifest::Manifest;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

/// Opens the archive at `archive_path` and parses its `metadata.json` entry.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not a valid ZIP archive
/// - The archive has no manifest entry
/// - The manifest is not valid JSON of the expected shape
pub fn read_manifest<P: AsRef<Path>>(archive_path: P) -> Result<Manifest> {
    let archive_path = archive_path.as_ref();
    let file = BufReader::new(File::open(archive_path)?);
    read_manifest_from(file, archive_path)
}

/// Parses the manifest out of any seekable ZIP source.
///
/// `label` names the source in error messages.
pub fn read_manifest_from<R: Read + Seek>(reader: R, label: &Path) -> Result<Manifest> {
    let mut archive = ZipArchive::new(reader)?;

    let mut entry = match archive.by_name(MANIFEST_ENTRY) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(PackError::ManifestMissing {
                archive: label.to_path_buf(),
                entry: MANIFEST_ENTRY.to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let mut json = String::new();
    entry.read_to_string(&mut json)?;
    let manifest = Manifest::from_json(&json)?;

    debug!(
        archive = %label.display(),
        files = manifest.file_count(),
        "manifest read back"
    );
    Ok(manifest)
}

/// Lists the entry names of the archive at `archive_path` in stored order.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a ZIP archive.
pub fn list_entries<P: AsRef<Path>>(archive_path: P) -> Result<Vec<String>> {
    let file = BufReader::new(File::open(archive_path.as_ref())?);
    let mut archive = ZipArchive::new(file)?;

    let mut names = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        names.push(archive.by_index(i)?.name().to_string());
    }
    Ok(names)
}
