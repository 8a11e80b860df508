//! ZIP archive creation.
//!
//! The whole archive is assembled in memory and only then written to disk,
//! through a temporary file in the destination directory that is renamed into
//! place. A failure at any point before the rename leaves the destination
//! untouched.

use crate::PackError;
use crate::Result;
use crate::config::MANIFEST_ENTRY;
use crate::config::PackConfig;
use crate::creation::report::PackReport;
use crate::creation::walker::FileEntry;
use crate::creation::walker::TreeWalker;
use crate::manifest::Manifest;
use crate::manifest::collect_metadata;
use chrono::DateTime;
use chrono::Datelike;
use chrono::Local;
use chrono::Timelike;
use std::fs::File;
use std::io::Cursor;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;
use tracing::debug;
use tracing::info;
use tracing::warn;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Entries at or above this size are written with ZIP64 extensions.
const ZIP64_THRESHOLD: u64 = 0xFFFF_FFFF;

/// An archive assembled in memory, not yet written to disk.
#[derive(Debug, Clone)]
pub struct BuiltArchive {
    /// Complete ZIP file contents.
    pub bytes: Vec<u8>,

    /// The manifest embedded as `metadata.json`.
    pub manifest: Manifest,

    /// Number of file entries in the archive body.
    pub files_added: usize,

    /// Files left out of the body because their name collides with the
    /// manifest entry.
    pub files_skipped: usize,

    /// Uncompressed bytes of all body entries.
    pub bytes_written: u64,
}

/// Builds the archive for `config` in memory.
///
/// The manifest is collected first with the configured ignore set, then the
/// root is walked again to write the body (filtered or not depending on
/// `config.ignore_scope`), and the manifest is appended last as
/// `metadata.json`.
///
/// # Examples
///
/// ```no_run
/// use treepack_core::PackConfig;
/// use treepack_core::creation::zip::build_archive;
///
/// let built = build_archive(&PackConfig::new("./project"))?;
/// println!("{} bytes, {} files", built.bytes.len(), built.files_added);
/// # Ok::<(), treepack_core::PackError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The root or a file below it cannot be read
/// - The ZIP writer fails
pub fn build_archive(config: &PackConfig) -> Result<BuiltArchive> {
    config.validate()?;

    let manifest = collect_metadata(&config.root, &config.ignore)?.without(MANIFEST_ENTRY);
    let options = entry_options(config);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let mut files_added = 0;
    let mut files_skipped = 0;
    let mut bytes_written = 0;

    for entry in TreeWalker::new(&config.root, config.body_filter()).walk() {
        let entry = entry?;

        if entry.entry_name == MANIFEST_ENTRY {
            warn!(
                path = %entry.path.display(),
                "file collides with the manifest entry, skipped"
            );
            files_skipped += 1;
            continue;
        }

        bytes_written += add_file_to_zip(&mut zip, &entry, options)?;
        files_added += 1;
    }

    let json = manifest.to_json()?;
    let manifest_options = match zip_timestamp(manifest.generated_at.with_timezone(&Local)) {
        Some(stamp) => options.last_modified_time(stamp),
        None => options,
    };
    zip.start_file(MANIFEST_ENTRY, manifest_options)?;
    zip.write_all(json.as_bytes())?;

    let bytes = zip.finish()?.into_inner();

    debug!(
        files = files_added,
        listed = manifest.file_count(),
        size = bytes.len(),
        "archive assembled in memory"
    );

    Ok(BuiltArchive {
        bytes,
        manifest,
        files_added,
        files_skipped,
        bytes_written,
    })
}

/// Builds the archive for `config` and writes it to `output`.
///
/// `output` is replaced atomically; an existing file at that path is
/// overwritten, so callers that want to keep it must move it aside first
/// (see [`crate::backup::backup_existing`]).
///
/// # Errors
///
/// Returns an error if:
/// - `output` is a directory or has no file name
/// - The parent directory of `output` does not exist
/// - Building the archive fails
pub fn write_archive(config: &PackConfig, output: &Path) -> Result<PackReport> {
    let start = Instant::now();

    if output.is_dir() || output.file_name().is_none() {
        return Err(PackError::InvalidOutput {
            path: output.to_path_buf(),
        });
    }
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(PackError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("output directory does not exist: {}", parent.display()),
        )));
    }

    let built = build_archive(config)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(&built.bytes)?;
    tmp.as_file().sync_all()?;
    set_output_permissions(tmp.as_file())?;
    tmp.persist(output).map_err(|e| PackError::Io(e.error))?;

    info!(
        output = %output.display(),
        files = built.files_added,
        size = built.bytes.len(),
        "archive written"
    );

    Ok(PackReport {
        output: output.to_path_buf(),
        backup: None,
        files_added: built.files_added,
        files_skipped: built.files_skipped,
        bytes_written: built.bytes_written,
        bytes_compressed: built.bytes.len() as u64,
        duration: start.elapsed(),
        manifest: built.manifest,
    })
}

fn entry_options(config: &PackConfig) -> SimpleFileOptions {
    match config.compression_level {
        Some(0) => SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        level => SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(level.map(i64::from)),
    }
}

/// Adds one file to the archive and returns the number of bytes copied.
fn add_file_to_zip<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &FileEntry,
    options: SimpleFileOptions,
) -> Result<u64> {
    let mut file = File::open(&entry.path)?;
    let metadata = file.metadata()?;

    let mut file_options = options;
    if let Some(stamp) = metadata
        .modified()
        .ok()
        .and_then(|modified| zip_timestamp(DateTime::<Local>::from(modified)))
    {
        file_options = file_options.last_modified_time(stamp);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file_options = file_options.unix_permissions(metadata.permissions().mode());
    }
    file_options = file_options.large_file(requires_zip64(metadata.len().max(entry.size)));

    zip.start_file(entry.entry_name.as_str(), file_options)?;
    let copied = std::io::copy(&mut file, zip)?;

    debug!(entry = %entry.entry_name, bytes = copied, "added file");
    Ok(copied)
}

fn requires_zip64(size: u64) -> bool {
    size >= ZIP64_THRESHOLD
}

/// Converts a local time to a ZIP timestamp. ZIP cannot represent dates
/// before 1980, those yield `None`.
fn zip_timestamp(time: DateTime<Local>) -> Option<zip::DateTime> {
    zip::DateTime::from_date_and_time(
        u16::try_from(time.year()).ok()?,
        u8::try_from(time.month()).ok()?,
        u8::try_from(time.day()).ok()?,
        u8::try_from(time.hour()).ok()?,
        u8::try_from(time.minute()).ok()?,
        u8::try_from(time.second()).ok()?,
    )
    .ok()
}

#[cfg(unix)]
fn set_output_permissions(file: &File) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o644))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_output_permissions(_file: &File) -> Result<()> {
    Ok(())
}
