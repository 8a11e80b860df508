//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use treepack_core::PackReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct PackOutput<'a> {
    output_path: String,
    backup_path: Option<String>,
    generated_at: String,
    files: &'a [String],
    files_listed: usize,
    files_added: usize,
    files_skipped: usize,
    bytes_written: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    duration_ms: u128,
}

impl<'a> PackOutput<'a> {
    fn from_report(report: &'a PackReport) -> Self {
        Self {
            output_path: report.output.display().to_string(),
            backup_path: report.backup.as_ref().map(|p| p.display().to_string()),
            generated_at: report.manifest.generated_at.to_rfc3339(),
            files: &report.manifest.files,
            files_listed: report.files_listed(),
            files_added: report.files_added,
            files_skipped: report.files_skipped,
            bytes_written: report.bytes_written,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            duration_ms: report.duration.as_millis(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_pack_result(&self, report: &PackReport) -> Result<()> {
        let output = JsonOutput::success("pack", PackOutput::from_report(report));
        Self::output(&output)
    }

    fn format_warning(&self, message: &str) {
        // keep stdout a single JSON document
        let _ = writeln!(io::stderr(), "WARNING: {message}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;
    use treepack_core::Manifest;

    #[test]
    fn test_pack_output_structure() {
        let report = PackReport {
            output: PathBuf::from("out.zip"),
            backup: Some(PathBuf::from("out.bak.zip")),
            manifest: Manifest::new(vec!["a.txt".to_string()]),
            files_added: 1,
            files_skipped: 0,
            bytes_written: 5,
            bytes_compressed: 150,
            duration: Duration::from_millis(3),
        };

        let output = JsonOutput::success("pack", PackOutput::from_report(&report));
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["operation"], "pack");
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["output_path"], "out.zip");
        assert_eq!(value["data"]["backup_path"], "out.bak.zip");
        assert_eq!(value["data"]["files_listed"], 1);
        assert_eq!(value["data"]["files"][0], "a.txt");
        assert_eq!(value["data"]["duration_ms"], 3);
    }
}
