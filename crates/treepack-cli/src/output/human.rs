//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use treepack_core::PackReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled_stderr(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    /// The two summary lines printed after every run.
    fn summary_lines(report: &PackReport) -> [String; 2] {
        [
            format!("Archivo zip creado en: {}", report.output.display()),
            format!("Archivos incluidos: {}", report.files_listed()),
        ]
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_pack_result(&self, report: &PackReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for line in Self::summary_lines(report) {
            self.term.write_line(&line)?;
        }

        if self.verbose {
            if let Some(backup) = &report.backup {
                self.term
                    .write_line(&format!("Copia de seguridad: {}", backup.display()))?;
            }
            self.term.write_line(&format!(
                "  Entradas: {}  Tamaño: {} -> {}  Duración: {:?}",
                report.files_added,
                Self::format_size(report.bytes_written),
                Self::format_size(report.bytes_compressed),
                report.duration
            ))?;
        }

        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("WARNING: {message}"));
        }
    }
}
