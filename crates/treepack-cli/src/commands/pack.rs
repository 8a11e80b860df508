//! Pack command implementation.

use crate::cli::Cli;
use crate::error::add_output_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use std::env;
use tracing::debug;
use treepack_core::IgnoreSet;
use treepack_core::PackConfig;
use treepack_core::pack_tree;

pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let root = match &cli.root {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let ignore = cli
        .ignore
        .as_deref()
        .map(IgnoreSet::parse)
        .unwrap_or_default();

    let mut config = PackConfig::new(&root)
        .with_ignore(ignore)
        .with_ignore_scope(cli.ignore_scope.into());
    if let Some(level) = cli.compression_level {
        config = config.with_compression_level(level);
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| config.default_output());

    debug!(
        root = %root.display(),
        output = %output.display(),
        ignore = ?config.ignore.iter().collect::<Vec<_>>(),
        "packing"
    );

    let report = add_output_context(pack_tree(&config, Some(&output)), &output)?;

    if report.files_skipped > 0 {
        formatter.format_warning(&format!(
            "{} file(s) named '{}' at the root were not archived",
            report.files_skipped,
            treepack_core::MANIFEST_ENTRY
        ));
    }

    formatter.format_pack_result(&report)?;

    Ok(())
}
