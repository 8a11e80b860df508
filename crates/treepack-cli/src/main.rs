//! Treepack CLI - packs a directory tree into a ZIP archive with an embedded
//! metadata manifest.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    logging::init(cli.verbose);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    commands::pack::execute(&cli, &*formatter)
}
