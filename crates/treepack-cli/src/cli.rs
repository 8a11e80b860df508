//! CLI argument parsing using clap.

use clap::Parser;
use clap::ValueEnum;
use std::path::PathBuf;
use treepack_core::IgnoreScope;

#[derive(Parser)]
#[command(name = "treepack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output archive path (default: <ROOT>/project.zip)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Directory to pack (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Colon-separated path segments to leave out of the manifest
    #[arg(long, value_name = "SEGMENTS", env = "ARCHIVER_IGNORE")]
    pub ignore: Option<String>,

    /// Which traversals the ignored segments apply to
    #[arg(long, value_enum, default_value_t = ScopeArg::All)]
    pub ignore_scope: ScopeArg,

    /// Compression level (0 = store, 1-9 = deflate)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub compression_level: Option<u8>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with_all = ["verbose", "json"])]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    /// Leave ignored files out of the manifest and the archive
    All,
    /// Leave ignored files out of the manifest only
    Manifest,
}

impl From<ScopeArg> for IgnoreScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::All => Self::All,
            ScopeArg::Manifest => Self::ManifestOnly,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["treepack"]).unwrap();
        assert!(cli.output.is_none());
        assert!(cli.root.is_none());
        assert_eq!(cli.ignore_scope, ScopeArg::All);
        assert_eq!(cli.compression_level, None);
    }

    #[test]
    fn test_positional_output() {
        let cli = Cli::try_parse_from(["treepack", "out/archive.zip"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out/archive.zip")));
    }

    #[test]
    fn test_rejects_second_positional() {
        assert!(Cli::try_parse_from(["treepack", "a.zip", "b.zip"]).is_err());
    }

    #[test]
    fn test_compression_level_range() {
        assert!(Cli::try_parse_from(["treepack", "-l", "0"]).is_ok());
        assert!(Cli::try_parse_from(["treepack", "-l", "9"]).is_ok());
        assert!(Cli::try_parse_from(["treepack", "-l", "10"]).is_err());
    }

    #[test]
    fn test_ignore_scope_mapping() {
        let cli = Cli::try_parse_from(["treepack", "--ignore-scope", "manifest"]).unwrap();
        assert_eq!(IgnoreScope::from(cli.ignore_scope), IgnoreScope::ManifestOnly);
        assert_eq!(IgnoreScope::from(ScopeArg::All), IgnoreScope::All);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["treepack", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_json() {
        assert!(Cli::try_parse_from(["treepack", "--quiet", "--json"]).is_err());
        assert!(Cli::try_parse_from(["treepack", "-j"]).is_ok());
    }
}
