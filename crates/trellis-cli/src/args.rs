//! CLI argument parsing.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the rendered layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// ASCII grid, one line per row.
    Text,
    /// Vertex and edge geometry as JSON.
    Json,
}

/// Lay out a commit forest onto a grid and render it.
///
/// The input file is a JSON document with `roots` (nested commit trees)
/// and `branches` (branch records). Input is validated before layout:
/// duplicate shas and branch-ancestry cycles are rejected.
#[derive(Debug, Parser)]
#[command(name = "trellis", version, about)]
pub struct Cli {
    /// Path to the layout document (JSON).
    pub file: PathBuf,

    /// Sha of the commit whose ancestry should be highlighted.
    #[arg(short, long)]
    pub current: Option<String>,

    /// Drop commits with no branch memberships before layout.
    #[arg(long)]
    pub filter_branchless: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: Format,

    /// Horizontal pixel distance between grid columns (JSON output).
    #[arg(long)]
    pub column_distance: Option<f64>,

    /// Vertical pixel distance between grid rows (JSON output).
    #[arg(long)]
    pub row_distance: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let cli = Cli::parse_from(["trellis", "history.json"]);
        assert_eq!(cli.format, Format::Text);
        assert!(cli.current.is_none());
        assert!(!cli.filter_branchless);
    }

    #[test]
    fn parses_full_invocation() {
        let cli = Cli::parse_from([
            "trellis",
            "history.json",
            "--current",
            "abc123",
            "--filter-branchless",
            "--format",
            "json",
            "--column-distance",
            "120",
            "--row-distance",
            "48",
        ]);
        assert_eq!(cli.current.as_deref(), Some("abc123"));
        assert!(cli.filter_branchless);
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.column_distance, Some(120.0));
        assert_eq!(cli.row_distance, Some(48.0));
    }
}
