//! Trellis CLI binary.

mod args;
mod render;

use anyhow::{Context, Result};
use args::{Cli, Format};
use clap::Parser;
use trellis::domain::Sha;
use trellis::layout::geometry::Spacing;
use trellis::layout::{compute_layout, LayoutOptions};
use trellis::source;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Controlled via RUST_LOG, e.g. RUST_LOG=trellis=debug trellis history.json
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trellis=warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let doc = source::load_document(&cli.file)
        .with_context(|| format!("failed to load {}", cli.file.display()))?;
    source::validate(&doc).context("invalid layout document")?;

    let options = LayoutOptions {
        current_sha: cli.current.clone().map(Sha::new),
        filter_branchless: cli.filter_branchless,
    };
    let layout = compute_layout(&doc.roots, &doc.branches, &options);
    tracing::debug!(
        commits = layout.len(),
        rows = layout.row_count(),
        columns = layout.column_count(),
        "layout ready"
    );

    match cli.format {
        Format::Text => print!("{}", render::render_grid(&layout, true)),
        Format::Json => {
            let defaults = Spacing::default();
            let spacing = Spacing {
                column_distance: cli.column_distance.unwrap_or(defaults.column_distance),
                row_distance: cli.row_distance.unwrap_or(defaults.row_distance),
            };
            println!("{}", render::geometry_json(&layout, spacing)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOC: &str = r#"{
        "roots": [
            {
                "sha": "a", "idx": 0, "timestamp": "2024-01-01T00:00:00Z",
                "branch_ids": ["main"],
                "children": [
                    { "sha": "b", "parent": "a", "idx": 1,
                      "timestamp": "2024-01-01T00:01:00Z", "branch_ids": ["main"] }
                ]
            }
        ],
        "branches": [ { "id": "main", "name": "main", "last_commit": "b" } ]
    }"#;

    fn write_doc(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn runs_end_to_end_on_a_valid_document() {
        let file = write_doc(DOC);
        let cli = Cli::parse_from([
            "trellis",
            file.path().to_str().unwrap(),
            "--current",
            "b",
            "--format",
            "json",
        ]);
        run(&cli).unwrap();
    }

    #[test]
    fn rejects_an_invalid_document() {
        let file = write_doc(r#"{ "roots": [ { "sha": "dup", "idx": 0,
            "timestamp": "2024-01-01T00:00:00Z",
            "children": [ { "sha": "dup", "idx": 1,
                "timestamp": "2024-01-01T00:00:00Z" } ] } ] }"#);
        let cli = Cli::parse_from(["trellis", file.path().to_str().unwrap()]);
        assert!(run(&cli).is_err());
    }
}
