//! CLI domain: argument parsing and output formatting only.
//! No domain orchestration; the binary dispatches to `Library`.

use crate::tree::node::{Artist, Folder, NodeKind};
use crate::tree::scanner::DirtyNode;
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "stylus",
    version,
    about = "Music library snapshot and drift detection"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "stylus.toml")]
    pub config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rebuild the snapshot from scratch
    Build,
    /// Scan the persisted snapshot for drift
    Scan {
        /// Emit dirty nodes as JSON
        #[arg(long)]
        json: bool,
    },
    /// List artist groupings
    Artists {
        /// Emit artists as JSON
        #[arg(long)]
        json: bool,
    },
    /// Destroy all persisted snapshot state
    Reset,
}

/// Summary line after a build.
pub fn format_build_summary(root: &Folder) -> String {
    format!(
        "Snapshot built: {} with {} folders, {} files",
        hex::encode(root.contents_fingerprint),
        root.folder_count(),
        root.file_count()
    )
}

/// Human-readable drift report.
pub fn format_scan_text(dirty: &[DirtyNode]) -> String {
    if dirty.is_empty() {
        return format!("{}", "Snapshot is clean.".green());
    }

    let mut lines = vec![format!(
        "{} node(s) drifted from the snapshot:",
        dirty.len()
    )];
    for node in dirty {
        let kind = match node.kind {
            NodeKind::Folder => "folder",
            NodeKind::File => "file",
        };
        lines.push(format!("  {} {}", kind, node.path.red()));
    }
    lines.join("\n")
}

/// Drift report as JSON.
pub fn format_scan_json(dirty: &[DirtyNode]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(dirty)
}

/// Artist groupings as a table.
pub fn format_artists_text(artists: &[Artist]) -> String {
    if artists.is_empty() {
        return "No artists grouped yet. Run `stylus build` first.".to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["ID", "Artist", "Songs"]);
    for artist in artists {
        table.add_row(vec![
            artist.id.to_string(),
            artist.name.clone(),
            artist.songs.len().to_string(),
        ]);
    }
    table.to_string()
}

/// Artist groupings as JSON.
pub fn format_artists_json(artists: &[Artist]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(artists)
}
