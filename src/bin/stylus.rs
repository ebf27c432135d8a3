//! Stylus CLI binary.

use anyhow::Context;
use clap::Parser;
use stylus::cli::{self, Cli, Commands};
use stylus::config::LibraryConfig;
use stylus::library::Library;
use stylus::logging::init_logging;
use stylus::metadata::ExtensionTagReader;
use stylus::store::SledSnapshotStore;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let mut config = match LibraryConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration from {:?}: {}", cli.config, e);
            process::exit(1);
        }
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Stylus starting");

    match run(&cli, config) {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli, config: LibraryConfig) -> anyhow::Result<i32> {
    let store = SledSnapshotStore::open(config.resolved_store_path(), config.root.clone())
        .context("failed to open snapshot store")?;
    let library = Library::new(config, store, Box::new(ExtensionTagReader::default()));

    match &cli.command {
        Commands::Build => {
            let root = library.rebuild()?;
            println!("{}", cli::format_build_summary(&root));
            Ok(0)
        }
        Commands::Scan { json } => {
            let dirty = library.scan()?;
            if *json {
                println!("{}", cli::format_scan_json(&dirty)?);
            } else {
                println!("{}", cli::format_scan_text(&dirty));
            }
            // Drift is an actionable outcome, not an error.
            Ok(if dirty.is_empty() { 0 } else { 1 })
        }
        Commands::Artists { json } => {
            let artists = library.artists()?;
            if *json {
                println!("{}", cli::format_artists_json(&artists)?);
            } else {
                println!("{}", cli::format_artists_text(&artists));
            }
            Ok(0)
        }
        Commands::Reset => {
            library.reset()?;
            println!("All persisted snapshot state dropped.");
            Ok(0)
        }
    }
}
