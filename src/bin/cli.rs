//! scmedit CLI
//!
//! Command-line interface for editing `.scm` channel lists.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use scmedit::container::{SaveOutcome, ScmArchive};
use scmedit::engine::MoveOutcome;
use scmedit::snapshot::{read_tsv_file, write_tsv_file};
use scmedit::{Config, Engine, ProgNr, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// scmedit CLI
#[derive(Parser, Debug)]
#[command(name = "scmedit")]
#[command(about = "Reorder and renumber channels in Samsung .scm channel lists")]
#[command(version = scmedit::VERSION)]
struct Args {
    /// Do not create <file>.backup before rewriting the container
    #[arg(long, global = true)]
    no_backup: bool,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all channels
    List {
        /// The .scm file
        file: PathBuf,
    },

    /// Move a channel to a new position, shifting the ones in between
    Move {
        /// The .scm file
        file: PathBuf,

        /// Current program number
        from: ProgNr,

        /// Target program number
        to: ProgNr,
    },

    /// Renumber channels sequentially
    Compact {
        /// The .scm file
        file: PathBuf,

        /// First number to assign; lower numbers are kept
        start: Option<ProgNr>,
    },

    /// Export channels to a TSV file
    Export {
        /// The .scm file
        file: PathBuf,

        /// Output TSV file
        out: PathBuf,
    },

    /// Apply the channel order of an edited TSV file
    Import {
        /// The .scm file
        file: PathBuf,

        /// Input TSV file
        tsv: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing/logging
    let default_filter = if args.verbose {
        "info,scmedit=debug"
    } else {
        "warn,scmedit=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = Config::builder().create_backup(!args.no_backup).build();
    let engine = match Engine::new(config) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match args.command {
        Commands::List { file } => list(&engine, &file),
        Commands::Move { file, from, to } => move_channel(&engine, &file, from, to),
        Commands::Compact { file, start } => {
            let start = start.unwrap_or(engine.config().compact_start);
            compact(&engine, &file, start)
        }
        Commands::Export { file, out } => export(&engine, &file, &out),
        Commands::Import { file, tsv } => import(&engine, &file, &tsv),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn list(engine: &Engine, file: &Path) -> Result<()> {
    let archive = ScmArchive::open(file)?;
    let stores = archive.stores()?;

    let title = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!("Channel List: {}", title);
    println!("{}", "=".repeat(60));

    for listing in engine.list(&stores) {
        println!();
        println!(
            "=== {} ({}) - {} channels ===",
            listing.store.display_name(),
            listing.store,
            listing.channels.len()
        );
        println!();
        for channel in &listing.channels {
            let markers = channel.flags.markers();
            if markers.is_empty() {
                println!("  {:>4}: {}", channel.prog_nr, channel.name);
            } else {
                println!("  {:>4}: {} [{}]", channel.prog_nr, channel.name, markers);
            }
        }
    }
    Ok(())
}

fn move_channel(engine: &Engine, file: &Path, from: ProgNr, to: ProgNr) -> Result<()> {
    let mut archive = ScmArchive::open(file)?;
    let mut stores = archive.stores_for(&engine.config().renumber_sources)?;

    match engine.move_channel(&mut stores, from, to)? {
        MoveOutcome::NoOp => {
            println!("Source and target are the same. Nothing to do.");
        }
        MoveOutcome::Moved { .. } => {
            report_save(archive.save(&stores, engine.config())?);
            println!("Successfully moved channel {} to position {}", from, to);
        }
    }
    Ok(())
}

fn compact(engine: &Engine, file: &Path, start: ProgNr) -> Result<()> {
    let mut archive = ScmArchive::open(file)?;
    let mut stores = archive.stores_for(&engine.config().renumber_sources)?;

    let outcome = engine.compact(&mut stores, start)?;
    if outcome.total_found() == 0 {
        println!("No channels found to compact");
        return Ok(());
    }

    report_save(archive.save(&stores, engine.config())?);
    println!(
        "Successfully compacted {} channels starting from position {}",
        outcome.total_found(),
        start
    );
    Ok(())
}

fn export(engine: &Engine, file: &Path, out: &Path) -> Result<()> {
    let archive = ScmArchive::open(file)?;
    let stores = archive.stores_for(&engine.config().renumber_sources)?;

    let snapshot = engine.export(&stores);
    write_tsv_file(out, &snapshot)?;

    println!("Exported {} channels to {}", snapshot.len(), out.display());
    println!();
    println!("Edit the file in a text editor:");
    println!("  - Reorder lines to change channel order");
    println!("  - The new channel number will be the line number (starting from 1)");
    println!("  - Do NOT modify the Source or RecordIndex columns");
    println!();
    println!(
        "Then run: scmedit import \"{}\" \"{}\"",
        file.display(),
        out.display()
    );
    Ok(())
}

fn import(engine: &Engine, file: &Path, tsv: &Path) -> Result<()> {
    let mut archive = ScmArchive::open(file)?;
    let parsed = read_tsv_file(tsv)?;
    let mut stores = archive.stores_for(&engine.config().renumber_sources)?;

    let outcome = engine.import_rows(&mut stores, &parsed.rows)?;
    report_save(archive.save(&stores, engine.config())?);

    if !parsed.warnings.is_empty() {
        println!("Ignored {} invalid lines", parsed.warnings.len());
    }
    println!(
        "Successfully updated {} channels from {}",
        outcome.updated,
        tsv.display()
    );
    Ok(())
}

fn report_save(outcome: SaveOutcome) {
    if let SaveOutcome::Written {
        backup: Some(path), ..
    } = outcome
    {
        println!("Backup created: {}", path.display());
    }
}
