use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trackdb::db::models::SampleRow;
use trackdb::importer::ImportOutcome;

#[derive(Parser)]
#[command(name = "trackdb", version, about = "Load a CSV of music tracks into a normalized SQLite library")]
struct Cli {
    /// Path to the SQLite database
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drop and recreate the tables, then load a CSV file into them
    Import {
        /// CSV file to load (defaults to config csv_path, then tracks.csv)
        csv: Option<PathBuf>,
    },

    /// Show tracks with their artist, album and genre, ordered by artist
    Sample {
        /// Number of results (defaults to config sample_limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show library statistics
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load config file (optional, defaults if missing)
    let config = trackdb::config::AppConfig::load();

    // Resolve database path: CLI > config > working directory
    let db_path = cli.db_path
        .or(config.db_path.clone())
        .unwrap_or_else(trackdb::config::default_db_path);
    log::info!("Database: {}", db_path.display());

    let db = trackdb::db::Database::open(&db_path)
        .context("Failed to open database")?;

    match cli.command {
        Commands::Import { csv } => {
            let csv_path = csv
                .or(config.csv_path.clone())
                .unwrap_or_else(trackdb::config::default_csv_path);

            let outcome = trackdb::importer::import_file(&db, &csv_path)
                .with_context(|| format!("Import of {} failed", csv_path.display()))?;

            let summary = match outcome {
                ImportOutcome::NoData => {
                    println!("No data found in {}", csv_path.display());
                    return Ok(());
                }
                ImportOutcome::Imported(summary) => summary,
            };

            println!(
                "Import complete: {} rows, {} imported, {} skipped{}",
                summary.rows,
                summary.imported,
                summary.skipped,
                if summary.has_header { " (header detected)" } else { "" }
            );

            let rows = db.sample_tracks(config.sample_limit)
                .context("Query failed")?;
            println!();
            println!(
                "=== Query result (first {} rows ordered by artist) ===",
                config.sample_limit
            );
            print_sample_table(&rows);
        }

        Commands::Sample { limit, json } => {
            let limit = limit.unwrap_or(config.sample_limit);
            let rows = db.sample_tracks(limit).context("Query failed")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }

            if rows.is_empty() {
                println!("No tracks in library. Run `trackdb import` first.");
                return Ok(());
            }

            println!("First {} tracks ordered by artist:", rows.len());
            println!();
            print_sample_table(&rows);
        }

        Commands::Stats => {
            let stats = db.stats().context("Failed to get stats")?;
            println!("Library Statistics");
            println!("==================");
            println!("Artists:          {}", stats.artists);
            println!("Albums:           {}", stats.albums);
            println!("Genres:           {}", stats.genres);
            println!("Tracks:           {}", stats.tracks);
            println!("Total length:     {}", stats.total_length);
            println!();

            if !stats.genre_counts.is_empty() {
                println!("Genres:");
                for (genre, count) in &stats.genre_counts {
                    println!("  {:<30} {}", genre, count);
                }
            }
        }
    }

    Ok(())
}

/// Print sample rows as a fixed-width table.
fn print_sample_table(rows: &[SampleRow]) {
    println!(
        "{:<30} {:<25} {:<30} {:<15}",
        "Track", "Artist", "Album", "Genre"
    );
    println!("{}", "-".repeat(103));

    for r in rows {
        println!(
            "{:<30} {:<25} {:<30} {:<15}",
            truncate(&r.track, 30),
            truncate(&r.artist, 25),
            truncate(&r.album, 30),
            truncate(&r.genre, 15),
        );
    }
}

/// Shorten to `width` characters, ending in "..." when cut.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}
