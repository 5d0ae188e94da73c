mod api;
mod commands;
mod database;
mod export;
mod ingest;
mod query;
mod utils;

use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::{FetchError, HarvardClient};
use crate::database::ArtifactStore;
use crate::export::render_table;
use crate::ingest::SplitTables;
use crate::query::{CannedQuery, QueryGroup};
use crate::utils::config::{self, AppSettings};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SQLite database file
    #[arg(long, global = true)]
    db_path: Option<String>,

    /// API key for the museum API
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Settings file with KEY=VALUE lines
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a classification, show the three tables and export them as CSV
    Fetch {
        /// Classification to collect, e.g. Coins, Paintings, Vessels
        classification: String,

        /// Directory for the CSV files
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Only print the tables
        #[arg(long)]
        no_export: bool,

        /// Rows to preview per table
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Fetch a classification and insert it into the database
    Migrate {
        classification: String,
    },
    /// List classifications already stored
    Classifications,
    /// Show row counts per table
    Status,
    /// List the canned queries
    Queries,
    /// Run a canned query by menu number (1-25, L1-L5)
    Query {
        query: CannedQuery,

        /// Write the result to a CSV file named after the query
        #[arg(short, long)]
        export: bool,

        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Rows to print
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Write the resolved settings to the env file
    InitConfig,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut settings = config::load_settings(&args.env_file)?;
    if let Some(db_path) = args.db_path {
        settings.db_path = db_path;
    }
    if let Some(api_key) = args.api_key {
        settings.api_key = Some(api_key);
    }

    match args.command {
        Command::Fetch { classification, out_dir, no_export, limit } => {
            run_fetch(&settings, &classification, (!no_export).then_some(out_dir.as_path()), limit)
        }
        Command::Migrate { classification } => {
            let mut store = ArtifactStore::open(&settings.db_path)?;
            run_migrate(&settings, &mut store, &classification)
        }
        Command::Classifications => {
            let store = ArtifactStore::open(&settings.db_path)?;
            let names = store.classifications()?;
            if names.is_empty() {
                println!("No classifications stored yet.");
            }
            for name in names {
                println!("{name}");
            }
            Ok(())
        }
        Command::Status => {
            let store = ArtifactStore::open(&settings.db_path)?;
            let counts = store.table_counts()?;
            println!("artifacts_metadata: {}", counts.metadata);
            println!("artifacts_media_1:  {}", counts.media);
            println!("artifact_colors:    {}", counts.colors);
            Ok(())
        }
        Command::Queries => {
            print_catalog();
            Ok(())
        }
        Command::Query { query, export, out_dir, limit } => {
            let store = ArtifactStore::open(&settings.db_path)?;
            run_query(&store, query, export.then_some(out_dir.as_path()), limit)
        }
        Command::InitConfig => {
            config::save_to_env(&args.env_file, &settings)?;
            info!("Settings written to {:?}", args.env_file);
            Ok(())
        }
    }
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Fetching data...");
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn collect(settings: &AppSettings, classification: &str) -> Result<(usize, SplitTables)> {
    if classification.trim().is_empty() {
        return Err(FetchError::EmptyClassification.into());
    }
    let client = HarvardClient::new(&settings.endpoint, settings.api_key()?, settings.timeout())?;

    let pb = spinner();
    let result = ingest::collect(&client, classification, &pb);
    pb.finish_and_clear();
    Ok(result?)
}

fn run_fetch(
    settings: &AppSettings,
    classification: &str,
    out_dir: Option<&Path>,
    limit: usize,
) -> Result<()> {
    let (fetched, tables) = collect(settings, classification)?;
    println!("Fetched {fetched} records!");

    for (title, _, result) in &commands::table_sections(&tables) {
        println!("\n== {title} ({} rows)", result.len());
        print!("{}", render_table(result, Some(limit)));
    }

    if let Some(dir) = out_dir {
        for path in commands::export_tables(dir, classification, &tables)? {
            println!("Saved {}", path.display());
        }
    }
    Ok(())
}

fn run_migrate(
    settings: &AppSettings,
    store: &mut ArtifactStore,
    classification: &str,
) -> Result<()> {
    commands::ensure_importable(store, classification)?;

    let client = HarvardClient::new(&settings.endpoint, settings.api_key()?, settings.timeout())?;
    let pb = spinner();
    let summary = commands::migrate(store, &client, classification, &pb);
    pb.finish_and_clear();
    let summary = summary?;

    println!(
        "Data inserted successfully! ({} metadata, {} media, {} color rows)",
        summary.metadata, summary.media, summary.colors
    );
    Ok(())
}

fn run_query(
    store: &ArtifactStore,
    query: CannedQuery,
    out_dir: Option<&Path>,
    limit: Option<usize>,
) -> Result<()> {
    let (result, path) = commands::run_canned(store, query, out_dir)?;

    println!("{query}");
    if result.is_empty() {
        println!("{}", commands::NO_RESULTS);
        return Ok(());
    }
    print!("{}", render_table(&result, limit));

    if let Some(path) = path {
        println!("Saved {}", path.display());
    }
    Ok(())
}

fn print_catalog() {
    println!("Primary queries:");
    for query in CannedQuery::ALL.iter().filter(|q| q.group() == QueryGroup::Primary) {
        println!("  {query}");
    }
    println!("\nLearner queries:");
    for query in CannedQuery::ALL.iter().filter(|q| q.group() == QueryGroup::Learner) {
        println!("  {query}");
    }
}
