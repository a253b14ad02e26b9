use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use lurecheck::config::Config;

/// LureCheck: phishing URL analysis from the terminal.
///
/// Sends URLs to a LureCheck analysis service, explains the verdict
/// check by check, and keeps a replayable local history.
#[derive(Parser)]
#[command(name = "lurecheck", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one URL
    Check {
        /// The URL to analyze
        url: String,

        /// Also write the verdict to a JSON file
        #[arg(long)]
        export: bool,
    },

    /// Analyze every URL listed in a file (one per line)
    Batch {
        /// Text file of URLs; blank lines and #-comments are skipped
        file: PathBuf,
    },

    /// List recorded analyses, newest first
    History,

    /// Replay one recorded analysis in full
    Show {
        /// Entry number from `lurecheck history`
        index: usize,

        /// Also write the replayed verdict to a JSON file
        #[arg(long)]
        export: bool,
    },

    /// Delete all recorded analyses
    Clear {
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Write the full history to a JSON file
    Export,

    /// Show service reachability and history stats
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lurecheck=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Check { url, export } => {
            let client = lurecheck::api::HttpAnalysisClient::new(&config.api_url)?;
            let mut session =
                lurecheck::session::Session::new(lurecheck::history::open(&config.history_path));

            let pb = spinner("Analyzing URL...");
            let outcome = session.submit(&client, &url).await;
            pb.finish_and_clear();
            let result = outcome?;

            let view = lurecheck::output::view::result_view(&result);
            lurecheck::output::terminal::display_result(&view);

            if export {
                let artifact = lurecheck::export::export_result(Some(&result), today())?;
                write_export(artifact, &config.export_dir)?;
            }
        }

        Commands::Batch { file } => {
            let urls = read_url_lines(&file)?;
            if urls.is_empty() {
                println!("No URLs found in {}.", file.display());
                return Ok(());
            }

            let client = lurecheck::api::HttpAnalysisClient::new(&config.api_url)?;
            let mut session =
                lurecheck::session::Session::new(lurecheck::history::open(&config.history_path));

            let pb = spinner(&format!("Analyzing {} URLs...", urls.len()));
            let outcome = session.submit_batch(&client, &urls).await;
            pb.finish_and_clear();

            lurecheck::output::terminal::display_batch(&outcome?);
        }

        Commands::History => {
            let store = lurecheck::history::open(&config.history_path);
            lurecheck::output::terminal::display_history(store.list());
        }

        Commands::Show { index, export } => {
            let store = lurecheck::history::open(&config.history_path);
            let Some(entry) = store.get(index) else {
                anyhow::bail!("No history entry #{index}. Run `lurecheck history` to list them.");
            };

            let view = lurecheck::output::view::result_view(&entry.result);
            lurecheck::output::terminal::display_entry(index, entry, &view);

            if export {
                let artifact = lurecheck::export::export_result(Some(&entry.result), today())?;
                write_export(artifact, &config.export_dir)?;
            }
        }

        Commands::Clear { yes } => {
            let mut store = lurecheck::history::open(&config.history_path);
            if store.is_empty() {
                println!("History is already empty.");
                return Ok(());
            }
            if !yes {
                println!(
                    "This deletes all {} recorded analyses. Re-run with {} to confirm.",
                    store.len(),
                    "--yes".bold()
                );
                return Ok(());
            }
            store.clear();
            println!("History cleared.");
        }

        Commands::Export => {
            let store = lurecheck::history::open(&config.history_path);
            let artifact = store.export_all(today())?;
            write_export(artifact, &config.export_dir)?;
        }

        Commands::Status => {
            let client = lurecheck::api::HttpAnalysisClient::new(&config.api_url)?;
            let store = lurecheck::history::open(&config.history_path);
            lurecheck::status::show(&client, &config.api_url, &store, &config.history_path).await?;
        }
    }

    Ok(())
}

/// Write an export artifact if there is one, reporting either way.
fn write_export(artifact: Option<lurecheck::export::ExportArtifact>, dir: &Path) -> Result<()> {
    match artifact {
        Some(artifact) => {
            let path = lurecheck::export::write_artifact(&artifact, dir)?;
            println!("Exported to {}", path.display().to_string().bold());
        }
        None => println!("Nothing to export."),
    }
    Ok(())
}

/// UTC date for export filenames.
fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Read URLs from a batch file, skipping blank lines and `#` comments.
fn read_url_lines(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
