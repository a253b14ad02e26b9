// Service and history status display.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::api::AnalysisApi;
use crate::history::{HistoryStore, MAX_HISTORY};

/// Display service reachability and history stats to the terminal.
pub async fn show(
    client: &dyn AnalysisApi,
    api_url: &str,
    store: &HistoryStore,
    history_path: &Path,
) -> Result<()> {
    if client.health_check().await {
        println!("Service: {} ({})", "reachable".green(), api_url);
    } else {
        println!("Service: {} ({})", "unreachable".red(), api_url);
        println!("  Start the backend or point LURECHECK_API_URL at a running instance.");
    }

    let entries = store.list();
    if entries.is_empty() {
        println!("History: empty");
        println!("  Run `lurecheck check <url>` to record your first analysis.");
    } else {
        let flagged = entries.iter().filter(|e| e.is_phishing).count();
        println!(
            "History: {} of {} slots used, {} flagged as phishing",
            entries.len(),
            MAX_HISTORY,
            flagged
        );
        if let Some(newest) = entries.first() {
            println!(
                "  Newest: {} ({})",
                newest.url,
                newest.timestamp.format("%Y-%m-%d %H:%M UTC")
            );
        }
    }

    // History file size
    match std::fs::metadata(history_path) {
        Ok(meta) => println!(
            "Storage: {} ({})",
            history_path.display(),
            format_bytes(meta.len())
        ),
        Err(_) => println!("Storage: {} (not created yet)", history_path.display()),
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
