// Colored terminal rendering of the view models.
//
// This module owns all terminal-specific formatting: colors, the score
// bar, tables. The main.rs display calls delegate here.

use colored::{ColoredString, Colorize};

use crate::api::BatchOutcome;
use crate::classify::{Polarity, RecommendationClass, ScoreColor};
use crate::history::{HistoryEntry, MAX_HISTORY};
use crate::verdict::RiskBand;

use super::truncate_chars;
use super::view::{BannerTone, PanelState, PanelView, ResultView, ScoreBar};

const BAR_WIDTH: usize = 25;

/// Render a full verdict.
pub fn display_result(view: &ResultView) {
    let banner = format!("=== {} ===", view.banner.text);
    let banner = match view.banner.tone {
        BannerTone::Danger => banner.red().bold(),
        BannerTone::Safe => banner.green().bold(),
    };
    println!("\n{banner}\n");

    println!("  URL: {}", view.url);
    println!("  Domain: {}", view.domain);
    if let Some(subdomain) = &view.subdomain {
        println!("  Subdomain: {subdomain}");
    }
    println!("  Risk level: {}", colorize_band(view.band));
    println!("  Score: {} {}", view.score.label, render_bar(&view.score));

    let advice = match view.recommendation_class {
        RecommendationClass::Safe => view.recommendation.green(),
        RecommendationClass::Warning => view.recommendation.yellow(),
        RecommendationClass::Danger => view.recommendation.red().bold(),
    };
    println!("\n  {advice}");

    if !view.warnings.is_empty() {
        println!("\n  {}", "Warnings:".bold());
        for warning in &view.warnings {
            if warning.affirmative {
                println!("    {}", warning.text.green());
            } else {
                println!("    {}", warning.text);
            }
        }
    }

    if !view.checks.is_empty() {
        println!("\n  {}", "Technical details:".bold());
        for row in &view.checks {
            println!("    {} {:<28} {}", polarity_mark(row.polarity), row.label, row.value);
        }
    }

    if let Some(advanced) = &view.advanced {
        println!("\n  {}", "Advanced analysis:".bold());
        for panel in [
            &advanced.whois,
            &advanced.ssl,
            &advanced.brand,
            &advanced.content,
            &advanced.redirects,
        ] {
            display_panel(panel);
        }
    }
    println!();
}

/// Render a replayed history entry: recording context, then the verdict.
pub fn display_entry(index: usize, entry: &HistoryEntry, view: &ResultView) {
    println!(
        "\n  {}",
        format!(
            "Recorded {} (history #{index})",
            entry.timestamp.format("%Y-%m-%d %H:%M UTC")
        )
        .dimmed()
    );
    display_result(view);
}

/// Render the history list from the denormalized entry fields.
pub fn display_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No analyses recorded yet. Run `lurecheck check <url>` first.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Analysis history ({} of {} slots) ===",
            entries.len(),
            MAX_HISTORY
        )
        .bold()
    );
    println!();

    // Header
    println!(
        "  {:>3}  {:<17} {:>5}  {:<9}  {}",
        "#".dimmed(),
        "When".dimmed(),
        "Score".dimmed(),
        "Risk".dimmed(),
        "URL".dimmed(),
    );
    println!("  {}", "-".repeat(76).dimmed());

    for (i, entry) in entries.iter().enumerate() {
        println!(
            "  {:>3}  {:<17} {:>5}  {:<9}  {}",
            i,
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.score,
            colorize_band(entry.risk_level),
            truncate_chars(&entry.url, 40),
        );
    }

    println!();
    let flagged = entries.iter().filter(|e| e.is_phishing).count();
    if flagged > 0 {
        println!("  {} {} flagged as phishing", "!!".red().bold(), flagged);
    }
    println!("  Replay any entry with `lurecheck show <#>`");
}

/// Render per-URL batch outcomes plus a summary line.
pub fn display_batch(outcomes: &[BatchOutcome]) {
    println!(
        "\n{}",
        format!("=== Batch analysis ({} URLs) ===", outcomes.len()).bold()
    );
    println!();

    for outcome in outcomes {
        match outcome {
            BatchOutcome::Verdict(result) => {
                println!(
                    "  {:>3}/100  {:<9}  {}",
                    result.phishing_score,
                    colorize_band(result.risk_level),
                    truncate_chars(&result.url, 48),
                );
            }
            BatchOutcome::Failed { url, error } => {
                println!("  {}   {}", "failed".red(), truncate_chars(url, 48));
                println!("           {}", error.dimmed());
            }
        }
    }

    println!();
    let failed = outcomes
        .iter()
        .filter(|o| matches!(o, BatchOutcome::Failed { .. }))
        .count();
    let flagged = outcomes
        .iter()
        .filter(|o| matches!(o, BatchOutcome::Verdict(r) if r.is_phishing))
        .count();
    println!(
        "  {} analyzed, {} flagged as phishing, {} failed",
        outcomes.len() - failed,
        flagged,
        failed
    );
}

fn display_panel(panel: &PanelView) {
    match &panel.state {
        PanelState::Ready(rows) => {
            println!("\n    {}", panel.title.bold());
            for row in rows {
                println!(
                    "      {} {:<24} {}",
                    polarity_mark(row.polarity),
                    row.label,
                    row.value
                );
            }
        }
        PanelState::Unavailable(reason) => {
            println!(
                "\n    {} {}",
                panel.title.bold(),
                format!("unavailable: {reason}").dimmed()
            );
        }
    }
}

fn render_bar(score: &ScoreBar) -> String {
    let filled = (score.percent as usize * BAR_WIDTH)
        .div_ceil(100)
        .min(BAR_WIDTH);
    let fill: String = "█".repeat(filled);
    let rest: String = "░".repeat(BAR_WIDTH - filled);
    format!("[{}{}]", paint(score.color, &fill), rest.dimmed())
}

fn paint(color: ScoreColor, text: &str) -> ColoredString {
    match color {
        ScoreColor::Green => text.green(),
        ScoreColor::Yellow => text.yellow(),
        // colored has no named orange; use the palette value directly
        ScoreColor::Orange => text.truecolor(251, 146, 60),
        ScoreColor::Red => text.red(),
    }
}

fn polarity_mark(polarity: Polarity) -> ColoredString {
    match polarity {
        Polarity::Positive => "✓".green(),
        Polarity::Negative => "✗".red(),
        Polarity::Neutral => "·".dimmed(),
    }
}

/// Colorize a risk band label.
fn colorize_band(band: RiskBand) -> ColoredString {
    match band {
        RiskBand::Critical => band.as_str().red().bold(),
        RiskBand::High => band.as_str().bright_red(),
        RiskBand::Medium => band.as_str().yellow(),
        RiskBand::Low => band.as_str().green(),
    }
}
