// Export artifacts: pretty-printed JSON snapshots of verdicts and history.
//
// Filenames are deterministic: crate prefix, artifact kind, a sanitized
// domain for single verdicts, and the date. Exporting the same analysis
// twice on one day overwrites the earlier file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::history::HistoryEntry;
use crate::verdict::AnalysisResult;

const FILE_PREFIX: &str = "lurecheck";

/// A ready-to-write export: filename plus pretty JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub filename: String,
    pub body: String,
}

/// Snapshot one verdict. `None` (nothing analyzed yet) is a no-op
/// reported as `Ok(None)`, not an error.
pub fn export_result(
    result: Option<&AnalysisResult>,
    on: NaiveDate,
) -> Result<Option<ExportArtifact>> {
    let Some(result) = result else {
        return Ok(None);
    };
    let artifact = ExportArtifact {
        filename: format!(
            "{FILE_PREFIX}-analise-{}-{}.json",
            filename_fragment(&result.domain),
            on.format("%Y-%m-%d")
        ),
        body: pretty(result)?,
    };
    Ok(Some(artifact))
}

/// Snapshot the whole history, newest first, every entry fully expanded.
/// An empty history is a no-op.
pub fn export_history(entries: &[HistoryEntry], on: NaiveDate) -> Result<Option<ExportArtifact>> {
    if entries.is_empty() {
        return Ok(None);
    }
    let artifact = ExportArtifact {
        filename: format!("{FILE_PREFIX}-historico-{}.json", on.format("%Y-%m-%d")),
        body: pretty(entries)?,
    };
    Ok(Some(artifact))
}

/// Write the artifact under `dir` and return the full path.
pub fn write_artifact(artifact: &ExportArtifact, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    let path = dir.join(&artifact.filename);
    std::fs::write(&path, &artifact.body)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    Ok(path)
}

fn pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to encode export artifact")
}

/// Keep domains readable in filenames while dropping anything a
/// filesystem might object to.
fn filename_fragment(domain: &str) -> String {
    let cleaned: String = domain
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}
