// Bounded history of past analyses.
//
// Newest first, capped at MAX_HISTORY. Every mutation rewrites the whole
// slot; the load path treats missing or unreadable data as an empty
// history, so a bad disk state can never take the tool down.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::export::ExportArtifact;
use crate::verdict::{AnalysisResult, RiskBand};

use super::storage::{StorageError, StorageSlot};

/// Oldest entries fall off past this size.
pub const MAX_HISTORY: usize = 50;

/// One recorded analysis. The fields the list view needs are denormalized
/// so rendering the list never touches the full result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Set once, when the entry is recorded.
    pub timestamp: DateTime<Utc>,
    pub url: String,
    pub domain: String,
    pub score: u8,
    pub is_phishing: bool,
    pub risk_level: RiskBand,
    /// The full verdict, for replay and export.
    pub result: AnalysisResult,
}

impl HistoryEntry {
    fn stamped(result: AnalysisResult, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at,
            url: result.url.clone(),
            domain: result.domain.clone(),
            score: result.phishing_score,
            is_phishing: result.is_phishing,
            risk_level: result.risk_level,
            result,
        }
    }
}

/// Newest-first sequence of analyses behind a storage slot.
pub struct HistoryStore {
    slot: Box<dyn StorageSlot>,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Load the history from the slot. Missing or unreadable data starts
    /// an empty history; this path never fails.
    pub fn load(slot: Box<dyn StorageSlot>) -> Self {
        let entries = match slot.get() {
            Ok(Some(text)) => match serde_json::from_str::<Vec<HistoryEntry>>(&text) {
                Ok(mut entries) => {
                    entries.truncate(MAX_HISTORY);
                    entries
                }
                Err(e) => {
                    warn!(error = %e, "history storage holds invalid data, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read history storage, starting empty");
                Vec::new()
            }
        };
        Self { slot, entries }
    }

    /// Record a fresh verdict: stamp it, insert at the front, evict past
    /// the cap, persist. A persistence failure is logged, not raised; the
    /// entry stays in memory for the rest of the session either way.
    pub fn record(&mut self, result: AnalysisResult) -> HistoryEntry {
        let entry = HistoryEntry::stamped(result, Utc::now());
        self.entries.insert(0, entry.clone());
        self.entries.truncate(MAX_HISTORY);
        self.persist();
        entry
    }

    /// Newest first.
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything, in memory and in the slot. A missing slot reads
    /// back as an empty history, so removal is the persisted empty state.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.slot.remove() {
            warn!(error = %e, "could not clear history storage");
        }
    }

    /// The full history as a pretty-JSON artifact, or None when empty.
    pub fn export_all(&self, on: NaiveDate) -> anyhow::Result<Option<ExportArtifact>> {
        crate::export::export_history(&self.entries, on)
    }

    fn persist(&self) {
        let outcome = serde_json::to_string(&self.entries)
            .map_err(StorageError::from)
            .and_then(|text| self.slot.set(&text));
        if let Err(e) = outcome {
            warn!(error = %e, "could not persist history");
        }
    }
}
