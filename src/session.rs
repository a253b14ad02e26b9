// Session state: what one run of the tool knows.
//
// The history store plus the most recent verdict, owned by the command
// dispatcher and passed explicitly to whoever needs it. Submission is
// the only path that records history; replaying a stored entry never
// does.

use tracing::warn;

use crate::api::{self, AnalysisApi, AnalysisError, BatchOutcome};
use crate::history::HistoryStore;
use crate::verdict::{AnalysisResult, RiskBand};

pub struct Session {
    pub store: HistoryStore,
    /// The verdict from the most recent successful submission.
    pub last: Option<AnalysisResult>,
}

impl Session {
    pub fn new(store: HistoryStore) -> Self {
        Self { store, last: None }
    }

    /// One submission end to end: validate the input, call the service,
    /// record the verdict. Nothing is recorded on any failure.
    pub async fn submit(
        &mut self,
        client: &dyn AnalysisApi,
        raw_url: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let url = api::prepare_url(raw_url)?;
        let result = client.analyze(url).await?;
        if result.risk_level != RiskBand::from_score(result.phishing_score) {
            // The band is a pure function of the score on both sides of
            // the wire; a mismatch means the service changed its bands.
            warn!(
                score = result.phishing_score,
                band = %result.risk_level,
                "service risk band disagrees with the score"
            );
        }
        self.store.record(result.clone());
        self.last = Some(result.clone());
        Ok(result)
    }

    /// Batch submission: every returned verdict is recorded in response
    /// order, so the last URL of the batch ends up newest.
    pub async fn submit_batch(
        &mut self,
        client: &dyn AnalysisApi,
        urls: &[String],
    ) -> Result<Vec<BatchOutcome>, AnalysisError> {
        let outcomes = client.analyze_batch(urls).await?;
        for outcome in &outcomes {
            if let BatchOutcome::Verdict(result) = outcome {
                self.store.record(result.clone());
                self.last = Some(result.clone());
            }
        }
        Ok(outcomes)
    }
}
