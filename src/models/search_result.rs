// file: src/models/search_result.rs
// description: Ranked search hit model and index-to-record projection
// reference: Used for both lexical and dense retrieval results

use crate::error::{Result, RetrievalError};
use crate::models::DocumentRecord;
use serde::{Deserialize, Serialize};

/// One entry of a ranked result set.
///
/// Score semantics depend on the retriever that produced the hit: BM25
/// relevance for lexical retrieval, cosine similarity in [-1, 1] for dense
/// retrieval. Scores from different retrievers are never comparable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedHit {
    pub doi: String,
    pub title: String,
    pub abstract_text: String,
    pub score: f32,
}

impl RankedHit {
    pub fn new(record: &DocumentRecord, score: f32) -> Self {
        Self {
            doi: record.doi.clone(),
            title: record.title.clone(),
            abstract_text: record.abstract_text.clone(),
            score,
        }
    }

    /// Format as a one-result summary string for display.
    pub fn format_summary(&self, max_abstract_len: usize) -> String {
        let preview = if self.abstract_text.len() > max_abstract_len {
            let cut = self
                .abstract_text
                .char_indices()
                .map(|(i, _)| i)
                .take_while(|&i| i <= max_abstract_len)
                .last()
                .unwrap_or(0);
            format!("{}...", &self.abstract_text[..cut])
        } else {
            self.abstract_text.clone()
        };

        format!("Score: {:.4} | {} | {}\n{}\n", self.score, self.doi, self.title, preview)
    }
}

/// Project ranked (index, score) pairs back onto full document records.
///
/// Rank order is preserved exactly; nothing is reordered or deduplicated. An
/// out-of-range index means the ranked indices and the candidate set have
/// diverged, which is a data-integrity bug and is surfaced as
/// `IndexProjection` rather than masked as an empty result.
pub fn project_hits<T: AsRef<DocumentRecord>>(
    records: &[T],
    ranked: &[(usize, f32)],
) -> Result<Vec<RankedHit>> {
    ranked
        .iter()
        .map(|&(index, score)| {
            records
                .get(index)
                .map(|record| RankedHit::new(record.as_ref(), score))
                .ok_or(RetrievalError::IndexProjection {
                    index,
                    len: records.len(),
                })
        })
        .collect()
}
