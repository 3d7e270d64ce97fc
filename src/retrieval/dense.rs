// file: src/retrieval/dense.rs
// description: dense retriever using embedding cosine similarity with threshold filtering
// reference: semantic retrieval over embedded abstracts

use crate::corpus::Corpus;
use crate::embedding::EmbeddingProvider;
use crate::error::{Result, RetrievalError};
use crate::models::{EmbeddedDocument, RankedHit, project_hits};
use crate::retrieval::rank_descending;
use tracing::{debug, warn};

/// Cosine similarity between two vectors.
///
/// Returns `None` when either vector has zero norm (similarity undefined) or
/// the dimensions disagree; the caller skips such candidates instead of
/// letting a NaN enter the ranking.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }

    Some(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Dense retriever over a fixed candidate set of embedded documents.
///
/// Documents and their vectors are embedded once at build time and held as one
/// immutable unit per document; retrieval calls are read-only.
pub struct DenseRetriever {
    documents: Vec<EmbeddedDocument>,
    top_k: usize,
    threshold: f32,
}

impl DenseRetriever {
    /// Embed every corpus document through the provider.
    ///
    /// A document the provider cannot embed is skipped with a warning; one bad
    /// abstract must not abort the whole candidate set.
    pub async fn build(
        provider: &dyn EmbeddingProvider,
        corpus: &Corpus,
        top_k: usize,
        threshold: f32,
    ) -> Result<Self> {
        if top_k == 0 {
            return Err(RetrievalError::Config(
                "dense top_k must be greater than 0".to_string(),
            ));
        }

        let mut documents = Vec::with_capacity(corpus.len());
        for record in corpus.iter() {
            match provider.embed(&record.searchable_text()).await {
                Ok(vector) => documents.push(EmbeddedDocument::new(record.clone(), vector)),
                Err(e) => {
                    warn!("skipping {}: {}", record.doi, e);
                }
            }
        }

        debug!(
            "embedded {} of {} corpus documents",
            documents.len(),
            corpus.len()
        );

        Ok(Self {
            documents,
            top_k,
            threshold,
        })
    }

    pub fn candidate_count(&self) -> usize {
        self.documents.len()
    }

    /// Rank the candidate set against an already embedded query vector.
    ///
    /// Candidates below the (inclusive) threshold are dropped, survivors are
    /// sorted by descending similarity with ties broken by corpus order, and
    /// the list is truncated to top-k. An empty return means nothing cleared
    /// the threshold; that is a normal outcome, not an error.
    pub fn retrieve_embedded(&self, query_vector: &[f32]) -> Result<Vec<RankedHit>> {
        if query_vector.iter().all(|&x| x == 0.0) {
            return Err(RetrievalError::DegenerateVector {
                context: "query".to_string(),
            });
        }

        let mut kept: Vec<(usize, f32)> = Vec::new();
        for (index, doc) in self.documents.iter().enumerate() {
            match cosine_similarity(query_vector, &doc.vector) {
                Some(similarity) if similarity >= self.threshold => {
                    kept.push((index, similarity));
                }
                Some(_) => {}
                None => {
                    debug!("skipping {}: degenerate or mismatched vector", doc.record.doi);
                }
            }
        }

        let ranked = rank_descending(kept.into_iter(), self.top_k);
        project_hits(&self.documents, &ranked)
    }

    /// Embed a query string through the provider, then rank.
    pub async fn retrieve(
        &self,
        provider: &dyn EmbeddingProvider,
        query: &str,
    ) -> Result<Vec<RankedHit>> {
        let query_vector = provider
            .embed(query)
            .await
            .map_err(|e| RetrievalError::Embedding(format!("query embedding failed: {e}")))?;
        self.retrieve_embedded(&query_vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingEmbedder;
    use crate::models::DocumentRecord;
    use tokio_test::block_on;

    fn corpus() -> Corpus {
        Corpus::from_documents(vec![
            DocumentRecord::new("d1".into(), "cats and dogs".into(), "feline canine".into()),
            DocumentRecord::new("d2".into(), "quantum computing".into(), "qubits".into()),
        ])
        .unwrap()
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_norm_is_none() {
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).is_none());
        assert!(cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]).is_none());
    }

    #[test]
    fn test_cosine_dimension_mismatch_is_none() {
        assert!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_matching_query_retrieves_document() {
        let provider = HashingEmbedder::new(256);
        let retriever = block_on(DenseRetriever::build(&provider, &corpus(), 5, 0.1)).unwrap();
        let hits = block_on(retriever.retrieve(&provider, "cats and dogs feline")).unwrap();

        assert!(!hits.is_empty());
        assert_eq!(hits[0].doi, "d1");
    }

    #[test]
    fn test_high_threshold_returns_empty() {
        let provider = HashingEmbedder::new(256);
        let retriever = block_on(DenseRetriever::build(&provider, &corpus(), 5, 0.99)).unwrap();
        let hits = block_on(retriever.retrieve(&provider, "unrelated astrophysics jargon")).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_zero_vector_document_excluded() {
        let records = vec![
            EmbeddedDocument::new(
                DocumentRecord::new("dz".into(), "zeroed".into(), String::new()),
                vec![0.0; 4],
            ),
            EmbeddedDocument::new(
                DocumentRecord::new("dok".into(), "fine".into(), String::new()),
                vec![1.0, 0.0, 0.0, 0.0],
            ),
        ];
        let retriever = DenseRetriever {
            documents: records,
            top_k: 5,
            threshold: 0.0,
        };

        let hits = retriever.retrieve_embedded(&[1.0, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].doi, "dok");
    }

    #[test]
    fn test_zero_norm_query_is_error() {
        let provider = HashingEmbedder::new(64);
        let retriever = block_on(DenseRetriever::build(&provider, &corpus(), 5, 0.0)).unwrap();
        let err = retriever.retrieve_embedded(&[0.0; 64]).unwrap_err();
        assert!(matches!(err, RetrievalError::DegenerateVector { .. }));
    }

    #[test]
    fn test_results_bounded_and_sorted() {
        let documents: Vec<EmbeddedDocument> = (0..8)
            .map(|i| {
                EmbeddedDocument::new(
                    DocumentRecord::new(format!("d{i}"), format!("doc {i}"), String::new()),
                    vec![1.0, i as f32 * 0.1],
                )
            })
            .collect();
        let retriever = DenseRetriever {
            documents,
            top_k: 3,
            threshold: 0.0,
        };

        let hits = retriever.retrieve_embedded(&[1.0, 0.0]).unwrap();
        assert_eq!(hits.len(), 3);
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_ties_break_by_corpus_order() {
        let documents = vec![
            EmbeddedDocument::new(
                DocumentRecord::new("first".into(), "a".into(), String::new()),
                vec![2.0, 0.0],
            ),
            EmbeddedDocument::new(
                DocumentRecord::new("second".into(), "b".into(), String::new()),
                vec![4.0, 0.0],
            ),
        ];
        let retriever = DenseRetriever {
            documents,
            top_k: 2,
            threshold: 0.0,
        };

        // Both candidates have cosine 1.0 to the query.
        let hits = retriever.retrieve_embedded(&[1.0, 0.0]).unwrap();
        assert_eq!(hits[0].doi, "first");
        assert_eq!(hits[1].doi, "second");
    }

    #[test]
    fn test_idempotent_retrieval() {
        let provider = HashingEmbedder::new(256);
        let retriever = block_on(DenseRetriever::build(&provider, &corpus(), 5, 0.0)).unwrap();
        let first = block_on(retriever.retrieve(&provider, "quantum qubits")).unwrap();
        let second = block_on(retriever.retrieve(&provider, "quantum qubits")).unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.doi, b.doi);
            assert_eq!(a.score, b.score);
        }
    }
}
