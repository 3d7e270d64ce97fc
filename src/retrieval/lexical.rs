// file: src/retrieval/lexical.rs
// description: BM25 lexical retriever with alignment-checked identifier projection
// reference: sparse keyword retrieval over the abstract corpus

use crate::corpus::Corpus;
use crate::error::{Result, RetrievalError};
use crate::retrieval::index::LexicalIndex;
use crate::retrieval::tokenizer::tokenize;
use crate::retrieval::rank_descending;
use tracing::debug;

/// One lexical hit: the opaque identifier label of a matched document and its
/// BM25 relevance score. Callers map the identifier back to full content.
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalHit {
    pub identifier: String,
    pub score: f32,
}

/// BM25 retriever over a fixed, pre-indexed corpus.
///
/// The index and identifier list are owned and immutable for the lifetime of
/// the retriever; repeated retrieval calls are read-only and side-effect free.
#[derive(Debug)]
pub struct LexicalRetriever {
    index: LexicalIndex,
    identifiers: Vec<String>,
    top_k: usize,
}

impl LexicalRetriever {
    /// Construct from a prebuilt index and a positionally aligned identifier
    /// list. A length mismatch means the identifier list does not describe the
    /// indexed corpus; that is a fatal configuration error, checked here so it
    /// can never surface as a silently wrong retrieval result.
    pub fn new(index: LexicalIndex, identifiers: Vec<String>, top_k: usize) -> Result<Self> {
        if index.doc_count() != identifiers.len() {
            return Err(RetrievalError::CorpusAlignment {
                indexed: index.doc_count(),
                identifiers: identifiers.len(),
            });
        }

        if top_k == 0 {
            return Err(RetrievalError::Config(
                "lexical top_k must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            index,
            identifiers,
            top_k,
        })
    }

    /// Build index and identifier list together from a corpus, so alignment
    /// holds by construction.
    pub fn from_corpus(corpus: &Corpus, top_k: usize) -> Result<Self> {
        let texts: Vec<String> = corpus.iter().map(|d| d.searchable_text()).collect();
        let index = LexicalIndex::build(texts.iter().map(String::as_str));
        let identifiers = corpus.iter().map(|d| d.identifier()).collect();
        Self::new(index, identifiers, top_k)
    }

    /// Retrieve the top-k documents for a query.
    ///
    /// An exact 0.0 top score is the sentinel for "no lexical overlap": the
    /// result is then an empty list, a normal value rather than an error.
    pub fn retrieve(&self, query: &str) -> Result<Vec<LexicalHit>> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            debug!("query reduced to no tokens after stop word removal");
            return Ok(Vec::new());
        }

        let scores = self.index.score(&query_tokens);
        let ranked = rank_descending(scores.into_iter(), self.top_k);

        if ranked.iter().all(|&(_, score)| score == 0.0) {
            debug!("all candidate scores are 0.0, treating as no match");
            return Ok(Vec::new());
        }

        ranked
            .into_iter()
            .map(|(doc_index, score)| {
                self.identifiers
                    .get(doc_index)
                    .map(|identifier| LexicalHit {
                        identifier: identifier.clone(),
                        score,
                    })
                    .ok_or(RetrievalError::IndexProjection {
                        index: doc_index,
                        len: self.identifiers.len(),
                    })
            })
            .collect()
    }
}
