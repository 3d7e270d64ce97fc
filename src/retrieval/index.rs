// file: src/retrieval/index.rs
// description: in-memory inverted index with BM25 Okapi scoring
// reference: https://en.wikipedia.org/wiki/Okapi_BM25

use crate::retrieval::tokenizer::tokenize;
use std::collections::HashMap;

pub const BM25_K1: f32 = 1.5;
pub const BM25_B: f32 = 0.75;

#[derive(Debug, Clone)]
struct Posting {
    doc_index: usize,
    term_frequency: u32,
}

/// Inverted index mapping terms to postings lists.
///
/// Built once over the full corpus during setup and read-only afterwards.
/// Document lengths are tracked for BM25 length normalization. Documents are
/// addressed by their position in the corpus the index was built from.
#[derive(Debug, Default)]
pub struct LexicalIndex {
    postings: HashMap<String, Vec<Posting>>,
    doc_lengths: Vec<u32>,
    total_doc_length: u64,
}

impl LexicalIndex {
    /// Build an index over the given document texts, in corpus order.
    pub fn build<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index = Self::default();
        for text in texts {
            index.add_document(text);
        }
        index
    }

    fn add_document(&mut self, text: &str) {
        let doc_index = self.doc_lengths.len();
        let tokens = tokenize(text);

        self.doc_lengths.push(tokens.len() as u32);
        self.total_doc_length += tokens.len() as u64;

        let mut tf_map: HashMap<String, u32> = HashMap::new();
        for token in tokens {
            *tf_map.entry(token).or_insert(0) += 1;
        }

        for (term, term_frequency) in tf_map {
            self.postings.entry(term).or_default().push(Posting {
                doc_index,
                term_frequency,
            });
        }
    }

    pub fn doc_count(&self) -> usize {
        self.doc_lengths.len()
    }

    fn average_doc_length(&self) -> f32 {
        if self.doc_lengths.is_empty() {
            return 0.0;
        }
        self.total_doc_length as f32 / self.doc_lengths.len() as f32
    }

    /// BM25 Okapi scores for the given query tokens.
    ///
    /// Only documents sharing at least one term with the query appear in the
    /// returned map; absence of a document means zero lexical overlap.
    pub fn score(&self, query_tokens: &[String]) -> HashMap<usize, f32> {
        let mut scores: HashMap<usize, f32> = HashMap::new();
        if query_tokens.is_empty() || self.doc_lengths.is_empty() {
            return scores;
        }

        let n = self.doc_lengths.len() as f32;
        let avgdl = self.average_doc_length();

        for token in query_tokens {
            let Some(postings) = self.postings.get(token) else {
                continue;
            };

            let df = postings.len() as f32;
            // IDF: log((N - df + 0.5) / (df + 0.5) + 1)
            let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();

            for posting in postings {
                let dl = self.doc_lengths[posting.doc_index] as f32;
                let tf = posting.term_frequency as f32;
                let tf_norm =
                    (tf * (BM25_K1 + 1.0)) / (tf + BM25_K1 * (1.0 - BM25_B + BM25_B * dl / avgdl));

                *scores.entry(posting.doc_index).or_insert(0.0) += idf * tf_norm;
            }
        }

        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_index() -> LexicalIndex {
        LexicalIndex::build([
            "rust systems programming language",
            "python scripting language",
            "quantum computing with superconducting qubits",
            "rust memory safety without garbage collection",
        ])
    }

    #[test]
    fn test_doc_count() {
        assert_eq!(build_index().doc_count(), 4);
    }

    #[test]
    fn test_score_matching_docs_only() {
        let index = build_index();
        let scores = index.score(&tokenize("rust"));
        assert_eq!(scores.len(), 2);
        assert!(scores.contains_key(&0));
        assert!(scores.contains_key(&3));
    }

    #[test]
    fn test_scores_are_positive() {
        let index = build_index();
        for (_, score) in index.score(&tokenize("rust language")) {
            assert!(score > 0.0, "BM25 scores should be positive, got {score}");
        }
    }

    #[test]
    fn test_higher_tf_scores_higher() {
        let index = LexicalIndex::build(["rust rust rust", "rust scripting"]);
        let scores = index.score(&tokenize("rust"));
        assert!(scores[&0] > scores[&1], "higher TF should score higher");
    }

    #[test]
    fn test_no_overlap_is_empty_map() {
        let index = build_index();
        assert!(index.score(&tokenize("astrophysics")).is_empty());
    }

    #[test]
    fn test_empty_query_and_empty_index() {
        assert!(build_index().score(&[]).is_empty());
        let empty = LexicalIndex::build(std::iter::empty::<&str>());
        assert!(empty.score(&tokenize("rust")).is_empty());
    }
}
