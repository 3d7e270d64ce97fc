// file: src/corpus/mod.rs
// description: ordered document collection and corpus persistence
// reference: internal module structure

pub mod builder;
pub mod store;

use crate::error::{Result, RetrievalError};
use crate::models::DocumentRecord;
use std::collections::HashSet;

pub use builder::{BuildStats, CorpusBuilder};
pub use store::CorpusStore;

/// The fixed, ordered collection of documents available for retrieval.
///
/// Document order is the corpus order every retriever sees; it never changes
/// after construction. DOIs are unique within the corpus.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<DocumentRecord>,
}

impl Corpus {
    pub fn from_documents(documents: Vec<DocumentRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        for doc in &documents {
            if !seen.insert(doc.doi.as_str()) {
                return Err(RetrievalError::Config(format!(
                    "duplicate DOI in corpus: {}",
                    doc.doi
                )));
            }
        }

        Ok(Self { documents })
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DocumentRecord> {
        self.documents.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.documents.iter()
    }

    pub fn contains(&self, doi: &str) -> bool {
        self.documents.iter().any(|d| d.doi == doi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_doi_rejected() {
        let documents = vec![
            DocumentRecord::new("10.1/a".into(), "One".into(), String::new()),
            DocumentRecord::new("10.1/a".into(), "Two".into(), String::new()),
        ];
        assert!(Corpus::from_documents(documents).is_err());
    }

    #[test]
    fn test_order_is_preserved() {
        let documents = vec![
            DocumentRecord::new("10.1/b".into(), "B".into(), String::new()),
            DocumentRecord::new("10.1/a".into(), "A".into(), String::new()),
        ];
        let corpus = Corpus::from_documents(documents).unwrap();
        assert_eq!(corpus.get(0).unwrap().doi, "10.1/b");
        assert_eq!(corpus.get(1).unwrap().doi, "10.1/a");
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = Corpus::from_documents(vec![]).unwrap();
        assert!(corpus.is_empty());
        assert_eq!(corpus.len(), 0);
    }
}
