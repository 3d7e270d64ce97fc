// file: src/models/document.rs
// description: core document model with content hashing and serialization
// reference: internal data structures

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

/// A single corpus document: one scholarly work keyed by its DOI.
///
/// The abstract may be empty when the metadata source had none; the document
/// then remains retrievable by title terms only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub doi: String,
    pub title: String,
    pub abstract_text: String,
    pub content_hash: String,
    pub fetched_at: u64,
}

impl DocumentRecord {
    pub fn new(doi: String, title: String, abstract_text: String) -> Self {
        let content_hash = Self::compute_hash(&title, &abstract_text);
        let fetched_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            doi,
            title,
            abstract_text,
            content_hash,
            fetched_at,
        }
    }

    fn compute_hash(title: &str, abstract_text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(title.as_bytes());
        hasher.update(b"\n");
        hasher.update(abstract_text.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Text used for both lexical indexing and embedding. Title and abstract
    /// are concatenated so short-abstract works still carry signal.
    pub fn searchable_text(&self) -> String {
        if self.abstract_text.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.abstract_text)
        }
    }

    /// Identifier label handed back by the lexical retriever: DOI plus title,
    /// enough for a caller to cite the work without re-projecting the record.
    pub fn identifier(&self) -> String {
        format!("{} {}", self.doi, self.title)
    }
}

/// A document together with its embedding vector.
///
/// The record and vector live in one struct so id/text/vector alignment is
/// structural, never a positional assumption across parallel lists.
#[derive(Debug, Clone)]
pub struct EmbeddedDocument {
    pub record: DocumentRecord,
    pub vector: Vec<f32>,
}

impl EmbeddedDocument {
    pub fn new(record: DocumentRecord, vector: Vec<f32>) -> Self {
        Self { record, vector }
    }
}

impl AsRef<DocumentRecord> for DocumentRecord {
    fn as_ref(&self) -> &DocumentRecord {
        self
    }
}

impl AsRef<DocumentRecord> for EmbeddedDocument {
    fn as_ref(&self) -> &DocumentRecord {
        &self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = DocumentRecord::new(
            "10.1234/example".to_string(),
            "An Example Work".to_string(),
            "We study examples.".to_string(),
        );

        assert_eq!(doc.doi, "10.1234/example");
        assert!(!doc.content_hash.is_empty());
        assert!(doc.searchable_text().contains("An Example Work"));
        assert!(doc.searchable_text().contains("We study examples."));
    }

    #[test]
    fn test_hash_consistency() {
        let a = DocumentRecord::new("10.1/a".into(), "Title".into(), "Abstract".into());
        let b = DocumentRecord::new("10.1/b".into(), "Title".into(), "Abstract".into());
        assert_eq!(a.content_hash, b.content_hash);
    }

    #[test]
    fn test_searchable_text_without_abstract() {
        let doc = DocumentRecord::new("10.1/c".into(), "Only Title".into(), String::new());
        assert_eq!(doc.searchable_text(), "Only Title");
    }
}
