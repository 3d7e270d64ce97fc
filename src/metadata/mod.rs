// file: src/metadata/mod.rs
// description: scholarly metadata clients and shared work record
// reference: Crossref and OpenAlex REST APIs

pub mod crossref;
pub mod openalex;

use crate::error::{Result, RetrievalError};
use crate::models::DocumentRecord;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

pub use crossref::CrossrefClient;
pub use openalex::{OpenAlexClient, reconstruct_abstract};

lazy_static! {
    // DOI syntax per the Crossref display guidelines: prefix "10.", a 4+ digit
    // registrant code, a slash, then a non-empty suffix.
    static ref DOI_PATTERN: Regex = Regex::new(r"^10\.\d{4,9}/\S+$").unwrap();
}

/// Validate DOI syntax before issuing any API request.
pub fn validate_doi(doi: &str) -> Result<()> {
    if DOI_PATTERN.is_match(doi) {
        Ok(())
    } else {
        Err(RetrievalError::Metadata {
            doi: doi.to_string(),
            message: "not a valid DOI".to_string(),
        })
    }
}

/// Metadata for one scholarly work as returned by an API.
///
/// Fields the source did not supply are explicit `None`s; absence is a typed
/// outcome the caller decides about, never a silently empty string.
#[derive(Debug, Clone)]
pub struct WorkMetadata {
    pub doi: String,
    pub title: Option<String>,
    pub abstract_text: Option<String>,
}

impl WorkMetadata {
    /// Convert to a corpus document, substituting empty strings for absent
    /// fields and logging what was missing.
    pub fn into_record(self) -> DocumentRecord {
        if self.title.is_none() {
            warn!("{}: no title in metadata", self.doi);
        }
        if self.abstract_text.is_none() {
            warn!("{}: no abstract in metadata", self.doi);
        }

        DocumentRecord::new(
            self.doi,
            self.title.unwrap_or_default(),
            self.abstract_text.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_dois() {
        assert!(validate_doi("10.1080/10382046.2011.588505").is_ok());
        assert!(validate_doi("10.1234/example-suffix_1").is_ok());
    }

    #[test]
    fn test_invalid_dois() {
        assert!(validate_doi("").is_err());
        assert!(validate_doi("doi:10.1234/x").is_err());
        assert!(validate_doi("11.1234/x").is_err());
        assert!(validate_doi("10.12/short-registrant").is_err());
        assert!(validate_doi("10.1234/").is_err());
    }

    #[test]
    fn test_into_record_fills_absent_fields() {
        let record = WorkMetadata {
            doi: "10.1/x".into(),
            title: Some("A Title".into()),
            abstract_text: None,
        }
        .into_record();

        assert_eq!(record.title, "A Title");
        assert!(record.abstract_text.is_empty());
    }
}
