// file: src/metadata/crossref.rs
// description: Crossref works client with polite-pool support
// reference: https://api.crossref.org/swagger-ui/index.html

use crate::config::MetadataConfig;
use crate::error::{Result, RetrievalError};
use crate::metadata::{WorkMetadata, validate_doi};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CrossrefResponse {
    message: CrossrefWork,
}

#[derive(Debug, Deserialize)]
struct CrossrefWork {
    // Crossref titles arrive as arrays, usually of one element
    title: Option<Vec<String>>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    #[serde(rename = "container-title")]
    container_title: Option<Vec<String>>,
}

/// Client for the Crossref works endpoint.
///
/// When a `mailto` is configured it is appended so requests land in the
/// polite pool instead of the anonymous one.
pub struct CrossrefClient {
    client: Client,
    base_url: String,
    mailto: Option<String>,
}

impl CrossrefClient {
    pub fn new(config: &MetadataConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.crossref_base_url.clone(),
            mailto: config.mailto.clone(),
        }
    }

    /// Fetch title and abstract for one work.
    pub async fn fetch_work(&self, doi: &str) -> Result<WorkMetadata> {
        validate_doi(doi)?;

        let mut url = format!("{}/works/{}", self.base_url, doi);
        if let Some(mailto) = &self.mailto {
            url.push_str(&format!("?mailto={mailto}"));
        }

        debug!("fetching Crossref metadata for {doi}");
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(RetrievalError::Metadata {
                doi: doi.to_string(),
                message: format!("Crossref returned status {}", response.status()),
            });
        }

        let data: CrossrefResponse = response.json().await?;
        let work = data.message;

        if let Some(container) = work.container_title.as_ref().and_then(|c| c.first()) {
            debug!("{doi} published in {container}");
        }

        Ok(WorkMetadata {
            doi: doi.to_string(),
            title: work.title.and_then(|titles| titles.into_iter().next()),
            abstract_text: work.abstract_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_deserialization() {
        let json = r#"{
            "message": {
                "title": ["A Study of Retrieval"],
                "abstract": "<jats:p>We study retrieval.</jats:p>",
                "container-title": ["Journal of Examples"]
            }
        }"#;

        let parsed: CrossrefResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.message.title.unwrap()[0], "A Study of Retrieval");
        assert!(parsed.message.abstract_text.unwrap().contains("retrieval"));
    }

    #[test]
    fn test_absent_fields_deserialize_to_none() {
        let parsed: CrossrefResponse = serde_json::from_str(r#"{"message": {}}"#).unwrap();
        assert!(parsed.message.title.is_none());
        assert!(parsed.message.abstract_text.is_none());
    }

    #[test]
    fn test_invalid_doi_rejected_before_request() {
        let client = CrossrefClient::new(&crate::config::Config::default_config().metadata);
        let err = tokio_test::block_on(client.fetch_work("10.x/bad")).unwrap_err();
        assert!(matches!(err, RetrievalError::Metadata { .. }));
    }
}
