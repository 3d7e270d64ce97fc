// file: src/metadata/openalex.rs
// description: OpenAlex works client with abstract reconstruction
// reference: https://docs.openalex.org/api-entities/works

use crate::config::MetadataConfig;
use crate::error::{Result, RetrievalError};
use crate::metadata::{WorkMetadata, validate_doi};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct WorkListResponse {
    results: Vec<OpenAlexWork>,
}

#[derive(Debug, Deserialize)]
struct OpenAlexWork {
    doi: Option<String>,
    title: Option<String>,
    abstract_inverted_index: Option<HashMap<String, Vec<usize>>>,
}

/// Rebuild plain abstract text from OpenAlex's inverted index
/// (word -> positions). Words are placed at their positions and joined in
/// order; gaps simply close up.
pub fn reconstruct_abstract(inverted_index: &HashMap<String, Vec<usize>>) -> String {
    let mut positioned: Vec<(usize, &str)> = inverted_index
        .iter()
        .flat_map(|(word, positions)| positions.iter().map(move |&pos| (pos, word.as_str())))
        .collect();
    positioned.sort_by_key(|&(pos, _)| pos);

    positioned
        .into_iter()
        .map(|(_, word)| word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Client for the OpenAlex works endpoint.
///
/// Requests select only the fields the corpus needs and sleep briefly after
/// each call to stay under the published 10 requests/second limit.
pub struct OpenAlexClient {
    client: Client,
    base_url: String,
    mailto: Option<String>,
    request_delay: Duration,
}

impl OpenAlexClient {
    pub fn new(config: &MetadataConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.openalex_base_url.clone(),
            mailto: config.mailto.clone(),
            request_delay: Duration::from_millis(config.request_delay_ms),
        }
    }

    /// Fetch DOI, title and abstract for one work.
    pub async fn fetch_work(&self, doi: &str) -> Result<WorkMetadata> {
        validate_doi(doi)?;

        let mut url = format!(
            "{}/works?filter=doi:{}&select=doi,title,abstract_inverted_index",
            self.base_url, doi
        );
        if let Some(mailto) = &self.mailto {
            url.push_str(&format!("&mailto={mailto}"));
        }

        debug!("fetching OpenAlex metadata for {doi}");
        let response = self.client.get(&url).send().await?;

        let outcome = if response.status().is_success() {
            let data: WorkListResponse = response.json().await?;
            let work = data
                .results
                .into_iter()
                .next()
                .ok_or_else(|| RetrievalError::Metadata {
                    doi: doi.to_string(),
                    message: "no results for DOI".to_string(),
                })?;

            Ok(WorkMetadata {
                // OpenAlex returns the DOI with the resolver prefix
                doi: work
                    .doi
                    .map(|d| d.trim_start_matches("https://doi.org/").to_string())
                    .unwrap_or_else(|| doi.to_string()),
                title: work.title,
                abstract_text: work.abstract_inverted_index.as_ref().map(reconstruct_abstract),
            })
        } else {
            Err(RetrievalError::Metadata {
                doi: doi.to_string(),
                message: format!("OpenAlex returned status {}", response.status()),
            })
        };

        tokio::time::sleep(self.request_delay).await;
        outcome
    }
}
