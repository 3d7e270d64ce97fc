// file: src/liveness/mod.rs
// description: URL liveness checks with a bounded concurrent worker pool
// reference: https://docs.rs/reqwest

use crate::config::LivenessConfig;
use crate::error::Result;
use futures::stream::{self, StreamExt};
use reqwest::{Client, Url};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Outcome of checking one URL. A failed request maps to `Unreachable`; the
/// batch never aborts because one URL died.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum UrlStatus {
    /// The server answered; interpretation of the code is the caller's.
    Status(u16),
    /// The string is not an absolute http(s) URL with a host.
    Invalid,
    /// Request failed: timeout, DNS, connection refused.
    Unreachable,
}

#[derive(Debug, Clone, Serialize)]
pub struct UrlCheckOutcome {
    pub url: String,
    pub status: UrlStatus,
}

pub struct UrlChecker {
    client: Client,
    workers: usize,
}

impl UrlChecker {
    pub fn new(config: &LivenessConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            workers: config.workers,
        })
    }

    /// Check a single URL. Scheme and host are validated before any request
    /// goes out.
    pub async fn check(&self, url: &str) -> UrlStatus {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => return UrlStatus::Invalid,
        };

        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return UrlStatus::Invalid;
        }

        match self.client.get(parsed).send().await {
            Ok(response) => {
                debug!("{url} answered {}", response.status());
                UrlStatus::Status(response.status().as_u16())
            }
            Err(e) => {
                debug!("{url} unreachable: {e}");
                UrlStatus::Unreachable
            }
        }
    }

    /// Check many URLs concurrently with a bounded worker pool.
    ///
    /// Each URL is an independent unit with its own timeout. Outcomes arrive
    /// in completion order, not submission order; each carries its URL.
    pub async fn check_all(&self, urls: &[String]) -> Vec<UrlCheckOutcome> {
        stream::iter(urls.iter().cloned())
            .map(|url| async move {
                let status = self.check(&url).await;
                UrlCheckOutcome { url, status }
            })
            .buffer_unordered(self.workers)
            .collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tokio_test::block_on;

    fn checker() -> UrlChecker {
        UrlChecker::new(&Config::default_config().liveness).unwrap()
    }

    #[test]
    fn test_missing_scheme_is_invalid() {
        let status = block_on(checker().check("www.example.org/page"));
        assert_eq!(status, UrlStatus::Invalid);
    }

    #[test]
    fn test_non_http_scheme_is_invalid() {
        let status = block_on(checker().check("ftp://example.org/file"));
        assert_eq!(status, UrlStatus::Invalid);
    }

    #[test]
    fn test_not_a_url_is_invalid() {
        let status = block_on(checker().check("definitely not a url"));
        assert_eq!(status, UrlStatus::Invalid);
    }

    #[test]
    fn test_batch_outcomes_cover_all_urls() {
        let urls = vec![
            "not a url".to_string(),
            "ftp://example.org".to_string(),
        ];
        let outcomes = block_on(checker().check_all(&urls));
        assert_eq!(outcomes.len(), 2);
        for outcome in outcomes {
            assert_eq!(outcome.status, UrlStatus::Invalid);
        }
    }
}
