// file: src/corpus/builder.rs
// description: batch corpus preparation from a DOI list
// reference: OpenAlex metadata fetch with per-DOI failure isolation

use crate::corpus::CorpusStore;
use crate::error::Result;
use crate::metadata::OpenAlexClient;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    pub fetched: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BuildStats {
    pub fn total(&self) -> usize {
        self.fetched + self.skipped + self.failed
    }
}

/// Builds the on-disk corpus from a DOI list.
///
/// Each DOI is an independent unit of work: a failed lookup is logged and
/// counted, never aborts the batch. DOIs already present on disk are skipped
/// so re-running preparation is cheap.
pub struct CorpusBuilder<'a> {
    openalex: &'a OpenAlexClient,
    store: &'a CorpusStore,
}

impl<'a> CorpusBuilder<'a> {
    pub fn new(openalex: &'a OpenAlexClient, store: &'a CorpusStore) -> Self {
        Self { openalex, store }
    }

    pub async fn build_from_dois(&self, dois: &[String]) -> Result<BuildStats> {
        let mut stats = BuildStats::default();

        let bar = ProgressBar::new(dois.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        for doi in dois {
            bar.set_message(doi.clone());

            if self.store.document_exists(doi) {
                stats.skipped += 1;
                bar.inc(1);
                continue;
            }

            match self.openalex.fetch_work(doi).await {
                Ok(metadata) => {
                    self.store.write_document(&metadata.into_record())?;
                    stats.fetched += 1;
                }
                Err(e) => {
                    warn!("failed to fetch {doi}: {e}");
                    stats.failed += 1;
                }
            }

            bar.inc(1);
        }
        bar.finish_and_clear();

        let corpus = self.store.load_corpus()?;
        self.store.write_manifest(&corpus)?;

        info!(
            "corpus build complete: {} fetched, {} skipped, {} failed",
            stats.fetched, stats.skipped, stats.failed
        );
        Ok(stats)
    }
}
