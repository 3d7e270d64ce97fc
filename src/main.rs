// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use lit_retrieve::{
    Config, CorpusBuilder, CorpusStore, CrossrefClient, DenseRetriever, EmbeddingProvider,
    HashingEmbedder, HttpEmbeddingClient, LexicalRetriever, OpenAlexClient, RankedHit, UrlChecker,
    UrlStatus,
};
use lit_retrieve::utils::logging::{format_error, format_rank, format_success, format_warning};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "lit_retrieve")]
#[command(version = "0.1.0")]
#[command(about = "Lexical and dense retrieval over a scholarly abstract corpus", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SearchMode {
    Lexical,
    Dense,
}

#[derive(Clone, Copy, ValueEnum)]
enum MetadataSource {
    Openalex,
    Crossref,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch metadata for a DOI list and write the corpus files
    Prepare {
        /// File with one DOI per line
        dois: PathBuf,
    },

    /// Look up metadata for a single DOI without writing anything
    Lookup {
        doi: String,

        #[arg(long, value_enum, default_value = "openalex")]
        source: MetadataSource,
    },

    /// Search the prepared corpus
    Search {
        /// Search query text
        query: String,

        #[arg(short, long, value_enum, default_value = "lexical")]
        mode: SearchMode,

        #[arg(short, long, value_name = "NUM")]
        limit: Option<usize>,

        /// Similarity cutoff for dense mode
        #[arg(short, long)]
        threshold: Option<f32>,
    },

    /// Check liveness of the URLs listed in a file
    CheckUrls {
        /// File with one URL per line
        file: PathBuf,
    },

    /// Show corpus statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    lit_retrieve::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());
    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Prepare { dois } => {
            cmd_prepare(&config, &dois).await?;
        }
        Commands::Lookup { doi, source } => {
            cmd_lookup(&config, &doi, source).await?;
        }
        Commands::Search {
            query,
            mode,
            limit,
            threshold,
        } => {
            cmd_search(&config, &query, mode, limit, threshold).await?;
        }
        Commands::CheckUrls { file } => {
            cmd_check_urls(&config, &file).await?;
        }
        Commands::Stats => {
            cmd_stats(&config)?;
        }
    }

    Ok(())
}

fn read_lines(path: &PathBuf) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

async fn cmd_prepare(config: &Config, dois_path: &PathBuf) -> Result<()> {
    let dois = read_lines(dois_path)?;
    info!("Preparing corpus for {} DOIs", dois.len());

    let store = CorpusStore::new(&config.corpus.data_dir, &config.corpus.manifest_name)
        .context("Failed to open corpus directory")?;
    let openalex = OpenAlexClient::new(&config.metadata);
    let builder = CorpusBuilder::new(&openalex, &store);

    let stats = builder
        .build_from_dois(&dois)
        .await
        .context("Corpus build failed")?;

    println!(
        "{}",
        format_success(&format!(
            "{} fetched, {} already on disk, {} failed",
            stats.fetched, stats.skipped, stats.failed
        ))
    );

    if stats.failed > 0 {
        println!(
            "{}",
            format_warning("some DOIs failed; re-run prepare to retry them")
        );
    }

    Ok(())
}

async fn cmd_lookup(config: &Config, doi: &str, source: MetadataSource) -> Result<()> {
    let metadata = match source {
        MetadataSource::Openalex => {
            OpenAlexClient::new(&config.metadata)
                .fetch_work(doi)
                .await?
        }
        MetadataSource::Crossref => {
            CrossrefClient::new(&config.metadata)
                .fetch_work(doi)
                .await?
        }
    };

    println!("DOI:      {}", metadata.doi);
    println!(
        "Title:    {}",
        metadata.title.as_deref().unwrap_or("(absent)")
    );
    match &metadata.abstract_text {
        Some(text) => println!("Abstract: {text}"),
        None => println!("Abstract: (absent)"),
    }

    Ok(())
}

async fn cmd_search(
    config: &Config,
    query: &str,
    mode: SearchMode,
    limit: Option<usize>,
    threshold: Option<f32>,
) -> Result<()> {
    let store = CorpusStore::new(&config.corpus.data_dir, &config.corpus.manifest_name)?;
    let corpus = store.load_corpus().context("Failed to load corpus")?;

    if corpus.is_empty() {
        println!(
            "{}",
            format_error("corpus is empty, run `prepare` first")
        );
        return Ok(());
    }

    match mode {
        SearchMode::Lexical => {
            let top_k = limit.unwrap_or(config.retrieval.lexical_top_k);
            let retriever = LexicalRetriever::from_corpus(&corpus, top_k)
                .context("Failed to build lexical retriever")?;

            let hits = retriever.retrieve(query)?;
            if hits.is_empty() {
                println!("Nothing found, please try another query.");
                return Ok(());
            }

            for (rank, hit) in hits.iter().enumerate() {
                println!(
                    "{}",
                    format_rank(
                        rank + 1,
                        &format!("(score: {:.2}) {}", hit.score, hit.identifier)
                    )
                );
            }
        }
        SearchMode::Dense => {
            let top_k = limit.unwrap_or(config.retrieval.dense_top_k);
            let threshold = threshold.unwrap_or(config.retrieval.similarity_threshold);

            let provider: Box<dyn EmbeddingProvider> = if config.embedding.api_key.is_some() {
                Box::new(HttpEmbeddingClient::new(&config.embedding)?)
            } else {
                warn!("no embedding API key configured, using offline hashing embedder");
                Box::new(HashingEmbedder::new(config.embedding.dimension))
            };

            let retriever = DenseRetriever::build(provider.as_ref(), &corpus, top_k, threshold)
                .await
                .context("Failed to embed corpus")?;
            info!("{} candidates embedded", retriever.candidate_count());

            let hits = retriever.retrieve(provider.as_ref(), query).await?;
            if hits.is_empty() {
                println!("Nothing found above the similarity threshold.");
                return Ok(());
            }

            print_hits(&hits);
        }
    }

    Ok(())
}

fn print_hits(hits: &[RankedHit]) {
    for (rank, hit) in hits.iter().enumerate() {
        println!("{}", format_rank(rank + 1, &hit.format_summary(200)));
    }
}

async fn cmd_check_urls(config: &Config, file: &PathBuf) -> Result<()> {
    let urls = read_lines(file)?;
    info!("Checking {} URLs with {} workers", urls.len(), config.liveness.workers);

    let checker = UrlChecker::new(&config.liveness)?;
    let outcomes = checker.check_all(&urls).await;

    let mut reachable = 0usize;
    for outcome in &outcomes {
        match outcome.status {
            UrlStatus::Status(code) => {
                reachable += 1;
                println!("{}", format_success(&format!("{} -> {code}", outcome.url)));
            }
            UrlStatus::Invalid => {
                println!(
                    "{}",
                    format_error(&format!("{} -> invalid URL", outcome.url))
                );
            }
            UrlStatus::Unreachable => {
                println!(
                    "{}",
                    format_warning(&format!("{} -> unreachable", outcome.url))
                );
            }
        }
    }

    println!(
        "{}",
        format_success(&format!("{reachable}/{} URLs answered", outcomes.len()))
    );
    Ok(())
}

fn cmd_stats(config: &Config) -> Result<()> {
    let store = CorpusStore::new(&config.corpus.data_dir, &config.corpus.manifest_name)?;
    let corpus = store.load_corpus()?;

    let without_abstract = corpus
        .iter()
        .filter(|d| d.abstract_text.is_empty())
        .count();

    println!("Documents:        {}", corpus.len());
    println!("Missing abstract: {without_abstract}");
    println!("Corpus directory: {}", config.corpus.data_dir.display());

    Ok(())
}
