// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod liveness;
pub mod metadata;
pub mod models;
pub mod retrieval;
pub mod utils;

pub use config::{
    Config, CorpusConfig, EmbeddingConfig, LivenessConfig, MetadataConfig, RetrievalConfig,
};
pub use corpus::{BuildStats, Corpus, CorpusBuilder, CorpusStore};
pub use embedding::{EmbeddingProvider, HashingEmbedder, HttpEmbeddingClient};
pub use error::{Result, RetrievalError};
pub use liveness::{UrlCheckOutcome, UrlChecker, UrlStatus};
pub use metadata::{CrossrefClient, OpenAlexClient, WorkMetadata, reconstruct_abstract};
pub use models::{DocumentRecord, EmbeddedDocument, RankedHit, project_hits};
pub use retrieval::{
    DenseRetriever, LexicalHit, LexicalIndex, LexicalRetriever, cosine_similarity, tokenize,
};
