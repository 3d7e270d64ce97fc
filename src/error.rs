// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RetrievalError>;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Corpus alignment error: index covers {indexed} documents but {identifiers} identifiers were supplied")]
    CorpusAlignment { indexed: usize, identifiers: usize },

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Degenerate embedding for {context}: vector norm is zero")]
    DegenerateVector { context: String },

    #[error("Ranked index {index} is out of bounds for candidate set of length {len}")]
    IndexProjection { index: usize, len: usize },

    #[error("Metadata lookup failed for {doi}: {message}")]
    Metadata { doi: String, message: String },

    #[error("Corpus file {path} is malformed: {message}")]
    CorpusFormat { path: PathBuf, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
