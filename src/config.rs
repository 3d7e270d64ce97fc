// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, RetrievalError};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub retrieval: RetrievalConfig,
    pub embedding: EmbeddingConfig,
    pub metadata: MetadataConfig,
    pub liveness: LivenessConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    pub data_dir: PathBuf,
    pub manifest_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalConfig {
    pub lexical_top_k: usize,
    pub dense_top_k: usize,
    pub similarity_threshold: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub dimension: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetadataConfig {
    pub openalex_base_url: String,
    pub crossref_base_url: String,
    pub mailto: Option<String>,
    pub request_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LivenessConfig {
    pub workers: usize,
    pub timeout_secs: u64,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("LIT_RETRIEVE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| RetrievalError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| RetrievalError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            corpus: CorpusConfig {
                data_dir: PathBuf::from("./data"),
                manifest_name: "corpus_manifest.json".to_string(),
            },
            retrieval: RetrievalConfig {
                lexical_top_k: 3,
                dense_top_k: 5,
                similarity_threshold: 0.35,
            },
            embedding: EmbeddingConfig {
                api_url: "https://api.openai.com/v1/embeddings".to_string(),
                api_key: None,
                model: "text-embedding-3-small".to_string(),
                dimension: 1536,
            },
            metadata: MetadataConfig {
                openalex_base_url: "https://api.openalex.org".to_string(),
                crossref_base_url: "https://api.crossref.org".to_string(),
                mailto: None,
                request_delay_ms: 110,
            },
            liveness: LivenessConfig {
                workers: 8,
                timeout_secs: 5,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.retrieval.lexical_top_k == 0 {
            return Err(RetrievalError::Config(
                "lexical_top_k must be greater than 0".to_string(),
            ));
        }

        if self.retrieval.dense_top_k == 0 {
            return Err(RetrievalError::Config(
                "dense_top_k must be greater than 0".to_string(),
            ));
        }

        if !(-1.0..=1.0).contains(&self.retrieval.similarity_threshold) {
            return Err(RetrievalError::Config(format!(
                "similarity_threshold must be within [-1, 1], got {}",
                self.retrieval.similarity_threshold
            )));
        }

        if self.embedding.dimension == 0 {
            return Err(RetrievalError::Config(
                "embedding dimension must be greater than 0".to_string(),
            ));
        }

        if self.liveness.workers == 0 {
            return Err(RetrievalError::Config(
                "liveness workers must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let mut config = Config::default_config();
        config.retrieval.lexical_top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let mut config = Config::default_config();
        config.retrieval.similarity_threshold = 1.5;
        assert!(config.validate().is_err());
    }
}
