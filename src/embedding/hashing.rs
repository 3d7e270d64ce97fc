// file: src/embedding/hashing.rs
// description: deterministic token-hashing embedder for offline use and tests
// reference: feature hashing ("hashing trick") over tokenized text

use crate::error::{Result, RetrievalError};
use crate::retrieval::tokenize;
use async_trait::async_trait;
use std::hash::{DefaultHasher, Hash, Hasher};
use tracing::warn;

use super::EmbeddingProvider;

/// Feature-hashing embedder: each token increments one vector bucket chosen
/// by its hash. Texts sharing tokens get correlated vectors, which is enough
/// cosine signal for offline runs and deterministic tests. Not a substitute
/// for a learned model.
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn bucket(&self, token: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        (hasher.finish() % self.dimension as u64) as usize
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        for token in tokenize(text) {
            vector[self.bucket(&token)] += 1.0;
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(RetrievalError::Embedding(
                "cannot embed empty text".to_string(),
            ));
        }

        let vector = self.vectorize(text);
        if vector.iter().all(|&x| x == 0.0) {
            // Stop-word-only input hashes to nothing; the vector is returned
            // as-is and excluded later at similarity time.
            warn!("text produced an all-zero hashed vector");
        }
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::cosine_similarity;
    use tokio_test::block_on;

    #[test]
    fn test_deterministic() {
        let embedder = HashingEmbedder::new(128);
        let a = block_on(embedder.embed("quantum computing qubits")).unwrap();
        let b = block_on(embedder.embed("quantum computing qubits")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_dimension() {
        let embedder = HashingEmbedder::new(64);
        let v = block_on(embedder.embed("some text here")).unwrap();
        assert_eq!(v.len(), 64);
        assert_eq!(embedder.dimension(), 64);
    }

    #[test]
    fn test_overlapping_text_is_more_similar() {
        let embedder = HashingEmbedder::new(512);
        let query = block_on(embedder.embed("cats dogs feline")).unwrap();
        let near = block_on(embedder.embed("cats and dogs")).unwrap();
        let far = block_on(embedder.embed("superconducting qubit hardware")).unwrap();

        let sim_near = cosine_similarity(&query, &near).unwrap();
        let sim_far = cosine_similarity(&query, &far).unwrap_or(0.0);
        assert!(sim_near > sim_far);
    }

    #[test]
    fn test_empty_text_is_error() {
        let embedder = HashingEmbedder::new(32);
        assert!(block_on(embedder.embed("   ")).is_err());
    }

    #[test]
    fn test_batch_preserves_order() {
        let embedder = HashingEmbedder::new(64);
        let texts = vec!["first text".to_string(), "second text".to_string()];
        let batch = block_on(embedder.embed_batch(&texts)).unwrap();
        let first = block_on(embedder.embed("first text")).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], first);
    }
}
