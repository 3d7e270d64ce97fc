// file: src/embedding/mod.rs
// description: embedding provider abstraction and implementations
// reference: injected embed(text) -> vector capability

pub mod hashing;
pub mod http;

use crate::error::Result;
use async_trait::async_trait;

pub use hashing::HashingEmbedder;
pub use http::HttpEmbeddingClient;

/// Text embedding capability consumed by the dense retriever.
///
/// The retrieval layer treats `embed` as a pure function: identical input must
/// produce an identical vector within a session. How the vector is produced
/// (remote API, local model, hashing) is the provider's concern.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text into a fixed-length vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed several texts, preserving input order.
    ///
    /// The default simply loops; API-backed providers may override with a
    /// batched request.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// Length of the vectors this provider produces.
    fn dimension(&self) -> usize;
}
