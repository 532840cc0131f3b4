//! Embedding generation for the vector records.

mod hashing;
mod openai;

pub use hashing::HashingEmbedder;
pub use openai::OpenAIEmbedder;

use crate::config::{EmbeddingProvider, EmbeddingSettings};
use crate::error::{JamieError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

/// Allowed deviation of an embedding's L2 norm from 1.0.
pub const UNIT_NORM_TOLERANCE: f32 = 1e-4;

/// Trait for embedding generation.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embeddings for multiple texts, one per text, in order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimensions.
    fn dimensions(&self) -> usize;

    /// Model identifier, for logs and reports.
    fn model(&self) -> &str;
}

/// Create the embedder selected by the settings.
pub fn create_embedder(settings: &EmbeddingSettings) -> Result<Arc<dyn Embedder>> {
    let dimensions = settings.dimensions as usize;
    let embedder: Arc<dyn Embedder> = match settings.provider {
        EmbeddingProvider::OpenAI => Arc::new(
            OpenAIEmbedder::with_config(&settings.model, dimensions)?
                .with_batch_size(settings.batch_size),
        ),
        EmbeddingProvider::Hashing => Arc::new(HashingEmbedder::new(dimensions)),
    };
    Ok(embedder)
}

/// Embed every text in one batch call and enforce the batch contract.
///
/// The result has one vector per text, every vector has the embedder's
/// dimensions and unit L2 norm. Any violation fails the whole batch.
#[instrument(skip_all, fields(model = embedder.model(), count = texts.len()))]
pub async fn embed_all(embedder: &dyn Embedder, texts: &[String]) -> Result<Vec<Vec<f32>>> {
    if texts.is_empty() {
        return Ok(Vec::new());
    }

    let mut embeddings = embedder.embed_batch(texts).await?;

    if embeddings.len() != texts.len() {
        return Err(JamieError::Embedding(format!(
            "expected {} embeddings, got {}",
            texts.len(),
            embeddings.len()
        )));
    }

    let dimensions = embedder.dimensions();
    for (i, embedding) in embeddings.iter_mut().enumerate() {
        if embedding.len() != dimensions {
            return Err(JamieError::Embedding(format!(
                "embedding {} has {} dimensions, expected {}",
                i,
                embedding.len(),
                dimensions
            )));
        }
        if !l2_normalize(embedding) {
            return Err(JamieError::Embedding(format!(
                "embedding {} is a zero or non-finite vector",
                i
            )));
        }
    }

    info!("Embedded {} texts ({} dimensions)", embeddings.len(), dimensions);
    Ok(embeddings)
}

/// L2 norm of a vector.
pub fn l2_norm(vector: &[f32]) -> f32 {
    vector.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Scale `vector` to unit length in place.
///
/// Returns false, leaving the vector untouched, when its norm is zero or not finite.
pub fn l2_normalize(vector: &mut [f32]) -> bool {
    let norm = l2_norm(vector);
    if norm == 0.0 || !norm.is_finite() {
        return false;
    }
    for value in vector.iter_mut() {
        *value /= norm;
    }
    true
}

/// Whether `vector` has unit norm within [`UNIT_NORM_TOLERANCE`].
pub fn is_unit_norm(vector: &[f32]) -> bool {
    (l2_norm(vector) - 1.0).abs() <= UNIT_NORM_TOLERANCE
}
