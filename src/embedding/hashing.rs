//! Offline feature-hashing embedder.
//!
//! Projects the normalized tokens of a text into a fixed number of buckets
//! with a sign bit taken from the same hash. Deterministic, needs no network,
//! and captures lexical overlap only.

use super::{l2_normalize, Embedder};
use crate::error::Result;
use crate::index::tokenize;
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Feature-hashing embedder.
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        for token in tokenize(text) {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let hash = hasher.finish();

            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        // Texts without tokens (or whose tokens cancel out) map to the first axis.
        if !l2_normalize(&mut vector) {
            vector.iter_mut().for_each(|v| *v = 0.0);
            vector[0] = 1.0;
        }

        vector
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model(&self) -> &str {
        "feature-hashing"
    }
}
