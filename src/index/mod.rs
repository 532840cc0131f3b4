//! Boolean (term to chunk) inverted index.
//!
//! Keys are normalized tokens; each posting list holds chunk ids in the order
//! chunks were added. A token occurring several times in one chunk appends
//! that chunk's id once per occurrence, so posting lists are not deduplicated.

mod normalize;

pub use normalize::{normalize, tokenize};

use crate::chunking::Chunk;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulator for the boolean index of one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BooleanIndex {
    postings: BTreeMap<String, Vec<u32>>,
}

impl BooleanIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over `chunks` in slice order.
    pub fn from_chunks(chunks: &[Chunk]) -> Self {
        let mut index = Self::new();
        for chunk in chunks {
            index.add_chunk(chunk);
        }
        index
    }

    /// Append `chunk.id` to the posting list of every token in its text.
    pub fn add_chunk(&mut self, chunk: &Chunk) {
        for token in tokenize(&chunk.text) {
            self.postings.entry(token).or_default().push(chunk.id);
        }
    }

    /// Posting list for an already-normalized token.
    pub fn postings(&self, token: &str) -> Option<&[u32]> {
        self.postings.get(token).map(Vec::as_slice)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// All `(token, postings)` pairs in token order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.postings
            .iter()
            .map(|(token, ids)| (token.as_str(), ids.as_slice()))
    }
}
