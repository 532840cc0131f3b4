//! Transcript chunking.
//!
//! Chunking runs per file and produces [`ChunkDraft`]s without ids. Ids are
//! handed out by [`assign_ids`] in file sort order, so they do not depend on
//! the order in which files finished loading.

mod caption;

pub use caption::CaptionChunker;

use crate::transcript::format_timestamp;
use serde::{Deserialize, Serialize};

/// The unit of retrieval shared by both artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Corpus-wide id; equals the chunk's position in the vector records.
    pub id: u32,
    /// Title of the source video.
    pub video_title: String,
    /// YouTube id of the source video, empty when unknown.
    pub video_id: String,
    /// Offset of the first caption in whole seconds.
    pub start_time: u32,
    /// Space-joined caption texts, original casing and punctuation.
    pub text: String,
}

impl Chunk {
    /// Format the start offset as `HH:MM:SS`.
    pub fn format_timestamp(&self) -> String {
        format_timestamp(self.start_time)
    }
}

/// A chunk before its corpus-wide id is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkDraft {
    pub start_time: u32,
    pub text: String,
}

/// Chunking result for one transcript file.
#[derive(Debug, Clone)]
pub struct ChunkedTranscript {
    /// File name of the transcript.
    pub name: String,
    pub video_title: String,
    pub video_id: String,
    /// Full chunks in file order.
    pub drafts: Vec<ChunkDraft>,
    /// Captions left over after the last full chunk.
    pub dropped_captions: usize,
}

/// Configuration for chunking.
#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    /// Captions per chunk.
    pub chunk_size: usize,
    /// Title used when a transcript header has none.
    pub fallback_title: String,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 3,
            fallback_title: "Joe Rogan Experience".to_string(),
        }
    }
}

/// Number chunks from 0 in transcript order, then draft order.
pub fn assign_ids(transcripts: &[ChunkedTranscript]) -> Vec<Chunk> {
    transcripts
        .iter()
        .flat_map(|t| t.drafts.iter().map(move |draft| (t, draft)))
        .zip(0u32..)
        .map(|((t, draft), id)| Chunk {
            id,
            video_title: t.video_title.clone(),
            video_id: t.video_id.clone(),
            start_time: draft.start_time,
            text: draft.text.clone(),
        })
        .collect()
}
