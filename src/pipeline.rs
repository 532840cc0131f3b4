//! Build pipeline for Jamie.
//!
//! Coordinates discovery, chunking, indexing, embedding and artifact writing.
//! Every stage runs to completion before the next starts, and nothing is
//! written unless all earlier stages succeeded.

use crate::artifact::{ArtifactPaths, ArtifactSet};
use crate::chunking::{assign_ids, CaptionChunker, Chunk, ChunkedTranscript, ChunkingConfig};
use crate::config::Settings;
use crate::embedding::{create_embedder, embed_all, Embedder};
use crate::error::{JamieError, Result};
use crate::index::BooleanIndex;
use crate::transcript::TranscriptFile;
use futures::{StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// The build pipeline.
pub struct Pipeline {
    settings: Settings,
    embedder: Arc<dyn Embedder>,
}

/// Chunks and boolean index of a whole corpus, before embedding.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Per-file chunking results in file sort order.
    pub transcripts: Vec<ChunkedTranscript>,
    /// All chunks, ids contiguous from 0.
    pub chunks: Vec<Chunk>,
    pub index: BooleanIndex,
}

impl Corpus {
    /// Chunk texts in id order.
    pub fn texts(&self) -> Vec<String> {
        self.chunks.iter().map(|c| c.text.clone()).collect()
    }

    /// Captions discarded because they did not fill a final chunk.
    pub fn dropped_captions(&self) -> usize {
        self.transcripts.iter().map(|t| t.dropped_captions).sum()
    }
}

/// Result of a completed build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Number of transcript files read.
    pub files: usize,
    /// Number of chunks written.
    pub chunks: usize,
    /// Number of distinct index tokens.
    pub tokens: usize,
    /// Embedding dimensions.
    pub dimensions: usize,
    /// Captions discarded at the end of files.
    pub dropped_captions: usize,
    /// Where the artifacts were written.
    pub paths: ArtifactPaths,
}

impl Pipeline {
    /// Create a pipeline with the embedder selected by the settings.
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let embedder = create_embedder(&settings.embedding)?;
        Ok(Self { settings, embedder })
    }

    /// Create a pipeline with a custom embedder.
    pub fn with_embedder(settings: Settings, embedder: Arc<dyn Embedder>) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings, embedder })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn embedder(&self) -> Arc<dyn Embedder> {
        self.embedder.clone()
    }

    /// Output locations from the settings.
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(
            self.settings.boolean_index_path(),
            self.settings.vector_data_path(),
        )
    }

    /// Transcript files in the input directory, sorted by file name.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        discover_transcripts(&self.settings.input_dir(), &self.settings.corpus.extension)
    }

    /// Read, chunk and index the given transcript files.
    ///
    /// Files are read concurrently but consumed in the order given, so chunk
    /// ids follow `paths` regardless of which read finishes first.
    #[instrument(skip(self, paths), fields(files = paths.len()))]
    pub async fn chunk_corpus(&self, paths: &[PathBuf]) -> Result<Corpus> {
        let chunker = CaptionChunker::new(ChunkingConfig {
            chunk_size: self.settings.corpus.chunk_size,
            fallback_title: self.settings.corpus.fallback_title.clone(),
        });

        let transcripts: Vec<ChunkedTranscript> = futures::stream::iter(paths.iter().cloned())
            .map(read_transcript)
            .buffered(self.settings.corpus.max_concurrent_reads.max(1))
            .map_ok(|file| chunker.chunk(&file))
            .try_collect()
            .await?;

        let chunks = assign_ids(&transcripts);
        let index = BooleanIndex::from_chunks(&chunks);

        for transcript in &transcripts {
            debug!(
                "{}: {} chunks, {} trailing captions dropped",
                transcript.name,
                transcript.drafts.len(),
                transcript.dropped_captions
            );
        }
        info!(
            "Chunked {} files into {} chunks ({} tokens)",
            transcripts.len(),
            chunks.len(),
            index.len()
        );

        Ok(Corpus {
            transcripts,
            chunks,
            index,
        })
    }

    /// Embed every chunk text in one batch.
    pub async fn embed(&self, corpus: &Corpus) -> Result<Vec<Vec<f32>>> {
        embed_all(self.embedder.as_ref(), &corpus.texts()).await
    }

    /// Pair chunks with embeddings and write both artifacts.
    pub fn write(&self, corpus: Corpus, embeddings: Vec<Vec<f32>>) -> Result<ArtifactSet> {
        let set = ArtifactSet::new(corpus.index, corpus.chunks, embeddings)?;
        set.write(&self.artifact_paths(), self.settings.output.pretty)?;
        Ok(set)
    }

    /// Run the full build.
    #[instrument(skip(self))]
    pub async fn build(&self) -> Result<BuildReport> {
        let paths = self.discover()?;
        if paths.is_empty() {
            warn!(
                "No .{} transcripts in {}",
                self.settings.corpus.extension,
                self.settings.input_dir().display()
            );
        }

        let corpus = self.chunk_corpus(&paths).await?;
        let files = corpus.transcripts.len();
        let dropped_captions = corpus.dropped_captions();

        let embeddings = self.embed(&corpus).await?;
        let set = self.write(corpus, embeddings)?;

        Ok(BuildReport {
            files,
            chunks: set.records.len(),
            tokens: set.index.len(),
            dimensions: self.embedder.dimensions(),
            dropped_captions,
            paths: self.artifact_paths(),
        })
    }
}

/// List files in `dir` whose name ends in `.{extension}`, sorted by file name.
pub fn discover_transcripts(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let discovery_error = |source: std::io::Error| JamieError::Discovery {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(discovery_error)? {
        let entry = entry.map_err(discovery_error)?;
        let path = entry.path();
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(&suffix));
        if matches && path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("Discovered {} transcripts in {}", files.len(), dir.display());
    Ok(files)
}

async fn read_transcript(path: PathBuf) -> Result<TranscriptFile> {
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => Ok(TranscriptFile::new(path, content)),
        Err(source) => Err(JamieError::ReadTranscript { path, source }),
    }
}
