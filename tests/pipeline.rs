use async_trait::async_trait;
use jamie::artifact::{ArtifactPaths, ArtifactSet};
use jamie::config::{EmbeddingProvider, Settings};
use jamie::embedding::{Embedder, HashingEmbedder, UNIT_NORM_TOLERANCE};
use jamie::index::tokenize;
use jamie::pipeline::Pipeline;
use jamie::{JamieError, Result};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const EPISODE_ONE: &str = "WEBVTT\n\
#Joe Rogan Experience #1 - First Guest\n\
#https://www.youtube.com/watch?v=first111\n\
\n\
00:00:01.000 Hello there, Jamie!\n\
00:00:04.500 Pull that up.\n\
00:00:09.250 The chimps are wild\n\
00:01:10.000 DMT is something else\n\
00:01:15.000 it's entirely crazy\n\
00:01:20.000 tell me more\n\
00:01:25.000 this caption is dropped\n";

const EPISODE_TWO: &str = "WEBVTT\n\
#\n\
#https://youtu.be/second22\n\
01:00:00.000 elk hunting season\n\
01:00:05.000 bow and arrow\n\
01:00:10.000 Hello again\n";

struct Corpus {
    input: TempDir,
    output: TempDir,
}

impl Corpus {
    fn new() -> Self {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("001.txt"), EPISODE_ONE).unwrap();
        std::fs::write(input.path().join("002.txt"), EPISODE_TWO).unwrap();
        std::fs::write(input.path().join("notes.md"), "00:00:01.000 ignored\n").unwrap();
        Self { input, output }
    }

    fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        settings.corpus.input_dir = self.input.path().display().to_string();
        settings.output.output_dir = self.output.path().display().to_string();
        settings.embedding.provider = EmbeddingProvider::Hashing;
        settings.embedding.dimensions = 32;
        settings
    }

    fn paths(&self) -> ArtifactPaths {
        ArtifactPaths::in_dir(self.output.path())
    }
}

fn artifact_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(JamieError::Embedding("model unavailable".to_string()))
    }

    fn dimensions(&self) -> usize {
        4
    }

    fn model(&self) -> &str {
        "failing"
    }
}

struct ShortEmbedder;

#[async_trait]
impl Embedder for ShortEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().skip(1).map(|_| vec![1.0, 0.0]).collect())
    }

    fn dimensions(&self) -> usize {
        2
    }

    fn model(&self) -> &str {
        "short"
    }
}

#[tokio::test]
async fn test_build_writes_consistent_artifacts() {
    let corpus = Corpus::new();
    let pipeline = Pipeline::new(corpus.settings()).unwrap();

    let report = pipeline.build().await.unwrap();
    assert_eq!(report.files, 2);
    assert_eq!(report.chunks, 3);
    assert_eq!(report.dimensions, 32);
    assert_eq!(report.dropped_captions, 1);

    let set = ArtifactSet::load(&corpus.paths()).unwrap();
    assert!(set.verify().is_ok());

    let infos: Vec<_> = set.records.iter().map(|r| &r.info).collect();
    assert_eq!(infos.len(), 3);

    assert_eq!(infos[0].id, 0);
    assert_eq!(infos[0].video_title, "Joe Rogan Experience #1 - First Guest");
    assert_eq!(infos[0].video_id, "first111");
    assert_eq!(infos[0].start_time, 1);
    assert_eq!(infos[0].text, "Hello there, Jamie! Pull that up. The chimps are wild");

    assert_eq!(infos[1].id, 1);
    assert_eq!(infos[1].start_time, 70);
    assert_eq!(infos[1].text, "DMT is something else it's entirely crazy tell me more");

    assert_eq!(infos[2].id, 2);
    assert_eq!(infos[2].video_title, "Joe Rogan Experience");
    assert_eq!(infos[2].video_id, "second22");
    assert_eq!(infos[2].start_time, 3600);

    for record in &set.records {
        assert_eq!(record.embedding.len(), 32);
        let norm = record.embedding.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() <= UNIT_NORM_TOLERANCE);
    }
}

#[tokio::test]
async fn test_index_matches_chunk_tokens() {
    let corpus = Corpus::new();
    let pipeline = Pipeline::new(corpus.settings()).unwrap();
    pipeline.build().await.unwrap();

    let set = ArtifactSet::load(&corpus.paths()).unwrap();

    // Every token of every chunk points back at that chunk.
    for record in &set.records {
        for token in tokenize(&record.info.text) {
            let ids = set.index.postings(&token).unwrap();
            assert!(ids.contains(&record.info.id), "{} missing {}", token, record.info.id);
        }
    }

    // And no posting points at a chunk lacking the token.
    for (token, ids) in set.index.iter() {
        for id in ids {
            let text = &set.records[*id as usize].info.text;
            assert!(tokenize(text).iter().any(|t| t == token));
        }
    }

    assert_eq!(set.index.postings("hello"), Some(&[0, 2][..]));
    assert_eq!(set.index.postings("jamie"), Some(&[0][..]));
    assert_eq!(set.index.postings("its"), Some(&[1][..]));
    assert!(set.index.postings("dropped").is_none());
}

#[tokio::test]
async fn test_rebuild_is_stable() {
    let corpus = Corpus::new();
    let pipeline = Pipeline::new(corpus.settings()).unwrap();

    pipeline.build().await.unwrap();
    let first = std::fs::read(&corpus.paths().boolean_index).unwrap();
    let first_records = ArtifactSet::load(&corpus.paths()).unwrap().records;

    pipeline.build().await.unwrap();
    let second = std::fs::read(&corpus.paths().boolean_index).unwrap();
    let second_records = ArtifactSet::load(&corpus.paths()).unwrap().records;

    assert_eq!(first, second);
    assert_eq!(first_records, second_records);
    assert_eq!(
        artifact_files(corpus.output.path()),
        ["boolean_index.json", "vector_data.json"]
    );
}

#[tokio::test]
async fn test_embedding_failure_writes_nothing() {
    let corpus = Corpus::new();
    let pipeline = Pipeline::with_embedder(corpus.settings(), Arc::new(FailingEmbedder)).unwrap();

    let err = pipeline.build().await.unwrap_err();
    assert_eq!(err.stage(), "embedding");
    assert!(artifact_files(corpus.output.path()).is_empty());
}

#[tokio::test]
async fn test_embedding_count_mismatch_fails() {
    let corpus = Corpus::new();
    let pipeline = Pipeline::with_embedder(corpus.settings(), Arc::new(ShortEmbedder)).unwrap();

    let err = pipeline.build().await.unwrap_err();
    assert!(matches!(err, JamieError::Embedding(_)));
    assert!(artifact_files(corpus.output.path()).is_empty());
}

#[tokio::test]
async fn test_empty_corpus_writes_empty_artifacts() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let mut settings = Settings::default();
    settings.corpus.input_dir = input.path().display().to_string();
    settings.output.output_dir = output.path().display().to_string();

    let pipeline = Pipeline::with_embedder(settings, Arc::new(HashingEmbedder::new(8))).unwrap();
    let report = pipeline.build().await.unwrap();
    assert_eq!(report.chunks, 0);

    let set = ArtifactSet::load(&ArtifactPaths::in_dir(output.path())).unwrap();
    assert!(set.records.is_empty());
    assert!(set.index.is_empty());
}

#[tokio::test]
async fn test_chunk_size_changes_grouping() {
    let corpus = Corpus::new();
    let mut settings = corpus.settings();
    settings.corpus.chunk_size = 2;

    let pipeline = Pipeline::new(settings).unwrap();
    let report = pipeline.build().await.unwrap();
    assert_eq!(report.chunks, 4);
    assert_eq!(report.dropped_captions, 2);

    let set = ArtifactSet::load(&corpus.paths()).unwrap();
    let starts: BTreeSet<u32> = set.records.iter().map(|r| r.info.start_time).collect();
    assert_eq!(starts, BTreeSet::from([1, 9, 75, 3600]));
}
