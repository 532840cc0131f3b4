//! Inspect command implementation.

use crate::cli::{CorpusArgs, Output};
use crate::config::{EmbeddingProvider, Settings};
use crate::pipeline::Pipeline;
use anyhow::Result;

/// Run the inspect command.
pub async fn run_inspect(corpus: &CorpusArgs, mut settings: Settings) -> Result<()> {
    corpus.apply(&mut settings);
    // Inspect never embeds; avoid building a remote client.
    settings.embedding.provider = EmbeddingProvider::Hashing;

    let pipeline = Pipeline::new(settings)?;
    let paths = pipeline.discover()?;

    if paths.is_empty() {
        Output::info(&format!(
            "No transcripts found in {}",
            pipeline.settings().input_dir().display()
        ));
        return Ok(());
    }

    let spinner = Output::spinner(&format!("Chunking {} transcripts...", paths.len()));
    let corpus = pipeline.chunk_corpus(&paths).await;
    spinner.finish_and_clear();
    let corpus = corpus?;

    Output::header(&format!("Transcripts ({})", corpus.transcripts.len()));
    println!();

    for transcript in &corpus.transcripts {
        Output::transcript_info(
            &transcript.name,
            &transcript.video_title,
            &transcript.video_id,
            transcript.drafts.len(),
            transcript.dropped_captions,
        );
    }

    let missing_ids = corpus
        .transcripts
        .iter()
        .filter(|t| t.video_id.is_empty())
        .count();

    println!();
    Output::kv("Chunk size", &pipeline.settings().corpus.chunk_size.to_string());
    Output::kv("Total chunks", &corpus.chunks.len().to_string());
    Output::kv("Distinct tokens", &corpus.index.len().to_string());
    Output::kv("Dropped captions", &corpus.dropped_captions().to_string());
    if let Some(latest) = corpus.chunks.iter().max_by_key(|c| c.start_time) {
        Output::kv(
            "Latest chunk",
            &format!("{} in {}", latest.format_timestamp(), latest.video_title),
        );
    }
    if missing_ids > 0 {
        Output::warning(&format!("{} transcript(s) have no video id", missing_ids));
    }

    Ok(())
}
