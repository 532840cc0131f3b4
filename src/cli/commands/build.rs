//! Build command implementation.

use crate::cli::preflight;
use crate::cli::{CorpusArgs, Output};
use crate::config::{EmbeddingProvider, Settings};
use crate::error::JamieError;
use crate::pipeline::Pipeline;
use anyhow::Result;

/// Run the build command.
pub async fn run_build(
    corpus: &CorpusArgs,
    output_dir: Option<String>,
    model: Option<String>,
    provider: Option<EmbeddingProvider>,
    mut settings: Settings,
) -> Result<()> {
    corpus.apply(&mut settings);
    if let Some(dir) = output_dir {
        settings.output.output_dir = dir;
    }
    if let Some(model) = model {
        settings.embedding.model = model;
    }
    if let Some(provider) = provider {
        settings.embedding.provider = provider;
    }

    if let Err(e) = preflight::check_build(&settings) {
        return Err(fail(e));
    }

    let pipeline = Pipeline::new(settings).map_err(fail)?;
    let settings = pipeline.settings();

    Output::info(&format!("Scanning {}", settings.input_dir().display()));
    let paths = pipeline.discover().map_err(fail)?;
    if paths.is_empty() {
        Output::warning(&format!(
            "No .{} transcripts found; writing empty artifacts",
            settings.corpus.extension
        ));
    }

    let spinner = Output::spinner(&format!("Chunking {} transcripts...", paths.len()));
    let corpus = pipeline.chunk_corpus(&paths).await;
    spinner.finish_and_clear();
    let corpus = corpus.map_err(fail)?;
    Output::info(&format!(
        "Created {} chunks from {} transcripts ({} distinct tokens)",
        corpus.chunks.len(),
        corpus.transcripts.len(),
        corpus.index.len()
    ));

    let embedder = pipeline.embedder();
    let spinner = Output::spinner(&format!(
        "Generating embeddings for {} chunks ({}, {} dimensions)...",
        corpus.chunks.len(),
        embedder.model(),
        embedder.dimensions()
    ));
    let embeddings = pipeline.embed(&corpus).await;
    spinner.finish_and_clear();
    let embeddings = embeddings.map_err(fail)?;
    Output::info(&format!("Generated {} embeddings", embeddings.len()));

    let chunk_count = corpus.chunks.len();
    let token_count = corpus.index.len();
    pipeline.write(corpus, embeddings).map_err(fail)?;

    Output::success(&format!(
        "Wrote {} chunks ({} tokens) to {}",
        chunk_count,
        token_count,
        settings.output_dir().display()
    ));

    Ok(())
}

/// Report a fatal error with the stage it aborted.
fn fail(e: JamieError) -> anyhow::Error {
    Output::error(&format!("Build failed during {}: {}", e.stage(), e));
    if e.stage() != "writing" {
        Output::info("No artifacts were written.");
    }
    e.into()
}
