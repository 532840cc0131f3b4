//! CLI module for Jamie.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::config::{EmbeddingProvider, Settings};
use clap::{Args, Parser, Subcommand};

/// Jamie - transcript search artifact builder
///
/// Turns a directory of timestamped podcast transcripts into a boolean index
/// and a vector record set for the "Pull that up, Jamie!" search client.
#[derive(Parser, Debug)]
#[command(name = "jamie")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the boolean index and vector records from the transcripts
    Build {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Directory to write the artifacts to
        #[arg(short, long, env = "JAMIE_OUTPUT_DIR")]
        output_dir: Option<String>,

        /// Embedding model identifier
        #[arg(short, long, env = "JAMIE_MODEL")]
        model: Option<String>,

        /// Embedding provider (openai, hashing)
        #[arg(long)]
        provider: Option<EmbeddingProvider>,
    },

    /// Chunk the transcripts and list them without embedding
    Inspect {
        #[command(flatten)]
        corpus: CorpusArgs,
    },

    /// Check a written artifact pair for consistency
    Verify {
        /// Directory holding the artifacts
        #[arg(short, long, env = "JAMIE_OUTPUT_DIR")]
        output_dir: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

impl Cli {
    /// Log level from the `-v` count, or the configured level without it.
    pub fn log_level<'a>(&self, settings: &'a Settings) -> &'a str {
        match self.verbose {
            0 => &settings.general.log_level,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Options selecting and chunking the transcript corpus.
#[derive(Args, Debug, Clone, Default)]
pub struct CorpusArgs {
    /// Directory holding the transcript files
    #[arg(short, long, env = "JAMIE_INPUT_DIR")]
    pub input_dir: Option<String>,

    /// Captions per chunk
    #[arg(long, env = "JAMIE_CHUNK_SIZE")]
    pub chunk_size: Option<usize>,
}

impl CorpusArgs {
    /// Override corpus settings with any flags given.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(dir) = &self.input_dir {
            settings.corpus.input_dir = dir.clone();
        }
        if let Some(size) = self.chunk_size {
            settings.corpus.chunk_size = size;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
