//! Jamie - transcript search artifact builder
//!
//! Converts a directory of timestamped podcast transcripts into the two static
//! files read by the "Pull that up, Jamie!" search client.
//!
//! # Overview
//!
//! A build:
//! - Scans the input directory for transcripts, sorted by file name
//! - Groups every run of consecutive captions into a fixed-size chunk
//! - Indexes the normalized words of every chunk (the boolean index)
//! - Embeds every chunk in one batch (the vector records)
//! - Writes both artifacts, or neither
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `transcript` - Transcript files, headers, captions and timestamps
//! - `video_id` - YouTube id extraction from source URLs
//! - `chunking` - Caption chunking and chunk id assignment
//! - `index` - Text normalization and the boolean index
//! - `embedding` - Embedding generation
//! - `artifact` - Artifact serialization, loading and verification
//! - `pipeline` - Build coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use jamie::config::Settings;
//! use jamie::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(settings)?;
//!
//!     let report = pipeline.build().await?;
//!     println!("Indexed {} chunks from {} files", report.chunks, report.files);
//!
//!     Ok(())
//! }
//! ```

pub mod artifact;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod index;
pub mod openai;
pub mod pipeline;
pub mod transcript;
pub mod video_id;

pub use error::{JamieError, Result};
