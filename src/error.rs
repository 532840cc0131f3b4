//! Error types for Jamie.

use std::path::PathBuf;
use thiserror::Error;

/// Library-level error type for Jamie operations.
#[derive(Error, Debug)]
pub enum JamieError {
    #[error("Invalid timestamp: {0}")]
    Timestamp(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Failed to list transcripts in {path}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read transcript {path}: {source}")]
    ReadTranscript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write artifact {path}: {source}")]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read artifact {path}: {source}")]
    ReadArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {path}: {source}")]
    ParseArtifact {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Vector record at position {position} carries chunk id {id}")]
    Alignment { position: usize, id: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl JamieError {
    /// Name of the pipeline stage this error aborts.
    pub fn stage(&self) -> &'static str {
        match self {
            JamieError::Config(_) | JamieError::TomlParse(_) => "configuration",
            JamieError::Discovery { .. } => "discovery",
            JamieError::ReadTranscript { .. } | JamieError::Timestamp(_) => "chunking",
            JamieError::Embedding(_) | JamieError::OpenAI(_) | JamieError::Http(_) => "embedding",
            JamieError::WriteArtifact { .. } | JamieError::Alignment { .. } | JamieError::Json(_) => {
                "writing"
            }
            JamieError::ReadArtifact { .. } | JamieError::ParseArtifact { .. } => "loading",
            JamieError::Io(_) => "io",
        }
    }
}

/// Result type alias for Jamie operations.
pub type Result<T> = std::result::Result<T, JamieError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(JamieError::Embedding("boom".into()).stage(), "embedding");
        assert_eq!(JamieError::Alignment { position: 1, id: 2 }.stage(), "writing");

        let err = JamieError::ReadTranscript {
            path: PathBuf::from("a.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.stage(), "chunking");
        assert!(err.to_string().contains("a.txt"));
    }
}
