//! Configuration settings for Jamie.

use crate::error::{JamieError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub corpus: CorpusSettings,
    pub embedding: EmbeddingSettings,
    pub output: OutputSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level used when neither `-v` nor `RUST_LOG` is given
    /// (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Transcript corpus settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusSettings {
    /// Directory holding the raw transcript files.
    pub input_dir: String,
    /// File extension selecting transcripts (without the dot).
    pub extension: String,
    /// Number of consecutive captions folded into one chunk.
    pub chunk_size: usize,
    /// Title used when a transcript has no header title line.
    pub fallback_title: String,
    /// Maximum number of transcript files read concurrently.
    pub max_concurrent_reads: usize,
}

impl Default for CorpusSettings {
    fn default() -> Self {
        Self {
            input_dir: "raw_data".to_string(),
            extension: "txt".to_string(),
            chunk_size: 3,
            fallback_title: "Joe Rogan Experience".to_string(),
            max_concurrent_reads: 8,
        }
    }
}

/// Embedding provider type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// OpenAI embeddings API.
    #[default]
    OpenAI,
    /// Offline feature-hashing embedder.
    Hashing,
}

impl std::str::FromStr for EmbeddingProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(EmbeddingProvider::OpenAI),
            "hashing" | "local" => Ok(EmbeddingProvider::Hashing),
            _ => Err(format!("Unknown embedding provider: {}", s)),
        }
    }
}

impl std::fmt::Display for EmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingProvider::OpenAI => write!(f, "openai"),
            EmbeddingProvider::Hashing => write!(f, "hashing"),
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding provider (openai, hashing).
    pub provider: EmbeddingProvider,
    /// Embedding model identifier.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
    /// Texts per request sent to the provider.
    pub batch_size: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::OpenAI,
            model: "text-embedding-3-small".to_string(),
            dimensions: 384,
            batch_size: 100,
        }
    }
}

/// Artifact output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory the artifact pair is written to.
    pub output_dir: String,
    /// File name of the boolean index.
    pub boolean_index_file: String,
    /// File name of the vector records.
    pub vector_data_file: String,
    /// Pretty-print the JSON artifacts.
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            output_dir: "public/data".to_string(),
            boolean_index_file: "boolean_index.json".to_string(),
            vector_data_file: "vector_data.json".to_string(),
            pretty: false,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jamie")
            .join("config.toml")
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.corpus.chunk_size == 0 {
            return Err(JamieError::Config("corpus.chunk_size must be positive".to_string()));
        }
        if self.corpus.extension.trim_start_matches('.').is_empty() {
            return Err(JamieError::Config("corpus.extension must not be empty".to_string()));
        }
        if self.embedding.dimensions == 0 {
            return Err(JamieError::Config("embedding.dimensions must be positive".to_string()));
        }
        if self.embedding.batch_size == 0 {
            return Err(JamieError::Config("embedding.batch_size must be positive".to_string()));
        }
        if self.embedding.model.trim().is_empty() {
            return Err(JamieError::Config("embedding.model must not be empty".to_string()));
        }
        Ok(())
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded transcript directory path.
    pub fn input_dir(&self) -> PathBuf {
        Self::expand_path(&self.corpus.input_dir)
    }

    /// Get the expanded artifact directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.output.output_dir)
    }

    /// Full path of the boolean index artifact.
    pub fn boolean_index_path(&self) -> PathBuf {
        self.output_dir().join(&self.output.boolean_index_file)
    }

    /// Full path of the vector records artifact.
    pub fn vector_data_path(&self) -> PathBuf {
        self.output_dir().join(&self.output.vector_data_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pipeline_constants() {
        let settings = Settings::default();
        assert_eq!(settings.corpus.chunk_size, 3);
        assert_eq!(settings.corpus.extension, "txt");
        assert_eq!(settings.output.boolean_index_file, "boolean_index.json");
        assert_eq!(settings.output.vector_data_file, "vector_data.json");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [corpus]
            chunk_size = 5

            [embedding]
            provider = "hashing"
            "#,
        )
        .unwrap();

        assert_eq!(settings.corpus.chunk_size, 5);
        assert_eq!(settings.corpus.input_dir, "raw_data");
        assert_eq!(settings.embedding.provider, EmbeddingProvider::Hashing);
        assert_eq!(settings.embedding.batch_size, 100);
    }

    #[test]
    fn test_validate_rejects_zero_chunk_size() {
        let mut settings = Settings::default();
        settings.corpus.chunk_size = 0;
        assert!(matches!(settings.validate(), Err(JamieError::Config(_))));
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let path = PathBuf::from("/nonexistent/jamie/config.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.output.output_dir, "public/data");
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("OpenAI".parse::<EmbeddingProvider>().unwrap(), EmbeddingProvider::OpenAI);
        assert_eq!("local".parse::<EmbeddingProvider>().unwrap(), EmbeddingProvider::Hashing);
        assert!("bert".parse::<EmbeddingProvider>().is_err());
    }
}
