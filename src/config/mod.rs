//! Configuration module for Jamie.
//!
//! Handles loading and validating application settings.

mod settings;

pub use settings::{
    CorpusSettings, EmbeddingProvider, EmbeddingSettings, GeneralSettings, OutputSettings,
    Settings,
};
