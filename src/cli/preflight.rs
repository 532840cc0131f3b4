//! Pre-flight checks before expensive operations.
//!
//! Validates configuration and credentials before a build starts, so a run
//! does not read and chunk the whole corpus only to fail at the embedding call.

use crate::config::{EmbeddingProvider, Settings};
use crate::error::{JamieError, Result};
use crate::openai::is_api_key_configured;

/// Run pre-flight checks for a build with the given settings.
pub fn check_build(settings: &Settings) -> Result<()> {
    settings.validate()?;

    let input_dir = settings.input_dir();
    if !input_dir.is_dir() {
        return Err(JamieError::Config(format!(
            "Input directory {} does not exist",
            input_dir.display()
        )));
    }

    match settings.embedding.provider {
        EmbeddingProvider::OpenAI => check_api_key(),
        EmbeddingProvider::Hashing => Ok(()),
    }
}

/// Check if OpenAI API key is configured.
fn check_api_key() -> Result<()> {
    if is_api_key_configured() {
        Ok(())
    } else {
        Err(JamieError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...' \
             or use --provider hashing for an offline build"
                .to_string(),
        ))
    }
}
