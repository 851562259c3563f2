//! Pre-flight checks before operations that call the OpenAI API.
//!
//! Every command except `config` embeds the corpus or a query, so a missing
//! API key should fail up front instead of midway through index construction.

use crate::error::{Result, SvarError};

/// Verify that an OpenAI API key is configured.
pub fn check_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Ok(()),
        _ => Err(SvarError::Config(
            "OPENAI_API_KEY is not set. Export it before running commands that call the OpenAI API."
                .to_string(),
        )),
    }
}
