//! Pre-flight checks before expensive operations.
//!
//! Validates that required credentials are available before starting
//! operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::Result;
use crate::openai::api_key_from_env;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Fetching a transcript needs nothing but network access.
    Fetch,
    /// Serving and suggesting need both the embedding and completion credentials.
    Suggest,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Fetch => {}
        Operation::Suggest => {
            api_key_from_env(&settings.embedding.api_key_env)?;
            if settings.completion.api_key_env != settings.embedding.api_key_env {
                api_key_from_env(&settings.completion.api_key_env)?;
            }
        }
    }
    Ok(())
}
