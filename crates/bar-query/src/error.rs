//! Construction-time errors for query constructors.
//!
//! These abort startup; once a constructor is built, interpretation failures
//! at request time are expressed as `None` from `construct`, never as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConstructorError {
    /// LLM fallback requested without credentials.
    #[error("LLM fallback enabled but no API key provided (set LLM_API_KEY)")]
    MissingApiKey,

    #[error("invalid LLM endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
