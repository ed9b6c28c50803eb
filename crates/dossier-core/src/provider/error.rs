use thiserror::Error;

/// Errors that can occur while talking to the generation provider.
///
/// These are stream-level failures: either the request could not be
/// established, or the stream terminated abnormally. A single chunk whose
/// text was withheld is not an error; see
/// [`ChunkPayload::Suppressed`](super::ChunkPayload).
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Missing API key. Set GEMINI_API_KEY or add one to dossier.toml.")]
    MissingApiKey,

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Rate limited. Try again later.")]
    RateLimited,

    #[error("Request blocked by the provider: {0}")]
    Blocked(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Network(err.to_string())
    }
}
