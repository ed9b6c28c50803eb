mod error;
mod gemini;

pub use error::ProviderError;
pub use gemini::GeminiClient;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::research::Citation;

/// One increment of a streamed research response.
///
/// A chunk optionally carries extracted text and a list of web sources the
/// provider used to ground the generated content.
#[derive(Debug, Clone)]
pub struct StreamChunk {
    /// The text outcome of this chunk.
    pub payload: ChunkPayload,
    /// Grounding sources attached to this chunk.
    pub citations: Vec<Citation>,
    /// Whether this is the final chunk.
    pub is_final: bool,
}

/// The text outcome of a single chunk.
///
/// Suppression is a recoverable per-chunk state, not an error: a chunk whose
/// text was withheld by content filtering contributes nothing to the
/// document, and the stream continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkPayload {
    /// Extracted text, appended to the artifact in arrival order.
    Text(String),
    /// Text unavailable for this chunk (content filtering).
    Suppressed,
}

impl StreamChunk {
    /// Create a new text chunk.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            payload: ChunkPayload::Text(text.into()),
            citations: Vec::new(),
            is_final: false,
        }
    }

    /// Create a chunk whose text was withheld.
    pub fn suppressed() -> Self {
        Self {
            payload: ChunkPayload::Suppressed,
            citations: Vec::new(),
            is_final: false,
        }
    }

    /// Create a final (end of stream) chunk.
    pub fn done() -> Self {
        Self {
            payload: ChunkPayload::Text(String::new()),
            citations: Vec::new(),
            is_final: true,
        }
    }

    /// Attach grounding sources to this chunk.
    pub fn with_citations(mut self, citations: Vec<Citation>) -> Self {
        self.citations = citations;
        self
    }
}

/// One research request: the topic plus the artifact content accumulated so
/// far, used as continuation context so the report extends rather than
/// repeats prior sessions.
#[derive(Debug, Clone)]
pub struct ResearchRequest {
    pub topic: String,
    pub prior_artifact: String,
}

impl ResearchRequest {
    pub fn new(topic: impl Into<String>, prior_artifact: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            prior_artifact: prior_artifact.into(),
        }
    }
}

/// Trait for generation providers that produce streamed research reports.
///
/// A provider opens one request and sends chunks through the channel as they
/// arrive. The sequence is lazy, finite, and non-restartable; the final chunk
/// has `is_final: true`. Returning `Err` means the stream failed as a whole;
/// chunks already sent remain valid and are retained downstream.
#[async_trait]
pub trait ResearchProvider: Send + Sync {
    async fn stream_research(
        &self,
        request: &ResearchRequest,
        tx: mpsc::UnboundedSender<StreamChunk>,
    ) -> Result<(), ProviderError>;
}

/// Blanket implementation for boxed trait objects.
#[async_trait]
impl ResearchProvider for Box<dyn ResearchProvider> {
    async fn stream_research(
        &self,
        request: &ResearchRequest,
        tx: mpsc::UnboundedSender<StreamChunk>,
    ) -> Result<(), ProviderError> {
        (**self).stream_research(request, tx).await
    }
}
