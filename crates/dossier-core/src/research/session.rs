use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::artifact::{Artifact, SourceList};
use crate::provider::{ChunkPayload, ResearchRequest, StreamChunk};

/// A chat message in the conversation thread.
///
/// Messages are immutable once appended; the list grows monotonically and is
/// never reordered.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(Role::Ai, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Ai,
    System,
}

/// State of the research session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Researching,
}

/// Errors returned when a submission is rejected. The session is unchanged
/// in both cases; callers treat them as a silent no-op.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("topic is empty")]
    EmptyTopic,

    #[error("a research stream is already active")]
    Busy,
}

/// The streaming-merge state machine.
///
/// Folds response chunks into the artifact buffer and the deduplicated
/// source list, and keeps the chat thread bookkeeping. All mutation happens
/// on the single control-flow path that consumes the stream; while
/// `Researching`, exactly one stream is active, enforced by [`submit`].
///
/// [`submit`]: ResearchSession::submit
#[derive(Debug, Default)]
pub struct ResearchSession {
    state: SessionState,
    messages: Vec<Message>,
    artifact: Artifact,
    sources: SourceList,
    current_topic: Option<String>,
    suppressed_chunks: u32,
}

impl ResearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_researching(&self) -> bool {
        self.state == SessionState::Researching
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn sources(&self) -> &SourceList {
        &self.sources
    }

    /// The topic of the stream currently being consumed, if any.
    pub fn current_topic(&self) -> Option<&str> {
        self.current_topic.as_deref()
    }

    /// Appends a system message outside the streaming flow (welcome text,
    /// hints).
    pub fn push_system(&mut self, content: impl Into<String>) {
        self.messages.push(Message::system(content));
    }

    /// Submits a topic and transitions to `Researching`.
    ///
    /// Only valid from `Idle` with a non-empty (post-trim) topic. On success
    /// the user message is recorded, a session separator is appended to a
    /// non-empty artifact, and the request for the stream consumer is
    /// returned with the prior artifact text as continuation context.
    pub fn submit(&mut self, topic: &str) -> Result<ResearchRequest, SubmitError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(SubmitError::EmptyTopic);
        }
        if self.state == SessionState::Researching {
            return Err(SubmitError::Busy);
        }

        // Snapshot before the separator: the continuation context is what
        // previous sessions actually produced.
        let prior_artifact = self.artifact.as_str().to_string();

        self.messages.push(Message::user(topic));
        self.artifact.begin_session();
        self.state = SessionState::Researching;
        self.current_topic = Some(topic.to_string());
        self.suppressed_chunks = 0;

        tracing::info!(topic, "research started");
        Ok(ResearchRequest::new(topic, prior_artifact))
    }

    /// Folds one chunk into the artifact and source list.
    ///
    /// Text appends in arrival order; a suppressed chunk contributes no text
    /// but does not halt the stream, and its citations still merge.
    pub fn on_chunk(&mut self, chunk: &StreamChunk) {
        if chunk.is_final {
            return;
        }

        match &chunk.payload {
            ChunkPayload::Text(text) => self.artifact.append(text),
            ChunkPayload::Suppressed => {
                self.suppressed_chunks += 1;
                tracing::debug!(
                    count = self.suppressed_chunks,
                    "chunk text withheld by content filter, skipped"
                );
            }
        }

        let added = self.sources.merge(chunk.citations.iter().cloned());
        if added > 0 {
            tracing::trace!(added, total = self.sources.len(), "merged grounding sources");
        }
    }

    /// Transitions back to `Idle` after a completed stream and appends a
    /// completion message summarizing the topic.
    pub fn on_stream_end(&mut self) {
        if self.state != SessionState::Researching {
            return;
        }

        let topic = self.current_topic.take().unwrap_or_default();
        self.state = SessionState::Idle;

        if self.suppressed_chunks > 0 {
            tracing::debug!(
                suppressed = self.suppressed_chunks,
                %topic,
                "stream finished with filtered chunks"
            );
        }

        self.messages.push(Message::ai(format!(
            "Completed research on \"{}\". The report draws on {} source{}.",
            topic,
            self.sources.len(),
            if self.sources.len() == 1 { "" } else { "s" },
        )));
        tracing::info!(%topic, sources = self.sources.len(), "research finished");
    }

    /// Transitions back to `Idle` after a failed stream.
    ///
    /// Content merged before the failure is retained, never rolled back; the
    /// failure surfaces as a single system message.
    pub fn on_stream_error(&mut self, error: &str) {
        if self.state != SessionState::Researching {
            return;
        }

        let topic = self.current_topic.take().unwrap_or_default();
        self.state = SessionState::Idle;

        self.messages.push(Message::system(format!(
            "Research failed: {error}. Partial results were kept in the document."
        )));
        tracing::warn!(%topic, error, "research stream failed");
    }
}
