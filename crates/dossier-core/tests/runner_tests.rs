use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use dossier_core::{
    run_research, Citation, ProviderError, ResearchProvider, ResearchRequest, ResearchSession,
    Role, SessionState, StreamChunk, SubmitError,
};

/// Provider that replays a fixed chunk script, optionally failing at the end.
struct ScriptedProvider {
    chunks: Vec<StreamChunk>,
    fail_with: Option<String>,
    last_request: Mutex<Option<ResearchRequest>>,
}

impl ScriptedProvider {
    fn succeeding(chunks: Vec<StreamChunk>) -> Self {
        Self {
            chunks,
            fail_with: None,
            last_request: Mutex::new(None),
        }
    }

    fn failing(chunks: Vec<StreamChunk>, error: &str) -> Self {
        Self {
            chunks,
            fail_with: Some(error.to_string()),
            last_request: Mutex::new(None),
        }
    }
}

#[async_trait]
impl ResearchProvider for ScriptedProvider {
    async fn stream_research(
        &self,
        request: &ResearchRequest,
        tx: mpsc::UnboundedSender<StreamChunk>,
    ) -> Result<(), ProviderError> {
        *self.last_request.lock().unwrap() = Some(request.clone());

        for chunk in &self.chunks {
            let _ = tx.send(chunk.clone());
        }

        match &self.fail_with {
            Some(message) => Err(ProviderError::Network(message.clone())),
            None => {
                let _ = tx.send(StreamChunk::done());
                Ok(())
            }
        }
    }
}

#[tokio::test]
async fn test_full_cycle_merges_chunks_in_order() {
    let provider = ScriptedProvider::succeeding(vec![
        StreamChunk::text("# Quantum\n").with_citations(vec![Citation::new("a.com", "A")]),
        StreamChunk::text("## History\n...").with_citations(vec![Citation::new("a.com", "A")]),
        StreamChunk::suppressed().with_citations(vec![Citation::new("b.com", "B")]),
    ]);
    let mut session = ResearchSession::new();

    run_research(&provider, &mut session, "Quantum Computing")
        .await
        .unwrap();

    assert_eq!(session.artifact().as_str(), "# Quantum\n## History\n...");
    let uris: Vec<&str> = session.sources().iter().map(|c| c.uri.as_str()).collect();
    assert_eq!(uris, vec!["a.com", "b.com"]);
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.messages().last().unwrap().role, Role::Ai);
}

#[tokio::test]
async fn test_failed_stream_keeps_partial_content() {
    let provider = ScriptedProvider::failing(
        vec![StreamChunk::text("partial text")],
        "connection reset",
    );
    let mut session = ResearchSession::new();

    run_research(&provider, &mut session, "doomed topic")
        .await
        .unwrap();

    assert_eq!(session.artifact().as_str(), "partial text");
    assert_eq!(session.state(), SessionState::Idle);

    let last = session.messages().last().unwrap();
    assert_eq!(last.role, Role::System);
    assert!(last.content.contains("connection reset"));
}

#[tokio::test]
async fn test_empty_topic_never_reaches_the_provider() {
    let provider = ScriptedProvider::succeeding(vec![StreamChunk::text("unused")]);
    let mut session = ResearchSession::new();

    let result = run_research(&provider, &mut session, "   ").await;
    assert!(matches!(result, Err(SubmitError::EmptyTopic)));
    assert!(provider.last_request.lock().unwrap().is_none());
    assert!(session.artifact().is_empty());
}

#[tokio::test]
async fn test_second_run_passes_prior_artifact_as_context() {
    let provider = ScriptedProvider::succeeding(vec![StreamChunk::text("first report")]);
    let mut session = ResearchSession::new();
    run_research(&provider, &mut session, "first").await.unwrap();

    let provider = ScriptedProvider::succeeding(vec![StreamChunk::text("more")]);
    run_research(&provider, &mut session, "second").await.unwrap();

    let request = provider.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(request.topic, "second");
    assert_eq!(request.prior_artifact, "first report");
}

#[tokio::test]
async fn test_boxed_provider_streams_through_the_blanket_impl() {
    let provider: Box<dyn ResearchProvider> = Box::new(ScriptedProvider::succeeding(vec![
        StreamChunk::text("boxed"),
    ]));
    let mut session = ResearchSession::new();

    run_research(&provider, &mut session, "topic").await.unwrap();
    assert_eq!(session.artifact().as_str(), "boxed");
}
