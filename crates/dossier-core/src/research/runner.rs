use tokio::sync::mpsc;

use super::session::{ResearchSession, SubmitError};
use crate::provider::{ResearchProvider, StreamChunk};

/// Runs one submit-to-terminal research cycle against a provider.
///
/// Chunks are folded into the session on this single control-flow path, in
/// arrival order, while the provider streams concurrently. Stream-level
/// failures are folded into the session as well (they surface as a chat
/// message, with partial content retained), so the only error returned here
/// is a rejected submission.
pub async fn run_research<P>(
    provider: &P,
    session: &mut ResearchSession,
    topic: &str,
) -> Result<(), SubmitError>
where
    P: ResearchProvider + ?Sized,
{
    let request = session.submit(topic)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<StreamChunk>();

    let stream = provider.stream_research(&request, tx);
    let fold = async {
        while let Some(chunk) = rx.recv().await {
            if chunk.is_final {
                break;
            }
            session.on_chunk(&chunk);
        }
    };

    // The sender is dropped when the provider returns, so the fold loop
    // always terminates even if the provider never sent a final chunk.
    let (outcome, ()) = tokio::join!(stream, fold);

    match outcome {
        Ok(()) => session.on_stream_end(),
        Err(err) => session.on_stream_error(&err.to_string()),
    }

    Ok(())
}
