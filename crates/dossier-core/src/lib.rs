pub mod config;
pub mod provider;
pub mod research;

pub use config::Config;
pub use provider::{
    ChunkPayload, GeminiClient, ProviderError, ResearchProvider, ResearchRequest, StreamChunk,
};
pub use research::{
    run_research, Artifact, Citation, Message, ResearchSession, Role, SessionState, SourceList,
    SubmitError, SESSION_SEPARATOR,
};
