use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::{ProviderError, ResearchProvider, ResearchRequest, StreamChunk};
use crate::config::{
    Config, DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_URL, DEFAULT_MAX_OUTPUT_TOKENS,
    DEFAULT_THINKING_BUDGET,
};
use crate::research::prompts::{build_topic_prompt, REPORT_SYSTEM_PROMPT};
use crate::research::Citation;

/// Gemini streaming client.
///
/// Talks to the `models/{model}:streamGenerateContent` endpoint with the
/// web-search tool enabled, so generated reports carry grounding metadata
/// that maps onto [`Citation`]s.
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    max_output_tokens: u32,
    thinking_budget: u32,
    system_prompt: String,
    client: Client,
}

impl GeminiClient {
    /// Creates a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            thinking_budget: DEFAULT_THINKING_BUDGET,
            system_prompt: REPORT_SYSTEM_PROMPT.to_string(),
            client: Client::new(),
        }
    }

    /// Creates a Gemini client from the GEMINI_API_KEY (or GOOGLE_API_KEY)
    /// environment variable.
    pub fn from_env() -> Result<Self, ProviderError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| ProviderError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Creates a Gemini client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let api_key = config
            .provider
            .api_key_or_env()
            .ok_or(ProviderError::MissingApiKey)?;

        let mut client = Self::new(api_key)
            .with_base_url(config.provider.base_url_or_default())
            .with_model(config.provider.model_or_default())
            .with_max_output_tokens(config.provider.max_output_tokens)
            .with_thinking_budget(config.provider.thinking_budget);

        if let Some(ref prompt) = config.research.system_prompt {
            client = client.with_system_prompt(prompt.as_str());
        }

        Ok(client)
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the API base URL (for proxies or regional endpoints).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the maximum output tokens per report segment.
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Sets the internal reasoning budget.
    pub fn with_thinking_budget(mut self, thinking_budget: u32) -> Self {
        self.thinking_budget = thinking_budget;
        self
    }

    /// Sets the system instruction sent with every request.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    fn stream_url(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, self.model
        )
    }

    fn build_request(&self, request: &ResearchRequest) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: build_topic_prompt(&request.topic, &request.prior_artifact),
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: self.system_prompt.clone(),
                }],
            },
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_output_tokens,
                thinking_config: ThinkingConfig {
                    thinking_budget: self.thinking_budget,
                },
            },
        }
    }

    /// Send the streaming request and forward chunks through the channel.
    async fn send_streaming_request(
        &self,
        request: &GenerateRequest,
        tx: mpsc::UnboundedSender<StreamChunk>,
    ) -> Result<(), ProviderError> {
        let response = self
            .client
            .post(self.stream_url())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if status == 429 {
            return Err(ProviderError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        // Process SSE stream
        let mut stream = response.bytes_stream();
        let mut buffer = String::new();

        while let Some(chunk_result) = stream.next().await {
            let bytes = chunk_result.map_err(|e| ProviderError::Network(e.to_string()))?;
            // Normalize CRLF so event boundaries are always "\n\n"
            buffer.push_str(&String::from_utf8_lossy(&bytes).replace('\r', ""));

            // Process complete SSE events from buffer
            while let Some(pos) = buffer.find("\n\n") {
                let event_data = buffer[..pos].to_string();
                buffer = buffer[pos + 2..].to_string();

                if let Some(chunk) = parse_gemini_sse_event(&event_data)? {
                    let _ = tx.send(chunk);
                }
            }
        }

        // Send final chunk
        let _ = tx.send(StreamChunk::done());
        Ok(())
    }
}

#[async_trait]
impl ResearchProvider for GeminiClient {
    async fn stream_research(
        &self,
        request: &ResearchRequest,
        tx: mpsc::UnboundedSender<StreamChunk>,
    ) -> Result<(), ProviderError> {
        let body = self.build_request(request);
        self.send_streaming_request(&body, tx).await
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    tools: Vec<Tool>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "googleSearch")]
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(rename = "thinkingConfig")]
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
struct ThinkingConfig {
    #[serde(rename = "thinkingBudget")]
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    #[serde(default)]
    uri: String,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

/// Finish reasons that mean the chunk's text was withheld rather than ended.
const SUPPRESSED_FINISH_REASONS: &[&str] = &["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

/// Parse one Gemini SSE event into a chunk.
///
/// Gemini streaming format:
/// ```text
/// data: {"candidates":[{"content":{"parts":[{"text":"Hello"}]},"groundingMetadata":{...}}]}
/// ```
///
/// Returns `Ok(None)` for events that contribute nothing (keep-alives,
/// malformed payloads, empty deltas) so the consumption loop can skip them,
/// and `Err(ProviderError::Blocked)` when the prompt itself was rejected.
fn parse_gemini_sse_event(event_data: &str) -> Result<Option<StreamChunk>, ProviderError> {
    let mut data_payload = String::new();

    for line in event_data.lines() {
        if let Some(stripped) = line.strip_prefix("data:") {
            data_payload.push_str(stripped.trim());
        }
    }

    if data_payload.is_empty() {
        return Ok(None);
    }

    let parsed: GenerateResponse = match serde_json::from_str(&data_payload) {
        Ok(parsed) => parsed,
        Err(e) => {
            // A malformed event is skipped, not fatal: losing one delta is
            // recoverable, aborting the stream is not.
            tracing::debug!(error = %e, "skipping unparseable stream event");
            return Ok(None);
        }
    };

    if let Some(feedback) = parsed.prompt_feedback {
        if let Some(reason) = feedback.block_reason {
            return Err(ProviderError::Blocked(reason));
        }
    }

    let Some(candidate) = parsed.candidates.into_iter().next() else {
        return Ok(None);
    };

    let text = candidate
        .content
        .as_ref()
        .map(|c| {
            c.parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let citations: Vec<Citation> = candidate
        .grounding_metadata
        .map(|meta| {
            meta.grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web)
                .filter(|web| !web.uri.is_empty())
                .map(|web| Citation::new(web.uri, web.title))
                .collect()
        })
        .unwrap_or_default();

    let suppressed = text.is_empty()
        && candidate
            .finish_reason
            .as_deref()
            .is_some_and(|r| SUPPRESSED_FINISH_REASONS.contains(&r));

    if suppressed {
        return Ok(Some(StreamChunk::suppressed().with_citations(citations)));
    }

    if text.is_empty() && citations.is_empty() {
        return Ok(None);
    }

    Ok(Some(StreamChunk::text(text).with_citations(citations)))
}
