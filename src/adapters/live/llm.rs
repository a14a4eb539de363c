//! Live adapter for the `LlmClient` port using an OpenAI-compatible chat completions API.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ports::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmFuture};
use crate::ports::PortError;

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Live LLM client that calls `POST {base_url}/v1/chat/completions`.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    /// Creates a client for the given API root. A missing key is only
    /// reported when a completion is actually requested.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self { client: Client::new(), base_url: base_url.into(), api_key }
    }

    fn endpoint(&self) -> String {
        format!("{}{CHAT_COMPLETIONS_PATH}", self.base_url.trim_end_matches('/'))
    }
}

/// Request body for the chat completions endpoint.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Error envelope returned on non-2xx responses.
#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Extracts the first choice's text from a successful response body.
fn parse_completion(body: &str) -> Result<CompletionResponse, PortError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| format!("failed to parse chat completion response: {e}"))?;

    let text = parsed
        .choices
        .into_iter()
        .next()
        .ok_or("chat completion response contained no choices")?
        .message
        .content
        .unwrap_or_default();
    let (prompt_tokens, completion_tokens) =
        parsed.usage.map_or((0, 0), |u| (u.prompt_tokens, u.completion_tokens));

    Ok(CompletionResponse { text, prompt_tokens, completion_tokens })
}

impl LlmClient for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let api_key =
                self.api_key.as_deref().ok_or("OPENAI_API_KEY environment variable not set")?;

            let body = ChatRequest {
                model: &request.model,
                messages: vec![ChatMessage { role: "user", content: &request.prompt }],
                max_tokens: request.max_tokens,
                temperature: request.temperature,
            };

            let response = self
                .client
                .post(self.endpoint())
                .bearer_auth(api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| format!("chat completion request failed: {e}"))?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| format!("failed to read chat completion response: {e}"))?;

            if !status.is_success() {
                let msg = serde_json::from_str::<ApiError>(&text)
                    .map(|e| e.error.message)
                    .unwrap_or(text);
                return Err(format!("chat completion API error ({}): {msg}", status.as_u16()).into());
            }

            parse_completion(&text)
        })
    }
}
