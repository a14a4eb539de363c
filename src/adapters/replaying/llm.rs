//! Replaying adapter for the `LlmClient` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{CompletionRequest, LlmClient, LlmFuture};

/// Serves recorded LLM completions from a cassette.
pub struct ReplayingLlmClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingLlmClient {
    /// Create a replaying LLM client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl LlmClient for ReplayingLlmClient {
    fn complete(&self, _request: &CompletionRequest) -> LlmFuture<'_> {
        let output = next_output(&self.replayer, "llm", "complete");
        Box::pin(async move { replay_result(&output, "llm::complete") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::test_support::replayer;
    use serde_json::json;

    #[tokio::test]
    async fn replays_completions_in_order() {
        let llm = ReplayingLlmClient::new(replayer(&[
            ("llm", "complete", json!({"ok": {"text": "first", "prompt_tokens": 1, "completion_tokens": 1}})),
            ("llm", "complete", json!({"err": "chat completion API error (429): slow down"})),
        ]));
        let request = CompletionRequest {
            model: "m".into(),
            prompt: "p".into(),
            max_tokens: 1,
            temperature: 0.0,
        };
        assert_eq!(llm.complete(&request).await.unwrap().text, "first");
        assert!(llm.complete(&request).await.unwrap_err().to_string().contains("429"));
    }
}
