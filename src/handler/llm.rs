//! Default backend adapter: a transcript in, one LLM completion out.

use std::sync::Arc;

use tracing::info;

use super::{AiHandler, HandlerError, Role, TranscriptEntry};
use crate::llm::config::LlmConfig;
use crate::llm::types::{LlmError, Message};
use crate::llm::{LlmChat, LlmClient};

/// [`AiHandler`] that forwards the transcript to an [`LlmChat`] client.
pub struct LlmHandler {
    llm: Arc<dyn LlmChat>,
    max_tokens: u32,
}

impl LlmHandler {
    #[must_use]
    pub fn new(llm: Arc<dyn LlmChat>, max_tokens: u32) -> Self {
        Self { llm, max_tokens }
    }

    /// Build from `LLM_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns the [`LlmError`] from config parsing or client construction.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        let max_tokens = config.max_tokens;
        let client = LlmClient::from_config(config)?;
        Ok(Self::new(Arc::new(client), max_tokens))
    }

    #[must_use]
    pub fn model(&self) -> &str {
        self.llm.model()
    }
}

#[async_trait::async_trait]
impl AiHandler for LlmHandler {
    async fn generate(&self, transcript: &[TranscriptEntry]) -> Result<String, HandlerError> {
        let (system, messages) = split_transcript(transcript);

        let response = self.llm.chat(self.max_tokens, &system, &messages).await?;
        info!(
            model = %response.model,
            stop_reason = %response.stop_reason,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "handler: LLM response"
        );

        if response.text.trim().is_empty() {
            return Err(HandlerError::EmptyResponse);
        }
        Ok(response.text)
    }
}

/// Separate system entries (joined) from the conversational turns.
fn split_transcript(transcript: &[TranscriptEntry]) -> (String, Vec<Message>) {
    let mut system = Vec::new();
    let mut messages = Vec::with_capacity(transcript.len());
    for entry in transcript {
        match entry.role {
            Role::System => system.push(entry.content.as_str()),
            Role::User => messages.push(Message::user(entry.content.clone())),
            Role::Assistant => messages.push(Message::assistant(entry.content.clone())),
        }
    }
    (system.join("\n\n"), messages)
}

#[cfg(test)]
#[path = "llm_test.rs"]
mod tests;
