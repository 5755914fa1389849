//! Deterministic stand-in used when no LLM backend is configured.

use super::{AiHandler, HandlerError, Role, TranscriptEntry};

/// Canned replies keyed on the latest user message. Never touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineHandler;

impl OfflineHandler {
    /// Reply for one user message.
    #[must_use]
    pub fn reply_to(message: &str) -> String {
        let lower = message.to_lowercase();
        if lower.contains("hello") {
            "Hello! How can I assist you today?".to_string()
        } else if lower.contains("help") {
            "I'm here to help! What do you need assistance with?".to_string()
        } else {
            format!("I received your message: \"{message}\". How can I help you further?")
        }
    }
}

#[async_trait::async_trait]
impl AiHandler for OfflineHandler {
    async fn generate(&self, transcript: &[TranscriptEntry]) -> Result<String, HandlerError> {
        let last_user = transcript
            .iter()
            .rev()
            .find(|entry| entry.role == Role::User)
            .ok_or_else(|| HandlerError::Custom("transcript has no user message".into()))?;
        Ok(Self::reply_to(&last_user.content))
    }
}

#[cfg(test)]
#[path = "offline_test.rs"]
mod tests;
