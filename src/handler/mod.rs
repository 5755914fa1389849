//! Handler invocation protocol — the pluggable answer generator.
//!
//! DESIGN
//! ======
//! A handler maps a role-tagged transcript to one reply string. The widget
//! holds it as `Arc<dyn AiHandler>` and never has more than one call in
//! flight per instance; handlers need no internal serialization.
//!
//! Implementations:
//! - [`LlmHandler`] wraps any [`LlmChat`](crate::llm::LlmChat) client
//! - [`OfflineHandler`] answers deterministically without a network
//! - [`handler_fn`] adapts a host-supplied async closure

pub mod llm;
pub mod offline;

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use self::llm::LlmHandler;
pub use self::offline::OfflineHandler;
use crate::llm::types::LlmError;

// =============================================================================
// TRANSCRIPT
// =============================================================================

/// Speaker of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One entry of the sequence handed to a handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub content: String,
}

impl TranscriptEntry {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

// =============================================================================
// ERROR
// =============================================================================

/// Failure reported by a handler. The widget logs it and keeps history intact.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("handler returned an empty response")]
    EmptyResponse,
    #[error("{0}")]
    Custom(String),
}

impl HandlerError {
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Llm(e) if e.retryable())
    }
}

// =============================================================================
// HANDLER TRAIT
// =============================================================================

/// Produces one reply for a transcript.
#[async_trait::async_trait]
pub trait AiHandler: Send + Sync {
    /// Generate the assistant reply for `transcript`.
    ///
    /// The last entry is always the newly submitted user turn.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] for any failure (network, quota, malformed
    /// upstream response). Never encode failures in the returned text.
    async fn generate(&self, transcript: &[TranscriptEntry]) -> Result<String, HandlerError>;
}

/// Handler backed by an async closure. Built with [`handler_fn`].
pub struct FnHandler<F>(F);

/// Wrap an async closure as an [`AiHandler`].
///
/// The closure receives an owned copy of the transcript.
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(Vec<TranscriptEntry>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, HandlerError>> + Send + 'static,
{
    FnHandler(f)
}

#[async_trait::async_trait]
impl<F, Fut> AiHandler for FnHandler<F>
where
    F: Fn(Vec<TranscriptEntry>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, HandlerError>> + Send + 'static,
{
    async fn generate(&self, transcript: &[TranscriptEntry]) -> Result<String, HandlerError> {
        (self.0)(transcript.to_vec()).await
    }
}

// =============================================================================
// DEFAULT RESOLUTION
// =============================================================================

/// Build the default handler from the environment.
///
/// Uses the configured LLM provider when credentials resolve; otherwise warns
/// once and falls back to [`OfflineHandler`] so the widget stays usable.
#[must_use]
pub fn resolve_default_handler() -> Arc<dyn AiHandler> {
    match LlmHandler::from_env() {
        Ok(handler) => {
            info!(model = handler.model(), "handler: using LLM backend");
            Arc::new(handler)
        }
        Err(e) => {
            warn!(error = %e, "handler: LLM backend not configured, using offline stand-in");
            Arc::new(OfflineHandler)
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
