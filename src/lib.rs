//! Floating chat widget core.
//!
//! DESIGN
//! ======
//! The crate owns the conversation state machine of an embeddable chat
//! widget and the protocol it uses to ask a pluggable handler for replies.
//! Rendering is left to a presentation layer that reads [`WidgetState`],
//! calls [`ChatWidget::toggle`], [`ChatWidget::set_draft`] and
//! [`ChatWidget::send`], and re-renders on [`WidgetEvent`]s.
//!
//! - `widget` — state controller, transcript assembly, change events
//! - `handler` — the `AiHandler` trait plus LLM-backed and offline handlers
//! - `llm` — provider clients (Anthropic, `OpenAI`, Gemini) used by the default handler
//! - `config` — host-facing widget options

pub mod config;
pub mod handler;
pub mod llm;
pub mod widget;

pub use config::WidgetOptions;
pub use handler::{AiHandler, HandlerError, LlmHandler, OfflineHandler, Role, TranscriptEntry, handler_fn};
pub use widget::{ChatWidget, DisplayMessage, SendOutcome, Sender, WidgetEvent, WidgetState};

/// Serializes tests that mutate process environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
