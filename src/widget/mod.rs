//! Widget state controller.
//!
//! DESIGN
//! ======
//! `ChatWidget` is a cheap `Clone` handle over one widget instance. State
//! lives behind a `std::sync::Mutex` that is only held for synchronous
//! mutations, never across the handler call, so `toggle` and `set_draft` can
//! run while a send is in flight.
//!
//! `loading` doubles as the gate: `send` checks and sets it under a single
//! lock acquisition, so at most one handler call is outstanding per widget.
//! Every mutation is followed by a [`WidgetEvent`] to subscribers, emitted
//! while the lock is held so event order matches mutation order.
//!
//! The handler call runs on its own task that owns a clone of the handle.
//! Dropping a `send` future detaches the caller but the call still settles
//! and its reply still lands. If that task dies without a result, the gate is
//! released by `InFlight`'s drop.

pub mod events;
pub mod state;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::WidgetOptions;
use crate::handler::{AiHandler, HandlerError, TranscriptEntry, resolve_default_handler};
pub use events::WidgetEvent;
use events::Subscribers;
pub use state::{DisplayMessage, GREETING_ID, Sender, WidgetState, build_transcript};

/// How a call to [`ChatWidget::send`] settled. Informational only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank draft or a send already in flight; nothing changed.
    Ignored,
    /// The handler replied and an ai message was appended.
    Answered,
    /// The handler failed; the user message stays, no reply was added.
    Failed,
}

/// Handle to one chat widget instance.
#[derive(Clone)]
pub struct ChatWidget {
    inner: Arc<Inner>,
}

struct Inner {
    options: WidgetOptions,
    handler: Arc<dyn AiHandler>,
    core: Mutex<Core>,
}

#[derive(Default)]
struct Core {
    state: WidgetState,
    draft: String,
    next_id: u64,
    subscribers: Subscribers,
}

impl Core {
    fn push_message(&mut self, sender: Sender, text: String) {
        self.next_id += 1;
        let id = self.next_id.to_string();
        self.state.messages.push(DisplayMessage::new(id, sender, text));
        self.subscribers.emit(&WidgetEvent::MessagesChanged);
    }

    fn set_loading(&mut self, loading: bool) {
        self.state.loading = loading;
        self.subscribers.emit(&WidgetEvent::LoadingChanged(loading));
    }
}

impl ChatWidget {
    /// Create a closed, empty widget that answers with `handler`.
    #[must_use]
    pub fn new(options: WidgetOptions, handler: Arc<dyn AiHandler>) -> Self {
        Self { inner: Arc::new(Inner { options, handler, core: Mutex::new(Core::default()) }) }
    }

    /// Create a widget using [`resolve_default_handler`].
    #[must_use]
    pub fn with_default_handler(options: WidgetOptions) -> Self {
        Self::new(options, resolve_default_handler())
    }

    fn core(&self) -> MutexGuard<'_, Core> {
        self.inner.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Open or close the panel. Returns the new visibility.
    ///
    /// The first time the panel opens onto an empty conversation the greeting
    /// is inserted. Messages are never removed, so it cannot happen twice.
    pub fn toggle(&self) -> bool {
        let mut core = self.core();
        let is_open = !core.state.is_open;
        core.state.is_open = is_open;
        core.subscribers.emit(&WidgetEvent::VisibilityChanged(is_open));

        if is_open && core.state.messages.is_empty() {
            let greeting = DisplayMessage::new(GREETING_ID, Sender::Ai, self.inner.options.greeting.clone());
            core.state.messages.push(greeting);
            core.subscribers.emit(&WidgetEvent::MessagesChanged);
        }
        is_open
    }

    /// Replace the uncommitted input text.
    pub fn set_draft(&self, text: impl Into<String>) {
        self.core().draft = text.into();
    }

    /// Submit the draft and wait for the handler's reply.
    ///
    /// Never fails: a blank draft or a send already in flight is ignored, and a
    /// handler error is logged and reported as [`WidgetEvent::HandlerFailed`]
    /// while the user's message stays in place.
    ///
    /// Must be called within a Tokio runtime.
    pub async fn send(&self) -> SendOutcome {
        let Some(transcript) = self.begin_send() else {
            return SendOutcome::Ignored;
        };

        let call = InFlight { widget: self.clone(), settled: false };
        match tokio::spawn(call.run(transcript)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!(error = %e, "widget: handler task did not complete");
                SendOutcome::Failed
            }
        }
    }

    fn begin_send(&self) -> Option<Vec<TranscriptEntry>> {
        let mut core = self.core();
        let text = core.draft.trim();
        if text.is_empty() || core.state.loading {
            return None;
        }
        let text = text.to_string();

        let transcript = build_transcript(&self.inner.options.system_instructions, &core.state.messages, &text);
        core.draft.clear();
        core.push_message(Sender::User, text);
        core.set_loading(true);

        debug!(entries = transcript.len(), "widget: dispatching handler call");
        Some(transcript)
    }

    fn finish_send(&self, result: Result<String, HandlerError>) -> SendOutcome {
        let mut core = self.core();
        match result {
            Ok(reply) => {
                core.push_message(Sender::Ai, reply);
                core.set_loading(false);
                SendOutcome::Answered
            }
            Err(e) => {
                warn!(error = %e, retryable = e.retryable(), "widget: error generating response");
                core.set_loading(false);
                core.subscribers.emit(&WidgetEvent::HandlerFailed(e.to_string()));
                SendOutcome::Failed
            }
        }
    }

    fn abandon_send(&self) {
        let mut core = self.core();
        warn!("widget: {ABANDONED_CALL}");
        core.set_loading(false);
        core.subscribers.emit(&WidgetEvent::HandlerFailed(ABANDONED_CALL.into()));
    }

    /// Receive a [`WidgetEvent`] after every state change from now on.
    #[must_use]
    pub fn subscribe(&self) -> mpsc::Receiver<WidgetEvent> {
        self.core().subscribers.subscribe()
    }

    // =========================================================================
    // READ ACCESS
    // =========================================================================

    #[must_use]
    pub fn snapshot(&self) -> WidgetState {
        self.core().state.clone()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<DisplayMessage> {
        self.core().state.messages.clone()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.core().state.is_open
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.core().state.loading
    }

    #[must_use]
    pub fn draft(&self) -> String {
        self.core().draft.clone()
    }

    #[must_use]
    pub fn options(&self) -> &WidgetOptions {
        &self.inner.options
    }

    /// Whether the send button should be enabled.
    #[must_use]
    pub fn can_send(&self) -> bool {
        let core = self.core();
        !core.draft.trim().is_empty() && !core.state.loading
    }

    /// Accessible label for the floating toggle button.
    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        if self.is_open() { "Close chat" } else { "Open chat" }
    }
}

// =============================================================================
// IN-FLIGHT CALL
// =============================================================================

const ABANDONED_CALL: &str = "handler call ended without a result";

/// One outstanding handler call. Releases the gate on drop unless the call
/// settled (handler panic, runtime shutdown).
struct InFlight {
    widget: ChatWidget,
    settled: bool,
}

impl InFlight {
    async fn run(mut self, transcript: Vec<TranscriptEntry>) -> SendOutcome {
        let result = self.widget.inner.handler.generate(&transcript).await;
        self.settled = true;
        self.widget.finish_send(result)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.settled {
            self.widget.abandon_send();
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
