use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::handler::TranscriptEntry;

/// Id reserved for the greeting bubble.
pub const GREETING_ID: &str = "0";

/// Author of a displayed message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// A rendered chat bubble.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    /// Creation time in unix milliseconds.
    pub timestamp: i64,
}

impl DisplayMessage {
    #[must_use]
    pub fn new(id: impl Into<String>, sender: Sender, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into(), sender, timestamp: now_ms() }
    }

    /// Transcript form of this bubble.
    #[must_use]
    pub fn to_transcript_entry(&self) -> TranscriptEntry {
        match self.sender {
            Sender::User => TranscriptEntry::user(self.text.clone()),
            Sender::Ai => TranscriptEntry::assistant(self.text.clone()),
        }
    }
}

/// Everything a presentation layer needs to draw the widget.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetState {
    pub is_open: bool,
    /// Append-only, in insertion order.
    pub messages: Vec<DisplayMessage>,
    /// True while a handler call is outstanding.
    pub loading: bool,
}

/// Assemble the handler input for one send.
///
/// `history` must not contain the new user message yet; it is appended here,
/// exactly once, after the system entry and the prior turns.
#[must_use]
pub fn build_transcript(system_instructions: &str, history: &[DisplayMessage], new_user_text: &str) -> Vec<TranscriptEntry> {
    let mut transcript = Vec::with_capacity(history.len() + 2);
    transcript.push(TranscriptEntry::system(system_instructions));
    transcript.extend(history.iter().map(DisplayMessage::to_transcript_entry));
    transcript.push(TranscriptEntry::user(new_user_text));
    transcript
}

fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;
