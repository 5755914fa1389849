use tokio::sync::mpsc;

/// Buffered events per subscriber before new ones are dropped.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Change notifications for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WidgetEvent {
    /// `messages` grew; re-render and scroll to the latest bubble.
    MessagesChanged,
    VisibilityChanged(bool),
    LoadingChanged(bool),
    /// A handler call failed. History is untouched.
    HandlerFailed(String),
}

/// Fan-out of widget events to every live subscriber.
#[derive(Default)]
pub(crate) struct Subscribers {
    senders: Vec<mpsc::Sender<WidgetEvent>>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self) -> mpsc::Receiver<WidgetEvent> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        self.senders.push(tx);
        rx
    }

    pub(crate) fn emit(&mut self, event: &WidgetEvent) {
        self.senders.retain(|tx| !tx.is_closed());
        for tx in &self.senders {
            // Best-effort: a subscriber that stopped draining misses events.
            let _ = tx.try_send(event.clone());
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.senders.len()
    }
}

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;
