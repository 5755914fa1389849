use super::*;
use chatwidget::{HandlerError, handler_fn};
use tokio::sync::Notify;
use tokio::time::{Duration, timeout};

async fn next_event(rx: &mut mpsc::Receiver<WidgetEvent>) -> WidgetEvent {
    timeout(Duration::from_millis(500), rx.recv())
        .await
        .expect("event receive timed out")
        .expect("event channel closed")
}

#[tokio::test]
async fn line_typed_while_waiting_is_not_committed() {
    let gate = Arc::new(Notify::new());
    let handler = handler_fn({
        let gate = gate.clone();
        move |_transcript| {
            let gate = gate.clone();
            async move {
                gate.notified().await;
                Ok::<_, HandlerError>("ok".to_string())
            }
        }
    });
    let widget = ChatWidget::new(WidgetOptions::default(), Arc::new(handler));
    let mut events = widget.subscribe();

    assert!(submit(&widget, "first"));
    assert_eq!(next_event(&mut events).await, WidgetEvent::MessagesChanged);
    assert_eq!(next_event(&mut events).await, WidgetEvent::LoadingChanged(true));

    assert!(!submit(&widget, "second"));
    assert_eq!(widget.draft(), "");

    gate.notify_one();
    assert_eq!(next_event(&mut events).await, WidgetEvent::MessagesChanged);
    assert_eq!(next_event(&mut events).await, WidgetEvent::LoadingChanged(false));

    let texts: Vec<String> = widget.messages().into_iter().map(|m| m.text).collect();
    assert_eq!(texts, vec!["first".to_string(), "ok".to_string()]);
    assert_eq!(widget.draft(), "");
}
