//! Terminal host for the chat widget.
//!
//! Reads lines from stdin: `/toggle` opens or closes the panel, `/state`
//! dumps the widget state as JSON, `/quit` exits, anything else is typed
//! into the draft and sent. Bubbles are printed whenever the widget reports
//! new messages while the panel is open.

use std::path::PathBuf;
use std::sync::Arc;

use chatwidget::config::ConfigError;
use chatwidget::handler::resolve_default_handler;
use chatwidget::{AiHandler, ChatWidget, OfflineHandler, Sender, WidgetEvent, WidgetOptions};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "chatwidget", about = "Floating chat widget in the terminal")]
struct Cli {
    /// JSON file with widget options (`buttonColor`, `themeColor`, `greeting`, `systemInstructions`).
    #[arg(long)]
    options: Option<PathBuf>,

    #[arg(long, env = "WIDGET_GREETING")]
    greeting: Option<String>,

    #[arg(long, env = "WIDGET_SYSTEM_INSTRUCTIONS")]
    system_instructions: Option<String>,

    /// Answer with the offline stand-in even if an LLM is configured.
    #[arg(long)]
    offline: bool,

    /// Start with the panel open.
    #[arg(long)]
    open: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // A missing .env file is fine; the environment may already be populated.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let options = load_options(&cli)?;
    let handler: Arc<dyn AiHandler> = if cli.offline { Arc::new(OfflineHandler) } else { resolve_default_handler() };

    let widget = ChatWidget::new(options, handler);
    let renderer = tokio::spawn(render(widget.clone(), widget.subscribe()));

    if cli.open {
        widget.toggle();
    } else {
        println!("[{}] type /toggle to open", widget.toggle_label());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" => break,
            "/toggle" => {
                widget.toggle();
            }
            "/state" => println!("{}", serde_json::to_string_pretty(&widget.snapshot())?),
            _ => {
                if !submit(&widget, &line) {
                    println!("(still waiting for the previous reply, line not sent)");
                }
            }
        }
    }

    renderer.abort();
    Ok(())
}

/// Type `line` into the draft and send it in the background. Returns false
/// without touching the draft while a reply is pending.
fn submit(widget: &ChatWidget, line: &str) -> bool {
    if widget.is_loading() {
        return false;
    }
    widget.set_draft(line);
    let widget = widget.clone();
    tokio::spawn(async move { widget.send().await });
    true
}

fn load_options(cli: &Cli) -> Result<WidgetOptions, CliError> {
    let mut options = match &cli.options {
        Some(path) => WidgetOptions::from_json(&std::fs::read_to_string(path)?)?,
        None => WidgetOptions::from_env(),
    };
    if let Some(greeting) = &cli.greeting {
        options.greeting.clone_from(greeting);
    }
    if let Some(instructions) = &cli.system_instructions {
        options.system_instructions.clone_from(instructions);
    }
    Ok(options)
}

/// Print bubbles the user has not seen yet. Messages that land while the
/// panel is closed are shown on the next open.
async fn render(widget: ChatWidget, mut events: mpsc::Receiver<WidgetEvent>) {
    let mut shown = 0;
    while let Some(event) = events.recv().await {
        match event {
            WidgetEvent::VisibilityChanged(true) => println!("── AI Chat ──"),
            WidgetEvent::VisibilityChanged(false) => println!("── closed ──"),
            WidgetEvent::LoadingChanged(true) => println!("  ..."),
            WidgetEvent::MessagesChanged | WidgetEvent::LoadingChanged(false) | WidgetEvent::HandlerFailed(_) => {}
        }
        if !widget.is_open() {
            continue;
        }
        let messages = widget.messages();
        for message in messages.iter().skip(shown) {
            match message.sender {
                Sender::User => println!("{:>60}", format!("{} <you", message.text)),
                Sender::Ai => println!("ai> {}", message.text),
            }
        }
        shown = messages.len();
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
