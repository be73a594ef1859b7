//! sensei-chat: terminal front-end for the chat funnel.
//!
//! Type a reply, or the number of a button to press it.
//! `/restart` starts over, `/quit` exits.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use sensei_client::{ClientStorage, FileStorage, HttpTransport, MemoryStorage, Reply, Widget};
use sensei_core::Speaker;

#[derive(Debug, Parser)]
#[command(name = "sensei-chat", about = "Chat with the sensei-bot funnel from a terminal")]
struct Args {
    /// Chat endpoint URL
    #[arg(long, env = "SENSEI_API", default_value = "http://localhost:3000/api/chat")]
    api: String,

    /// Persist widget state to this JSON file (in-memory if omitted)
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Header shown above the conversation
    #[arg(long, default_value = "Shotokan Sensei-bot")]
    brand: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sensei_client=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let storage: Arc<dyn ClientStorage> = match &args.state_file {
        Some(path) => Arc::new(FileStorage::open(path)?),
        None => Arc::new(MemoryStorage::new()),
    };
    let widget = Widget::new(Arc::new(HttpTransport::new(&args.api)), storage);

    println!("── {} ──", args.brand);

    // Resume a saved conversation, otherwise start one.
    let mut buttons: Vec<String> = Vec::new();
    match widget.stored_state() {
        Some(state) => println!("(resuming at '{}')", state),
        None => buttons = render(&widget.open().await?),
    }

    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline("you> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(input);

        let reply = match input {
            "/quit" => break,
            "/restart" => widget.open().await?,
            _ => match button_choice(input, &buttons) {
                Some(label) => {
                    println!("you> {}", label);
                    widget.press(&label).await?
                }
                None => widget.send(input).await?,
            },
        };

        // A failed turn keeps the previous buttons usable.
        let shown = render(&reply);
        if reply.delivered {
            buttons = shown;
        }
    }

    Ok(())
}

/// `"2"` selects the second button of the last bot message.
fn button_choice(input: &str, buttons: &[String]) -> Option<String> {
    let n: usize = input.parse().ok()?;
    buttons.get(n.checked_sub(1)?).cloned()
}

fn render(reply: &Reply) -> Vec<String> {
    for message in &reply.messages {
        let who = match message.from {
            Speaker::Bot => "sensei",
            Speaker::User => "you",
        };
        println!("{}> {}", who, message.text);
        for (i, label) in message.buttons().iter().enumerate() {
            println!("   [{}] {}", i + 1, label);
        }
    }
    if let Some(url) = &reply.checkout_url {
        println!("👉 Click here to complete checkout: {}", url);
    }
    reply.buttons().to_vec()
}
