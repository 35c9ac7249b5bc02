use anyhow::{Context, Result};
use clap::Args;
use client::SubmitError;
use client::controllers::ChatController;
use shared::models::{ChatEntry, ChatRole};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{Dashboard, flush_prompt};

#[derive(Args, Debug)]
#[command(about = "Talk to the MarketMind assistant")]
pub struct ChatArgs {
    /// Send one message and exit instead of starting an interactive session
    #[arg(long, short)]
    pub message: Option<String>,
}

pub async fn start_chat(dashboard: &Dashboard, args: ChatArgs) -> Result<()> {
    let chat = ChatController::new(dashboard.api.clone());
    for entry in chat.transcript() {
        println!("{}", render_entry(&entry));
    }

    if let Some(message) = args.message {
        send(&chat, &message).await;
        return Ok(());
    }

    println!("(type 'exit' to leave)");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        flush_prompt("you> ");
        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            break;
        };
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }
        send(&chat, &line).await;
    }
    Ok(())
}

/// Sends one message and prints the reply; blank input is skipped.
pub async fn send(chat: &ChatController, message: &str) {
    match chat.send(message).await {
        Ok(reply) => println!("{}", render_entry(&reply)),
        Err(SubmitError::Required(_)) => {}
        Err(err) => eprintln!("{err}"),
    }
}

pub fn render_entry(entry: &ChatEntry) -> String {
    let speaker = match entry.role {
        ChatRole::User => "you",
        ChatRole::Assistant => "MarketMind AI",
    };
    format!("{speaker}: {}", entry.content)
}
