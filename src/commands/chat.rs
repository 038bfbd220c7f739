//! Interactive chat session handler
//!
//! Runs a readline loop against the conversational model. Slash
//! commands switch session state; toggling reasoning mode opens a fresh
//! session (the previous one is discarded along with its server-side
//! continuity). A failed send appends the fixed fallback turn so the
//! transcript is never left without a model reply.

use crate::config::Config;
use crate::error::Result;
use crate::gateway::{ConversationTurn, ModelGateway, FALLBACK_TEXT};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Slash commands recognized inside the chat loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    /// Toggle extended reasoning mode (reopens the session)
    ToggleReasoning,
    /// Discard the transcript and reopen in the current mode
    Clear,
    /// Show session status
    Status,
    /// Show available commands
    Help,
    /// Leave the chat loop
    Exit,
    /// Not a slash command; treat as a message
    None,
}

/// Parse a line into a slash command
pub fn parse_chat_command(input: &str) -> ChatCommand {
    match input.trim().to_lowercase().as_str() {
        "/reasoning" | "/thinking" => ChatCommand::ToggleReasoning,
        "/clear" => ChatCommand::Clear,
        "/status" => ChatCommand::Status,
        "/help" => ChatCommand::Help,
        "/exit" | "/quit" => ChatCommand::Exit,
        _ => ChatCommand::None,
    }
}

/// Prompt string reflecting the current reasoning mode
fn format_prompt(reasoning: bool) -> String {
    if reasoning {
        format!("{} >> ", "[REASONING]".purple())
    } else {
        format!("{} >> ", "[CHAT]".green())
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  /reasoning  Toggle extended reasoning mode (starts a new session)");
    println!("  /clear      Discard the transcript and start over");
    println!("  /status     Show the current session state");
    println!("  /help       Show this help");
    println!("  /exit       Leave the chat");
}

fn print_model_turn(turn: &ConversationTurn) {
    if turn.used_reasoning {
        println!("{} {}", "petro-assistant (reasoned):".purple().bold(), turn.text);
    } else {
        println!("{} {}", "petro-assistant:".green().bold(), turn.text);
    }
}

/// Start an interactive chat session
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `reasoning` - Start in extended reasoning mode
pub async fn run_chat(config: Config, reasoning: bool) -> Result<()> {
    let gateway = ModelGateway::new(config.gateway.clone())?;

    let mut reasoning = reasoning || config.chat.reasoning;
    let mut session = gateway.open_conversation(reasoning);

    // Display transcript, including the greeting and any fallback turns.
    // The session itself holds only exchanged turns.
    let mut transcript: Vec<ConversationTurn> = Vec::new();
    let greeting = ConversationTurn::model(config.chat.greeting.clone(), false);
    print_model_turn(&greeting);
    transcript.push(greeting);
    println!("Type /help for commands.\n");

    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline(&format_prompt(reasoning)) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed)?;

                match parse_chat_command(trimmed) {
                    ChatCommand::ToggleReasoning => {
                        reasoning = !reasoning;
                        // A mode change replaces the session outright; the
                        // prior handle and its continuity are discarded.
                        session = gateway.open_conversation(reasoning);
                        println!(
                            "Reasoning mode {} (new session started)\n",
                            if reasoning { "enabled" } else { "disabled" }
                        );
                        continue;
                    }
                    ChatCommand::Clear => {
                        session = gateway.open_conversation(reasoning);
                        transcript.clear();
                        println!("Transcript cleared\n");
                        continue;
                    }
                    ChatCommand::Status => {
                        println!(
                            "Reasoning: {}\nExchanged turns: {}\nTranscript entries: {}\n",
                            if reasoning { "on" } else { "off" },
                            session.len(),
                            transcript.len()
                        );
                        continue;
                    }
                    ChatCommand::Help => {
                        print_help();
                        continue;
                    }
                    ChatCommand::Exit => break,
                    ChatCommand::None => {}
                }

                transcript.push(ConversationTurn::user(trimmed));
                match gateway.send_message(&mut session, trimmed).await {
                    Ok(turn) => {
                        print_model_turn(&turn);
                        transcript.push(turn);
                    }
                    Err(e) => {
                        // Terminal for this message; the user must resend.
                        tracing::error!("send_message failed: {}", e);
                        let fallback = ConversationTurn::fallback();
                        println!("{} {}", "petro-assistant:".red().bold(), FALLBACK_TEXT);
                        transcript.push(fallback);
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    println!("Goodbye!");
    Ok(())
}
