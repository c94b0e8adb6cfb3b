//! Interactive chat application for OpenAI-compatible endpoints.
//!
//! This binary provides a REPL interface for chatting with a model hosted
//! behind an OpenAI-compatible chat completions API (e.g. Groq).
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings (reads GALBA_API_KEY)
//! galba-chat
//!
//! # Specify a model
//! galba-chat --model mixtral-8x7b
//!
//! # Point at a different endpoint
//! galba-chat --endpoint http://localhost:8080/v1/chat/completions
//!
//! # Set system instructions
//! galba-chat --system "You are a helpful coding assistant"
//!
//! # Disable colors (useful for piping output)
//! galba-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/clear` - Clear conversation history
//! - `/model <name>` - Change the model
//! - `/system [prompt]` - Set or clear system instructions
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use galba::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, Renderer, help_text,
    parse_command,
};

/// Main entry point for the galba-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("galba-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    let mut session = ChatSession::new(config)?;
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    println!("Chat (model: {})", session.model());
    println!("Type /help for commands, /quit to exit\n");

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Clear => {
                            session.reset_session();
                            renderer.print_info("Conversation cleared.");
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Model(model_name) => {
                            session.set_model(model_name.as_str());
                            renderer.print_info(&format!("Model changed to: {}", model_name));
                        }
                        ChatCommand::System(prompt) => {
                            session.set_instructions(prompt.clone());
                            match prompt {
                                Some(p) => {
                                    renderer.print_info(&format!("Instructions set to: {}", p))
                                }
                                None => renderer.print_info("Instructions cleared."),
                            }
                        }
                        ChatCommand::Stats => {
                            print_stats(&session);
                        }
                        ChatCommand::ShowConfig => {
                            print_config(&session);
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to the API and show whatever
                // comes back, diagnostics included.
                println!("Assistant:");
                if let Some(reply) = session.submit_user_message(line).await {
                    renderer.print_text(&reply);
                    renderer.finish_response();
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_stats(session: &ChatSession) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      Endpoint: {}", stats.endpoint);
    println!("      Model: {}", stats.model);
    println!("      Messages: {}", stats.message_count);
    println!("      Timeout: {}s", stats.timeout.as_secs());
    match stats.instructions.as_deref() {
        Some(prompt) => println!("      Instructions: {}", prompt),
        None => println!("      Instructions: (none)"),
    }
}

fn print_config(session: &ChatSession) {
    let stats = session.stats();
    println!("    Current Configuration:");
    println!("      Endpoint: {}", stats.endpoint);
    println!("      Model: {}", stats.model);
    println!("      Timeout: {}s", stats.timeout.as_secs());
    match stats.instructions.as_deref() {
        Some(prompt) => println!("      Instructions: {}", prompt),
        None => println!("      Instructions: (none)"),
    }
}
