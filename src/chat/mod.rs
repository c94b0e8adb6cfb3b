//! Chat application module for interactive conversations.
//!
//! This module provides a REPL chat interface built on top of the galba
//! client library. It supports:
//!
//! - Slash commands for session control
//! - Configurable endpoint, model, and instructions
//! - Plain or ANSI-styled output
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Conversation state and request/reply flow
//! - [`commands`]: Slash command parsing and handling
//! - [`render`]: Output rendering

mod commands;
mod config;
mod render;
mod session;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use render::{PlainTextRenderer, Renderer};
pub use session::{ChatSession, SessionStats};
