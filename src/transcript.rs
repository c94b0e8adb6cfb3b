//! Conversation state for a chat session.
//!
//! A [`Transcript`] holds the ordered turns of one session. Turns are only
//! ever appended; the sole other mutation is an all-or-nothing clear. It is
//! owned by the session layer and replayed in full on every request, so the
//! HTTP client stays stateless.

use crate::types::{ChatMessage, Role};

/// An ordered, append-only sequence of conversation turns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<ChatMessage>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn to the end of the transcript.
    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(ChatMessage::new(role, content));
    }

    /// Returns all turns, oldest first.
    pub fn all(&self) -> &[ChatMessage] {
        &self.turns
    }

    /// Removes every turn. Idempotent.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Returns the number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true if the transcript has no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
