//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the transcript
//! for one conversation and drives the request/reply flow against the
//! client.

use std::time::Duration;

use crate::Galba;
use crate::chat::config::ChatConfig;
use crate::error::Result;
use crate::transcript::Transcript;
use crate::types::{ChatRequest, Role};

/// A chat session that owns conversation state and drives API calls.
///
/// The session appends each user message and each returned assistant
/// string to its transcript; the client itself never retains turns.
pub struct ChatSession {
    client: Galba,
    config: ChatConfig,
    transcript: Transcript,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The endpoint requests are posted to.
    pub endpoint: String,
    /// The model used for the session.
    pub model: String,
    /// The system instructions, if any.
    pub instructions: Option<String>,
    /// The request timeout.
    pub timeout: Duration,
    /// The number of turns in the conversation.
    pub message_count: usize,
}

impl ChatSession {
    /// Creates a new chat session from a configuration.
    ///
    /// The client is built here from the config's endpoint, API key, and
    /// timeout, so the session and its client cannot disagree about where
    /// requests go.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is available or the HTTP client
    /// cannot be built.
    pub fn new(config: ChatConfig) -> Result<Self> {
        let client = Galba::with_options(
            config.api_key.clone(),
            Some(config.endpoint.clone()),
            Some(config.timeout),
        )?;
        Ok(Self {
            client,
            config,
            transcript: Transcript::new(),
        })
    }

    /// Submits a user message and returns the assistant's reply text.
    ///
    /// This method:
    /// 1. Trims the input; blank input is a no-op returning `None`
    /// 2. Appends the user turn to the transcript
    /// 3. Builds a request from the instructions and the full transcript
    /// 4. Appends whatever string comes back as the assistant turn
    ///
    /// The returned string is always displayable: transport and API
    /// failures arrive as diagnostic text via [`Galba::send_text`], never
    /// as an error.
    pub async fn submit_user_message(&mut self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.transcript.append(Role::User, text);
        let request = ChatRequest::from_conversation(
            &self.config.model,
            self.config.instructions.as_deref(),
            self.transcript.all(),
        );
        let reply = self.client.send_text(&request).await;
        self.transcript.append(Role::Assistant, reply.clone());
        Some(reply)
    }

    /// Clears the conversation history. Idempotent.
    pub fn reset_session(&mut self) {
        self.transcript.clear();
    }

    /// Returns the number of turns in the conversation.
    pub fn message_count(&self) -> usize {
        self.transcript.len()
    }

    /// Returns the accumulated transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Changes the model used for responses.
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.config.model = model.into();
    }

    /// Returns the current model.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Sets or clears the system instructions.
    pub fn set_instructions(&mut self, instructions: Option<String>) {
        self.config.instructions = instructions;
    }

    /// Returns the current system instructions, if any.
    pub fn instructions(&self) -> Option<&str> {
        self.config.instructions.as_deref()
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            endpoint: self.client.endpoint().to_string(),
            model: self.config.model.clone(),
            instructions: self.config.instructions.clone(),
            timeout: self.client.timeout(),
            message_count: self.message_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;

    fn test_session() -> ChatSession {
        ChatSession::new(ChatConfig::default().with_api_key("test-key")).unwrap()
    }

    #[test]
    fn new_session_empty() {
        let session = test_session();
        assert_eq!(session.message_count(), 0);
    }

    #[test]
    fn session_client_follows_config() {
        let config = ChatConfig::default()
            .with_api_key("test-key")
            .with_endpoint("http://localhost:9999/chat")
            .with_timeout(Duration::from_secs(7));
        let session = ChatSession::new(config).unwrap();

        let stats = session.stats();
        assert_eq!(stats.endpoint, "http://localhost:9999/chat");
        assert_eq!(stats.timeout, Duration::from_secs(7));
    }

    #[tokio::test]
    async fn blank_input_is_a_no_op() {
        let mut session = test_session();
        assert!(session.submit_user_message("").await.is_none());
        assert!(session.submit_user_message("   ").await.is_none());
        assert!(session.submit_user_message("\n\t ").await.is_none());
        assert_eq!(session.message_count(), 0);
    }

    #[test]
    fn reset_session_is_idempotent() {
        let mut session = test_session();
        session.transcript.append(Role::User, "test");
        assert_eq!(session.message_count(), 1);

        session.reset_session();
        assert_eq!(session.message_count(), 0);

        session.reset_session();
        assert_eq!(session.message_count(), 0);
    }

    #[test]
    fn set_model() {
        let mut session = test_session();
        assert_eq!(session.model(), "llama3-70b-8192");

        session.set_model("mixtral-8x7b");
        assert_eq!(session.model(), "mixtral-8x7b");
    }

    #[test]
    fn set_instructions() {
        let mut session = test_session();
        assert!(session.instructions().is_none());

        session.set_instructions(Some("Be helpful".to_string()));
        assert_eq!(session.instructions(), Some("Be helpful"));

        session.set_instructions(None);
        assert!(session.instructions().is_none());
    }

    #[test]
    fn transcript_feeds_request_in_order() {
        let mut session = test_session();
        session.transcript.append(Role::User, "one");
        session.transcript.append(Role::Assistant, "two");
        session.set_instructions(Some("stay brief".to_string()));

        let request = ChatRequest::from_conversation(
            session.model(),
            session.instructions(),
            session.transcript().all(),
        );
        assert_eq!(request.messages[0], ChatMessage::system("stay brief"));
        assert_eq!(request.messages[1], ChatMessage::user("one"));
        assert_eq!(request.messages[2], ChatMessage::assistant("two"));
    }
}
