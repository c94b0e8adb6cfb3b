use serde::Serialize;

use crate::types::{ChatMessage, Role};

/// The body of a chat completions request, built fresh for each call.
///
/// Serializes to the OpenAI-compatible `{model, messages}` shape. When
/// instructions are set they appear twice: embedded as a leading system
/// message and as a top-level `instructions` field. Some provider variants
/// expect one, some the other; sending both is tolerated in practice but
/// unconfirmed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// The model to query.
    pub model: String,

    /// The conversation so far, oldest first, system message (if any) first.
    pub messages: Vec<ChatMessage>,

    /// Conversation-level instructions, duplicated from the system message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl ChatRequest {
    /// Create a request with an explicit message list and no instructions.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            instructions: None,
        }
    }

    /// Build a request from instructions and an accumulated transcript.
    ///
    /// Non-empty instructions are prepended as a system message; the turns
    /// follow in their original order. Empty or absent instructions add
    /// neither the system message nor the top-level field.
    pub fn from_conversation(
        model: impl Into<String>,
        instructions: Option<&str>,
        turns: &[ChatMessage],
    ) -> Self {
        let instructions = instructions.filter(|s| !s.is_empty());
        let mut messages = Vec::with_capacity(turns.len() + 1);
        if let Some(instructions) = instructions {
            messages.push(ChatMessage::new(Role::System, instructions));
        }
        messages.extend_from_slice(turns);
        Self {
            model: model.into(),
            messages,
            instructions: instructions.map(String::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_prepends_system_message() {
        let turns = vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")];
        let request = ChatRequest::from_conversation("test-model", Some("be brief"), &turns);

        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0], ChatMessage::system("be brief"));
        assert_eq!(request.messages[1], ChatMessage::user("hi"));
        assert_eq!(request.messages[2], ChatMessage::assistant("hello"));
        assert_eq!(request.instructions.as_deref(), Some("be brief"));
    }

    #[test]
    fn empty_instructions_are_omitted() {
        let turns = vec![ChatMessage::user("hi")];

        let request = ChatRequest::from_conversation("test-model", None, &turns);
        assert_eq!(request.messages.len(), 1);
        assert!(request.instructions.is_none());

        let request = ChatRequest::from_conversation("test-model", Some(""), &turns);
        assert_eq!(request.messages.len(), 1);
        assert!(request.instructions.is_none());
    }

    #[test]
    fn serializes_to_wire_shape() {
        let request = ChatRequest::from_conversation(
            "test-model",
            Some("be brief"),
            &[ChatMessage::user("hi")],
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "test-model",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hi"},
                ],
                "instructions": "be brief",
            })
        );
    }

    #[test]
    fn instructions_field_skipped_when_absent() {
        let request = ChatRequest::new("test-model", vec![ChatMessage::user("hi")]);
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("instructions"));
    }
}
