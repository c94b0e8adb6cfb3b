//! Assistant-text extraction from variably-shaped completion replies.
//!
//! Providers nest the answer differently: the OpenAI chat shape puts it at
//! `choices[0].message.content`, older completion shapes at
//! `choices[0].text`, and some gateways return it under a top-level key
//! like `output` or `generated_text`. Rather than nested conditionals, the
//! cascade is an ordered list of matcher rules evaluated in priority
//! order; the first rule that locates a value wins, and when none does the
//! whole reply is serialized so the caller still has something to show.

use serde_json::Value;

/// A shape rule locates the candidate answer value within a reply, if the
/// reply matches the shape the rule knows about.
type Rule = fn(&Value) -> Option<&Value>;

/// Shape rules in priority order. Most specific/common first.
const RULES: &[Rule] = &[choice_message_content, choice_fallback_key, top_level_key];

/// Top-level keys some providers use instead of a `choices` array.
const TOP_LEVEL_KEYS: &[&str] = &["output", "result", "response", "generated_text", "text"];

/// Extracts assistant text from a parsed completion reply.
///
/// Always produces a string: a matched value is returned as-is when it is
/// already text and serialized otherwise, and a reply matching no known
/// shape is serialized wholesale. A serialization fault is reported inline
/// as `<error extracting text: ...>` rather than propagated.
pub fn extract_text(value: &Value) -> String {
    match try_extract(value) {
        Ok(text) => text,
        Err(err) => format!("<error extracting text: {err}>"),
    }
}

fn try_extract(value: &Value) -> Result<String, serde_json::Error> {
    for rule in RULES {
        if let Some(found) = rule(value) {
            return match found {
                Value::String(text) => Ok(text.clone()),
                other => serde_json::to_string(other),
            };
        }
    }
    serde_json::to_string(value)
}

fn first_choice(value: &Value) -> Option<&Value> {
    value.get("choices")?.as_array()?.first()
}

fn choice_message_content(value: &Value) -> Option<&Value> {
    first_choice(value)?.get("message")?.as_object()?.get("content")
}

fn choice_fallback_key(value: &Value) -> Option<&Value> {
    let choice = first_choice(value)?;
    ["text", "content", "output"]
        .iter()
        .find_map(|key| choice.get(key))
}

fn top_level_key(value: &Value) -> Option<&Value> {
    TOP_LEVEL_KEYS
        .iter()
        .filter_map(|key| value.get(key))
        .find(|candidate| is_truthy(candidate))
}

/// Truthiness in the loose, dynamic-language sense: null, false, zero, and
/// empty strings/arrays/objects all count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn openai_chat_shape() {
        let reply = json!({"choices": [{"message": {"content": "hello"}}]});
        assert_eq!(extract_text(&reply), "hello");
    }

    #[test]
    fn legacy_completion_shape() {
        let reply = json!({"choices": [{"text": "fallback-text"}]});
        assert_eq!(extract_text(&reply), "fallback-text");
    }

    #[test]
    fn choice_key_order_is_fixed() {
        // `text` beats `content` beats `output` within a choice.
        let reply = json!({"choices": [{"output": "c", "content": "b", "text": "a"}]});
        assert_eq!(extract_text(&reply), "a");

        let reply = json!({"choices": [{"output": "c", "content": "b"}]});
        assert_eq!(extract_text(&reply), "b");
    }

    #[test]
    fn message_without_content_falls_back_to_choice_keys() {
        let reply = json!({"choices": [{"message": {"role": "assistant"}, "text": "plan b"}]});
        assert_eq!(extract_text(&reply), "plan b");
    }

    #[test]
    fn empty_choices_falls_through_to_top_level_keys() {
        let reply = json!({"choices": [], "output": "direct"});
        assert_eq!(extract_text(&reply), "direct");
    }

    #[test]
    fn top_level_string_key() {
        let reply = json!({"output": "direct"});
        assert_eq!(extract_text(&reply), "direct");
    }

    #[test]
    fn top_level_non_string_is_serialized() {
        let reply = json!({"output": {"nested": 1}});
        assert_eq!(extract_text(&reply), r#"{"nested":1}"#);
    }

    #[test]
    fn falsy_top_level_values_are_skipped() {
        // Empty string under `output` is falsy; `text` supplies the answer.
        let reply = json!({"output": "", "text": "real answer"});
        assert_eq!(extract_text(&reply), "real answer");

        let reply = json!({"result": null, "response": "ok"});
        assert_eq!(extract_text(&reply), "ok");
    }

    #[test]
    fn unknown_shape_is_serialized_wholesale() {
        let reply = json!({"foo": "bar"});
        assert_eq!(extract_text(&reply), r#"{"foo":"bar"}"#);
    }

    #[test]
    fn non_object_replies_are_serialized() {
        assert_eq!(extract_text(&json!("just a string")), r#""just a string""#);
        assert_eq!(extract_text(&json!([1, 2, 3])), "[1,2,3]");
        assert_eq!(extract_text(&json!(null)), "null");
    }

    #[test]
    fn choice_keys_do_not_require_truthiness() {
        // Unlike top-level keys, an empty string inside a choice is still
        // returned as the answer.
        let reply = json!({"choices": [{"text": ""}], "output": "ignored"});
        assert_eq!(extract_text(&reply), "");
    }
}
