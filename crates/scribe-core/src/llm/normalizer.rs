//! Message normalization for the chat-completions wire format
//!
//! Providers are strict about message shapes in ways callers should not
//! have to care about. Normalization applies three rules before dispatch:
//! single-text content collapses to a bare string, multi-part content
//! becomes a list of explicitly typed parts, and tool results are always
//! flattened to one text block because no chat-completions endpoint
//! accepts multi-part tool messages.

use crate::llm::messages::{ChatMessage, ContentPart, MessageContent, MessageRole, TypedPart};
use serde_json::{json, Value};

/// Normalizes conversation messages into provider wire messages
pub struct MessageNormalizer;

impl MessageNormalizer {
    /// Convert a conversation into wire-format message objects.
    ///
    /// Total over all message shapes; normalization never fails.
    pub fn to_wire(messages: &[ChatMessage]) -> Vec<Value> {
        messages.iter().map(Self::message_to_wire).collect()
    }

    fn message_to_wire(message: &ChatMessage) -> Value {
        let role = message.role.to_string();
        let content = if message.role == MessageRole::Tool {
            Value::String(flatten_to_text(&message.content))
        } else {
            normalize_content(&message.content)
        };
        json!({"role": role, "content": content})
    }
}

/// Apply the single-text collapse and bare-string upgrade rules
fn normalize_content(content: &MessageContent) -> Value {
    match content {
        MessageContent::Text(text) => Value::String(text.clone()),
        MessageContent::Parts(parts) => match parts.as_slice() {
            [] => Value::String(String::new()),
            [single] => match part_text(single) {
                Some(text) => Value::String(text.to_string()),
                None => Value::Array(vec![part_to_wire(single)]),
            },
            many => Value::Array(many.iter().map(part_to_wire).collect()),
        },
    }
}

/// Upgrade a bare fragment to an explicit text part; pass typed parts through
fn part_to_wire(part: &ContentPart) -> Value {
    match part {
        ContentPart::Bare(text) => json!({"type": "text", "text": text}),
        ContentPart::Typed(typed) => {
            serde_json::to_value(typed).unwrap_or_else(|_| Value::String(String::new()))
        }
    }
}

/// The plain text of a part, when it has one
fn part_text(part: &ContentPart) -> Option<&str> {
    match part {
        ContentPart::Bare(text) => Some(text),
        ContentPart::Typed(TypedPart::Text { text }) => Some(text),
        ContentPart::Typed(_) => None,
    }
}

/// Serialize tool-result content to a single text block.
///
/// List elements are joined by newline. Bare fragments and typed text
/// parts contribute their text rather than their JSON wrapper; elements
/// without plain text are JSON-stringified so nothing is silently
/// dropped.
fn flatten_to_text(content: &MessageContent) -> String {
    match content {
        MessageContent::Text(text) => text.clone(),
        MessageContent::Parts(parts) => parts
            .iter()
            .map(|part| match part_text(part) {
                Some(text) => text.to_string(),
                None => part_to_wire(part).to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::messages::ImageRef;

    #[test]
    fn test_plain_text_stays_bare_string() {
        let wire = MessageNormalizer::to_wire(&[ChatMessage::user("hello")]);
        assert_eq!(wire[0], json!({"role": "user", "content": "hello"}));
    }

    #[test]
    fn test_single_text_part_collapses_to_bare_string() {
        let msg = ChatMessage::with_parts(
            MessageRole::User,
            vec![ContentPart::Typed(TypedPart::Text {
                text: "only text".to_string(),
            })],
        );
        let wire = MessageNormalizer::to_wire(&[msg]);
        assert_eq!(wire[0]["content"], json!("only text"));
    }

    #[test]
    fn test_single_bare_part_collapses_too() {
        let msg = ChatMessage::with_parts(
            MessageRole::User,
            vec![ContentPart::Bare("loose".to_string())],
        );
        let wire = MessageNormalizer::to_wire(&[msg]);
        assert_eq!(wire[0]["content"], json!("loose"));
    }

    #[test]
    fn test_single_image_part_stays_a_list() {
        let msg = ChatMessage::with_parts(
            MessageRole::User,
            vec![ContentPart::Typed(TypedPart::ImageUrl {
                image_url: ImageRef {
                    url: "https://example.com/roof.jpg".to_string(),
                },
            })],
        );
        let wire = MessageNormalizer::to_wire(&[msg]);
        assert!(wire[0]["content"].is_array());
    }

    #[test]
    fn test_bare_strings_upgraded_in_multi_part_lists() {
        let msg = ChatMessage::with_parts(
            MessageRole::User,
            vec![
                ContentPart::Bare("describe the photo".to_string()),
                ContentPart::Typed(TypedPart::ImageUrl {
                    image_url: ImageRef {
                        url: "https://example.com/roof.jpg".to_string(),
                    },
                }),
            ],
        );
        let wire = MessageNormalizer::to_wire(&[msg]);
        assert_eq!(
            wire[0]["content"],
            json!([
                {"type": "text", "text": "describe the photo"},
                {"type": "image_url", "image_url": {"url": "https://example.com/roof.jpg"}}
            ])
        );
    }

    #[test]
    fn test_tool_message_flattens_parts_to_one_text_block() {
        let msg = ChatMessage::with_parts(
            MessageRole::Tool,
            vec![
                ContentPart::Bare("lookup result".to_string()),
                ContentPart::Typed(TypedPart::Text {
                    text: "second line".to_string(),
                }),
                ContentPart::Typed(TypedPart::ImageUrl {
                    image_url: ImageRef {
                        url: "https://example.com/x.png".to_string(),
                    },
                }),
            ],
        );
        let wire = MessageNormalizer::to_wire(&[msg]);
        let content = wire[0]["content"].as_str().unwrap();
        let lines: Vec<&str> = content.split('\n').collect();
        assert_eq!(lines[0], "lookup result");
        assert_eq!(lines[1], "second line");
        assert!(lines[2].contains("image_url"));
    }

    #[test]
    fn test_tool_message_with_plain_text_unchanged() {
        let wire = MessageNormalizer::to_wire(&[ChatMessage::tool("done")]);
        assert_eq!(wire[0], json!({"role": "tool", "content": "done"}));
    }

    #[test]
    fn test_multi_turn_conversation_keeps_roles() {
        let wire = MessageNormalizer::to_wire(&[
            ChatMessage::system("You write inspection reports."),
            ChatMessage::user("Summarize the roof findings."),
            ChatMessage::assistant("The roof shows hail damage."),
            ChatMessage::tool("lookup done"),
        ]);
        let roles: Vec<&str> = wire.iter().map(|m| m["role"].as_str().unwrap()).collect();
        assert_eq!(roles, ["system", "user", "assistant", "tool"]);
        assert_eq!(wire[2]["content"], json!("The roof shows hail damage."));
    }

    #[test]
    fn test_empty_part_list_becomes_empty_string() {
        let msg = ChatMessage::with_parts(MessageRole::User, vec![]);
        let wire = MessageNormalizer::to_wire(&[msg]);
        assert_eq!(wire[0]["content"], json!(""));
    }
}
