//! Conversation message types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sender role attached to each conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instructions that frame the whole conversation
    System,
    /// Input from the person driving the conversation
    User,
    /// A previous model response
    Assistant,
    /// Tool result; `function` is the legacy spelling
    #[serde(alias = "function")]
    Tool,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::Tool => "tool",
        })
    }
}

/// One element of a multi-part message body.
///
/// Callers may hand over bare strings alongside typed parts; the
/// normalizer upgrades bare fragments to explicit text parts before
/// anything reaches the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    /// Bare text fragment without a type wrapper
    Bare(String),
    /// Explicitly typed part
    Typed(TypedPart),
}

/// A typed content part in provider wire format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypedPart {
    /// Plain text block
    Text { text: String },
    /// Image reference by URL (https or data URI)
    ImageUrl { image_url: ImageRef },
}

/// Image reference payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Image location, either an https URL or a base64 data URI
    pub url: String,
}

/// Message content: either plain text or a list of typed parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content
    Text(String),
    /// Multi-part content mixing text and image references
    Parts(Vec<ContentPart>),
}

/// One message in the conversation handed to a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who produced this message
    pub role: MessageRole,
    /// Text or multi-part body
    pub content: MessageContent,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: MessageContent::Text(content.into()),
        }
    }

    /// Create a user message with plain text content
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::Text(content.into()),
        }
    }

    /// Create a user message carrying text plus one image reference
    pub fn user_with_image(text: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::Parts(vec![
                ContentPart::Typed(TypedPart::Text { text: text.into() }),
                ContentPart::Typed(TypedPart::ImageUrl {
                    image_url: ImageRef {
                        url: image_url.into(),
                    },
                }),
            ]),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: MessageContent::Text(content.into()),
        }
    }

    /// Create a tool result message
    pub fn tool(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Tool,
            content: MessageContent::Text(content.into()),
        }
    }

    /// Create a message with multi-part content
    pub fn with_parts(role: MessageRole, parts: Vec<ContentPart>) -> Self {
        Self {
            role,
            content: MessageContent::Parts(parts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MessageRole::Assistant).unwrap(),
            "\"assistant\""
        );
        assert_eq!(MessageRole::Tool.to_string(), "tool");
    }

    #[test]
    fn test_function_role_deserializes_as_tool() {
        let role: MessageRole = serde_json::from_str("\"function\"").unwrap();
        assert_eq!(role, MessageRole::Tool);
    }

    #[test]
    fn test_typed_part_wire_shape() {
        let part = TypedPart::Text {
            text: "hello".to_string(),
        };
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json, serde_json::json!({"type": "text", "text": "hello"}));

        let image = TypedPart::ImageUrl {
            image_url: ImageRef {
                url: "https://example.com/site.jpg".to_string(),
            },
        };
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "image_url",
                "image_url": {"url": "https://example.com/site.jpg"}
            })
        );
    }

    #[test]
    fn test_bare_part_deserializes_from_string() {
        let part: ContentPart = serde_json::from_str("\"just text\"").unwrap();
        assert_eq!(part, ContentPart::Bare("just text".to_string()));
    }

    #[test]
    fn test_user_with_image_builds_two_parts() {
        let msg = ChatMessage::user_with_image("describe this", "https://example.com/a.jpg");
        match &msg.content {
            MessageContent::Parts(parts) => assert_eq!(parts.len(), 2),
            other => panic!("expected parts, got {:?}", other),
        }
    }
}
