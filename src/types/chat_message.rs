use serde::{Deserialize, Serialize};

/// A single entry in a chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// The text of the message.
    pub content: String,

    /// The role of the message.
    pub role: ChatRole,
}

/// Role type for a chat message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// User role.
    User,

    /// Assistant role.
    Assistant,
}

impl ChatMessage {
    /// Create a new `ChatMessage` with the given content and role.
    pub fn new(content: impl Into<String>, role: ChatRole) -> Self {
        Self {
            content: content.into(),
            role,
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, ChatRole::User)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content, ChatRole::Assistant)
    }
}

impl From<&str> for ChatMessage {
    fn from(content: &str) -> Self {
        Self::user(content)
    }
}

impl From<String> for ChatMessage {
    fn from(content: String) -> Self {
        Self::user(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn chat_message_shape() {
        let message = ChatMessage::user("Hello!");
        let json = to_value(&message).unwrap();

        assert_eq!(
            json,
            json!({
                "content": "Hello!",
                "role": "user"
            })
        );
    }

    #[test]
    fn roles_serialize_lowercase() {
        assert_eq!(to_value(ChatRole::User).unwrap(), json!("user"));
        assert_eq!(to_value(ChatRole::Assistant).unwrap(), json!("assistant"));
    }

    #[test]
    fn chat_message_from_str() {
        let message: ChatMessage = "Hello!".into();
        assert_eq!(message.role, ChatRole::User);

        let message = ChatMessage::assistant("Hi there");
        assert_eq!(message.role, ChatRole::Assistant);
        assert_eq!(message.content, "Hi there");
    }

    #[test]
    fn chat_message_deserialization() {
        let message: ChatMessage =
            serde_json::from_value(json!({"content": "reply", "role": "assistant"})).unwrap();
        assert_eq!(message, ChatMessage::assistant("reply"));
    }
}
