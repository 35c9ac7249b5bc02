use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /chat/send`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// User message.
    pub message: String,
    /// Extra context for the assistant; empty when none.
    #[serde(default)]
    pub context: String,
}

impl ChatRequest {
    /// Builds a request with an empty context.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: String::new(),
        }
    }
}

/// Assistant reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    /// Reply text.
    pub response: String,
}

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatEntry {
    /// Who wrote it.
    pub role: ChatRole,
    /// What was written.
    pub content: String,
}

impl ChatEntry {
    /// Entry written by the user.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Entry written by the assistant.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_context() {
        let request: ChatRequest = serde_json::from_str(r#"{"message":"hello"}"#).expect("request");
        assert_eq!(request.context, "");
        assert_eq!(request, ChatRequest::new("hello"));
    }

    #[test]
    fn test_role_serialization() {
        let entry = ChatEntry::assistant("hi");
        let json = serde_json::to_string(&entry).expect("serialize");
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
        assert_eq!(ChatRole::User.to_string(), "user");
    }
}
