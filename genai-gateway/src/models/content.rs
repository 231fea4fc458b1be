//! Normalized content handed to the upstream provider.

use axum::body::Bytes;
use std::fmt;
use std::str::FromStr;

/// One unit of model input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text { text: String },
    /// Base64 payload tagged with its MIME type.
    InlineData { data: String, mime_type: String },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }
}

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Exact match only: `"User"` is not a role.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "model" => Ok(Role::Model),
            other => Err(format!("Invalid role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub parts: Vec<Part>,
}

/// Everything the provider needs for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPayload {
    pub contents: Vec<Message>,
    pub system_instruction: Option<String>,
}

impl GenerationPayload {
    /// A single user message made of `parts`.
    pub fn single_turn(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Message {
                role: Role::User,
                parts,
            }],
            system_instruction: None,
        }
    }

    /// One message per turn, each with a single text part.
    pub fn conversation(turns: Vec<ConversationTurn>, system_instruction: Option<String>) -> Self {
        Self {
            contents: turns
                .into_iter()
                .map(|turn| Message {
                    role: turn.role,
                    parts: vec![Part::Text { text: turn.text }],
                })
                .collect(),
            system_instruction,
        }
    }
}

/// An uploaded file as read off the wire.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub bytes: Bytes,
    /// Type declared by the client, as sent.
    pub mime_type: String,
    pub file_name: Option<String>,
}

impl Attachment {
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Raw input of an upload route: a trimmed optional prompt and at most one file.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub prompt: Option<String>,
    pub attachment: Option<Attachment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_is_exact() {
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert_eq!("model".parse::<Role>(), Ok(Role::Model));
        assert!("User".parse::<Role>().is_err());
        assert!("admin".parse::<Role>().is_err());
        assert!(" user".parse::<Role>().is_err());
    }

    #[test]
    fn conversation_keeps_turn_order() {
        let payload = GenerationPayload::conversation(
            vec![
                ConversationTurn {
                    role: Role::User,
                    text: "hello".into(),
                },
                ConversationTurn {
                    role: Role::Model,
                    text: "hi there".into(),
                },
            ],
            Some("be brief".into()),
        );

        assert_eq!(payload.contents.len(), 2);
        assert_eq!(payload.contents[0].role, Role::User);
        assert_eq!(payload.contents[1].role, Role::Model);
        assert_eq!(payload.contents[1].parts, vec![Part::text("hi there")]);
        assert_eq!(payload.system_instruction.as_deref(), Some("be brief"));
    }

    #[test]
    fn single_turn_is_one_user_message() {
        let payload = GenerationPayload::single_turn(vec![Part::text("hi")]);
        assert_eq!(payload.contents.len(), 1);
        assert_eq!(payload.contents[0].role, Role::User);
        assert!(payload.system_instruction.is_none());
    }
}
