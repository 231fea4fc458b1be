//! Request-scoped domain models for the gateway.

pub mod content;
pub mod media;

pub use content::{
    Attachment, ConversationTurn, GenerationPayload, GenerationRequest, Message, Part, Role,
};
pub use media::MediaKind;
