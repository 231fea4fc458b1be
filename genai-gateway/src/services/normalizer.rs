//! Request normalization.
//!
//! Turns validated route input into the ordered [`Part`] sequences sent
//! upstream, and pulls the text back out of the provider's reply. Every
//! function here is pure: the same input always yields the same output.

use crate::dtos::{ChatRequest, TextRequest};
use crate::models::media::mime_essence;
use crate::models::{ConversationTurn, GenerationPayload, GenerationRequest, MediaKind, Part, Role};
use crate::services::providers::ProviderResponse;
use base64::{engine::general_purpose::STANDARD, Engine};
use service_core::error::{first_validation_message, AppError};
use thiserror::Error;
use validator::Validate;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("{0}")]
    Validation(String),

    #[error("Unsupported {} type: {mime_type}. Allowed types: {}", kind.to_string().to_lowercase(), kind.allowed_mime_types().join(", "))]
    UnsupportedMedia { kind: MediaKind, mime_type: String },

    #[error("{kind} file exceeds the {limit_bytes} byte limit")]
    PayloadTooLarge { kind: MediaKind, limit_bytes: usize },
}

impl From<NormalizeError> for AppError {
    fn from(err: NormalizeError) -> Self {
        let message = err.to_string();
        match err {
            NormalizeError::Validation(_) => AppError::ValidationError(message),
            NormalizeError::UnsupportedMedia { .. } => AppError::UnsupportedMediaType(message),
            NormalizeError::PayloadTooLarge { .. } => AppError::PayloadTooLarge(message),
        }
    }
}

/// Trim `value`, mapping blank strings to `None`.
pub fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// `/generate-text`: the prompt is mandatory and must survive trimming.
pub fn normalize_text(request: &TextRequest) -> Result<Vec<Part>, NormalizeError> {
    let prompt = trimmed(request.prompt.as_deref())
        .ok_or_else(|| NormalizeError::Validation("prompt is required".to_string()))?;

    Ok(vec![Part::Text { text: prompt }])
}

/// Upload routes: an optional text part followed by the file as inline data.
///
/// A missing file is reported before the type is looked at.
pub fn normalize_attachment(
    kind: MediaKind,
    request: &GenerationRequest,
) -> Result<Vec<Part>, NormalizeError> {
    let attachment = request
        .attachment
        .as_ref()
        .ok_or_else(|| NormalizeError::Validation(format!("{} file is required", kind)))?;

    let mime_type = mime_essence(&attachment.mime_type);
    if !kind.allows(&mime_type) {
        return Err(NormalizeError::UnsupportedMedia {
            kind,
            mime_type: attachment.mime_type.clone(),
        });
    }

    let mut parts = Vec::with_capacity(2);
    if let Some(prompt) = trimmed(request.prompt.as_deref()) {
        parts.push(Part::Text { text: prompt });
    }
    parts.push(Part::InlineData {
        data: STANDARD.encode(&attachment.bytes),
        mime_type,
    });

    Ok(parts)
}

/// `/api/chat`: turns pass through in order; the instruction is trimmed and
/// dropped when blank.
pub fn normalize_chat(request: &ChatRequest) -> Result<GenerationPayload, NormalizeError> {
    request.validate().map_err(|errors| {
        NormalizeError::Validation(
            first_validation_message(&errors).unwrap_or_else(|| "Invalid conversation".to_string()),
        )
    })?;

    // Roles were checked by `validate`; every one parses here.
    let turns = request
        .conversation
        .iter()
        .filter_map(|turn| {
            turn.role.parse::<Role>().ok().map(|role| ConversationTurn {
                role,
                text: turn.text.clone(),
            })
        })
        .collect();

    Ok(GenerationPayload::conversation(
        turns,
        trimmed(request.instruction.as_deref()),
    ))
}

/// Text of a provider reply.
///
/// The upstream reply shape is not pinned down: the text may arrive as
/// `text` or as `output`. The first non-empty one wins.
pub fn extract_result(response: &ProviderResponse) -> Option<&str> {
    non_empty(&response.text).or_else(|| non_empty(&response.output))
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
