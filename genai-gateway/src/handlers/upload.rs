use super::{rejected, run_generation};
use crate::dtos::ResultResponse;
use crate::models::{Attachment, GenerationPayload, GenerationRequest, MediaKind};
use crate::services::normalizer::{normalize_attachment, trimmed, NormalizeError};
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use service_core::error::AppError;

const PROMPT_FIELD: &str = "prompt";

pub async fn generate_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ResultResponse>, AppError> {
    handle_upload(&state, MediaKind::Image, multipart).await
}

pub async fn generate_from_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ResultResponse>, AppError> {
    handle_upload(&state, MediaKind::Document, multipart).await
}

pub async fn generate_from_audio(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ResultResponse>, AppError> {
    handle_upload(&state, MediaKind::Audio, multipart).await
}

async fn handle_upload(
    state: &AppState,
    kind: MediaKind,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ResultResponse>, AppError> {
    let route = kind.route_name();

    let multipart = multipart.map_err(|e| rejected(route, e))?;
    let request = read_upload(kind, multipart, state.config.limits.upload_bytes)
        .await
        .map_err(|e| rejected(route, e))?;

    if let Some(attachment) = &request.attachment {
        tracing::info!(
            route,
            mime_type = %attachment.mime_type,
            size_bytes = attachment.size_bytes(),
            file_name = attachment.file_name.as_deref().unwrap_or("-"),
            has_prompt = request.prompt.is_some(),
            "Upload received"
        );
    }

    let parts = normalize_attachment(kind, &request).map_err(|e| rejected(route, e))?;

    run_generation(state, route, GenerationPayload::single_turn(parts)).await
}

/// Collect the prompt and the single file field for `kind`.
///
/// Other fields are skipped. The file is read chunk by chunk and rejected as
/// soon as it grows past `limit_bytes`.
async fn read_upload(
    kind: MediaKind,
    mut multipart: Multipart,
    limit_bytes: usize,
) -> Result<GenerationRequest, AppError> {
    let mut request = GenerationRequest::default();

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name == PROMPT_FIELD {
            let text = field.text().await?;
            request.prompt = trimmed(Some(&text));
        } else if name == kind.field_name() {
            if request.attachment.is_some() {
                return Err(NormalizeError::Validation(format!(
                    "Only one {} file may be uploaded",
                    kind.field_name()
                ))
                .into());
            }

            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let file_name = field.file_name().map(str::to_string);

            let mut data = Vec::new();
            while let Some(chunk) = field.chunk().await? {
                if data.len() + chunk.len() > limit_bytes {
                    return Err(NormalizeError::PayloadTooLarge { kind, limit_bytes }.into());
                }
                data.extend_from_slice(&chunk);
            }

            request.attachment = Some(Attachment {
                bytes: Bytes::from(data),
                mime_type,
                file_name,
            });
        }
    }

    Ok(request)
}
