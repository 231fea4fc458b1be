use super::{rejected, run_generation};
use crate::dtos::{ChatRequest, ResultResponse};
use crate::services::normalizer::normalize_chat;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::extract::JsonBody;

const ROUTE: &str = "chat";

pub async fn chat(
    State(state): State<AppState>,
    body: Result<JsonBody<ChatRequest>, AppError>,
) -> Result<Json<ResultResponse>, AppError> {
    let JsonBody(request) = body.map_err(|e| rejected(ROUTE, e))?;
    let payload = normalize_chat(&request).map_err(|e| rejected(ROUTE, e))?;

    tracing::debug!(
        route = ROUTE,
        turns = payload.contents.len(),
        has_instruction = payload.system_instruction.is_some(),
        "Chat request normalized"
    );

    run_generation(&state, ROUTE, payload).await
}
