use super::{rejected, run_generation};
use crate::dtos::{ResultResponse, TextRequest};
use crate::models::GenerationPayload;
use crate::services::normalizer::normalize_text;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::extract::JsonBody;

const ROUTE: &str = "generate-text";

pub async fn generate_text(
    State(state): State<AppState>,
    body: Result<JsonBody<TextRequest>, AppError>,
) -> Result<Json<ResultResponse>, AppError> {
    let JsonBody(request) = body.map_err(|e| rejected(ROUTE, e))?;
    let parts = normalize_text(&request).map_err(|e| rejected(ROUTE, e))?;

    run_generation(&state, ROUTE, GenerationPayload::single_turn(parts)).await
}
