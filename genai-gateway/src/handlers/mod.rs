//! HTTP handlers for the gateway routes.

pub mod chat;
pub mod generate;
pub mod health;
pub mod upload;

pub use chat::chat;
pub use generate::generate_text;
pub use health::{health_check, metrics_endpoint};
pub use upload::{generate_from_audio, generate_from_document, generate_image};

use crate::dtos::ResultResponse;
use crate::models::GenerationPayload;
use crate::services::metrics::{record_generation, record_upstream_latency, Outcome};
use crate::services::normalizer::extract_result;
use crate::startup::AppState;
use axum::Json;
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Instant;

/// Log and count a request that failed before reaching the provider.
fn rejected(route: &'static str, err: impl Into<AppError>) -> AppError {
    let err = err.into();
    tracing::warn!(route, status = %err.status(), error = %err, "Request rejected");
    record_generation(route, Outcome::Rejected);
    err
}

fn upstream_failure(route: &'static str, err: AppError) -> AppError {
    tracing::error!(route, error = %err, "Generation failed");
    record_generation(route, Outcome::UpstreamError);
    err
}

/// Send `payload` upstream and wrap the reply text in a `{result}` envelope.
async fn run_generation(
    state: &AppState,
    route: &'static str,
    payload: GenerationPayload,
) -> Result<Json<ResultResponse>, AppError> {
    let provider = Arc::clone(&state.provider);
    let started = Instant::now();

    // Runs detached: a client disconnect drops this handler but not the call.
    let outcome = tokio::spawn(async move { provider.generate(&payload).await }).await;
    record_upstream_latency(route, started.elapsed());

    let response = match outcome {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => return Err(upstream_failure(route, e.into())),
        Err(e) => {
            return Err(upstream_failure(
                route,
                AppError::InternalError(anyhow::anyhow!("Generation task failed: {}", e)),
            ))
        }
    };

    let result = extract_result(&response).ok_or_else(|| {
        upstream_failure(
            route,
            AppError::UpstreamError("Upstream response contained no text".to_string()),
        )
    })?;

    tracing::info!(
        route,
        model = state.provider.model(),
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        finish_reason = ?response.finish_reason,
        "Generation completed"
    );
    record_generation(route, Outcome::Success);

    Ok(Json(ResultResponse {
        result: result.to_string(),
    }))
}
