//! Mock provider implementation for testing.

use super::{ContentProvider, FinishReason, ProviderError, ProviderResponse};
use crate::models::GenerationPayload;
use async_trait::async_trait;
use std::sync::Mutex;

enum Reply {
    Text(String),
    Output(String),
    Empty,
    Fail(String),
}

/// Canned-reply provider that records every payload it receives.
pub struct MockProvider {
    model: String,
    reply: Reply,
    received: Mutex<Vec<GenerationPayload>>,
}

impl MockProvider {
    fn with_reply(reply: Reply) -> Self {
        Self {
            model: "mock-model".to_string(),
            reply,
            received: Mutex::new(Vec::new()),
        }
    }

    /// Reply with `text` in the `text` field.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(Reply::Text(text.into()))
    }

    /// Reply with `text` in the `output` field only.
    pub fn replying_output(text: impl Into<String>) -> Self {
        Self::with_reply(Reply::Output(text.into()))
    }

    /// Reply with neither `text` nor `output`.
    pub fn replying_empty() -> Self {
        Self::with_reply(Reply::Empty)
    }

    /// Fail every call with an API error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(Reply::Fail(message.into()))
    }

    /// Payloads received so far, oldest first.
    pub fn received(&self) -> Vec<GenerationPayload> {
        self.received
            .lock()
            .map(|payloads| payloads.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ContentProvider for MockProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, payload: &GenerationPayload) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut received) = self.received.lock() {
            received.push(payload.clone());
        }

        let (text, output) = match &self.reply {
            Reply::Text(text) => (Some(text.clone()), None),
            Reply::Output(output) => (None, Some(output.clone())),
            Reply::Empty => (None, None),
            Reply::Fail(message) => return Err(ProviderError::ApiError(message.clone())),
        };

        Ok(ProviderResponse {
            text,
            output,
            input_tokens: 0,
            output_tokens: 0,
            finish_reason: FinishReason::Complete,
        })
    }
}
