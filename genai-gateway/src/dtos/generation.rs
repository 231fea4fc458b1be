use serde::{Deserialize, Serialize};

/// Body of `POST /generate-text`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Success envelope shared by every generation route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultResponse {
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub model: String,
    pub service: &'static str,
    pub version: &'static str,
}
