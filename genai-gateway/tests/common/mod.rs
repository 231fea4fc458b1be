use genai_gateway::config::{
    GatewayConfig, GeminiSettings, LimitsConfig, StaticFilesConfig, DEFAULT_API_BASE,
};
use genai_gateway::services::providers::mock::MockProvider;
use genai_gateway::startup::Application;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::path::PathBuf;
use std::sync::Arc;

pub const TEST_MODEL: &str = "gemini-test-model";

pub struct TestApp {
    pub address: String,
    pub provider: Arc<MockProvider>,
    pub client: reqwest::Client,
}

pub fn test_config() -> GatewayConfig {
    GatewayConfig {
        common: CoreConfig { port: 0 }, // Random port for testing
        gemini: GeminiSettings {
            api_key: Secret::new("test-api-key".to_string()),
            model: TEST_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: 5,
        },
        limits: LimitsConfig::default(),
        static_files: StaticFilesConfig {
            dir: PathBuf::from("target/test-static-missing"),
        },
    }
}

impl TestApp {
    pub async fn spawn(provider: MockProvider) -> Self {
        Self::spawn_with_config(test_config(), provider).await
    }

    pub async fn spawn_with_config(config: GatewayConfig, provider: MockProvider) -> Self {
        let provider = Arc::new(provider);

        let app = Application::build_with_provider(config, provider.clone())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            provider,
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_form(&self, path: &str, form: reqwest::multipart::Form) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Body of an error response.
pub async fn message_of(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    body["message"]
        .as_str()
        .expect("error body has no message")
        .to_string()
}
