mod common;

use common::{message_of, TestApp};
use genai_gateway::models::Part;
use genai_gateway::services::providers::mock::MockProvider;
use reqwest::multipart::{Form, Part as FormPart};

fn file(bytes: Vec<u8>, name: &str, mime: &str) -> FormPart {
    FormPart::bytes(bytes)
        .file_name(name.to_string())
        .mime_str(mime)
        .unwrap()
}

#[tokio::test]
async fn image_and_prompt_are_forwarded() {
    let app = TestApp::spawn(MockProvider::replying("A red square")).await;

    let form = Form::new()
        .text("prompt", "  What is this?  ")
        .part("image", file(b"abc".to_vec(), "square.png", "image/png"));

    let response = app.post_form("/generate-image", form).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["result"], "A red square");

    let received = app.provider.received();
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0].contents[0].parts,
        vec![
            Part::text("What is this?"),
            Part::InlineData {
                data: "YWJj".to_string(),
                mime_type: "image/png".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn prompt_after_file_is_still_used() {
    let app = TestApp::spawn(MockProvider::replying("ok")).await;

    let form = Form::new()
        .part("document", file(b"# Notes".to_vec(), "notes.md", "text/markdown"))
        .text("prompt", "Summarize");

    let response = app.post_form("/generate-from-document", form).await;

    assert_eq!(response.status().as_u16(), 200);
    let parts = &app.provider.received()[0].contents[0].parts;
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], Part::text("Summarize"));
}

#[tokio::test]
async fn upload_without_prompt_sends_only_the_file() {
    let app = TestApp::spawn(MockProvider::replying("transcript")).await;

    let form = Form::new().part("audio", file(vec![0u8; 32], "clip.webm", "audio/webm"));

    let response = app.post_form("/generate-from-audio", form).await;

    assert_eq!(response.status().as_u16(), 200);
    let parts = &app.provider.received()[0].contents[0].parts;
    assert_eq!(parts.len(), 1);
    assert!(matches!(parts[0], Part::InlineData { .. }));
}

#[tokio::test]
async fn unsupported_image_type_is_415() {
    let app = TestApp::spawn(MockProvider::replying("unused")).await;

    let form = Form::new().part("image", file(b"BM".to_vec(), "pic.bmp", "image/bmp"));

    let response = app.post_form("/generate-image", form).await;

    assert_eq!(response.status().as_u16(), 415);
    let message = message_of(response).await;
    assert!(message.contains("image/bmp"), "{}", message);
    assert!(app.provider.received().is_empty());
}

#[tokio::test]
async fn unsupported_document_type_is_415() {
    let app = TestApp::spawn(MockProvider::replying("unused")).await;

    let form = Form::new().part("document", file(b"{}".to_vec(), "data.json", "application/json"));

    let response = app.post_form("/generate-from-document", form).await;

    assert_eq!(response.status().as_u16(), 415);
}

#[tokio::test]
async fn missing_audio_file_is_400() {
    let app = TestApp::spawn(MockProvider::replying("unused")).await;

    let form = Form::new().text("prompt", "transcribe this");

    let response = app.post_form("/generate-from-audio", form).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(message_of(response).await, "Audio file is required");
}

#[tokio::test]
async fn file_under_the_wrong_field_is_ignored() {
    let app = TestApp::spawn(MockProvider::replying("unused")).await;

    let form = Form::new().part("file", file(b"abc".to_vec(), "square.png", "image/png"));

    let response = app.post_form("/generate-image", form).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(message_of(response).await, "Image file is required");
}

#[tokio::test]
async fn second_file_is_rejected() {
    let app = TestApp::spawn(MockProvider::replying("unused")).await;

    let form = Form::new()
        .part("image", file(b"a".to_vec(), "a.png", "image/png"))
        .part("image", file(b"b".to_vec(), "b.png", "image/png"));

    let response = app.post_form("/generate-image", form).await;

    assert_eq!(response.status().as_u16(), 400);
    assert!(app.provider.received().is_empty());
}

#[tokio::test]
async fn oversized_file_is_413() {
    let mut config = common::test_config();
    config.limits.upload_bytes = 1024;
    let app = TestApp::spawn_with_config(config, MockProvider::replying("unused")).await;

    let form = Form::new().part("image", file(vec![0u8; 2048], "big.png", "image/png"));

    let response = app.post_form("/generate-image", form).await;

    assert_eq!(response.status().as_u16(), 413);
    assert!(app.provider.received().is_empty());
}

#[tokio::test]
async fn file_at_exact_limit_is_accepted() {
    let mut config = common::test_config();
    config.limits.upload_bytes = 1024;
    let app = TestApp::spawn_with_config(config, MockProvider::replying("fits")).await;

    let form = Form::new().part("image", file(vec![0u8; 1024], "edge.png", "image/png"));

    let response = app.post_form("/generate-image", form).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["result"], "fits");
    assert_eq!(app.provider.received().len(), 1);
}

#[tokio::test]
async fn non_multipart_body_is_400() {
    let app = TestApp::spawn(MockProvider::replying("unused")).await;

    let response = app
        .post_json("/generate-image", serde_json::json!({ "prompt": "hi" }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn upstream_failure_on_upload_is_500() {
    let app = TestApp::spawn(MockProvider::failing("upstream down")).await;

    let form = Form::new().part("image", file(b"abc".to_vec(), "square.png", "image/png"));

    let response = app.post_form("/generate-image", form).await;

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(message_of(response).await, "upstream down");
}
