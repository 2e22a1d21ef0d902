use httpmock::prelude::*;
use serde_json::json;

use abaco::auth::Credential;
use abaco::error::EvalError;
use abaco::thinker::Thinker;
use abaco::thinker::openai::OpenAiThinker;

#[tokio::test]
async fn sends_bearer_model_input_and_zero_temperature() {
    let server = MockServer::start_async().await;
    let completion = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/responses")
                .header("authorization", "Bearer abc")
                .header("content-type", "application/json")
                .json_body(json!({
                    "model": "gpt-4.1-mini",
                    "input": "what is 2+2",
                    "temperature": 0.0
                }));
            then.status(200)
                .json_body(json!({"output_text": "{\"resultado\":4,\"latex\":\"2+2=4\"}"}));
        })
        .await;

    let thinker = OpenAiThinker::new(server.url("/v1/responses"), "gpt-4.1-mini");
    let text = thinker
        .complete(&Credential::new("abc"), "what is 2+2")
        .await
        .unwrap();

    assert_eq!(text, r#"{"resultado":4,"latex":"2+2=4"}"#);
    completion.assert_async().await;
}

#[tokio::test]
async fn reads_structured_output() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/responses");
            then.status(200).json_body(json!({
                "id": "resp_123",
                "output": [{
                    "type": "message",
                    "role": "assistant",
                    "content": [{"type": "output_text", "text": "nested text"}]
                }]
            }));
        })
        .await;

    let thinker = OpenAiThinker::new(server.url("/v1/responses"), "gpt-4.1-mini");
    let text = thinker.complete(&Credential::new("k"), "p").await.unwrap();
    assert_eq!(text, "nested text");
}

#[tokio::test]
async fn no_text_is_schema_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/responses");
            then.status(200).json_body(json!({"id": "resp_123", "output": []}));
        })
        .await;

    let thinker = OpenAiThinker::new(server.url("/v1/responses"), "gpt-4.1-mini");
    let err = thinker.complete(&Credential::new("k"), "p").await.unwrap_err();
    assert!(matches!(err, EvalError::CompletionSchema(_)));
    assert!(err.to_string().contains("no text in response"));
}

#[tokio::test]
async fn http_error_keeps_body_out_of_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/responses");
            then.status(401)
                .json_body(json!({"error": {"message": "Incorrect API key provided"}}));
        })
        .await;

    let thinker = OpenAiThinker::new(server.url("/v1/responses"), "gpt-4.1-mini");
    let err = thinker.complete(&Credential::new("bad"), "p").await.unwrap_err();

    match &err {
        EvalError::CompletionTransport { status, body } => {
            assert_eq!(*status, 401);
            assert!(body.contains("Incorrect API key"));
        }
        other => panic!("expected CompletionTransport, got {other:?}"),
    }
    assert!(err.is_unauthorized());
    assert!(!err.to_string().contains("Incorrect API key"));
}
