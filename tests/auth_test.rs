use httpmock::prelude::*;
use serde_json::json;

use abaco::auth::{Credential, KeyLoader, Session};
use abaco::error::EvalError;

// ── Accepted shapes ───────────────────────────────────────────────

#[tokio::test]
async fn array_response_stores_first_key() {
    let server = MockServer::start_async().await;
    let keys = server
        .mock_async(|when, then| {
            when.method(GET).path("/apiKeyOpenAI");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([{"id": "1", "apiKey": "abc"}]));
        })
        .await;

    let loader = KeyLoader::new(server.url("/apiKeyOpenAI"));
    let mut session = Session::new();

    assert!(loader.load_credential(&mut session).await);
    assert_eq!(session.credential().unwrap().expose(), "abc");
    keys.assert_async().await;
}

#[tokio::test]
async fn single_object_response_stores_key() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/key");
            then.status(200).json_body(json!({"apiKey": "sk-single"}));
        })
        .await;

    let loader = KeyLoader::new(server.url("/key"));
    let credential = loader.fetch().await.unwrap();
    assert_eq!(credential.expose(), "sk-single");
}

// ── Rejected shapes ───────────────────────────────────────────────

#[tokio::test]
async fn empty_object_fails_and_stores_nothing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/key");
            then.status(200).json_body(json!({}));
        })
        .await;

    let loader = KeyLoader::new(server.url("/key"));
    let mut session = Session::new();

    assert!(!loader.load_credential(&mut session).await);
    assert!(!session.has_credential());
    assert!(matches!(
        loader.fetch().await,
        Err(EvalError::CredentialSchema { .. })
    ));
}

#[tokio::test]
async fn empty_array_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/key");
            then.status(200).json_body(json!([]));
        })
        .await;

    let loader = KeyLoader::new(server.url("/key"));
    assert!(matches!(
        loader.fetch().await,
        Err(EvalError::CredentialSchema { .. })
    ));
}

#[tokio::test]
async fn non_json_body_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/key");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let loader = KeyLoader::new(server.url("/key"));
    let err = loader.fetch().await.unwrap_err();
    assert!(err.to_string().contains("unrecognized response shape"));
}

// ── Transport ─────────────────────────────────────────────────────

#[tokio::test]
async fn http_error_carries_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/key");
            then.status(404).body("not found");
        })
        .await;

    let loader = KeyLoader::new(server.url("/key"));
    assert!(matches!(
        loader.fetch().await,
        Err(EvalError::CredentialTransport { status: 404 })
    ));
}

#[tokio::test]
async fn failure_leaves_previous_credential() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/key");
            then.status(500);
        })
        .await;

    let loader = KeyLoader::new(server.url("/key"));
    let mut session = Session::with_credential(Credential::new("kept"));

    assert!(!loader.load_credential(&mut session).await);
    assert_eq!(session.credential().unwrap().expose(), "kept");
}

#[tokio::test]
async fn unreachable_endpoint_fails() {
    // port 9 (discard) is not listening on test machines
    let loader = KeyLoader::new("http://127.0.0.1:9/key");
    assert!(matches!(
        loader.fetch().await,
        Err(EvalError::CredentialUnreachable(_))
    ));
}
