// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ChatCompletionsClient tests against a local mock chat-completions API
//!
//! These tests verify that the client:
//! - Sends model, messages and max_tokens with a bearer token
//! - Extracts choices[0].message.content on 200
//! - Classifies non-200, malformed bodies and timeouts

use std::collections::HashMap;
use std::time::Duration;
use vision_query_node::{
    config::InferenceConfig,
    inference::{ChatCompletionsClient, ChatMessage, CompletionBackend, CompletionError},
};

use crate::mock::inference_server::{MockInferenceServer, MockReply, MAVERICK, SCOUT};

fn config(url: String, timeout: Duration) -> InferenceConfig {
    InferenceConfig {
        api_url: url,
        api_key: "gsk_test_key".to_string(),
        request_timeout: timeout,
        max_tokens: 1000,
    }
}

fn message() -> ChatMessage {
    ChatMessage::user_with_image("What is this?", "data:image/jpeg;base64,iVBORw0KGgo=")
}

#[tokio::test]
async fn test_successful_completion() {
    let server = MockInferenceServer::start(MockReply::Content("A pixel.".to_string())).await;
    let client = ChatCompletionsClient::new(&config(server.url(), Duration::from_secs(5))).unwrap();

    let answer = client.complete(SCOUT, &message()).await.unwrap();
    assert_eq!(answer, "A pixel.");
}

#[tokio::test]
async fn test_request_shape_and_auth_header() {
    let server = MockInferenceServer::start(MockReply::Content("ok".to_string())).await;
    let client = ChatCompletionsClient::new(&config(server.url(), Duration::from_secs(5))).unwrap();

    client.complete(MAVERICK, &message()).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.authorization.as_deref(), Some("Bearer gsk_test_key"));
    assert_eq!(request.body["model"], MAVERICK);
    assert_eq!(request.body["max_tokens"], 1000);

    let messages = request.body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"][0]["type"], "text");
    assert_eq!(messages[0]["content"][0]["text"], "What is this?");
    assert_eq!(messages[0]["content"][1]["type"], "image_url");
    assert_eq!(
        messages[0]["content"][1]["image_url"]["url"],
        "data:image/jpeg;base64,iVBORw0KGgo="
    );
}

#[tokio::test]
async fn test_server_error_status() {
    let server = MockInferenceServer::start(MockReply::Status(500)).await;
    let client = ChatCompletionsClient::new(&config(server.url(), Duration::from_secs(5))).unwrap();

    let err = client.complete(SCOUT, &message()).await.unwrap_err();
    match err {
        CompletionError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream failure");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_200_success_code_is_status_error() {
    let server = MockInferenceServer::start(MockReply::Status(204)).await;
    let client = ChatCompletionsClient::new(&config(server.url(), Duration::from_secs(5))).unwrap();

    let err = client.complete(SCOUT, &message()).await.unwrap_err();
    assert!(matches!(err, CompletionError::Status { status: 204, .. }));
}

#[tokio::test]
async fn test_missing_content_is_malformed() {
    let server = MockInferenceServer::start(MockReply::MissingContent).await;
    let client = ChatCompletionsClient::new(&config(server.url(), Duration::from_secs(5))).unwrap();

    let err = client.complete(SCOUT, &message()).await.unwrap_err();
    assert!(matches!(err, CompletionError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = MockInferenceServer::start(MockReply::NotJson).await;
    let client = ChatCompletionsClient::new(&config(server.url(), Duration::from_secs(5))).unwrap();

    let err = client.complete(SCOUT, &message()).await.unwrap_err();
    assert!(matches!(err, CompletionError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockInferenceServer::start(MockReply::Delayed(
        Duration::from_secs(3),
        "too late".to_string(),
    ))
    .await;
    let client =
        ChatCompletionsClient::new(&config(server.url(), Duration::from_millis(300))).unwrap();

    let err = client.complete(SCOUT, &message()).await.unwrap_err();
    assert!(matches!(err, CompletionError::Transport(_)));
}

#[tokio::test]
async fn test_per_model_replies() {
    let replies = HashMap::from([
        (SCOUT.to_string(), MockReply::Content("scout says hi".to_string())),
        (MAVERICK.to_string(), MockReply::Status(429)),
    ]);
    let server = MockInferenceServer::start_with(replies, MockReply::Status(404)).await;
    let client = ChatCompletionsClient::new(&config(server.url(), Duration::from_secs(5))).unwrap();

    assert_eq!(client.complete(SCOUT, &message()).await.unwrap(), "scout says hi");
    assert!(matches!(
        client.complete(MAVERICK, &message()).await,
        Err(CompletionError::Status { status: 429, .. })
    ));
}
