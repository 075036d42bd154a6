// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Local stand-in for an OpenAI-compatible chat-completions API
//!
//! Replies are chosen per `model` field of the incoming body, so one server
//! can play both backend targets with different behaviour.
#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

pub const SCOUT: &str = "meta-llama/llama-4-scout-17b-16e-instruct";
pub const MAVERICK: &str = "meta-llama/llama-4-maverick-17b-128e-instruct";

#[derive(Debug, Clone)]
pub enum MockReply {
    /// 200 with `choices[0].message.content`
    Content(String),
    /// Bare status code with a plain-text body
    Status(u16),
    /// 200 with an empty `choices` array
    MissingContent,
    /// 200 with a non-JSON body
    NotJson,
    /// Sleep, then answer with content
    Delayed(Duration, String),
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    replies: Arc<HashMap<String, MockReply>>,
    fallback: MockReply,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockInferenceServer {
    addr: SocketAddr,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockInferenceServer {
    /// Every model gets the same reply
    pub async fn start(reply: MockReply) -> Self {
        Self::start_with(HashMap::new(), reply).await
    }

    /// Per-model replies, `fallback` for models not listed
    pub async fn start_with(replies: HashMap<String, MockReply>, fallback: MockReply) -> Self {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            replies: Arc::new(replies),
            fallback,
            recorded: recorded.clone(),
        };

        let app = Router::new()
            .route("/openai/v1/chat/completions", post(chat_completions))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            recorded,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/openai/v1/chat/completions", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.recorded.lock().unwrap().len()
    }
}

impl Drop for MockInferenceServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn chat_completions(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let model = body["model"].as_str().unwrap_or_default().to_string();

    state.recorded.lock().unwrap().push(RecordedRequest {
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string()),
        body,
    });

    let reply = state
        .replies
        .get(&model)
        .cloned()
        .unwrap_or_else(|| state.fallback.clone());

    match reply {
        MockReply::Content(text) => content_response(&text),
        MockReply::Status(code) => (
            StatusCode::from_u16(code).expect("valid status code"),
            "upstream failure",
        )
            .into_response(),
        MockReply::MissingContent => {
            (StatusCode::OK, Json(json!({ "id": "chatcmpl-mock", "choices": [] }))).into_response()
        }
        MockReply::NotJson => (StatusCode::OK, "<html>bad gateway</html>").into_response(),
        MockReply::Delayed(delay, text) => {
            tokio::time::sleep(delay).await;
            content_response(&text)
        }
    }
}

fn content_response(text: &str) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": text },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13 }
        })),
    )
        .into_response()
}
