//! # NutriBot HTTP Routes
//!
//! File: cli/src/commands/srv/routes.rs
//!
//! ## Overview
//!
//! The JSON API served by `nutribot srv`:
//!
//! - `POST /chat`: `{"message": "...", "user_id": "..."}` → `{"response": "...", "status": "success"}`.
//!   `user_id` defaults to `default_user`. Bad input answers 400 with
//!   `status: "error"` and a user-facing `response` text.
//! - `GET /health`: liveness plus record counts and whether a real USDA key
//!   is configured.
//!
//! Every successful turn is appended to the chat transcript.
//!
use crate::assistant::Assistant;
use crate::common::history;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

const DEFAULT_USER_ID: &str = "default_user";

const NOT_RECEIVED: &str = "sorry, i didnt receive your message properly. please try again.";
const NOT_UNDERSTOOD: &str =
    "sorry, there was a problem understanding your message. please try again.";
const EMPTY_MESSAGE: &str = "please type a message first!";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
    pub chat_history: PathBuf,
    pub api_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub status: &'static str,
}

impl ChatReply {
    fn success(response: String) -> Self {
        Self {
            response,
            status: "success",
        }
    }

    fn error(response: &str) -> Self {
        Self {
            response: response.to_string(),
            status: "error",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FilesLoaded {
    pub foods: usize,
    pub myths: usize,
    pub swaps: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub api_configured: bool,
    pub files_loaded: FilesLoaded,
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
        .with_state(state)
}

/// A validated chat request.
#[derive(Debug, PartialEq, Eq)]
struct ChatRequest<'a> {
    message: &'a str,
    user_id: &'a str,
}

/// Pulls the message and user id out of a decoded body.
///
/// An empty object or a non-object body counts as "nothing received"; a
/// missing, non-string or blank message counts as empty.
fn parse_chat_request(body: &Value) -> Result<ChatRequest<'_>, &'static str> {
    let fields = match body.as_object() {
        Some(fields) if !fields.is_empty() => fields,
        _ => return Err(NOT_RECEIVED),
    };
    let message = fields
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim();
    if message.is_empty() {
        return Err(EMPTY_MESSAGE);
    }
    let user_id = fields
        .get("user_id")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_USER_ID);
    Ok(ChatRequest { message, user_id })
}

async fn chat(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<ChatReply>) {
    let Json(body) = match body {
        Ok(body) => body,
        Err(JsonRejection::JsonSyntaxError(e)) => {
            debug!("Malformed chat body: {}", e);
            return (StatusCode::BAD_REQUEST, Json(ChatReply::error(NOT_UNDERSTOOD)));
        }
        Err(e) => {
            debug!("Rejected chat body: {}", e);
            return (StatusCode::BAD_REQUEST, Json(ChatReply::error(NOT_RECEIVED)));
        }
    };
    let request = match parse_chat_request(&body) {
        Ok(request) => request,
        Err(reason) => return (StatusCode::BAD_REQUEST, Json(ChatReply::error(reason))),
    };

    let response = state
        .assistant
        .respond(request.message, request.user_id)
        .await;
    history::record_turn(&state.chat_history, request.message, &response);
    (StatusCode::OK, Json(ChatReply::success(response)))
}

async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let store = state.assistant.store();
    Json(HealthReport {
        status: "healthy",
        api_configured: state.api_configured,
        files_loaded: FilesLoaded {
            foods: store.load_foods().len(),
            myths: store.load_myths().len(),
            swaps: store.load_swaps().len(),
        },
    })
}
