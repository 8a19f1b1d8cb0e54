// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Handles POST /api/chat, the session endpoints, and GET /health.
//! Malformed payloads are rejected with a 400 before any classification;
//! pipeline-internal failures never surface as 5xx.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    Json,
};
use axum_extra::headers::Cookie;
use axum_extra::TypedHeader;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;
use tracing::info;

use triago_agent::latest_user_message;
use triago_core::{ChatMessage, ChatRole};

use crate::server::AppState;
use crate::session::{
    generate_pseudonym, points_cookie, pseudo_cookie, read_points, read_pseudo,
};

/// Response body for POST /api/chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Always "assistant".
    pub role: String,
    /// The reply text.
    pub content: String,
    /// Classification and scoring metadata.
    pub metadata: Value,
}

/// Request body for POST /api/session/score.
#[derive(Debug, Deserialize)]
pub struct ScoreAdjustRequest {
    /// Signed adjustment, e.g. -10.
    pub delta: i64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// POST /api/chat
///
/// Accepts either `{"messages": [...]}` or `{"message": "..."}`, runs the
/// routing pipeline against the cookie-supplied balance, and re-sets the
/// points cookie with the updated value.
pub async fn post_chat(
    State(state): State<AppState>,
    cookies: Option<TypedHeader<Cookie>>,
    Json(body): Json<Value>,
) -> Response {
    let messages = match parse_chat_request(&body) {
        Ok(messages) => messages,
        Err(message) => return bad_request(message),
    };

    let text = match latest_user_message(&messages) {
        Ok(text) => text,
        Err(e) => return bad_request(e.to_string()),
    };

    let cookie_header = cookies.as_ref().map(|TypedHeader(c)| c);
    let current_points = read_points(cookie_header, state.scoring.initial_points);

    let reply = state.pipeline.handle(text, current_points).await;

    info!(
        outcome = ?reply.outcome,
        delta = reply.penalty.delta,
        points = reply.penalty.points,
        "chat request handled"
    );

    let mut metadata = reply.message.metadata.unwrap_or_else(|| json!({}));
    if let Some(map) = metadata.as_object_mut() {
        map.insert("points".to_string(), json!(reply.penalty.points));
        map.insert("delta".to_string(), json!(reply.penalty.delta));
        map.insert("reason".to_string(), json!(reply.penalty.reason));
    }

    let set_cookie = points_cookie(reply.penalty.points, state.scoring.cookie_max_age_secs);

    (
        StatusCode::OK,
        AppendHeaders([(header::SET_COOKIE, set_cookie)]),
        Json(ChatResponse {
            role: ChatRole::Assistant.to_string(),
            content: reply.message.content,
            metadata,
        }),
    )
        .into_response()
}

/// Interpret the chat payload in either accepted shape.
fn parse_chat_request(body: &Value) -> Result<Vec<ChatMessage>, String> {
    if let Some(entries) = body.get("messages").and_then(Value::as_array) {
        let mut messages = Vec::with_capacity(entries.len());
        for entry in entries {
            let role = entry.get("role").and_then(Value::as_str);
            let content = entry.get("content").and_then(Value::as_str);
            let (Some(role), Some(content)) = (role, content) else {
                return Err(invalid_message_format());
            };
            let Ok(role) = ChatRole::from_str(role) else {
                return Err(invalid_message_format());
            };
            messages.push(ChatMessage {
                role,
                content: content.to_string(),
                timestamp: None,
                metadata: None,
            });
        }
        return Ok(messages);
    }

    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return Ok(vec![ChatMessage::user(message)]);
    }

    Err("Invalid request format. Expected 'messages' array or 'message' string.".to_string())
}

fn invalid_message_format() -> String {
    "Invalid message format. Each message must have 'role' ('user' or 'assistant') and 'content'."
        .to_string()
}

/// GET /api/session/init
///
/// Creates the pseudonym and point cookies when absent; existing values
/// are left untouched (and their retention refreshed).
pub async fn get_session_init(
    State(state): State<AppState>,
    cookies: Option<TypedHeader<Cookie>>,
) -> Response {
    let cookie_header = cookies.as_ref().map(|TypedHeader(c)| c);
    let pseudo = read_pseudo(cookie_header).unwrap_or_else(generate_pseudonym);
    let points = read_points(cookie_header, state.scoring.initial_points);

    let max_age = state.scoring.cookie_max_age_secs;
    let headers = AppendHeaders([
        (header::SET_COOKIE, pseudo_cookie(&pseudo, max_age)),
        (header::SET_COOKIE, points_cookie(points, max_age)),
    ]);

    info!(pseudo = %pseudo, points, "session initialized");

    (
        StatusCode::OK,
        headers,
        Json(json!({ "session": "created", "pseudo": pseudo, "points": points })),
    )
        .into_response()
}

/// GET /api/session/score
pub async fn get_session_score(
    State(state): State<AppState>,
    cookies: Option<TypedHeader<Cookie>>,
) -> Response {
    let cookie_header = cookies.as_ref().map(|TypedHeader(c)| c);
    let pseudo = read_pseudo(cookie_header).unwrap_or_else(|| "Unknown".to_string());
    let points = read_points(cookie_header, state.scoring.initial_points);

    Json(json!({ "pseudo": pseudo, "points": points })).into_response()
}

/// POST /api/session/score
///
/// Applies a raw signed delta to the balance (floor-clamped) and persists
/// it back into the cookie.
pub async fn post_session_score(
    State(state): State<AppState>,
    cookies: Option<TypedHeader<Cookie>>,
    Json(body): Json<ScoreAdjustRequest>,
) -> Response {
    let cookie_header = cookies.as_ref().map(|TypedHeader(c)| c);
    let current = read_points(cookie_header, state.scoring.initial_points);
    let updated = (i64::from(current) + body.delta).max(0) as u32;

    info!(current, delta = body.delta, updated, "score adjusted");

    (
        StatusCode::OK,
        AppendHeaders([(
            header::SET_COOKIE,
            points_cookie(updated, state.scoring.cookie_max_age_secs),
        )]),
        Json(json!({ "updated": updated })),
    )
        .into_response()
}

/// GET /health
///
/// Unauthenticated liveness endpoint.
pub async fn get_health(State(state): State<AppState>) -> Response {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.health.start_time.elapsed().as_secs(),
    }))
    .into_response()
}
