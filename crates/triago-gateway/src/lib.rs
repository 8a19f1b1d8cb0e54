// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Triago routing pipeline.
//!
//! Exposes the chat endpoint and the cookie-backed session endpoints over
//! axum. The gateway is deliberately thin: request validation, cookie
//! plumbing, and response shaping live here; every routing decision lives
//! in `triago-agent` and below.

pub mod handlers;
pub mod server;
pub mod session;

pub use server::{build_router, start_server, AppState, HealthState, ScoringSettings, ServerConfig};
