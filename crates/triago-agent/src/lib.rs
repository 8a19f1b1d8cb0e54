// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipeline orchestration for the Triago gateway.
//!
//! Wires the politeness gate, the action analyzer, the technical domain
//! gate, the intermediate verdict, the answer model, and the sanitizer
//! into one request pipeline, and computes the score delta for every
//! terminal branch.

pub mod conversation;
pub mod pipeline;

pub use conversation::{latest_user_message, ConversationError};
pub use pipeline::{Pipeline, PipelineConfig, PipelineReply, RouteOutcome};
