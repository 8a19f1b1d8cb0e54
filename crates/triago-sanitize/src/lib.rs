// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response sanitization for the Triago gateway.
//!
//! The answer model is contracted to return a JSON object with `content`,
//! `confidence`, and optional `redirections`, but real output arrives
//! wrapped in reasoning markup, fenced blocks, or broken escapes. This
//! crate repairs what it can and degrades gracefully for the rest; no
//! parse error ever escapes to the caller.

pub mod repair;
pub mod reply;

pub use repair::sanitize;
pub use reply::{
    Redirection, RedirectionKind, StructuredReply, DEFAULT_CONFIDENCE, DEGRADED_CONFIDENCE,
};
