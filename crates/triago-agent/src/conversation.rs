// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation payload validation.
//!
//! Runs before any classification: malformed input is rejected with a
//! describable error so the channel layer can answer with a 400 rather
//! than feeding garbage into the pipeline.

use triago_core::{ChatMessage, ChatRole};

/// Why a conversation payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationError {
    /// The messages array was empty.
    Empty,
    /// A message had empty content.
    EmptyContent { index: usize },
    /// The final message did not come from the user.
    LastNotFromUser,
}

impl std::fmt::Display for ConversationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversationError::Empty => write!(f, "no messages provided"),
            ConversationError::EmptyContent { index } => {
                write!(f, "message {index} has empty content")
            }
            ConversationError::LastNotFromUser => {
                write!(f, "the last message must be from the user")
            }
        }
    }
}

/// Validate a conversation and return the message the pipeline should act
/// on: the content of the final user message.
pub fn latest_user_message(messages: &[ChatMessage]) -> Result<&str, ConversationError> {
    if messages.is_empty() {
        return Err(ConversationError::Empty);
    }

    for (index, message) in messages.iter().enumerate() {
        if message.content.trim().is_empty() {
            return Err(ConversationError::EmptyContent { index });
        }
    }

    let last = messages.last().expect("checked non-empty");
    if last.role != ChatRole::User {
        return Err(ConversationError::LastNotFromUser);
    }

    Ok(&last.content)
}
