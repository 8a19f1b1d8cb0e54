// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The structured reply contract exposed to the answer model.

use serde::{Deserialize, Serialize};

/// Confidence assigned when the model omitted it or sent garbage.
pub const DEFAULT_CONFIDENCE: u8 = 80;

/// Confidence assigned to replies salvaged from unparseable output.
pub const DEGRADED_CONFIDENCE: u8 = 70;

/// Kind of redirection the model may attach to an answer.
///
/// Wire names follow the prompt-embedded schema. The misspelled
/// `letmegooglothat` has shipped in prompts before, so it is accepted as
/// an alias on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectionKind {
    Google,
    Documentation,
    #[serde(alias = "letmegooglothat")]
    Letmegooglethat,
    History,
}

/// A structured pointer steering the user to an external resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirection {
    #[serde(rename = "type")]
    pub kind: RedirectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A well-formed reply recovered from raw model output.
///
/// Invariant: `content` is never empty -- when parsing fails it falls
/// back to extracted or raw text, and `parsing_error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredReply {
    pub content: String,
    pub confidence: u8,
    pub redirections: Vec<Redirection>,
    pub parsing_error: bool,
}

impl StructuredReply {
    /// A degraded reply wrapping salvaged or raw text.
    pub fn degraded(content: String) -> Self {
        Self {
            content,
            confidence: DEGRADED_CONFIDENCE,
            redirections: Vec::new(),
            parsing_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirection_kind_wire_names() {
        let json = serde_json::to_string(&RedirectionKind::Letmegooglethat).unwrap();
        assert_eq!(json, "\"letmegooglethat\"");

        let parsed: RedirectionKind = serde_json::from_str("\"documentation\"").unwrap();
        assert_eq!(parsed, RedirectionKind::Documentation);
    }

    #[test]
    fn misspelled_alias_accepted_on_input() {
        let parsed: RedirectionKind = serde_json::from_str("\"letmegooglothat\"").unwrap();
        assert_eq!(parsed, RedirectionKind::Letmegooglethat);
    }

    #[test]
    fn redirection_parses_with_optional_fields() {
        let r: Redirection = serde_json::from_str(
            r#"{"type": "google", "url": "https://example.com"}"#,
        )
        .unwrap();
        assert_eq!(r.kind, RedirectionKind::Google);
        assert_eq!(r.url.as_deref(), Some("https://example.com"));
        assert!(r.message.is_none());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(serde_json::from_str::<Redirection>(r#"{"type": "teleport"}"#).is_err());
    }

    #[test]
    fn degraded_reply_flags_parsing_error() {
        let reply = StructuredReply::degraded("raw text".to_string());
        assert_eq!(reply.confidence, DEGRADED_CONFIDENCE);
        assert!(reply.parsing_error);
        assert!(reply.redirections.is_empty());
    }
}
