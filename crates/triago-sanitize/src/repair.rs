// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Staged repair of raw answer-model output.
//!
//! The answer model is asked for a JSON object but routinely wraps it in
//! `<think>` reasoning spans or markdown fences, and mangles escape
//! sequences. Repair runs as an explicit ordered chain; each stage either
//! produces a parse or hands the text to the next stage. The chain is
//! total: stage 7 always yields a reply, so no parse failure ever reaches
//! the caller.
//!
//! Stages:
//! 1. strip `<think>...</think>` spans
//! 2. extract the interior of a fenced code block, when present
//! 3. apply the fixed literal-repair table
//! 4. structured parse
//! 5. re-escape backslashes and retry the parse once
//! 6. heuristic extraction of content-like string fields
//! 7. raw text verbatim, degraded confidence, `parsing_error` set

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::reply::{Redirection, StructuredReply, DEFAULT_CONFIDENCE};

static THINK_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());

static STRAY_THINK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?think>").unwrap());

static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").unwrap());

/// Key/value string-field pairs inside JSON-shaped text. Used by the
/// heuristic extraction stage when real parsing has already failed.
static STRING_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""((?:[^"\\]|\\.)+)"\s*:\s*"((?:[^"\\]|\\.)*)""#).unwrap()
});

/// Known corruption patterns and their replacements, applied literally in
/// order. Covers double-escaped backslashes in namespace-like strings
/// (`App\\\\Http` for `App\\Http`) and inconsistently escaped quotes.
const LITERAL_REPAIRS: &[(&str, &str)] = &[
    (r"\\\\", r"\\"),
    ("\\\\\"", "\\\""),
];

/// File extensions that mark a field as carrying supplementary code
/// content worth preserving.
const CODE_EXTENSIONS: &[&str] = &[
    ".php", ".js", ".ts", ".py", ".rs", ".java", ".rb", ".go", ".c", ".cpp",
    ".h", ".css", ".html", ".sql", ".sh", ".yml", ".yaml", ".json", ".xml",
];

/// Fallback content when the model produced nothing usable at all.
const EMPTY_RESPONSE_MESSAGE: &str =
    "Sorry, I encountered an error while processing your request.";

/// Repair raw model output into a well-formed reply.
///
/// Total function: every input yields a `StructuredReply` with non-empty
/// `content`. Parse failures degrade stage by stage rather than erroring.
pub fn sanitize(raw: &str) -> StructuredReply {
    // Stage 1: drop reasoning spans.
    let cleaned = strip_think_blocks(raw);

    // Stage 2: prefer the interior of a fenced block.
    let candidate = extract_fenced_block(&cleaned).unwrap_or_else(|| cleaned.clone());

    // Stage 3: fixed literal repairs.
    let repaired = apply_literal_repairs(&candidate);

    // Stage 4: structured parse.
    if let Some(reply) = parse_reply(&repaired) {
        return reply;
    }

    // Stage 5: aggressive re-escape, one retry.
    if let Some(reply) = parse_reply(&reescape(&repaired)) {
        debug!("reply recovered after re-escape");
        return reply;
    }

    // Stage 6: heuristic extraction of content-like fields.
    if let Some(content) = extract_content_fields(&candidate) {
        warn!("structured parse failed, heuristic content extraction used");
        return StructuredReply::degraded(content);
    }

    // Stage 7: raw text verbatim.
    warn!("structured parse failed, returning raw text");
    let fallback = if cleaned.trim().is_empty() {
        raw.trim().to_string()
    } else {
        cleaned.trim().to_string()
    };
    let content = if fallback.is_empty() {
        EMPTY_RESPONSE_MESSAGE.to_string()
    } else {
        fallback
    };
    StructuredReply::degraded(content)
}

/// Remove `<think>` reasoning spans and stray unmatched tags. When
/// nothing remains, fall back to the text after the last closing tag, and
/// finally to the input itself.
fn strip_think_blocks(raw: &str) -> String {
    let stripped = THINK_BLOCK.replace_all(raw, "");
    let stripped = STRAY_THINK_TAG.replace_all(&stripped, "");
    let trimmed = stripped.trim();

    if trimmed.is_empty() {
        if let Some((_, after)) = raw.rsplit_once("</think>") {
            let after = after.trim();
            if !after.is_empty() {
                return after.to_string();
            }
        }
        return raw.to_string();
    }

    trimmed.to_string()
}

/// Interior of the first fenced code block, if any.
fn extract_fenced_block(text: &str) -> Option<String> {
    FENCED_BLOCK
        .captures(text)
        .map(|c| c[1].trim().to_string())
}

fn apply_literal_repairs(text: &str) -> String {
    let mut repaired = text.to_string();
    for (from, to) in LITERAL_REPAIRS {
        repaired = repaired.replace(from, to);
    }
    repaired
}

/// Double every backslash, then collapse the accidental quadruples that
/// produces for already-escaped sequences. Lone backslashes (invalid in
/// JSON strings) come out properly escaped; valid ones are unchanged.
fn reescape(text: &str) -> String {
    text.replace('\\', "\\\\").replace("\\\\\\\\", "\\\\")
}

/// Attempt the structured parse and post-validation.
///
/// Returns `None` when the text is not a JSON object with a usable
/// `content` string -- the signal to try the next stage.
fn parse_reply(text: &str) -> Option<StructuredReply> {
    let value: Value = serde_json::from_str(text).ok()?;
    let obj = value.as_object()?;

    let content = obj.get("content")?.as_str()?;
    if content.trim().is_empty() {
        return None;
    }
    let mut content = content.to_string();

    // Confidence is coerced into range; anything missing, non-numeric, or
    // out of range gets the default.
    let confidence = obj
        .get("confidence")
        .and_then(Value::as_f64)
        .filter(|c| (0.0..=100.0).contains(c))
        .map(|c| c.round() as u8)
        .unwrap_or(DEFAULT_CONFIDENCE);

    // A present-but-not-an-array redirections value is replaced with an
    // empty list; individual malformed entries are dropped.
    let redirections: Vec<Redirection> = obj
        .get("redirections")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| serde_json::from_value(e.clone()).ok())
                .collect()
        })
        .unwrap_or_default();

    // Supplementary string fields that look like more content (or code
    // files) are appended under a label rather than discarded.
    for (key, val) in obj {
        if matches!(key.as_str(), "content" | "confidence" | "redirections") {
            continue;
        }
        if let Some(extra) = val.as_str() {
            if is_content_like_key(key) && !extra.trim().is_empty() {
                content.push_str(&format!("\n\n--- {key} ---\n{extra}"));
            }
        }
    }

    Some(StructuredReply {
        content,
        confidence,
        redirections,
        parsing_error: false,
    })
}

/// Heuristic last-ditch extraction: find `"content": "..."`-shaped fields
/// textually and return their unescaped values. A single field returns its
/// value alone; several concatenate in encounter order, each preceded by
/// its field name as a label.
fn extract_content_fields(text: &str) -> Option<String> {
    let fields: Vec<(String, String)> = STRING_FIELD
        .captures_iter(text)
        .filter_map(|c| {
            let key = c[1].to_string();
            if is_content_like_key(&key) {
                Some((key, unescape_json_string(&c[2])))
            } else {
                None
            }
        })
        .filter(|(_, v)| !v.trim().is_empty())
        .collect();

    match fields.as_slice() {
        [] => None,
        [(_, value)] => Some(value.clone()),
        many => Some(
            many.iter()
                .map(|(key, value)| format!("--- {key} ---\n{value}"))
                .collect::<Vec<_>>()
                .join("\n\n"),
        ),
    }
}

fn is_content_like_key(key: &str) -> bool {
    let lower = key.to_lowercase();
    lower.contains("content") || CODE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Minimal JSON string unescaping for heuristically extracted values.
fn unescape_json_string(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
