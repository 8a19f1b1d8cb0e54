// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The five-way intermediate verdict and its defensive extraction.
//!
//! The rubric model is told to output exactly one of five formats, but
//! small models pad their answers with reasoning, markup, or multi-line
//! chatter. Extraction therefore scans with ordered patterns and treats
//! anything unrecognizable as no-substance (fail closed).

use std::sync::LazyLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

const QUERY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Rejection text for empty or low-effort requests. Also the fallback for
/// anything the extraction cannot recognize.
pub const NO_SUBSTANCE_MESSAGE: &str =
    "Please provide a specific technical question or request that I can help you with.";

/// Degraded documentation pointer when the model omitted the URL.
const DOC_FALLBACK_MESSAGE: &str =
    "Please check the official documentation for this technology.";

/// The verdict codes, in the order they are scanned for.
static CODE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)ERROR:NO_SUBSTANCE").unwrap(),
        Regex::new(r"(?i)LMGTFY:.+").unwrap(),
        Regex::new(r"(?i)DOC:.+").unwrap(),
        Regex::new(r"(?i)MAN:.+").unwrap(),
        Regex::new(r"(?i)\bGOOD\b").unwrap(),
    ]
});

/// Outcome of the intermediate rubric evaluation. Closed vocabulary: any
/// new category means a new variant, not a new string code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntermediateVerdict {
    /// Greeting, single word, or otherwise nothing to act on.
    NoSubstance,
    /// Easily answered with a web search.
    Google { search_terms: String },
    /// Covered by named documentation. The URL is absent when the model
    /// dropped it; the user message degrades gracefully.
    Doc {
        technology: String,
        url: Option<String>,
    },
    /// A shell command question.
    Man { command: String },
    /// A genuine technical question -- proceed to the full answer call.
    Good,
}

impl IntermediateVerdict {
    /// Deterministic user-facing text for each terminal verdict.
    /// `Good` is a sentinel, not a reply, so it has no message.
    pub fn user_message(&self) -> Option<String> {
        match self {
            IntermediateVerdict::NoSubstance => Some(NO_SUBSTANCE_MESSAGE.to_string()),
            IntermediateVerdict::Google { search_terms } => Some(format!(
                "This could be easily answered with a Google search: \
https://letmegooglethat.com/?q={}",
                utf8_percent_encode(search_terms, QUERY_SET)
            )),
            IntermediateVerdict::Doc { technology, url } => Some(match url {
                Some(url) => format!(
                    "Please refer to the official {technology} documentation: {url}"
                ),
                None => DOC_FALLBACK_MESSAGE.to_string(),
            }),
            IntermediateVerdict::Man { command } => Some(format!(
                "Please refer to the manual page for '{command}'. \
You can view it by typing 'man {command}' in your terminal."
            )),
            IntermediateVerdict::Good => None,
        }
    }
}

/// Extract a verdict from raw model output.
///
/// A clean single-line response is parsed directly. Multi-line output or
/// anything carrying `<think>` markup is scanned with the five ordered
/// patterns, first match wins. No match at all means `NoSubstance`:
/// unparseable model output is treated as insufficient, never forwarded.
pub fn extract_verdict(raw: &str) -> IntermediateVerdict {
    let trimmed = raw.trim();

    let decision = if trimmed.contains('\n') || trimmed.contains("<think>") {
        CODE_PATTERNS
            .iter()
            .find_map(|p| p.find(trimmed))
            .map(|m| m.as_str().trim().to_string())
    } else {
        Some(trimmed.to_string())
    };

    let Some(decision) = decision else {
        return IntermediateVerdict::NoSubstance;
    };

    parse_decision(&decision)
}

/// Map a decision line to a verdict. Check order follows the rubric:
/// LMGTFY prefix, NO_SUBSTANCE anywhere, DOC prefix, MAN prefix, GOOD
/// anywhere; everything else is no-substance.
fn parse_decision(decision: &str) -> IntermediateVerdict {
    if let Some(rest) = decision.strip_prefix("LMGTFY:") {
        return IntermediateVerdict::Google {
            search_terms: rest.trim().to_string(),
        };
    }

    if decision.contains("ERROR:NO_SUBSTANCE") {
        return IntermediateVerdict::NoSubstance;
    }

    if let Some(rest) = decision.strip_prefix("DOC:") {
        // Only the first colon separates technology from URL; the URL may
        // itself contain colons and is rejoined verbatim.
        return match rest.split_once(':') {
            Some((technology, url)) => IntermediateVerdict::Doc {
                technology: technology.trim().to_string(),
                url: Some(url.trim().to_string()),
            },
            None => IntermediateVerdict::Doc {
                technology: rest.trim().to_string(),
                url: None,
            },
        };
    }

    if let Some(rest) = decision.strip_prefix("MAN:") {
        return IntermediateVerdict::Man {
            command: rest.trim().to_string(),
        };
    }

    if decision.contains("GOOD") {
        return IntermediateVerdict::Good;
    }

    IntermediateVerdict::NoSubstance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_good_line() {
        assert_eq!(extract_verdict("GOOD"), IntermediateVerdict::Good);
        assert_eq!(extract_verdict("  GOOD  "), IntermediateVerdict::Good);
    }

    #[test]
    fn clean_no_substance_line() {
        assert_eq!(
            extract_verdict("ERROR:NO_SUBSTANCE"),
            IntermediateVerdict::NoSubstance
        );
    }

    #[test]
    fn lmgtfy_carries_search_terms() {
        assert_eq!(
            extract_verdict("LMGTFY: best pizza near me"),
            IntermediateVerdict::Google {
                search_terms: "best pizza near me".to_string()
            }
        );
    }

    #[test]
    fn doc_splits_on_first_colon_only() {
        // The URL contains colons; only the first one separates fields.
        assert_eq!(
            extract_verdict("DOC:React:https://reactjs.org/docs"),
            IntermediateVerdict::Doc {
                technology: "React".to_string(),
                url: Some("https://reactjs.org/docs".to_string()),
            }
        );
    }

    #[test]
    fn doc_without_url_degrades() {
        let verdict = extract_verdict("DOC:React");
        assert_eq!(
            verdict,
            IntermediateVerdict::Doc {
                technology: "React".to_string(),
                url: None,
            }
        );
        assert_eq!(
            verdict.user_message().unwrap(),
            "Please check the official documentation for this technology."
        );
    }

    #[test]
    fn man_carries_command() {
        assert_eq!(
            extract_verdict("MAN: tar"),
            IntermediateVerdict::Man {
                command: "tar".to_string()
            }
        );
    }

    #[test]
    fn thinking_markup_is_scanned_through() {
        let raw = "<think>\nThe user asked a real question about B-trees,\nso this deserves a full answer.\n</think>\nGOOD";
        assert_eq!(extract_verdict(raw), IntermediateVerdict::Good);
    }

    #[test]
    fn multiline_chatter_first_pattern_wins() {
        // Both NO_SUBSTANCE and GOOD appear; the scan order puts
        // NO_SUBSTANCE first.
        let raw = "I think ERROR:NO_SUBSTANCE fits here.\nAlthough GOOD was close.";
        assert_eq!(extract_verdict(raw), IntermediateVerdict::NoSubstance);
    }

    #[test]
    fn unrecognizable_output_fails_closed() {
        let raw = "As an AI model I am unable\nto categorize this request.";
        assert_eq!(extract_verdict(raw), IntermediateVerdict::NoSubstance);
    }

    #[test]
    fn single_unrecognizable_line_fails_closed() {
        assert_eq!(
            extract_verdict("maybe it's fine?"),
            IntermediateVerdict::NoSubstance
        );
    }

    #[test]
    fn google_message_percent_encodes() {
        let verdict = IntermediateVerdict::Google {
            search_terms: "rust lifetimes?".to_string(),
        };
        assert_eq!(
            verdict.user_message().unwrap(),
            "This could be easily answered with a Google search: \
https://letmegooglethat.com/?q=rust%20lifetimes%3F"
        );
    }

    #[test]
    fn man_message_names_the_command() {
        let verdict = IntermediateVerdict::Man {
            command: "rsync".to_string(),
        };
        let msg = verdict.user_message().unwrap();
        assert!(msg.contains("manual page for 'rsync'"));
        assert!(msg.contains("man rsync"));
    }

    #[test]
    fn good_has_no_user_message() {
        assert!(IntermediateVerdict::Good.user_message().is_none());
    }
}
