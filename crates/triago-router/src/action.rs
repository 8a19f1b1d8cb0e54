// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic query action analysis.
//!
//! Assigns each inbound message one of four actions: answer it here,
//! redirect to a search engine, redirect to documentation, or point at a
//! man page. Zero-cost heuristic rules, no LLM pre-call.
//!
//! Rule order is load-bearing: a message mentioning both a shell command
//! and unrelated technical keywords must classify as a man-page redirect,
//! and a technical signal must win over a trivia-shaped phrasing.

use tracing::debug;

use crate::tables::{
    contains_word, lmgtfy_url, man_page_url, BASH_COMMANDS, CODE_PATTERNS,
    COMMAND_LINE_SHAPE, COMMAND_LINE_TOOLS, DOCUMENTATION_LINKS, DOC_INTENT_PATTERNS,
    ERROR_PATTERNS, NON_TECHNICAL_PATTERNS, TECHNICAL_TERMS,
};

/// The routing action for an inbound message. Produced once per message,
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionVerdict {
    /// Forward to the LLM for a full answer.
    Answer,
    /// Redirect to a search engine.
    Google { redirect_url: String },
    /// Redirect to official documentation.
    Docs { redirect_url: String, source: String },
    /// Point at the manual page for a shell command.
    Manpage { command: String, redirect_url: String },
}

impl ActionVerdict {
    /// Short lowercase name for logs and response metadata.
    pub fn kind(&self) -> &'static str {
        match self {
            ActionVerdict::Answer => "answer",
            ActionVerdict::Google { .. } => "google",
            ActionVerdict::Docs { .. } => "docs",
            ActionVerdict::Manpage { .. } => "manpage",
        }
    }
}

/// Analyze a query and decide the routing action.
///
/// Pure function of the text: the same input always yields the same
/// verdict. Evaluation order (first match wins):
/// 1. shell command mention -> man page
/// 2. CLI tool + doc intent -> tool documentation
/// 3. known technology + doc intent -> technology documentation
/// 4. any technical signal -> answer
/// 5. non-technical pattern -> search redirect
/// 6. default -> answer (ambiguity gets the benefit of the doubt)
pub fn analyze(query: &str) -> ActionVerdict {
    let clean = query.trim();
    let lower = clean.to_lowercase();

    // 1. Shell command mentions route straight to the man page.
    if let Some(command) = detect_bash_command(&lower) {
        let verdict = ActionVerdict::Manpage {
            redirect_url: man_page_url(command),
            command: command.to_string(),
        };
        debug!(command, "bash command detected");
        return verdict;
    }

    let has_doc_intent = DOC_INTENT_PATTERNS.iter().any(|p| p.is_match(clean));

    // 2. CLI tool questions with doc intent go to the tool's docs.
    if has_doc_intent {
        if let Some((tool, url)) = COMMAND_LINE_TOOLS
            .iter()
            .find(|(tool, _)| lower.contains(tool))
        {
            debug!(tool = %tool, "command line tool doc redirect");
            return ActionVerdict::Docs {
                redirect_url: (*url).to_string(),
                source: (*tool).to_string(),
            };
        }

        // 3. Same for technologies with official documentation.
        if let Some((tech, url)) = DOCUMENTATION_LINKS
            .iter()
            .find(|(tech, _)| contains_word(&lower, tech))
        {
            debug!(tech = %tech, "technology doc redirect");
            return ActionVerdict::Docs {
                redirect_url: (*url).to_string(),
                source: (*tech).to_string(),
            };
        }
    }

    // 4. Any technical signal means the assistant should answer.
    let has_code_block = clean.contains("```");
    let has_code_pattern = CODE_PATTERNS.iter().any(|p| p.is_match(clean));
    let has_error_pattern = ERROR_PATTERNS.iter().any(|p| p.is_match(clean));
    let has_technical_term = TECHNICAL_TERMS
        .iter()
        .any(|term| contains_word(&lower, term));
    let is_command_line = COMMAND_LINE_SHAPE.is_match(clean);

    if has_code_block || has_code_pattern || has_error_pattern || has_technical_term
        || is_command_line
    {
        return ActionVerdict::Answer;
    }

    // 5. Non-technical shapes (only reached with no technical signal) get
    // a search-engine redirect.
    if NON_TECHNICAL_PATTERNS.iter().any(|p| p.is_match(clean)) {
        return ActionVerdict::Google {
            redirect_url: lmgtfy_url(clean),
        };
    }

    // 6. Unsure: let the assistant answer.
    ActionVerdict::Answer
}

/// Find the first listed shell command that appears as a whole word.
fn detect_bash_command(lower: &str) -> Option<&'static str> {
    BASH_COMMANDS
        .iter()
        .find(|cmd| contains_word(lower, cmd))
        .copied()
}
