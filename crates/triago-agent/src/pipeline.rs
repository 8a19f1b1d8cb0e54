// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The request pipeline: politeness gate, action analysis, domain gate,
//! intermediate verdict, answer call, sanitization, scoring.
//!
//! Every terminal branch yields a user-facing assistant message and one
//! penalty application against the caller-supplied balance. Nothing in
//! here is fatal: provider failures inside the filters follow their
//! documented fail-open/fail-closed policy, and a failure of the final
//! answer call degrades to an apology.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use triago_core::{ChatMessage, ProviderAdapter, ProviderRequest};
use triago_router::{analyze, check_politeness, ActionVerdict, DomainClassifier};
use triago_sanitize::sanitize;
use triago_score::{apply_penalty, PenaltyCategory, PenaltyOutcome};
use triago_verdict::{IntermediateVerdict, VerdictClassifier};

/// Reply for a message that is nothing but politeness.
const GREETING_REJECTION: &str =
    "No need for polite formulas, on the contrary, you're making me use precious energy for nothing";

/// Reply for an off-topic question.
const NON_TECHNICAL_REJECTION: &str =
    "I only answer technical questions related to computer science and programming.";

/// Reply when the answer model itself is unreachable.
const PROVIDER_FAILURE_APOLOGY: &str =
    "Sorry, I encountered an error while processing your request.";

/// Reason attached to the zero-delta outcome of an upstream failure.
const PROVIDER_FAILURE_REASON: &str = "upstream model failure, no charge";

/// The terminal branch a message ended on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Rejected as pure politeness.
    Politeness,
    /// Redirected to a man page by the action analyzer.
    Manpage,
    /// Redirected to documentation (action analyzer or verdict).
    Docs,
    /// Redirected to a search engine (action analyzer or verdict).
    Google,
    /// Rejected by the technical domain gate.
    OffTopic,
    /// Rejected by the intermediate verdict as having no substance.
    NoSubstance,
    /// Answered by the model with a well-formed reply.
    Answered,
    /// Answered, but the reply needed format recovery.
    AnswerDegraded,
    /// The answer model was unreachable; apology returned.
    ProviderFailure,
}

/// Result of running one message through the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineReply {
    /// The assistant message to show the user.
    pub message: ChatMessage,
    /// Which terminal branch produced it.
    pub outcome: RouteOutcome,
    /// The score adjustment for this request.
    pub penalty: PenaltyOutcome,
}

/// Model selection and temperatures for the three provider calls.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub answer_model: String,
    pub verdict_model: String,
    pub classifier_model: String,
    pub answer_temperature: f32,
    pub verdict_temperature: f32,
}

/// The routing pipeline. One instance serves all requests; every
/// classification step is pure except the three provider calls.
pub struct Pipeline {
    provider: Arc<dyn ProviderAdapter>,
    domain: DomainClassifier,
    verdict: VerdictClassifier,
    answer_model: String,
    answer_temperature: f32,
}

impl Pipeline {
    pub fn new(provider: Arc<dyn ProviderAdapter>, config: PipelineConfig) -> Self {
        let domain = DomainClassifier::new(
            provider.clone(),
            config.classifier_model,
            Some(config.verdict_temperature),
        );
        let verdict = VerdictClassifier::new(
            provider.clone(),
            config.verdict_model,
            Some(config.verdict_temperature),
        );
        Self {
            provider,
            domain,
            verdict,
            answer_model: config.answer_model,
            answer_temperature: config.answer_temperature,
        }
    }

    /// Run one user message through the full pipeline.
    ///
    /// `current_points` is the session balance read by the caller; the
    /// returned penalty carries the updated value to persist.
    pub async fn handle(&self, text: &str, current_points: u32) -> PipelineReply {
        // Gate 1: pure politeness is rejected outright. A politeness
        // phrase alongside real content is noted but never gates.
        let politeness = check_politeness(text);
        if politeness.is_only_politeness {
            info!(outcome = "politeness", "message rejected as social noise");
            return reply(
                GREETING_REJECTION,
                json!({
                    "is_greeting_response": true,
                    "contains_politeness": true,
                }),
                RouteOutcome::Politeness,
                apply_penalty(current_points, PenaltyCategory::Politeness),
            );
        }
        if politeness.contains_politeness {
            info!("politeness detected alongside substantive content");
        }

        // Gate 2: heuristic action analysis.
        match analyze(text) {
            ActionVerdict::Manpage { command, redirect_url } => {
                info!(command = %command, "routed to man page");
                let verdict = IntermediateVerdict::Man { command: command.clone() };
                return reply(
                    &verdict.user_message().unwrap_or_default(),
                    json!({
                        "action": "manpage",
                        "command": command,
                        "redirect_url": redirect_url,
                    }),
                    RouteOutcome::Manpage,
                    apply_penalty(current_points, PenaltyCategory::Manpage),
                );
            }
            ActionVerdict::Docs { redirect_url, source } => {
                info!(source = %source, "routed to documentation");
                return reply(
                    &format!(
                        "Please refer to the official {source} documentation: {redirect_url}"
                    ),
                    json!({
                        "action": "docs",
                        "doc_source": source,
                        "redirect_url": redirect_url,
                    }),
                    RouteOutcome::Docs,
                    apply_penalty(current_points, PenaltyCategory::Documentation),
                );
            }
            ActionVerdict::Google { redirect_url } => {
                info!("routed to search engine");
                return reply(
                    &format!(
                        "This could be easily answered with a Google search: {redirect_url}"
                    ),
                    json!({
                        "action": "google",
                        "redirect_url": redirect_url,
                    }),
                    RouteOutcome::Google,
                    apply_penalty(current_points, PenaltyCategory::Googleable),
                );
            }
            ActionVerdict::Answer => {}
        }

        // Gate 3: the stricter technical domain check (fail-open).
        let analysis = self.domain.analyze(text).await;
        if !analysis.is_technical {
            info!(
                confidence = analysis.confidence,
                domain = analysis.domain.as_deref().unwrap_or("unknown"),
                "rejected as off-topic"
            );
            return reply(
                NON_TECHNICAL_REJECTION,
                json!({
                    "is_non_technical_response": true,
                    "confidence": analysis.confidence,
                    "domain": analysis.domain,
                    "reason": analysis.reason,
                }),
                RouteOutcome::OffTopic,
                apply_penalty(current_points, PenaltyCategory::NoSubstance),
            );
        }

        // Gate 4: the intermediate verdict rubric (fail-closed).
        let verdict = self.verdict.evaluate(text).await;
        let (outcome, category) = match &verdict {
            IntermediateVerdict::Good => (RouteOutcome::Answered, None),
            IntermediateVerdict::NoSubstance => {
                (RouteOutcome::NoSubstance, Some(PenaltyCategory::NoSubstance))
            }
            IntermediateVerdict::Google { .. } => {
                (RouteOutcome::Google, Some(PenaltyCategory::Googleable))
            }
            IntermediateVerdict::Doc { .. } => {
                (RouteOutcome::Docs, Some(PenaltyCategory::Documentation))
            }
            IntermediateVerdict::Man { .. } => {
                (RouteOutcome::Manpage, Some(PenaltyCategory::Manpage))
            }
        };
        if let Some(category) = category {
            info!(outcome = ?outcome, "intermediate verdict redirected the request");
            return reply(
                &verdict.user_message().unwrap_or_default(),
                json!({ "intermediate_verdict": true }),
                outcome,
                apply_penalty(current_points, category),
            );
        }

        // The request earned a full answer.
        self.answer(text, current_points).await
    }

    /// Invoke the answer model and sanitize its output.
    async fn answer(&self, text: &str, current_points: u32) -> PipelineReply {
        let request = ProviderRequest {
            model: self.answer_model.clone(),
            prompt: build_answer_prompt(text),
            temperature: Some(self.answer_temperature),
        };

        let raw = match self.provider.complete(request).await {
            Ok(response) => response.content,
            Err(e) => {
                warn!(error = %e, "answer call failed");
                return PipelineReply {
                    message: ChatMessage {
                        metadata: Some(json!({ "provider_error": true })),
                        ..ChatMessage::assistant(PROVIDER_FAILURE_APOLOGY)
                    },
                    outcome: RouteOutcome::ProviderFailure,
                    penalty: PenaltyOutcome {
                        points: current_points,
                        delta: 0,
                        reason: PROVIDER_FAILURE_REASON,
                    },
                };
            }
        };

        let structured = sanitize(&raw);
        let (outcome, category) = if structured.parsing_error {
            (RouteOutcome::AnswerDegraded, PenaltyCategory::InvalidFormat)
        } else {
            (RouteOutcome::Answered, PenaltyCategory::Answered)
        };

        info!(
            confidence = structured.confidence,
            parsing_error = structured.parsing_error,
            redirections = structured.redirections.len(),
            "answer produced"
        );

        let metadata = json!({
            "confidence": structured.confidence,
            "redirections": structured.redirections,
            "parsing_error": structured.parsing_error,
        });

        reply(
            &structured.content,
            metadata,
            outcome,
            apply_penalty(current_points, category),
        )
    }
}

fn reply(
    content: &str,
    metadata: serde_json::Value,
    outcome: RouteOutcome,
    penalty: PenaltyOutcome,
) -> PipelineReply {
    PipelineReply {
        message: ChatMessage {
            metadata: Some(metadata),
            ..ChatMessage::assistant(content)
        },
        outcome,
        penalty,
    }
}

/// System prompt for the answer model, with the structured response
/// contract embedded.
fn build_answer_prompt(question: &str) -> String {
    format!(
        r#"You are a technical assistant specialized in computer science. You must follow these rules:

1. ONLY answer technical questions related to computer science.
2. Always format your responses in a standardized way with a confidence level.
3. Be concise in your answers to complex questions and redirect to documentation.
4. If the query is too simple, suggest searching on the internet.
5. Do not respond to simple polite phrases like "hello" or "thank you".
6. For simple bash commands, return the man page.
7. Never use polite formulas in your responses.

Your response must always follow this format:
{{
 "content": "Your concise answer here",
 "confidence": percentage from 0 to 100,
 "redirections": [
   {{
     "type": "google/documentation/letmegooglethat/history",
     "url": "Relevant URL",
     "message": "Explanatory message about the redirection"
   }}
 ]
}}

Question: {question}"#
    )
}
