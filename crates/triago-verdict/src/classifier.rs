// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rubric-driven verdict classification against a small model.
//!
//! The rubric demands exactly one of five output formats. The model is
//! cheap and unreliable, so the raw output goes through the defensive
//! extraction in [`crate::verdict`], and any provider failure fails
//! closed to the no-substance rejection.

use std::sync::Arc;

use tracing::{debug, warn};

use triago_core::{ProviderAdapter, ProviderRequest};

use crate::verdict::{extract_verdict, IntermediateVerdict};

/// Classifier holding the provider handle and model selection.
pub struct VerdictClassifier {
    provider: Arc<dyn ProviderAdapter>,
    model: String,
    temperature: Option<f32>,
}

impl VerdictClassifier {
    pub fn new(provider: Arc<dyn ProviderAdapter>, model: String, temperature: Option<f32>) -> Self {
        Self {
            provider,
            model,
            temperature,
        }
    }

    /// Evaluate a user message against the rubric.
    ///
    /// Infallible by contract: a provider error yields `NoSubstance`
    /// (fail closed) -- an unreachable model must never let a request
    /// silently proceed to the expensive answer call.
    pub async fn evaluate(&self, user_message: &str) -> IntermediateVerdict {
        let request = ProviderRequest {
            model: self.model.clone(),
            prompt: build_rubric_prompt(user_message),
            temperature: self.temperature,
        };

        match self.provider.complete(request).await {
            Ok(response) => {
                debug!(raw = %response.content.trim(), "intermediate response");
                let verdict = extract_verdict(&response.content);
                debug!(?verdict, "extracted decision");
                verdict
            }
            Err(e) => {
                warn!(error = %e, "verdict classifier call failed, rejecting");
                IntermediateVerdict::NoSubstance
            }
        }
    }
}

/// The rubric prompt. Carries strict criteria, worked examples, and the
/// five exact output formats the model must choose between.
fn build_rubric_prompt(user_message: &str) -> String {
    format!(
        r#"You are an AI assistant that evaluates whether requests are appropriate for technical assistance.

User Request: "{user_message}"

STRICT CRITERIA FOR TECHNICAL QUESTIONS:
1. Must relate directly to programming, computer science, IT infrastructure, or specific technologies
2. Must demonstrate effort and clarity (not just "how to code" or single words)
3. Must be specific enough to be answerable with technical knowledge
4. Must not be easily answerable with a basic web search

IMPORTANT: Framework and library-specific questions ARE technical questions, especially questions about:
- Symfony, Laravel, Django, Flask, Spring, Express, Nestjs, Rails (web frameworks)
- React, Vue, Angular, Svelte (frontend frameworks)
- Middleware, plugins, hooks, components, or implementation examples

Examples of NON-TECHNICAL questions (should NOT be "GOOD"):
- "Hello"
- "Test"
- "How are you"
- "What's up"
- Any single word request
- Any request with less than 5 characters
- Any greeting or chitchat
- Any profanity or inappropriate content
- Any request with no clear technical context

Examples of PROPER TECHNICAL questions (should be "GOOD"):
- "How do I implement a binary search tree in Python?"
- "What's the difference between RESTful and GraphQL APIs?"
- "My MongoDB query is slow, how can I optimize: db.users.find({{age: {{$gt: 30}}}})"
- "How do I fix this TypeScript error: Type 'string' is not assignable to type 'number'"
- "Show me an example of Symfony middleware"
- "How to create middleware in Express.js"
- "Can you explain Laravel middleware?"
- "What's the best way to implement JWT authentication in Django?"

EXAMPLES OF "SHOW ME" QUESTIONS THAT ARE VALID TECHNICAL REQUESTS:
- "Show me how to write a React component" - GOOD
- "Show me an example of Symfony middleware" - GOOD
- "Show me how to create a Docker container" - GOOD

Your task is to categorize this request using EXACTLY ONE of these formats:
1. "ERROR:NO_SUBSTANCE" - For greetings, single words, or non-technical/low-effort messages
2. "LMGTFY:" followed by search terms - For simple questions easily answered via search or not technical questions
3. "DOC:" followed by technology name and URL - For questions about specific documentation
4. "MAN:" followed by command name - For bash/terminal command questions
5. "GOOD" - ONLY for genuine technical questions meeting ALL criteria above

RESPONSE FORMAT: Only output one of the exact formats above, no explanations."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use triago_test_utils::MockProvider;

    fn classifier(provider: Arc<MockProvider>) -> VerdictClassifier {
        VerdictClassifier::new(provider, "small-model".to_string(), Some(0.3))
    }

    #[tokio::test]
    async fn good_response_passes_through() {
        let provider = Arc::new(MockProvider::with_responses(vec!["GOOD".to_string()]));
        let c = classifier(provider);
        assert_eq!(
            c.evaluate("How do I implement a binary search tree in Python?")
                .await,
            IntermediateVerdict::Good
        );
    }

    #[tokio::test]
    async fn noisy_response_still_extracts() {
        let provider = Arc::new(MockProvider::with_responses(vec![
            "<think>\nlooks searchable to me\n</think>\nLMGTFY: capital of France".to_string(),
        ]));
        let c = classifier(provider);
        assert_eq!(
            c.evaluate("what is the capital of France").await,
            IntermediateVerdict::Google {
                search_terms: "capital of France".to_string()
            }
        );
    }

    #[tokio::test]
    async fn provider_failure_fails_closed() {
        let provider = Arc::new(MockProvider::failing());
        let c = classifier(provider);
        assert_eq!(
            c.evaluate("anything at all").await,
            IntermediateVerdict::NoSubstance
        );
    }

    #[tokio::test]
    async fn prompt_embeds_the_user_message() {
        let provider = Arc::new(MockProvider::with_responses(vec!["GOOD".to_string()]));
        let c = VerdictClassifier::new(provider.clone(), "small-model".to_string(), None);
        c.evaluate("explain rust lifetimes in async code").await;

        let prompts = provider.prompts().await;
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("explain rust lifetimes in async code"));
        assert!(prompts[0].contains("ERROR:NO_SUBSTANCE"));
    }
}
