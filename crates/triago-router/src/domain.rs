// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-tier technical domain gate.
//!
//! Tier 1 is a keyword check with zero cost. Tier 2 delegates to an
//! LLM-backed classifier with a fixed output schema. Any tier-2 failure
//! fails open: the gate is designed to avoid false rejections at the cost
//! of occasionally letting an off-topic question through.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use triago_core::{ProviderAdapter, ProviderRequest};

/// Domains considered in scope for the assistant.
pub static TECHNICAL_DOMAINS: &[&str] = &[
    "programming",
    "software development",
    "computer science",
    "web development",
    "databases",
    "networking",
    "cybersecurity",
    "operating systems",
    "artificial intelligence",
    "machine learning",
    "data science",
    "cloud computing",
    "devops",
    "system administration",
    "it infrastructure",
    "hardware",
    "software engineering",
    "algorithms",
    "data structures",
    "computer architecture",
    "programming languages",
    "version control",
    "computer graphics",
    "game development",
    "mobile development",
    "embedded systems",
    "robotics",
    "automation",
];

/// Keywords that strongly indicate a technical question. Substring
/// matched, lowercased -- deliberately looser than the action analyzer's
/// whole-word tables, since a hit here only skips the tier-2 call.
pub static DOMAIN_KEYWORDS: &[&str] = &[
    // Languages
    "javascript", "python", "java", "c++", "c#", "php", "ruby", "go", "rust", "swift",
    "kotlin", "typescript", "html", "css", "sql", "bash", "shell", "powershell", "perl",
    "scala", "matlab", "assembly", "fortran", "cobol", "lisp", "haskell", "erlang",
    // Frameworks and libraries
    "react", "angular", "vue", "node", "express", "django", "flask", "spring", "laravel",
    "rails", "pytorch", "tensorflow", "keras", "pandas", "numpy", "scikit-learn",
    "matplotlib", "bootstrap", "jquery", "next.js", "gatsby", "svelte", "tailwind",
    "redux", "dotnet",
    // Databases
    "mysql", "postgresql", "mongodb", "nosql", "database", "oracle", "sqlite", "mariadb",
    "redis", "cassandra", "elasticsearch", "neo4j", "dynamodb", "firestore",
    // Development concepts
    "api", "rest", "graphql", "json", "xml", "ajax", "http", "https", "websocket",
    "algorithm", "data structure", "interface", "inheritance", "polymorphism",
    "encapsulation", "abstraction", "function", "variable", "class", "object", "method",
    "recursion", "iteration", "loop", "conditional", "asynchronous", "synchronous",
    "thread", "process", "compile", "runtime", "debug", "exception", "error", "stack",
    "heap", "memory",
    // Tools and systems
    "git", "github", "gitlab", "bitbucket", "docker", "kubernetes", "jenkins", "ci/cd",
    "linux", "unix", "windows", "macos", "ubuntu", "debian", "fedora", "centos",
    "apache", "nginx", "iis", "ssh", "ftp", "aws", "azure", "gcp", "terminal",
    "command line",
    // Technical components
    "server", "client", "frontend", "backend", "full-stack", "microservice", "monolith",
    "middleware", "cache", "load balancer", "proxy", "cdn", "dns", "domain", "hosting",
    "repository", "webhook", "firewall", "vpn", "router", "switch", "gateway", "protocol",
];

/// Outcome of a domain classification. Confidence is advisory metadata
/// only; control flow never branches on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechnicalAnalysis {
    pub is_technical: bool,
    pub confidence: u8,
    pub domain: Option<String>,
    pub reason: Option<String>,
}

/// Quick tier-1 check: does the question look technical from keywords
/// alone? A `true` here skips the LLM call entirely.
pub fn is_likely_technical(question: &str) -> bool {
    let lower = question.to_lowercase();

    if DOMAIN_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return true;
    }

    // "how to" together with a known domain name
    if lower.contains("how to")
        && TECHNICAL_DOMAINS.iter().any(|d| lower.contains(d))
    {
        return true;
    }

    // Troubleshooting vocabulary
    if lower.contains("error") || lower.contains("bug") || lower.contains("exception") {
        return true;
    }

    false
}

/// Expected shape of the tier-2 classifier output.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassificationPayload {
    is_technical: bool,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

/// LLM-backed domain classifier (tier 2).
pub struct DomainClassifier {
    provider: Arc<dyn ProviderAdapter>,
    model: String,
    temperature: Option<f32>,
}

impl DomainClassifier {
    pub fn new(provider: Arc<dyn ProviderAdapter>, model: String, temperature: Option<f32>) -> Self {
        Self {
            provider,
            model,
            temperature,
        }
    }

    /// Classify a question, trying the cheap keyword tier first.
    ///
    /// Infallible by contract: a provider or parse failure returns the
    /// fail-open default rather than an error.
    pub async fn analyze(&self, question: &str) -> TechnicalAnalysis {
        if is_likely_technical(question) {
            return TechnicalAnalysis {
                is_technical: true,
                confidence: 90,
                domain: Some("technical (keyword match)".to_string()),
                reason: Some("quick check found technical keywords".to_string()),
            };
        }

        self.classify_with_model(question).await
    }

    async fn classify_with_model(&self, question: &str) -> TechnicalAnalysis {
        let request = ProviderRequest {
            model: self.model.clone(),
            prompt: build_classifier_prompt(question),
            temperature: self.temperature,
        };

        match self.provider.complete(request).await {
            Ok(response) => match parse_classification(&response.content) {
                Some(analysis) => {
                    debug!(
                        is_technical = analysis.is_technical,
                        confidence = analysis.confidence,
                        "domain classification"
                    );
                    analysis
                }
                None => {
                    warn!(raw = %response.content, "unparseable domain classification");
                    fail_open()
                }
            },
            Err(e) => {
                warn!(error = %e, "domain classifier call failed");
                fail_open()
            }
        }
    }
}

/// Fail-open default: never block a question over an internal error.
fn fail_open() -> TechnicalAnalysis {
    TechnicalAnalysis {
        is_technical: true,
        confidence: 50,
        domain: Some("unknown".to_string()),
        reason: Some("error during classification, allowing by default".to_string()),
    }
}

fn build_classifier_prompt(question: &str) -> String {
    format!(
        "You are a specialized filter that determines if a question is related to technical \
topics, specifically computer science and programming.\n\n\
Technical domains include: {domains}\n\n\
Technical keywords include: {keywords}\n\n\
Question: {question}\n\n\
Determine if this question is related to a technical domain.\n\
Consider both explicit domain references and implicit technical nature.\n\n\
Respond with a JSON object and nothing else:\n\
{{\"isTechnical\": boolean, \"confidence\": number from 0 to 100, \
\"domain\": \"the detected domain\", \"reason\": \"reasoning behind the classification\"}}",
        domains = TECHNICAL_DOMAINS.join(", "),
        keywords = DOMAIN_KEYWORDS.join(", "),
        question = question,
    )
}

/// Pull the JSON object out of a possibly noisy model response.
fn parse_classification(raw: &str) -> Option<TechnicalAnalysis> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }

    let payload: ClassificationPayload = serde_json::from_str(&raw[start..=end]).ok()?;
    let confidence = payload
        .confidence
        .filter(|c| (0.0..=100.0).contains(c))
        .map(|c| c as u8)
        .unwrap_or(50);

    Some(TechnicalAnalysis {
        is_technical: payload.is_technical,
        confidence,
        domain: payload.domain,
        reason: payload.reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use triago_test_utils::MockProvider;

    #[test]
    fn keyword_hit_is_likely_technical() {
        assert!(is_likely_technical("my docker build hangs"));
        assert!(is_likely_technical("what is a mutex ERROR about"));
    }

    #[test]
    fn how_to_with_domain_is_likely_technical() {
        assert!(is_likely_technical("how to get started with machine learning"));
    }

    #[test]
    fn chitchat_is_not_likely_technical() {
        assert!(!is_likely_technical("what should I eat tonight"));
    }

    #[tokio::test]
    async fn tier1_short_circuits_without_provider_call() {
        let provider = Arc::new(MockProvider::new());
        let classifier =
            DomainClassifier::new(provider.clone(), "test-model".to_string(), None);

        let analysis = classifier.analyze("how do I fix this python bug").await;
        assert!(analysis.is_technical);
        assert_eq!(analysis.confidence, 90);
        assert_eq!(provider.calls().await, 0, "tier 1 must not invoke the model");
    }

    #[tokio::test]
    async fn tier2_parses_clean_json() {
        let provider = Arc::new(MockProvider::with_responses(vec![
            r#"{"isTechnical": false, "confidence": 85, "domain": "cooking", "reason": "recipe question"}"#
                .to_string(),
        ]));
        let classifier = DomainClassifier::new(provider, "test-model".to_string(), None);

        let analysis = classifier.analyze("what should I eat tonight").await;
        assert!(!analysis.is_technical);
        assert_eq!(analysis.confidence, 85);
        assert_eq!(analysis.domain.as_deref(), Some("cooking"));
    }

    #[tokio::test]
    async fn tier2_tolerates_fenced_json() {
        let provider = Arc::new(MockProvider::with_responses(vec![
            "Here is my answer:\n```json\n{\"isTechnical\": true, \"confidence\": 70, \"domain\": \"networking\", \"reason\": \"dns\"}\n```"
                .to_string(),
        ]));
        let classifier = DomainClassifier::new(provider, "test-model".to_string(), None);

        let analysis = classifier.analyze("what should I eat tonight").await;
        assert!(analysis.is_technical);
        assert_eq!(analysis.confidence, 70);
    }

    #[tokio::test]
    async fn provider_failure_fails_open() {
        let provider = Arc::new(MockProvider::failing());
        let classifier = DomainClassifier::new(provider, "test-model".to_string(), None);

        let analysis = classifier.analyze("what should I eat tonight").await;
        assert!(analysis.is_technical, "errors must default to allowing");
        assert_eq!(analysis.confidence, 50);
        assert!(analysis
            .reason
            .as_deref()
            .unwrap()
            .contains("allowing by default"));
    }

    #[tokio::test]
    async fn garbage_output_fails_open() {
        let provider = Arc::new(MockProvider::with_responses(vec![
            "I cannot classify this".to_string(),
        ]));
        let classifier = DomainClassifier::new(provider, "test-model".to_string(), None);

        let analysis = classifier.analyze("what should I eat tonight").await;
        assert!(analysis.is_technical);
        assert_eq!(analysis.confidence, 50);
    }

    #[test]
    fn out_of_range_confidence_coerced() {
        let analysis = parse_classification(
            r#"{"isTechnical": true, "confidence": 400, "domain": "x", "reason": "y"}"#,
        )
        .unwrap();
        assert_eq!(analysis.confidence, 50);
    }
}
