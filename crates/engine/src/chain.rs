//! Optional LLM rephrasing over deterministic answers.
//!
//! The chain never produces facts. It receives a fully composed answer and
//! may only reword it; the citation is never handed to the model and never
//! changes. Any failure mode (no client, timeout, transport error, empty
//! output) returns the deterministic answer unchanged, so a dead LLM
//! backend degrades phrasing, not correctness.

use crate::types::AnswerResult;
use faq_llm::{LlmClient, LlmRequest};
use std::sync::Arc;
use std::time::Duration;

const REPHRASE_SYSTEM_PROMPT: &str = "You rewrite mutual-fund answers to sound natural and \
     conversational. Preserve every fact, number, and scheme name exactly as given. Do not add \
     any facts, numbers, URLs, or investment advice. Reply with the rewritten answer only.";

const REPHRASE_MAX_TOKENS: u32 = 256;
const REPHRASE_TEMPERATURE: f32 = 0.2;

/// Timeout-bounded, single-attempt rephrasing step.
pub struct RephraseChain {
    client: Option<Arc<dyn LlmClient>>,
    model: String,
    timeout: Duration,
}

impl RephraseChain {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Some(client),
            model: model.into(),
            timeout,
        }
    }

    /// Chain that passes every answer through untouched.
    pub fn disabled() -> Self {
        Self {
            client: None,
            model: String::new(),
            timeout: Duration::ZERO,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Rephrase the answer text, or return it unchanged.
    ///
    /// Only successful factual/clarification answers are eligible; refusals
    /// and unclassifiable answers keep their fixed wording so the refusal
    /// text can never be softened into advice.
    pub async fn refine(&self, query: &str, baseline: AnswerResult) -> AnswerResult {
        let Some(client) = &self.client else {
            return baseline;
        };

        if !baseline.success || !baseline.question_type.is_factual() {
            return baseline;
        }

        match self.try_rephrase(client.as_ref(), query, &baseline.answer).await {
            Some(rephrased) => AnswerResult {
                answer: rephrased,
                ..baseline
            },
            None => baseline,
        }
    }

    /// One attempt against the model, bounded by the configured timeout.
    /// Never returns an error; a failed attempt is logged and absorbed.
    async fn try_rephrase(
        &self,
        client: &dyn LlmClient,
        query: &str,
        answer: &str,
    ) -> Option<String> {
        let prompt = format!(
            "The user asked: {}\n\nRewrite this answer:\n{}",
            query, answer
        );

        let request = LlmRequest::new(prompt, &self.model)
            .with_system(REPHRASE_SYSTEM_PROMPT)
            .with_max_tokens(REPHRASE_MAX_TOKENS)
            .with_temperature(REPHRASE_TEMPERATURE);

        match tokio::time::timeout(self.timeout, client.complete(&request)).await {
            Ok(Ok(response)) => {
                let content = response.content.trim();
                if content.is_empty() {
                    tracing::debug!("Rephrase returned empty content, keeping baseline");
                    None
                } else {
                    Some(content.to_string())
                }
            }
            Ok(Err(e)) => {
                tracing::debug!("Rephrase failed ({}), keeping baseline", e);
                None
            }
            Err(_) => {
                tracing::debug!(
                    "Rephrase timed out after {:?}, keeping baseline",
                    self.timeout
                );
                None
            }
        }
    }
}
