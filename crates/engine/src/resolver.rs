//! Scheme-entity resolution.
//!
//! Maps raw query text (plus optional conversation context) to a scheme id.
//! Name matching runs against the store's name/alias index; the longest
//! matching span wins so a longer fund name beats a shorter one sharing a
//! token. When no name is present and the question is factual, the last
//! scheme of the session is reused, which is what makes "What about exit
//! load?" follow-ups work.

use crate::types::QuestionType;
use faq_store::FactStore;
use std::sync::Arc;

/// Resolves scheme mentions in query text.
pub struct EntityResolver {
    store: Arc<FactStore>,
}

impl EntityResolver {
    pub fn new(store: Arc<FactStore>) -> Self {
        Self { store }
    }

    /// Resolve a scheme id from the query.
    ///
    /// # Arguments
    /// * `text` - Raw query text
    /// * `question_type` - Already-classified category
    /// * `context` - Unexpired `last_scheme_id` from the session, if any
    pub fn resolve(
        &self,
        text: &str,
        question_type: QuestionType,
        context: Option<&str>,
    ) -> Option<String> {
        // Longest matching name/alias span first
        if let Some(name_match) = self.store.matches(text).into_iter().next() {
            tracing::debug!(
                "Resolved scheme '{}' via span '{}'",
                name_match.scheme_id,
                name_match.span
            );
            return Some(name_match.scheme_id.to_string());
        }

        // Fall back to conversation context for factual follow-ups only
        if question_type.is_factual() {
            if let Some(last_scheme_id) = context {
                if self.store.get(last_scheme_id).is_some() {
                    tracing::debug!("Reusing scheme '{}' from session context", last_scheme_id);
                    return Some(last_scheme_id.to_string());
                }
            }
        }

        None
    }
}
