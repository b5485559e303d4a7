//! Query orchestration.
//!
//! `FaqEngine` wires the classifier, resolver, session store, composer and
//! rephrase chain into the per-query pipeline. The deterministic answer is
//! always composed before the rephrase step runs, so a failed or slow LLM
//! backend can only affect phrasing.

use crate::chain::RephraseChain;
use crate::classifier::QuestionClassifier;
use crate::composer::AnswerComposer;
use crate::resolver::EntityResolver;
use crate::session::SessionStore;
use crate::types::{QueryRequest, QueryResponse, QuestionType};
use faq_core::AppResult;
use faq_store::FactStore;
use std::sync::Arc;

/// The query-answering engine. Cheap to share behind an `Arc`; all state
/// except the session map is immutable after construction.
pub struct FaqEngine {
    store: Arc<FactStore>,
    classifier: QuestionClassifier,
    resolver: EntityResolver,
    sessions: SessionStore,
    composer: AnswerComposer,
    chain: RephraseChain,
}

impl FaqEngine {
    pub fn new(
        store: Arc<FactStore>,
        chain: RephraseChain,
        session_ttl_minutes: u64,
    ) -> AppResult<Self> {
        Ok(Self {
            classifier: QuestionClassifier::new(),
            resolver: EntityResolver::new(Arc::clone(&store)),
            sessions: SessionStore::new(session_ttl_minutes),
            composer: AnswerComposer::new()?,
            chain,
            store,
        })
    }

    /// Answer one query.
    pub async fn answer(&self, request: QueryRequest) -> AppResult<QueryResponse> {
        let text = request.text.trim();
        if text.is_empty() {
            return Ok(QueryResponse::from_result(
                request.text.clone(),
                AnswerComposer::malformed(),
            ));
        }

        let question_type = self.classifier.classify(text);
        tracing::debug!("Classified query as '{}'", question_type);

        // Advice requests are refused before any scheme resolution; the
        // session context must not be read or written for them.
        if question_type == QuestionType::Opinionated {
            let result = self.composer.compose(question_type, None)?;
            return Ok(QueryResponse::from_result(text, result));
        }

        let context = request
            .session_id
            .as_deref()
            .and_then(|session_id| self.sessions.get(session_id));

        let scheme_id = self
            .resolver
            .resolve(text, question_type, context.as_deref());

        if let (Some(session_id), Some(scheme_id)) =
            (request.session_id.as_deref(), scheme_id.as_deref())
        {
            self.sessions.update(session_id, scheme_id);
        }

        let scheme = scheme_id.as_deref().and_then(|id| self.store.get(id));

        let baseline = self.composer.compose(question_type, scheme)?;
        let result = self.chain.refine(text, baseline).await;

        Ok(QueryResponse::from_result(text, result))
    }

    /// Sweep expired sessions. Returns the number removed.
    pub fn prune_sessions(&self) -> usize {
        self.sessions.prune()
    }
}
