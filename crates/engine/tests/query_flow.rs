//! End-to-end pipeline tests: classification, resolution, session context,
//! composition and rephrase fallback exercised through the public engine
//! API against an in-memory store.

use faq_engine::{FaqEngine, QueryRequest, QuestionType, RephraseChain};
use faq_llm::{LlmClient, LlmRequest, LlmResponse};
use faq_store::{FactStore, FactValue, SchemeRecord};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

fn fact(value: &str, url: &str) -> FactValue {
    FactValue {
        value: value.to_string(),
        source_url: url.to_string(),
    }
}

fn sample_store() -> Arc<FactStore> {
    let mut axis_facts = HashMap::new();
    axis_facts.insert(
        "expense_ratio".to_string(),
        fact("0.3%", "https://example.com/axis/expense-ratio"),
    );
    axis_facts.insert(
        "exit_load".to_string(),
        fact(
            "0.5% if redeemed within 7 days",
            "https://example.com/axis/exit-load",
        ),
    );
    axis_facts.insert(
        "minimum_sip".to_string(),
        fact("500", "https://example.com/axis/sip"),
    );

    let mut elss_facts = HashMap::new();
    elss_facts.insert(
        "expense_ratio".to_string(),
        fact("0.8%", "https://example.com/elss/expense-ratio"),
    );

    let records = vec![
        SchemeRecord {
            id: "axis-floater-fund".to_string(),
            scheme_name: "Axis Floater Fund".to_string(),
            aliases: vec!["Axis Floater".to_string()],
            category: Some("Debt".to_string()),
            source_url: "https://example.com/axis-floater-fund".to_string(),
            last_updated: Some("2026-08-01".to_string()),
            facts: axis_facts,
        },
        SchemeRecord {
            id: "quant-elss-tax-saver".to_string(),
            scheme_name: "Quant ELSS Tax Saver Fund".to_string(),
            aliases: vec!["Quant Tax Plan".to_string()],
            category: Some("ELSS".to_string()),
            source_url: "https://example.com/quant-elss".to_string(),
            last_updated: None,
            facts: elss_facts,
        },
    ];

    Arc::new(FactStore::from_records(records).unwrap())
}

fn engine() -> FaqEngine {
    FaqEngine::new(sample_store(), RephraseChain::disabled(), 30).unwrap()
}

#[tokio::test]
async fn factual_query_cites_the_exact_stored_source() {
    let engine = engine();
    let response = engine
        .answer(QueryRequest::new(
            "What is the expense ratio of Axis Floater Fund?",
        ))
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.question_type, QuestionType::ExpenseRatio);
    assert!(response.answer.contains("0.3%"));
    assert_eq!(
        response.source_url,
        "https://example.com/axis/expense-ratio"
    );
}

#[tokio::test]
async fn advice_is_refused_even_with_a_known_scheme_name() {
    let engine = engine();
    let response = engine
        .answer(QueryRequest::new("Should I buy Axis Floater Fund?"))
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.question_type, QuestionType::Opinionated);
    assert!(response.answer.contains("not investment advice"));
    // No scheme-specific answer or citation for advice
    assert!(response.scheme_name.is_none());
    assert!(!response.answer.contains("0.3%"));
}

#[tokio::test]
async fn unknown_fund_gets_a_clarification_not_a_guess() {
    let engine = engine();
    let response = engine
        .answer(QueryRequest::new(
            "What is the expense ratio of Atlantis Imaginary Fund?",
        ))
        .await
        .unwrap();

    assert!(response.success);
    assert!(response.answer.contains("which mutual fund scheme"));
    assert!(response.scheme_name.is_none());
    assert!(!response.source_url.is_empty());
}

#[tokio::test]
async fn session_context_carries_the_scheme_across_turns() {
    let engine = engine();

    let first = engine
        .answer(
            QueryRequest::new("Expense ratio of Axis Floater Fund").with_session("conv-1"),
        )
        .await
        .unwrap();
    assert_eq!(first.scheme_name.as_deref(), Some("Axis Floater Fund"));

    let second = engine
        .answer(QueryRequest::new("What about the exit load?").with_session("conv-1"))
        .await
        .unwrap();

    assert_eq!(second.question_type, QuestionType::ExitLoad);
    assert_eq!(second.scheme_name.as_deref(), Some("Axis Floater Fund"));
    assert_eq!(second.source_url, "https://example.com/axis/exit-load");
}

#[tokio::test]
async fn naming_a_new_scheme_switches_the_session_context() {
    let engine = engine();

    engine
        .answer(
            QueryRequest::new("Expense ratio of Axis Floater Fund").with_session("conv-2"),
        )
        .await
        .unwrap();

    let switched = engine
        .answer(
            QueryRequest::new("Expense ratio of Quant ELSS Tax Saver Fund")
                .with_session("conv-2"),
        )
        .await
        .unwrap();
    assert_eq!(
        switched.scheme_name.as_deref(),
        Some("Quant ELSS Tax Saver Fund")
    );

    let follow_up = engine
        .answer(QueryRequest::new("What about the expense ratio?").with_session("conv-2"))
        .await
        .unwrap();
    assert_eq!(
        follow_up.source_url,
        "https://example.com/elss/expense-ratio"
    );
}

#[tokio::test]
async fn repeated_queries_are_deterministic() {
    let engine = engine();
    let query = "Minimum SIP for Axis Floater Fund";

    let first = engine.answer(QueryRequest::new(query)).await.unwrap();
    let second = engine.answer(QueryRequest::new(query)).await.unwrap();

    assert_eq!(first.answer, second.answer);
    assert_eq!(first.source_url, second.source_url);
}

#[tokio::test]
async fn alias_resolves_to_the_same_scheme() {
    let engine = engine();
    let response = engine
        .answer(QueryRequest::new("Expense ratio of Quant Tax Plan"))
        .await
        .unwrap();

    assert_eq!(
        response.scheme_name.as_deref(),
        Some("Quant ELSS Tax Saver Fund")
    );
    assert_eq!(
        response.source_url,
        "https://example.com/elss/expense-ratio"
    );
}

struct BrokenClient;

#[async_trait::async_trait]
impl LlmClient for BrokenClient {
    fn provider_name(&self) -> &str {
        "broken"
    }

    async fn complete(&self, _request: &LlmRequest) -> faq_core::AppResult<LlmResponse> {
        Err(faq_core::AppError::Llm("backend unreachable".to_string()))
    }
}

#[tokio::test]
async fn broken_llm_backend_degrades_to_the_deterministic_answer() {
    let chain = RephraseChain::new(Arc::new(BrokenClient), "m", Duration::from_secs(1));
    let engine = FaqEngine::new(sample_store(), chain, 30).unwrap();

    let response = engine
        .answer(QueryRequest::new(
            "What is the expense ratio of Axis Floater Fund?",
        ))
        .await
        .unwrap();

    assert!(response.success);
    assert!(response.answer.contains("0.3%"));
    assert_eq!(
        response.source_url,
        "https://example.com/axis/expense-ratio"
    );
}
