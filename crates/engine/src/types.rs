//! Engine request/response and question types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of question categories the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    ExpenseRatio,
    ExitLoad,
    MinimumSip,
    LockIn,
    Riskometer,
    Benchmark,
    Statements,
    Nav,
    FundManager,
    FundSize,
    /// Advice/recommendation request; always refused
    Opinionated,
    /// No category matched; answered with a clarification, never a guess
    Unknown,
}

impl QuestionType {
    /// Wire name of the category (matches the persisted fact keys).
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::ExpenseRatio => "expense_ratio",
            QuestionType::ExitLoad => "exit_load",
            QuestionType::MinimumSip => "minimum_sip",
            QuestionType::LockIn => "lock_in",
            QuestionType::Riskometer => "riskometer",
            QuestionType::Benchmark => "benchmark",
            QuestionType::Statements => "statements",
            QuestionType::Nav => "nav",
            QuestionType::FundManager => "fund_manager",
            QuestionType::FundSize => "fund_size",
            QuestionType::Opinionated => "opinionated",
            QuestionType::Unknown => "unknown",
        }
    }

    /// Whether this category asks for a verifiable fact (as opposed to
    /// advice or an unclassifiable question). Factual types participate in
    /// scheme resolution and cross-turn context reuse.
    pub fn is_factual(&self) -> bool {
        !matches!(self, QuestionType::Opinionated | QuestionType::Unknown)
    }

    /// The fact key this category reads from the store, if it is backed by
    /// a single stored fact. `statements` is procedural and has none;
    /// `minimum_sip` composes several keys and is special-cased by the
    /// composer.
    pub fn fact_key(&self) -> Option<&'static str> {
        match self {
            QuestionType::ExpenseRatio => Some("expense_ratio"),
            QuestionType::ExitLoad => Some("exit_load"),
            QuestionType::MinimumSip => Some("minimum_sip"),
            QuestionType::LockIn => Some("lock_in"),
            QuestionType::Riskometer => Some("riskometer"),
            QuestionType::Benchmark => Some("benchmark"),
            QuestionType::Nav => Some("nav"),
            QuestionType::FundManager => Some("fund_manager"),
            QuestionType::FundSize => Some("fund_size"),
            _ => None,
        }
    }

    /// Human-readable label used in clarification and not-available answers.
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::ExpenseRatio => "expense ratio",
            QuestionType::ExitLoad => "exit load",
            QuestionType::MinimumSip => "minimum SIP",
            QuestionType::LockIn => "lock-in period",
            QuestionType::Riskometer => "riskometer",
            QuestionType::Benchmark => "benchmark",
            QuestionType::Statements => "statement download",
            QuestionType::Nav => "NAV",
            QuestionType::FundManager => "fund manager",
            QuestionType::FundSize => "fund size",
            QuestionType::Opinionated => "investment advice",
            QuestionType::Unknown => "general",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composed answer with its single citation.
///
/// Every branch of the composer yields exactly one `source_url`; the only
/// exception is malformed input, where `success` is false and the URL is
/// empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResult {
    pub answer: String,
    pub source_url: String,
    pub question_type: QuestionType,
    pub scheme_name: Option<String>,
    pub success: bool,
}

/// An incoming query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub text: String,

    /// Client-chosen conversation id; enables cross-turn scheme context
    #[serde(default)]
    pub session_id: Option<String>,
}

impl QueryRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            session_id: None,
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// The engine's reply for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub success: bool,
    pub query: String,
    pub answer: String,
    pub source_url: String,
    pub question_type: QuestionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme_name: Option<String>,
}

impl QueryResponse {
    /// Assemble the wire response from a composed answer.
    pub fn from_result(query: impl Into<String>, result: AnswerResult) -> Self {
        Self {
            success: result.success,
            query: query.into(),
            answer: result.answer,
            source_url: result.source_url,
            question_type: result.question_type,
            scheme_name: result.scheme_name,
        }
    }
}
