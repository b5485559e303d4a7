//! Query-answering engine for mutual-fund FAQ queries.
//!
//! The engine answers natural-language questions from previously collected
//! factual records, always attaches exactly one citation, and refuses
//! opinion/advice requests. Control flow per query:
//!
//! 1. `QuestionClassifier` maps the text to a question type
//! 2. `EntityResolver` maps the text (plus session context) to a scheme
//! 3. `AnswerComposer` produces the deterministic answer + citation
//! 4. `RephraseChain` optionally rewrites the phrasing, falling back to the
//!    deterministic answer on any failure
//!
//! The deterministic answer is always computed first; the rephrasing step
//! can never invent facts or alter the citation.

pub mod chain;
pub mod classifier;
pub mod composer;
pub mod engine;
pub mod resolver;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use chain::RephraseChain;
pub use classifier::QuestionClassifier;
pub use composer::AnswerComposer;
pub use engine::FaqEngine;
pub use resolver::EntityResolver;
pub use session::SessionStore;
pub use types::{AnswerResult, QueryRequest, QueryResponse, QuestionType};
