//! LLM integration crate for the Fund FAQ engine.
//!
//! This crate provides a provider-agnostic abstraction for the optional
//! answer-rephrasing step. The engine never depends on a specific provider;
//! it only sees the `LlmClient` trait and treats any failure as "keep the
//! deterministic answer".
//!
//! # Providers
//! - **Gemini**: Google Generative Language API (the original deployment)
//! - **Ollama**: Local LLM runtime

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse};
pub use factory::create_client;
pub use providers::{GeminiClient, OllamaClient};
