//! Command handlers for the Fund FAQ CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod chat;
pub mod schemes;
pub mod stats;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use schemes::SchemesCommand;
pub use stats::StatsCommand;

use faq_core::{config::AppConfig, AppError, AppResult};
use faq_engine::{FaqEngine, RephraseChain};
use faq_llm::create_client;
use faq_store::FactStore;
use std::sync::Arc;
use std::time::Duration;

/// Load the fact store and assemble an engine per the configuration.
///
/// A missing or invalid data file is fatal: the engine never starts on an
/// empty store. `rephrase` lets a command force the deterministic path
/// regardless of the configured provider.
pub fn build_engine(config: &AppConfig, rephrase: bool) -> AppResult<FaqEngine> {
    let store = Arc::new(FactStore::load(&config.data_file)?);
    tracing::info!(
        "Loaded {} schemes from {:?}",
        store.len(),
        config.data_file
    );

    let chain = if rephrase && config.rephrase_enabled && config.provider != "none" {
        let client = create_client(&config.provider, None, config.api_key.as_deref())
            .map_err(AppError::Config)?;
        tracing::debug!("Rephrasing enabled via provider '{}'", config.provider);
        RephraseChain::new(
            client,
            &config.model,
            Duration::from_millis(config.rephrase_timeout_ms),
        )
    } else {
        RephraseChain::disabled()
    };

    FaqEngine::new(store, chain, config.session_ttl_minutes)
}
