//! Ask command handler.
//!
//! Answers a single question and prints the answer with its citation.

use clap::Args;
use faq_core::{config::AppConfig, AppError, AppResult};
use faq_engine::QueryRequest;

/// Answer a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub query: Vec<String>,

    /// Session id for cross-turn scheme context
    #[arg(short, long)]
    pub session: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the LLM rephrasing step even if a provider is configured
    #[arg(long)]
    pub no_rephrase: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let query = self.query.join(" ");
        if query.trim().is_empty() {
            return Err(AppError::Config("No question provided".to_string()));
        }

        let engine = super::build_engine(config, !self.no_rephrase)?;

        let mut request = QueryRequest::new(query);
        if let Some(session) = &self.session {
            request = request.with_session(session.clone());
        }

        let response = engine.answer(request).await?;

        if self.json {
            let json = serde_json::to_string_pretty(&response)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("{}", response.answer);
            if !response.source_url.is_empty() {
                println!("Source: {}", response.source_url);
            }
        }

        Ok(())
    }
}
