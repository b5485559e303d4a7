//! Chat command handler.
//!
//! Interactive stdin loop over the engine. All turns share one session id,
//! so naming a scheme once is enough for follow-up questions.

use clap::Args;
use faq_core::{config::AppConfig, AppResult};
use faq_engine::QueryRequest;
use std::io::{BufRead, Write};

/// Interactive question loop with cross-turn scheme context
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Session id (default: one derived from the process id)
    #[arg(short, long)]
    pub session: Option<String>,

    /// Skip the LLM rephrasing step even if a provider is configured
    #[arg(long)]
    pub no_rephrase: bool,
}

impl ChatCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");

        let engine = super::build_engine(config, !self.no_rephrase)?;

        let session_id = self
            .session
            .clone()
            .unwrap_or_else(|| format!("cli-{}", std::process::id()));
        tracing::debug!("Chat session id: {}", session_id);

        println!("Ask about mutual fund schemes. Type 'exit' or 'quit' to leave.");

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        loop {
            print!("you> ");
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF
                break;
            }

            let query = line.trim();
            if query.is_empty() {
                continue;
            }
            if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
                break;
            }

            let request = QueryRequest::new(query).with_session(session_id.clone());
            let response = engine.answer(request).await?;

            println!("{}", response.answer);
            if !response.source_url.is_empty() {
                println!("Source: {}", response.source_url);
            }
            println!();

            // Long-running loop, so sweep expired sessions between turns
            let pruned = engine.prune_sessions();
            if pruned > 0 {
                tracing::debug!("Pruned {} expired sessions", pruned);
            }
        }

        Ok(())
    }
}
