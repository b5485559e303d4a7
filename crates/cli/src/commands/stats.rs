//! Stats command handler.
//!
//! Shows fact store statistics: scheme and fact counts plus per-key
//! coverage, which is how gaps in the collected data show up.

use clap::Args;
use faq_core::{config::AppConfig, AppError, AppResult};
use faq_store::FactStore;

/// Show fact store statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");

        let store = FactStore::load(&config.data_file)?;
        let stats = store.stats();

        if self.json {
            let json = serde_json::to_string_pretty(&stats)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("Schemes: {}", stats.total_schemes);
            println!("Facts:   {}", stats.total_facts);
            println!();
            println!("Fact coverage:");
            for (key, count) in &stats.fact_coverage {
                println!("  {:<24} {}/{}", key, count, stats.total_schemes);
            }
        }

        Ok(())
    }
}
