//! Schemes command handler.
//!
//! Lists the schemes available in the fact store.

use clap::Args;
use faq_core::{config::AppConfig, AppError, AppResult};
use faq_store::FactStore;

/// List the schemes in the fact store
#[derive(Args, Debug)]
pub struct SchemesCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Maximum number of schemes to list
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl SchemesCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing schemes command");

        let store = FactStore::load(&config.data_file)?;
        let limit = self.limit.unwrap_or(usize::MAX);

        if self.json {
            let listing: Vec<_> = store
                .schemes()
                .take(limit)
                .map(|scheme| {
                    serde_json::json!({
                        "id": scheme.id,
                        "schemeName": scheme.scheme_name,
                        "category": scheme.category,
                        "factCount": scheme.facts.len(),
                    })
                })
                .collect();

            let json = serde_json::to_string_pretty(&listing)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            for scheme in store.schemes().take(limit) {
                let category = scheme.category.as_deref().unwrap_or("-");
                println!(
                    "{:<40} {:<12} {} facts  [{}]",
                    scheme.scheme_name,
                    category,
                    scheme.facts.len(),
                    scheme.id
                );
            }
            println!();
            println!("{} schemes total", store.len());
        }

        Ok(())
    }
}
