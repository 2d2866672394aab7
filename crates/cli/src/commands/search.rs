//! Search command handler.
//!
//! Queries the Quran and Hadith collections without generating an answer.

use super::{format_sources, to_json};
use basira_core::{config::AppConfig, AppError, AppResult};
use basira_knowledge::{Retriever, SupabaseRetriever};
use clap::Args;
use std::time::Duration;

/// Search Quran and Hadith sources
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Search text
    pub query: String,

    /// Maximum number of sources (split across both collections)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output sources as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing search command");

        let (url, key) = config.retrieval_settings().ok_or_else(|| {
            AppError::Config(format!(
                "Search needs SUPABASE_URL and {} to be set",
                config.supabase_key_env
            ))
        })?;

        let retriever = SupabaseRetriever::new(
            url,
            key,
            Duration::from_secs(config.retrieval_timeout_secs),
        )?;

        let limit = self.limit.unwrap_or(config.retrieval_limit);
        let sources = retriever.search(&self.query, limit).await;
        tracing::info!("Found {} sources", sources.len());

        if self.json {
            println!("{}", to_json(&sources)?);
        } else if sources.is_empty() {
            println!("No sources found.");
        } else {
            println!("{}", format_sources(&sources));
        }

        Ok(())
    }
}
