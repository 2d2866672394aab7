//! Ask command handler.
//!
//! Runs the full answer pipeline for one question.

use super::{format_sources, to_json};
use basira_core::{config::AppConfig, AppError, AppResult};
use basira_engine::{BasiraAnswer, BasiraEngine, BasiraRequest, Message};
use clap::Args;
use std::path::{Path, PathBuf};

/// Ask a question about the Quran and Hadith
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Preferred response language (e.g. Arabic, Urdu)
    #[arg(short, long)]
    pub language: Option<String>,

    /// JSON file with earlier turns: [{"role": "user", "content": "..."}, ...]
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Output the answer as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let request = self.build_request()?;
        let engine = BasiraEngine::from_config(config)?;

        if !engine.has_retriever() {
            tracing::warn!(
                "SUPABASE_URL or {} not set; answering without sources",
                config.supabase_key_env
            );
        }

        let answer = engine.ask(&request).await?;

        if self.json {
            println!("{}", to_json(&answer)?);
        } else {
            println!("{}", render_answer(&answer));
        }

        Ok(())
    }

    fn build_request(&self) -> AppResult<BasiraRequest> {
        let mut request = BasiraRequest::new(self.question.clone());

        if let Some(language) = &self.language {
            request = request.with_language(language.clone());
        }

        if let Some(path) = &self.history {
            request = request.with_history(load_history(path)?);
        }

        Ok(request)
    }
}

/// Read conversation history from a JSON array of messages.
pub fn load_history(path: &Path) -> AppResult<Vec<Message>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!("Failed to read history file {:?}: {}", path, e))
    })?;

    let history: Vec<Message> = serde_json::from_str(&contents).map_err(|e| {
        AppError::Config(format!("Failed to parse history file {:?}: {}", path, e))
    })?;

    tracing::debug!("Loaded {} history turns from {:?}", history.len(), path);
    Ok(history)
}

/// Plain-text rendering: the answer followed by its citations.
fn render_answer(answer: &BasiraAnswer) -> String {
    if answer.sources.is_empty() {
        return answer.answer.clone();
    }

    format!(
        "{}\n\nSources:\n{}",
        answer.answer,
        format_sources(&answer.sources)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use basira_engine::Role;
    use basira_knowledge::Source;
    use tempfile::TempDir;

    #[test]
    fn test_load_history() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        std::fs::write(
            &path,
            r#"[
                {"role": "user", "content": "What is sabr?"},
                {"role": "assistant", "content": "Sabr means patience."}
            ]"#,
        )
        .unwrap();

        let history = load_history(&path).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[1].content, "Sabr means patience.");
    }

    #[test]
    fn test_load_history_rejects_unknown_role() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        std::fs::write(&path, r#"[{"role": "system", "content": "hi"}]"#).unwrap();

        assert!(matches!(load_history(&path), Err(AppError::Config(_))));
    }

    #[test]
    fn test_load_history_missing_file() {
        let result = load_history(Path::new("/nonexistent/history.json"));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_build_request() {
        let command = AskCommand {
            question: "What is sabr?".to_string(),
            language: Some("Urdu".to_string()),
            history: None,
            json: false,
        };

        let request = command.build_request().unwrap();
        assert_eq!(request.question, "What is sabr?");
        assert_eq!(request.language.as_deref(), Some("Urdu"));
        assert!(request.conversation_history.is_empty());
    }

    #[test]
    fn test_render_answer_lists_sources() {
        let answer = BasiraAnswer::answered(
            "Patience is praised.".to_string(),
            vec![Source::quran("Surah Al-Baqarah (2:153)", "", "Seek help through patience")],
        );

        let text = render_answer(&answer);
        assert!(text.starts_with("Patience is praised.\n\nSources:\n[1] Surah Al-Baqarah (2:153)"));
    }

    #[test]
    fn test_render_blocked_answer() {
        let answer = BasiraAnswer::blocked("Refused.".to_string(), "no_sources");
        assert_eq!(render_answer(&answer), "Refused.");
    }
}
