//! Check command handler.
//!
//! Runs a guardrail on a piece of text without calling any service.

use super::to_json;
use basira_core::AppResult;
use basira_engine::guardrails::{check_input, check_output};
use basira_engine::GuardrailResult;
use clap::Args;

/// Run the guardrails on a piece of text
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Text to check
    pub text: String,

    /// Check as a generated answer with no sources instead of as a question
    #[arg(long)]
    pub output: bool,

    /// Output the verdict as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    pub async fn execute(&self) -> AppResult<()> {
        tracing::info!("Executing check command");

        let result = self.run();

        if self.json {
            println!("{}", to_json(&result)?);
        } else if result.allowed {
            println!("allowed");
        } else {
            println!("blocked: {}", result.reason.as_deref().unwrap_or_default());
            if let Some(topic) = &result.blocked_topic {
                println!("matched: {}", topic);
            }
        }

        Ok(())
    }

    fn run(&self) -> GuardrailResult {
        if self.output {
            check_output(&self.text, &[])
        } else {
            check_input(&self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(text: &str, output: bool) -> CheckCommand {
        CheckCommand {
            text: text.to_string(),
            output,
            json: false,
        }
    }

    #[test]
    fn test_check_question() {
        let result = command("Is it haram to listen to music?", false).run();
        assert!(!result.allowed);
        assert_eq!(result.blocked_topic.as_deref(), Some("is it haram"));
    }

    #[test]
    fn test_check_answer_without_sources() {
        assert!(!command("Allah says in the Quran...", true).run().allowed);
        assert!(command("Patience is a virtue.", true).run().allowed);
    }
}
