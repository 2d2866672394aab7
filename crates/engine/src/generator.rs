//! Answer generation via a single chat-completion call.

use crate::types::{EngineOptions, Message, Role};
use basira_core::AppResult;
use basira_llm::{ChatMessage, LlmClient, LlmRequest};
use basira_prompt::{build_prompt, defaults, PromptDefinition};
use std::collections::HashMap;
use std::sync::Arc;

/// Returned when the provider answers with no content.
pub const EMPTY_COMPLETION_FALLBACK: &str =
    "I apologize, but I was unable to generate a response. Please try rephrasing your question.";

/// Builds the chat request and calls the provider once.
///
/// Provider errors propagate unchanged; nothing is retried.
pub struct AnswerGenerator {
    client: Arc<dyn LlmClient>,
    prompt: PromptDefinition,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnswerGenerator {
    /// Create a generator using the built-in answer prompt.
    pub fn new(client: Arc<dyn LlmClient>, options: &EngineOptions) -> Self {
        Self {
            client,
            prompt: defaults::answer_prompt(),
            model: options.model.clone(),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        }
    }

    /// Replace the answer prompt (e.g. with a workspace override).
    pub fn with_prompt(mut self, prompt: PromptDefinition) -> Self {
        self.prompt = prompt;
        self
    }

    /// Assemble system prompt, history (oldest first) and the final user message.
    pub fn build_request(
        &self,
        question: &str,
        context: &str,
        history: &[Message],
        language: Option<&str>,
    ) -> AppResult<LlmRequest> {
        let mut variables = HashMap::new();
        variables.insert("context".to_string(), context.to_string());
        variables.insert("question".to_string(), question.to_string());
        if let Some(language) = language.filter(|l| !l.trim().is_empty()) {
            variables.insert("language".to_string(), language.to_string());
        }

        let built = build_prompt(&self.prompt, &variables)?;

        let history = history.iter().map(|message| match message.role {
            Role::User => ChatMessage::user(message.content.clone()),
            Role::Assistant => ChatMessage::assistant(message.content.clone()),
        });

        Ok(LlmRequest::new(&self.model)
            .with_message(ChatMessage::system(built.system))
            .with_messages(history)
            .with_message(ChatMessage::user(built.user))
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens))
    }

    /// Generate the answer text for a question and its context.
    pub async fn generate_response(
        &self,
        question: &str,
        context: &str,
        history: &[Message],
        language: Option<&str>,
    ) -> AppResult<String> {
        let request = self.build_request(question, context, history, language)?;

        tracing::debug!(
            "Requesting completion from {} (model: {}, {} history turns)",
            self.client.provider_name(),
            self.model,
            history.len()
        );

        let response = self.client.complete(&request).await?;

        match response.text() {
            Some(text) => Ok(text.to_string()),
            None => {
                tracing::warn!("Provider returned no content, using fallback answer");
                Ok(EMPTY_COMPLETION_FALLBACK.to_string())
            }
        }
    }
}
