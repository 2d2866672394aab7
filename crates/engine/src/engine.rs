//! Basira answer pipeline.
//!
//! One linear pass per request:
//! input check -> retrieve -> build context -> generate -> output check.
//! A blocked input never reaches retrieval or generation. Nothing is
//! retried, and the engine keeps no state between requests.

use crate::generator::AnswerGenerator;
use crate::guardrails::{self, BLOCKED_REASON_NO_SOURCES, NO_SOURCES_ANSWER};
use crate::types::{BasiraAnswer, BasiraRequest, EngineOptions, MAX_SOURCES};
use basira_core::{AppConfig, AppResult};
use basira_knowledge::{build_context, Retriever, SupabaseRetriever};
use basira_llm::{create_client_from_config, LlmClient};
use basira_prompt::{resolve_answer_prompt, PromptDefinition};
use std::sync::Arc;
use std::time::Duration;

/// Guardrail-filtered, source-grounded question answering.
pub struct BasiraEngine {
    generator: AnswerGenerator,
    retriever: Option<Arc<dyn Retriever>>,
    options: EngineOptions,
}

impl BasiraEngine {
    /// Create an engine without a retriever; answers will carry no sources.
    pub fn new(client: Arc<dyn LlmClient>, options: EngineOptions) -> Self {
        Self {
            generator: AnswerGenerator::new(client, &options),
            retriever: None,
            options,
        }
    }

    /// Attach a retriever.
    pub fn with_retriever(mut self, retriever: Arc<dyn Retriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Use a custom answer prompt.
    pub fn with_prompt(mut self, prompt: PromptDefinition) -> Self {
        self.generator = self.generator.with_prompt(prompt);
        self
    }

    /// Build an engine from application configuration.
    ///
    /// The Supabase retriever is attached only when both its URL and key are
    /// configured. A workspace prompt override replaces the built-in prompt.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let client = create_client_from_config(config)?;

        let options = EngineOptions {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            retrieval_limit: config.retrieval_limit,
            max_sources: MAX_SOURCES,
        };

        let prompt = resolve_answer_prompt(Some(config.workspace.as_path()))?;
        let mut engine = Self::new(client, options).with_prompt(prompt);

        match config.retrieval_settings() {
            Some((url, key)) => {
                let retriever = SupabaseRetriever::new(
                    url,
                    key,
                    Duration::from_secs(config.retrieval_timeout_secs),
                )?;
                engine = engine.with_retriever(Arc::new(retriever));
            }
            None => {
                tracing::info!("Retrieval not configured; answers will carry no sources");
            }
        }

        Ok(engine)
    }

    pub fn has_retriever(&self) -> bool {
        self.retriever.is_some()
    }

    /// Answer one question.
    ///
    /// Guardrail rejections come back as `Ok` with `blocked` set. Only a
    /// failed completion call is returned as an error.
    pub async fn ask(&self, request: &BasiraRequest) -> AppResult<BasiraAnswer> {
        let input_check = guardrails::check_input(&request.question);
        if !input_check.allowed {
            let reason = input_check.reason.unwrap_or_default();
            tracing::info!(
                "Question blocked by input guardrail (matched: {})",
                input_check.blocked_topic.as_deref().unwrap_or("-")
            );
            return Ok(BasiraAnswer::blocked(
                guardrails::blocked_response(&reason),
                reason,
            ));
        }

        let mut sources = match &self.retriever {
            Some(retriever) => {
                retriever
                    .search(&request.question, self.options.retrieval_limit)
                    .await
            }
            None => Vec::new(),
        };
        tracing::info!("Using {} retrieved sources", sources.len());

        let context = build_context(&sources);

        let text = self
            .generator
            .generate_response(
                &request.question,
                &context,
                &request.conversation_history,
                request.language.as_deref(),
            )
            .await?;

        let output_check = guardrails::check_output(&text, &sources);
        if !output_check.allowed {
            tracing::warn!(
                "Discarding generated answer ({} chars): {}",
                text.len(),
                output_check.reason.as_deref().unwrap_or_default()
            );
            tracing::debug!("Discarded answer: {}", text);
            return Ok(BasiraAnswer::blocked(
                NO_SOURCES_ANSWER.to_string(),
                BLOCKED_REASON_NO_SOURCES,
            ));
        }

        sources.truncate(self.options.max_sources);
        tracing::info!("Answer ready with {} citations", sources.len());

        Ok(BasiraAnswer::answered(
            format!("{}{}", text, guardrails::disclaimer()),
            sources,
        ))
    }
}
