//! LLM integration crate for Basira.
//!
//! This crate provides a provider-agnostic abstraction for chat-completion
//! APIs behind a single trait.
//!
//! # Providers
//! - **OpenAI-compatible**: `POST /chat/completions` (default)
//! - **Ollama**: local runtime, for development
//!
//! # Example
//! ```no_run
//! use basira_llm::{ChatMessage, LlmClient, LlmRequest, providers::OllamaClient};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::with_base_url("http://localhost:11434", Duration::from_secs(60))?;
//! let request = LlmRequest::new("llama3.2").with_message(ChatMessage::user("Salaam!"));
//! let response = client.complete(&request).await?;
//! println!("{}", response.text().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{ChatMessage, ChatRole, LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::{create_client, create_client_from_config, parse_provider};
pub use providers::{OllamaClient, OpenAiClient};
pub use types::ProviderType;
