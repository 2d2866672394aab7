//! Basira AI answer pipeline.
//!
//! Screens a question against topic guardrails, retrieves Quran and Hadith
//! passages, asks a chat-completion model for an educational answer grounded
//! in them, and screens that answer for unsupported quotations before
//! returning it with citations.
//!
//! # Example
//! ```no_run
//! use basira_core::AppConfig;
//! use basira_engine::{BasiraEngine, BasiraRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = BasiraEngine::from_config(&AppConfig::load()?)?;
//! let answer = engine
//!     .ask(&BasiraRequest::new("What does the Quran say about patience?"))
//!     .await?;
//! println!("{}", answer.answer);
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod generator;
pub mod guardrails;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::BasiraEngine;
pub use generator::{AnswerGenerator, EMPTY_COMPLETION_FALLBACK};
pub use types::{
    BasiraAnswer, BasiraRequest, EngineOptions, GuardrailResult, Message, Role, MAX_SOURCES,
};
