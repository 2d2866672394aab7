//! Prompt system for Basira.
//!
//! This crate provides:
//! - The built-in answer prompt (system message + user template)
//! - Handlebars template rendering
//! - Optional YAML overrides from the workspace `.basira/prompts/` directory

pub mod builder;
pub mod defaults;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::{build_prompt, render_template};
pub use loader::{load_prompt, resolve_answer_prompt};
pub use types::{BuiltPrompt, PromptDefinition};
