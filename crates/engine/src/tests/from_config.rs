//! Tests for building an engine from application configuration.

use crate::BasiraEngine;
use basira_core::{AppConfig, AppError};
use tempfile::TempDir;

fn config(workspace: &TempDir, provider: &str, api_key: Option<&str>) -> AppConfig {
    AppConfig {
        workspace: workspace.path().to_path_buf(),
        provider: provider.to_string(),
        api_key: api_key.map(str::to_string),
        ..AppConfig::default()
    }
}

#[test]
fn test_openai_compatible_alias_builds_engine() {
    let workspace = TempDir::new().unwrap();
    let engine =
        BasiraEngine::from_config(&config(&workspace, "openai-compatible", Some("sk-test")))
            .unwrap();
    assert!(!engine.has_retriever());
}

#[test]
fn test_retriever_attached_when_configured() {
    let workspace = TempDir::new().unwrap();
    let mut config = config(&workspace, "ollama", None);
    config.supabase_url = Some("https://project.supabase.co".to_string());
    config.supabase_key = Some("anon-key".to_string());

    let engine = BasiraEngine::from_config(&config).unwrap();
    assert!(engine.has_retriever());
}

#[test]
fn test_unknown_provider_is_config_error() {
    let workspace = TempDir::new().unwrap();
    let result = BasiraEngine::from_config(&config(&workspace, "anthropic", Some("sk-test")));
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn test_missing_openai_key_is_config_error() {
    let workspace = TempDir::new().unwrap();
    let result = BasiraEngine::from_config(&config(&workspace, "openai", None));
    assert!(matches!(result, Err(AppError::Config(_))));
}
