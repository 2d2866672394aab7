//! Prompt loader for workspace prompt overrides.

use crate::defaults;
use crate::types::PromptDefinition;
use basira_core::{AppError, AppResult};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Variables an answer template must reference, with a matcher that
/// tolerates whitespace inside the braces (`{{ context }}`).
static REQUIRED_VARIABLES: LazyLock<[(&str, Regex); 2]> = LazyLock::new(|| {
    [
        ("{{context}}", Regex::new(r"\{\{\s*context\s*\}\}").unwrap()),
        ("{{question}}", Regex::new(r"\{\{\s*question\s*\}\}").unwrap()),
    ]
});

/// Load a prompt definition by ID from the workspace.
///
/// Looks for `<id>.yml` in the `.basira/prompts/` directory.
///
/// # Example
/// ```no_run
/// use basira_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("."), "basira.answer")?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = workspace_path
        .join(".basira/prompts")
        .join(format!("{}.yml", prompt_id));

    tracing::debug!("Loading prompt from: {:?}", prompt_file);

    if !prompt_file.exists() {
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            prompt_file
        )));
    }

    let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to read prompt file {:?}: {}",
            prompt_file, e
        ))
    })?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to parse prompt YAML {:?}: {}",
            prompt_file, e
        ))
    })?;

    validate_prompt(&definition)?;

    tracing::info!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// The answer prompt: the workspace override when one exists, else the built-in.
///
/// A present but invalid override is an error, not a silent fallback.
pub fn resolve_answer_prompt(workspace_path: Option<&Path>) -> AppResult<PromptDefinition> {
    if let Some(workspace) = workspace_path {
        let override_file = workspace
            .join(".basira/prompts")
            .join(format!("{}.yml", defaults::ANSWER_PROMPT_ID));

        if override_file.exists() {
            return load_prompt(workspace, defaults::ANSWER_PROMPT_ID);
        }
    }

    Ok(defaults::answer_prompt())
}

/// Validate a prompt definition.
fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.system.trim().is_empty() {
        return Err(AppError::Prompt(
            "Prompt system message cannot be empty".to_string(),
        ));
    }

    if def.template.is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    // Without these the answer would not be grounded in the retrieved sources
    for (variable, pattern) in REQUIRED_VARIABLES.iter() {
        if !pattern.is_match(&def.template) {
            return Err(AppError::Prompt(format!(
                "Prompt template must reference {}",
                variable
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_prompt(dir: &Path, id: &str, content: &str) -> PathBuf {
        let prompts_dir = dir.join(".basira/prompts");
        fs::create_dir_all(&prompts_dir).unwrap();

        let file_path = prompts_dir.join(format!("{}.yml", id));
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn valid_prompt(id: &str) -> String {
        format!(
            r#"
id: {}
title: "Short answers"
apiVersion: "1.0"
system: "You are Basira. Keep it short."
template: "{{{{context}}}}\n\nQ: {{{{question}}}}"
"#,
            id
        )
    }

    #[test]
    fn test_load_valid_prompt() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(temp_dir.path(), "basira.answer", &valid_prompt("basira.answer"));

        let prompt = load_prompt(temp_dir.path(), "basira.answer").unwrap();
        assert_eq!(prompt.id, "basira.answer");
        assert_eq!(prompt.title, "Short answers");
    }

    #[test]
    fn test_load_nonexistent_prompt() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_prompt(temp_dir.path(), "nonexistent").is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(temp_dir.path(), "invalid", "invalid: yaml: content:");

        assert!(load_prompt(temp_dir.path(), "invalid").is_err());
    }

    #[test]
    fn test_template_must_reference_context() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(
            temp_dir.path(),
            "ungrounded",
            r#"
id: ungrounded
title: "No context"
apiVersion: "1.0"
system: "sys"
template: "{{question}}"
"#,
        );

        let err = load_prompt(temp_dir.path(), "ungrounded").unwrap_err();
        assert!(err.to_string().contains("{{context}}"));
    }

    #[test]
    fn test_template_variables_may_use_inner_spaces() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(
            temp_dir.path(),
            "spaced",
            r#"
id: spaced
title: "Spaced variables"
apiVersion: "1.0"
system: "sys"
template: "{{ context }}\n\nQ: {{  question }}"
"#,
        );

        let prompt = load_prompt(temp_dir.path(), "spaced").unwrap();
        assert_eq!(prompt.id, "spaced");
    }

    #[test]
    fn test_resolve_falls_back_to_builtin() {
        let temp_dir = TempDir::new().unwrap();
        let prompt = resolve_answer_prompt(Some(temp_dir.path())).unwrap();
        assert_eq!(prompt.system, defaults::SYSTEM_PROMPT);

        let prompt = resolve_answer_prompt(None).unwrap();
        assert_eq!(prompt.template, defaults::ANSWER_TEMPLATE);
    }

    #[test]
    fn test_resolve_prefers_override() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(temp_dir.path(), "basira.answer", &valid_prompt("basira.answer"));

        let prompt = resolve_answer_prompt(Some(temp_dir.path())).unwrap();
        assert_eq!(prompt.system, "You are Basira. Keep it short.");
    }
}
