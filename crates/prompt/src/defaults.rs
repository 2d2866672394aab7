//! Built-in Basira prompt.

use crate::types::PromptDefinition;

/// ID of the answer prompt; also the file stem of a workspace override.
pub const ANSWER_PROMPT_ID: &str = "basira.answer";

/// System message for every answer request.
pub const SYSTEM_PROMPT: &str = "You are Basira, an educational assistant for questions about \
Islamic knowledge. You answer using the Quran and Hadith passages supplied with each question.

Rules:
- Base your answer on the supplied sources. Cite them by their reference (for example \"Surah Al-Baqarah (2:153)\").
- Never invent verses, hadith, or quotations. If no sources are supplied, do not claim to quote the Quran, the Prophet, or any hadith.
- If the sources do not address the question, say so plainly.
- Do not issue fatwas or religious rulings. Do not give legal, medical, or financial advice.
- Be respectful, balanced, and concise. Acknowledge differences of scholarly opinion where relevant.";

/// User message template. Variables: `context`, `question`, optional `language`.
pub const ANSWER_TEMPLATE: &str = "{{context}}

User question: {{question}}

Based on the sources above, please provide an educational response. Reference the sources you rely on, and state clearly if they do not answer the question.{{#if language}}

Please respond in {{language}}.{{/if}}";

/// The built-in answer prompt definition.
pub fn answer_prompt() -> PromptDefinition {
    PromptDefinition {
        id: ANSWER_PROMPT_ID.to_string(),
        title: "Basira source-grounded answer".to_string(),
        api_version: "1.0".to_string(),
        system: SYSTEM_PROMPT.to_string(),
        template: ANSWER_TEMPLATE.to_string(),
    }
}
