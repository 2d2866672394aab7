//! Request, answer and guardrail types for the Basira pipeline.

use basira_knowledge::{Source, DEFAULT_SEARCH_LIMIT};
use serde::{Deserialize, Serialize};

/// Sources returned with an answer, at most.
pub const MAX_SOURCES: usize = 5;

/// Read-only engine settings, fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,

    /// Candidates requested from the retriever
    pub retrieval_limit: usize,

    /// Sources kept on a successful answer
    pub max_sources: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            max_tokens: 2000,
            retrieval_limit: DEFAULT_SEARCH_LIMIT,
            max_sources: MAX_SOURCES,
        }
    }
}

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One earlier turn of the conversation, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Input to one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasiraRequest {
    pub question: String,

    /// Preferred response language, e.g. "Arabic"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Earlier turns, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conversation_history: Vec<Message>,
}

impl BasiraRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.conversation_history = history;
        self
    }
}

/// Output of one pipeline run.
///
/// When `blocked` is set, `sources` is empty and `answer` is a fixed
/// template, never model text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasiraAnswer {
    pub answer: String,

    pub sources: Vec<Source>,

    #[serde(default)]
    pub blocked: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_reason: Option<String>,
}

impl BasiraAnswer {
    pub fn answered(answer: String, sources: Vec<Source>) -> Self {
        Self {
            answer,
            sources,
            blocked: false,
            blocked_reason: None,
        }
    }

    pub fn blocked(answer: String, reason: impl Into<String>) -> Self {
        Self {
            answer,
            sources: Vec::new(),
            blocked: true,
            blocked_reason: Some(reason.into()),
        }
    }
}

/// Verdict of a guardrail check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardrailResult {
    pub allowed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// The blocked-topic string or ruling phrase that matched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_topic: Option<String>,
}

impl GuardrailResult {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
            blocked_topic: None,
        }
    }

    pub fn block(reason: impl Into<String>, blocked_topic: Option<&str>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
            blocked_topic: blocked_topic.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_json() {
        let request: BasiraRequest = serde_json::from_value(serde_json::json!({
            "question": "What is sabr?",
            "conversationHistory": [
                {"role": "user", "content": "Salaam"},
                {"role": "assistant", "content": "Wa alaikum salaam"}
            ]
        }))
        .unwrap();

        assert_eq!(request.question, "What is sabr?");
        assert_eq!(request.language, None);
        assert_eq!(request.conversation_history.len(), 2);
        assert_eq!(request.conversation_history[1].role, Role::Assistant);
    }

    #[test]
    fn test_blocked_answer_has_no_sources() {
        let answer = BasiraAnswer::blocked("refused".to_string(), "no_sources");
        let json = serde_json::to_value(&answer).unwrap();

        assert_eq!(json["blocked"], true);
        assert_eq!(json["blockedReason"], "no_sources");
        assert_eq!(json["sources"], serde_json::json!([]));
    }

    #[test]
    fn test_answered_omits_reason() {
        let answer = BasiraAnswer::answered("text".to_string(), Vec::new());
        let json = serde_json::to_value(&answer).unwrap();

        assert_eq!(json["blocked"], false);
        assert!(json.get("blockedReason").is_none());
    }
}
