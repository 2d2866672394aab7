//! Topic and sourcing guardrails.
//!
//! Input screening is a case-insensitive substring scan over fixed lists,
//! first match wins. Output screening only applies when no sources were
//! retrieved, and rejects answers that claim to quote scripture anyway.
//! There is no stemming or negation handling: "what is not the ruling"
//! still blocks.

use crate::types::GuardrailResult;
use basira_knowledge::Source;
use regex::Regex;
use std::sync::LazyLock;

const RULING_REASON: &str =
    "Requests for religious rulings should be directed to a qualified Islamic scholar";
const PROFESSIONAL_REASON: &str = "This needs advice from a qualified professional";
const CERTIFICATION_REASON: &str =
    "Halal certification is decided by accredited certification bodies";
const SECTARIAN_REASON: &str = "Judging the faith of other people is outside what Basira discusses";
const POLITICAL_REASON: &str = "Political questions are outside what Basira discusses";

/// Reason attached to answers rejected by the output check.
pub const NO_SOURCES_QUOTE_REASON: &str =
    "Response claims to quote sources but no sources were found.";

/// `blocked_reason` of an answer rejected by the output check.
pub const BLOCKED_REASON_NO_SOURCES: &str = "no_sources";

/// Blocked topics with the reason reported for each.
pub const BLOCKED_TOPICS: [(&str, &str); 12] = [
    ("fatwa", RULING_REASON),
    ("halal certification", CERTIFICATION_REASON),
    ("medical advice", PROFESSIONAL_REASON),
    ("legal advice", PROFESSIONAL_REASON),
    ("financial advice", PROFESSIONAL_REASON),
    ("investment advice", PROFESSIONAL_REASON),
    ("divorce ruling", RULING_REASON),
    ("inheritance ruling", RULING_REASON),
    ("takfir", SECTARIAN_REASON),
    ("declare someone kafir", SECTARIAN_REASON),
    ("sectarian", SECTARIAN_REASON),
    ("political party", POLITICAL_REASON),
];

/// Phrasings that ask for a ruling rather than for knowledge.
pub const RULING_PATTERNS: [&str; 8] = [
    "is it halal",
    "is it haram",
    "is it permissible",
    "is it allowed",
    "is it forbidden",
    "is it a sin",
    "what is the ruling",
    "what is the hukm",
];

static QUOTE_CLAIM_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)\b(the\s+)?qur['’]?an\s+(says|states)\b").unwrap(),
        Regex::new(r"(?i)\bthe\s+prophet\b.{0,60}?\b(said|says)\b").unwrap(),
        Regex::new(r"(?i)\b((a|the)\s+hadith\s+(says|states|narrates)|according\s+to\s+(a|the)\s+hadith)\b")
            .unwrap(),
        Regex::new(r"(?i)\ballah\s+(says|said|states)\b").unwrap(),
    ]
});

const DISCLAIMER: &str = "\n\n---\nThis answer is for educational purposes only and is not a \
religious ruling. For guidance on your own situation, please consult a qualified Islamic scholar.";

/// Answer returned in place of model text rejected by the output check.
pub const NO_SOURCES_ANSWER: &str = "I couldn't find relevant sources in the Quran or Hadith \
collections to answer this question reliably. Please try rephrasing your question, or consult \
a qualified Islamic scholar.";

/// Screen a user question.
pub fn check_input(text: &str) -> GuardrailResult {
    let lower = text.to_lowercase();

    if let Some((topic, reason)) = BLOCKED_TOPICS
        .iter()
        .find(|(topic, _)| lower.contains(topic))
    {
        return GuardrailResult::block(*reason, Some(*topic));
    }

    if let Some(pattern) = RULING_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return GuardrailResult::block(RULING_REASON, Some(*pattern));
    }

    GuardrailResult::allow()
}

/// Screen generated text against the sources it was grounded on.
///
/// Any text passes when at least one source was retrieved.
pub fn check_output(text: &str, sources: &[Source]) -> GuardrailResult {
    if !sources.is_empty() {
        return GuardrailResult::allow();
    }

    if QUOTE_CLAIM_PATTERNS.iter().any(|re| re.is_match(text)) {
        return GuardrailResult::block(NO_SOURCES_QUOTE_REASON, None);
    }

    GuardrailResult::allow()
}

/// Trailer appended to every generated answer.
pub fn disclaimer() -> &'static str {
    DISCLAIMER
}

/// Fixed refusal for a blocked question.
pub fn blocked_response(reason: &str) -> String {
    format!(
        "I'm not able to answer this question. {}. Basira shares educational content from the \
Quran and Hadith; for matters like this, please speak with a qualified Islamic scholar or \
your local imam.",
        reason.trim_end_matches('.')
    )
}
