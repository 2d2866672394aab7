//! Retriever abstraction.

use crate::types::Source;

/// Candidate count requested when the caller does not say otherwise.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Full-text retrieval over the Quran and Hadith collections.
///
/// Retrieval is best effort: implementations swallow transport and HTTP
/// failures and return fewer (or no) sources instead of an error.
#[async_trait::async_trait]
pub trait Retriever: Send + Sync {
    /// Search for passages relevant to `query`, in relevance order.
    async fn search(&self, query: &str, limit: usize) -> Vec<Source>;
}
