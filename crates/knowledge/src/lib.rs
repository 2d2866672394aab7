//! Knowledge retrieval for Basira.
//!
//! Finds Quran verses and Hadith narrations relevant to a question and
//! formats them into the context block handed to the answer generator.
//!
//! - [`Source`]: one cited passage
//! - [`Retriever`]: best-effort search abstraction
//! - [`SupabaseRetriever`]: full-text search over the hosted database
//! - [`build_context`]: numbered context block for the prompt

pub mod context;
pub mod retriever;
pub mod supabase;
pub mod types;

pub use context::{build_context, CONTEXT_HEADER, NO_SOURCES_CONTEXT};
pub use retriever::{Retriever, DEFAULT_SEARCH_LIMIT};
pub use supabase::SupabaseRetriever;
pub use types::{Source, SourceType};
