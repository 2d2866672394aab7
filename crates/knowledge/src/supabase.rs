//! Supabase full-text retriever.
//!
//! Queries the PostgREST API in front of the Quran and Hadith tables using
//! the `fts` filter on their generated `*_tsv` columns, then maps each row
//! to a [`Source`] with a human-readable reference.

use crate::retriever::Retriever;
use crate::types::Source;
use basira_core::{AppError, AppResult};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Table, search column and projection for one collection.
#[derive(Debug, Clone, Copy)]
struct Collection {
    table: &'static str,
    fts_column: &'static str,
    select: &'static str,
}

const QURAN: Collection = Collection {
    table: "quran_translations",
    fts_column: "text",
    select: "text,ayah:quran_ayahs(ayah_number,text_arabic,surah:quran_surahs(surah_number,name_english))",
};

const HADITH: Collection = Collection {
    table: "hadiths",
    fts_column: "text_english",
    select: "hadith_number,text_arabic,text_english,book:hadith_books(name_english)",
};

#[derive(Debug, Deserialize)]
struct QuranRow {
    text: String,
    ayah: AyahRow,
}

#[derive(Debug, Deserialize)]
struct AyahRow {
    ayah_number: u32,
    text_arabic: String,
    surah: SurahRow,
}

#[derive(Debug, Deserialize)]
struct SurahRow {
    surah_number: u32,
    name_english: String,
}

#[derive(Debug, Deserialize)]
struct HadithRow {
    hadith_number: HadithNumber,
    #[serde(default)]
    text_arabic: Option<String>,
    text_english: String,
    book: BookRow,
}

#[derive(Debug, Deserialize)]
struct BookRow {
    name_english: String,
}

/// Hadith numbers are integers in most collections but carry suffixes in some ("1599a").
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HadithNumber {
    Int(u64),
    Text(String),
}

impl fmt::Display for HadithNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Retriever backed by Supabase full-text search.
pub struct SupabaseRetriever {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl SupabaseRetriever {
    /// Create a retriever for a Supabase project URL.
    ///
    /// `timeout` bounds each sub-search; a timed-out sub-search yields no sources.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let base_url: String = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Retrieval(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    fn build_request(
        &self,
        collection: Collection,
        tsquery: &str,
        limit: usize,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, collection.table);

        self.client
            .get(url)
            .query(&[
                (
                    format!("{}_tsv", collection.fts_column),
                    format!("fts.{}", tsquery),
                ),
                ("select".to_string(), collection.select.to_string()),
                ("limit".to_string(), limit.to_string()),
            ])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn fetch_rows(
        &self,
        collection: Collection,
        tsquery: &str,
        limit: usize,
    ) -> AppResult<Vec<serde_json::Value>> {
        let response = self
            .build_request(collection, tsquery, limit)
            .send()
            .await
            .map_err(|e| {
                AppError::Retrieval(format!("{} search failed: {}", collection.table, e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::Retrieval(format!(
                "{} search returned {}",
                collection.table,
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            AppError::Retrieval(format!("Failed to parse {} rows: {}", collection.table, e))
        })
    }

    /// Run one sub-search; any failure degrades to an empty list.
    async fn search_collection(
        &self,
        collection: Collection,
        tsquery: &str,
        limit: usize,
        map_row: fn(serde_json::Value) -> Option<Source>,
    ) -> Vec<Source> {
        match self.fetch_rows(collection, tsquery, limit).await {
            Ok(rows) => rows.into_iter().filter_map(map_row).collect(),
            Err(e) => {
                tracing::warn!("Degrading to no {} sources: {}", collection.table, e);
                Vec::new()
            }
        }
    }
}

#[async_trait::async_trait]
impl Retriever for SupabaseRetriever {
    async fn search(&self, query: &str, limit: usize) -> Vec<Source> {
        let Some(tsquery) = to_tsquery(query) else {
            tracing::debug!("Query has no searchable terms, skipping retrieval");
            return Vec::new();
        };

        if limit == 0 {
            return Vec::new();
        }

        let per_collection = limit.div_ceil(2);

        let (mut sources, hadith) = tokio::join!(
            self.search_collection(QURAN, &tsquery, per_collection, map_quran_row),
            self.search_collection(HADITH, &tsquery, per_collection, map_hadith_row),
        );

        tracing::info!(
            "Retrieved {} Quran and {} Hadith sources",
            sources.len(),
            hadith.len()
        );

        // Grouped by collection, each in the database's ranking order
        sources.extend(hadith);
        sources
    }
}

/// Reduce free text to a tsquery matching any of its words.
///
/// Returns `None` when nothing searchable remains.
fn to_tsquery(query: &str) -> Option<String> {
    let terms: Vec<String> = query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" | "))
    }
}

fn map_quran_row(row: serde_json::Value) -> Option<Source> {
    let row: QuranRow = serde_json::from_value(row)
        .map_err(|e| tracing::debug!("Skipping Quran row: {}", e))
        .ok()?;

    let reference = format!(
        "Surah {} ({}:{})",
        row.ayah.surah.name_english, row.ayah.surah.surah_number, row.ayah.ayah_number
    );

    Some(Source::quran(reference, row.ayah.text_arabic, row.text))
}

fn map_hadith_row(row: serde_json::Value) -> Option<Source> {
    let row: HadithRow = serde_json::from_value(row)
        .map_err(|e| tracing::debug!("Skipping Hadith row: {}", e))
        .ok()?;

    let reference = format!("{}, Hadith {}", row.book.name_english, row.hadith_number);

    Some(Source::hadith(
        reference,
        row.text_arabic.unwrap_or_default(),
        row.text_english,
    ))
}
