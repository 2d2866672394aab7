//! Prompt context assembly from retrieved sources.

use crate::types::Source;

/// Context used when retrieval produced nothing.
pub const NO_SOURCES_CONTEXT: &str =
    "No relevant Quran verses or Hadith were found for this question.";

/// First line of a non-empty context.
pub const CONTEXT_HEADER: &str = "Relevant sources from the Quran and Hadith:";

/// Format sources into the context block of the user message.
///
/// Entries keep input order and are numbered from 1. No size cap is
/// applied here; callers bound the number of sources upstream.
pub fn build_context(sources: &[Source]) -> String {
    if sources.is_empty() {
        return NO_SOURCES_CONTEXT.to_string();
    }

    let entries: Vec<String> = sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            format!(
                "[{}] {}\nArabic: {}\nTranslation: {}",
                i + 1,
                source.reference,
                source.arabic_text,
                source.translation
            )
        })
        .collect();

    format!("{}\n\n{}", CONTEXT_HEADER, entries.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sources_use_sentinel() {
        assert_eq!(build_context(&[]), NO_SOURCES_CONTEXT);
    }

    #[test]
    fn test_entries_numbered_in_order() {
        let sources = vec![
            Source::quran(
                "Surah Al-Baqarah (2:153)",
                "اسْتَعِينُوا بِالصَّبْرِ",
                "Seek help through patience and prayer",
            ),
            Source::hadith(
                "Sahih al-Bukhari, Hadith 1469",
                "وَمَنْ يَتَصَبَّرْ",
                "Whoever remains patient, Allah will make him patient",
            ),
        ];

        let context = build_context(&sources);

        assert!(context.starts_with(CONTEXT_HEADER));
        assert_eq!(context.matches("\nArabic: ").count(), 2);
        assert_eq!(context.matches("\nTranslation: ").count(), 2);
        assert!(!context.contains("[3]"));

        let first = context.find("[1] Surah Al-Baqarah (2:153)").unwrap();
        let second = context.find("[2] Sahih al-Bukhari, Hadith 1469").unwrap();
        assert!(first < second);
        assert!(context.contains("Translation: Seek help through patience and prayer\n\n[2]"));
    }
}
