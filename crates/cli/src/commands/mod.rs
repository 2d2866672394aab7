//! Command handlers for the Basira CLI.

pub mod ask;
pub mod check;
pub mod search;

pub use ask::AskCommand;
pub use check::CheckCommand;
pub use search::SearchCommand;

use basira_core::{AppError, AppResult};
use basira_knowledge::Source;

/// Serialize a value as pretty JSON for stdout.
pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Serialization(e.to_string()))
}

/// Numbered citation list, one source per block.
pub(crate) fn format_sources(sources: &[Source]) -> String {
    sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            let mut block = format!("[{}] {} ({})", i + 1, source.reference, source.source_type);
            if !source.arabic_text.trim().is_empty() {
                block.push_str(&format!("\n    {}", source.arabic_text.trim()));
            }
            if !source.translation.trim().is_empty() {
                block.push_str(&format!("\n    {}", source.translation.trim()));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sources() {
        let sources = vec![
            Source::quran(
                "Surah Al-Asr (103:3)",
                "وَتَوَاصَوْا بِالصَّبْرِ",
                "and advised each other to patience",
            ),
            Source::hadith(
                "Sahih Muslim 2999",
                "",
                "How wonderful is the affair of the believer",
            ),
        ];

        let text = format_sources(&sources);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "[1] Surah Al-Asr (103:3) (quran)");
        assert_eq!(lines[2], "    and advised each other to patience");
        assert_eq!(lines[3], "[2] Sahih Muslim 2999 (hadith)");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_format_no_sources() {
        assert_eq!(format_sources(&[]), "");
    }
}
