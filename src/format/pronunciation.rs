//! Custom word pronunciations (`custom_words.txt`).
//!
//! One entry per line: the word, whitespace, then the phonemes.
//! A word may appear on several lines, once per pronunciation.

use std::collections::{BTreeMap, BTreeSet};

use super::FormatError;

/// Pronunciations grouped by word. Duplicate pronunciations collapse.
pub type PronunciationSet = BTreeMap<String, BTreeSet<String>>;

/// Parses pronunciation lines, skipping blank ones.
///
/// Each line splits on its first run of whitespace; everything after that run
/// is the pronunciation, inner spacing included.
pub fn decode_pronunciations(text: &str) -> Result<PronunciationSet, FormatError> {
    let mut pronunciations = PronunciationSet::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((word, pronunciation)) = line.split_once(char::is_whitespace) else {
            return Err(FormatError::MissingPronunciation {
                line: index + 1,
                content: line.to_string(),
            });
        };

        pronunciations
            .entry(word.to_string())
            .or_default()
            .insert(pronunciation.trim_start().to_string());
    }

    Ok(pronunciations)
}

/// Writes one `word pronunciation` line per pronunciation, words and
/// pronunciations both in sorted order.
///
/// Pronunciations are trimmed; blank ones (and blank words) are skipped since
/// they could not be read back.
pub fn encode_pronunciations(pronunciations: &PronunciationSet) -> String {
    let mut text = String::new();

    for (word, word_pronunciations) in pronunciations {
        let word = word.trim();
        if word.is_empty() {
            continue;
        }

        let cleaned: BTreeSet<&str> = word_pronunciations
            .iter()
            .map(|pronunciation| pronunciation.trim())
            .filter(|pronunciation| !pronunciation.is_empty())
            .collect();

        for pronunciation in cleaned {
            text.push_str(word);
            text.push(' ');
            text.push_str(pronunciation);
            text.push('\n');
        }
    }

    text
}
