//! Intent grammar (`sentences.ini`) encoding and decoding.
//!
//! ```text
//! [GetTime]
//! what time is it
//! tell me the time
//!
//! [ChangeLightState]
//! state = (on | off)
//! turn <state> the light
//! \[the] lamp <state>
//! ```
//!
//! Each `[Name]` header opens an intent. Every following non-blank line up to
//! the next header is a sentence of that intent, or a rule when it holds a
//! `key = value` pairing. A sentence that itself starts with `[`, `#`, `;`
//! or `\` is written with a leading `\` so it is not read back as a header
//! or a comment.

use std::collections::BTreeMap;

use super::FormatError;

/// Sentences and rules grouped by intent name.
pub type Grammar = BTreeMap<String, Vec<String>>;

const SECTION_OPEN: char = '[';
const SECTION_CLOSE: char = ']';
const ESCAPE: char = '\\';
const RULE_SEPARATOR: char = '=';
const COMMENT_PREFIXES: [char; 2] = ['#', ';'];
/// Leading characters a sentence line cannot start with unescaped.
const ESCAPED_LEADS: [char; 4] = [SECTION_OPEN, '#', ';', ESCAPE];

/// Parses grammar text into sentences grouped by intent.
///
/// Header and key names keep their case, repeated keys are all kept, and a
/// header that appears twice continues the earlier intent. Blank lines and
/// full-line `#`/`;` comments are skipped.
pub fn decode_grammar(text: &str) -> Result<Grammar, FormatError> {
    let mut grammar = Grammar::new();
    let mut current: Option<String> = None;

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with(COMMENT_PREFIXES) {
            continue;
        }

        if let Some(name) = section_name(line) {
            if name.is_empty() {
                return Err(FormatError::EmptySectionName { line: line_number });
            }
            grammar.entry(name.to_string()).or_default();
            current = Some(name.to_string());
            continue;
        }

        let Some(intent) = current.as_ref() else {
            return Err(FormatError::MissingSectionHeader {
                line: line_number,
                content: line.to_string(),
            });
        };

        grammar
            .entry(intent.clone())
            .or_default()
            .push(decode_sentence(line));
    }

    Ok(grammar)
}

/// Writes grammar text with intents and their sentences in sorted order.
///
/// Sentences are trimmed and blank ones dropped. A sentence that would read
/// back as a header or a comment gets a leading `\`. Every intent block ends
/// with a blank line.
pub fn encode_grammar(grammar: &Grammar) -> String {
    let mut text = String::new();

    for (intent, sentences) in grammar {
        text.push(SECTION_OPEN);
        text.push_str(intent);
        text.push(SECTION_CLOSE);
        text.push('\n');

        let mut sorted: Vec<&str> = sentences
            .iter()
            .map(|sentence| sentence.trim())
            .filter(|sentence| !sentence.is_empty())
            .collect();
        sorted.sort_unstable();

        for sentence in sorted {
            if sentence.starts_with(ESCAPED_LEADS) {
                text.push(ESCAPE);
            }
            text.push_str(sentence);
            text.push('\n');
        }

        text.push('\n');
    }

    text
}

/// Returns the header name when `line` is an `[Intent]` header.
///
/// The name runs up to the last `]`, matching how the server reads headers.
fn section_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(SECTION_OPEN)?;
    let close = rest.rfind(SECTION_CLOSE)?;
    Some(&rest[..close])
}

fn decode_sentence(line: &str) -> String {
    let line = line
        .strip_prefix(ESCAPE)
        .filter(|rest| rest.starts_with(ESCAPED_LEADS))
        .unwrap_or(line);

    match line.split_once(RULE_SEPARATOR) {
        Some((key, value)) => format!("{} = {}", key.trim(), value.trim()),
        None => line.to_string(),
    }
}
