//! Text formats exchanged with the server.
//!
//! The server stores training data as flat text: intent grammars as an
//! ini-style file grouped by `[Intent]` headers, and custom pronunciations as
//! one `word PHONEMES` entry per line. This module converts both to and from
//! ordered in-memory collections.

pub mod grammar;
pub mod pronunciation;

use thiserror::Error;

pub use grammar::{Grammar, decode_grammar, encode_grammar};
pub use pronunciation::{PronunciationSet, decode_pronunciations, encode_pronunciations};

/// Malformed grammar or pronunciation text.
///
/// Raised locally while decoding; never caused by the network. Line numbers
/// are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("line {line}: sentence appears before any [Intent] header: {content:?}")]
    MissingSectionHeader { line: usize, content: String },

    #[error("line {line}: intent header has an empty name")]
    EmptySectionName { line: usize },

    #[error("line {line}: expected `word pronunciation`, found {content:?}")]
    MissingPronunciation { line: usize, content: String },
}
