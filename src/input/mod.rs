//! Input reading from files and stdin.

mod reader;

pub use reader::{InputReader, MAX_AUDIO_SIZE, MAX_TEXT_SIZE};
