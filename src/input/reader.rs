use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Largest grammar, pronunciation or profile file accepted.
pub const MAX_TEXT_SIZE: usize = 8 * 1024 * 1024;

/// Largest WAV file accepted for whole-file transcription.
pub const MAX_AUDIO_SIZE: usize = 64 * 1024 * 1024;

pub struct InputReader;

impl InputReader {
    /// Reads UTF-8 text from `file_path`, or from stdin when it is `None`.
    pub fn read_text(file_path: Option<&Path>) -> Result<String> {
        let bytes = Self::read_limited(file_path, MAX_TEXT_SIZE)?;
        String::from_utf8(bytes).context("Input is not valid UTF-8")
    }

    /// Reads raw bytes (e.g. a WAV file) from `file_path`, or from stdin.
    pub fn read_bytes(file_path: Option<&Path>) -> Result<Vec<u8>> {
        Self::read_limited(file_path, MAX_AUDIO_SIZE)
    }

    /// Returns the non-blank lines of stdin, trimmed.
    pub fn read_stdin_lines() -> Result<Vec<String>> {
        let text = Self::read_text(None)?;
        Ok(non_blank_lines(&text))
    }

    fn read_limited(file_path: Option<&Path>, limit: usize) -> Result<Vec<u8>> {
        match file_path {
            Some(path) => Self::read_file(path, limit),
            None => Self::read_stdin(limit),
        }
    }

    fn read_file(path: &Path, limit: usize) -> Result<Vec<u8>> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to access file: {}", path.display()))?;

        check_size(metadata.len() as usize, limit, "the file")?;

        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    #[allow(clippy::significant_drop_tightening)]
    fn read_stdin(limit: usize) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];
        let mut stdin = io::stdin().lock();

        loop {
            let bytes_read = stdin
                .read(&mut chunk)
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);
            check_size(buffer.len(), limit, "the input")?;
        }

        Ok(buffer)
    }
}

fn check_size(size: usize, limit: usize, what: &str) -> Result<()> {
    if size > limit {
        bail!(
            "Error: Input size ({:.1} MB) exceeds maximum allowed size ({} MB).\n\n\
             Consider splitting {what} into smaller parts.",
            size as f64 / 1024.0 / 1024.0,
            limit / 1024 / 1024
        );
    }
    Ok(())
}

fn non_blank_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
