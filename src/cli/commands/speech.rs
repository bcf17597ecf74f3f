use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

use crate::cli::{TaskFailed, print_json};
use crate::client::RhasspyClient;
use crate::fs::atomic_write;
use crate::input::InputReader;
use crate::output;
use crate::ui::{Spinner, Style};
use crate::{status, warning};

/// Transcribes each WAV file, or one WAV from stdin when none is given.
///
/// Every file is attempted; the command fails afterwards if any of them did.
pub async fn run_speech_to_text(client: &RhasspyClient, wavs: &[PathBuf]) -> Result<()> {
    let sources: Vec<Option<&Path>> = if wavs.is_empty() {
        vec![None]
    } else {
        wavs.iter().map(|p| Some(p.as_path())).collect()
    };

    let mut failures = 0;
    for source in sources {
        let wav = InputReader::read_bytes(source)?;
        let transcription = client.speech_to_text(wav).await;
        print_json(&transcription)?;

        if !transcription.is_success() {
            failures += 1;
            warning!(
                "{} no transcript for {}",
                Style::warning("Warning:"),
                source.map_or_else(|| "stdin".into(), |p| p.display().to_string())
            );
        }
    }

    if failures > 0 {
        return Err(TaskFailed {
            task: "transcription",
        }
        .into());
    }
    Ok(())
}

/// Streams raw audio from stdin until it closes, then prints the transcript.
pub async fn run_stream_to_text(client: &RhasspyClient) -> Result<()> {
    status!(
        "Streaming audio from stdin in {} byte chunks...",
        client.options().chunk_size
    );
    let text = client.stream_to_text(tokio::io::stdin()).await?;
    println!("{text}");
    Ok(())
}

pub async fn run_text_to_intent(
    client: &RhasspyClient,
    text: Vec<String>,
    handle: bool,
) -> Result<()> {
    for sentence in sentences_or_stdin(text)? {
        let intent = client.text_to_intent(&sentence, handle).await?;
        print_json(&intent)?;
    }
    Ok(())
}

pub async fn run_listen(client: &RhasspyClient, handle: bool) -> Result<()> {
    let intent =
        Spinner::wait_for("Listening for a voice command...", client.listen_for_command(handle))
            .await?;
    print_json(&intent)?;
    Ok(())
}

/// Speaks each sentence. The WAV audio goes to `output_path` when given (only one
/// sentence allowed), otherwise straight to stdout.
pub async fn run_text_to_speech(
    client: &RhasspyClient,
    text: Vec<String>,
    repeat: bool,
    output_path: Option<PathBuf>,
) -> Result<()> {
    let sentences = if repeat && text.is_empty() {
        vec![String::new()]
    } else {
        sentences_or_stdin(text)?
    };

    if let Some(path) = output_path {
        let [sentence] = sentences.as_slice() else {
            bail!("--output takes exactly one sentence, got {}", sentences.len());
        };
        let wav = client.text_to_speech(sentence, repeat).await?;
        atomic_write(&path, &wav)?;
        status!("Wrote {} bytes to {}", wav.len(), path.display());
        return Ok(());
    }

    for sentence in &sentences {
        let wav = client.text_to_speech(sentence, repeat).await?;
        output::write_binary(&wav)?;
    }
    Ok(())
}

fn sentences_or_stdin(text: Vec<String>) -> Result<Vec<String>> {
    if text.is_empty() {
        InputReader::read_stdin_lines()
    } else {
        Ok(text)
    }
}
