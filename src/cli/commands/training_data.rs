use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::{ProfileCommand, SlotsCommand, TextFileCommand, print_json};
use crate::client::{ProfileLayers, RhasspyClient, Slots};
use crate::error::ClientError;
use crate::format::{decode_grammar, decode_pronunciations, encode_grammar, encode_pronunciations};
use crate::fs::atomic_write;
use crate::input::InputReader;
use crate::status;

pub async fn run_sentences(client: &RhasspyClient, command: TextFileCommand) -> Result<()> {
    match command {
        TextFileCommand::Get { output } => {
            let grammar = client.get_sentences().await?;
            match output {
                Some(path) => write_text(&path, &encode_grammar(&grammar))?,
                None => print_json(&grammar)?,
            }
        }
        TextFileCommand::Set { file } => {
            let text = InputReader::read_text(file.as_deref())?;
            // Parse locally so a broken file never reaches the server.
            let grammar = decode_grammar(&text)
                .map_err(ClientError::from)
                .context("Invalid sentences file")?;
            status!("Uploading {} intent(s)", grammar.len());
            println!("{}", client.set_sentences(&grammar).await?.trim_end());
        }
    }
    Ok(())
}

pub async fn run_words(client: &RhasspyClient, command: TextFileCommand) -> Result<()> {
    match command {
        TextFileCommand::Get { output } => {
            let pronunciations = client.get_custom_words().await?;
            match output {
                Some(path) => write_text(&path, &encode_pronunciations(&pronunciations))?,
                None => print_json(&pronunciations)?,
            }
        }
        TextFileCommand::Set { file } => {
            let text = InputReader::read_text(file.as_deref())?;
            let pronunciations = decode_pronunciations(&text)
                .map_err(ClientError::from)
                .context("Invalid custom words file")?;
            status!("Uploading {} word(s)", pronunciations.len());
            println!(
                "{}",
                client.set_custom_words(&pronunciations).await?.trim_end()
            );
        }
    }
    Ok(())
}

pub async fn run_slots(client: &RhasspyClient, command: SlotsCommand) -> Result<()> {
    match command {
        SlotsCommand::Get => print_json(&client.get_slots().await?)?,
        SlotsCommand::Set { file, append } => {
            let text = InputReader::read_text(file.as_deref())?;
            let slots: Slots = serde_json::from_str(&text)
                .context("Slots must be a JSON object mapping slot names to value lists")?;
            println!("{}", client.set_slots(&slots, !append).await?.trim_end());
        }
    }
    Ok(())
}

pub async fn run_lookup(client: &RhasspyClient, word: &str, count: usize) -> Result<()> {
    print_json(&client.lookup_word(word, count).await?)
}

pub async fn run_profile(client: &RhasspyClient, command: ProfileCommand) -> Result<()> {
    match command {
        ProfileCommand::Get { profile_only } => {
            let layers = if profile_only {
                ProfileLayers::Profile
            } else {
                ProfileLayers::All
            };
            print_json(&client.get_profile(layers).await?)?;
        }
        ProfileCommand::Set { file } => {
            let text = InputReader::read_text(file.as_deref())?;
            let profile: serde_json::Value =
                serde_json::from_str(&text).context("Profile must be a JSON document")?;
            println!("{}", client.set_profile(&profile).await?.trim_end());
        }
    }
    Ok(())
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    atomic_write(path, text)?;
    status!("Wrote {}", path.display());
    Ok(())
}
