use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use rhasspy_client::cli::commands::{server, servers, speech, training_data};
use rhasspy_client::cli::{Args, Command, GlobalArgs, TaskFailed};
use rhasspy_client::client::{RhasspyClient, TracingSink};
use rhasspy_client::config::{ConfigManager, ResolveOptions, resolve_config};
use rhasspy_client::error::ClientError;
use rhasspy_client::output::{self, OutputConfig};
use rhasspy_client::ui::Style;

const FAILURE: exitcode::ExitCode = 1;

#[tokio::main]
async fn main() {
    let Args { global, command } = Args::parse();

    output::init(OutputConfig::from_flags(global.quiet, global.no_color));
    init_tracing(global.debug);

    let result = match command {
        Command::Servers { command } => servers::run_servers(command),
        command => match build_client(&global, &command) {
            Ok(client) => run(&client, command).await,
            Err(err) => exit_with(&err, exitcode::CONFIG),
        },
    };

    if let Err(err) = result {
        let code = exit_code(&err);
        exit_with(&err, code);
    }
}

async fn run(client: &RhasspyClient, command: Command) -> Result<()> {
    match command {
        Command::Version => server::run_version(client).await,
        Command::Restart => server::run_restart(client).await,
        Command::TrainProfile { no_cache } => server::run_train(client, no_cache).await,
        Command::SpeechToText { wavs } => speech::run_speech_to_text(client, &wavs).await,
        Command::StreamToText { .. } => speech::run_stream_to_text(client).await,
        Command::TextToIntent { text, handle } => {
            speech::run_text_to_intent(client, text, handle).await
        }
        Command::TextToSpeech {
            text,
            repeat,
            output,
        } => speech::run_text_to_speech(client, text, repeat, output).await,
        Command::Listen { handle } => speech::run_listen(client, handle).await,
        Command::Sentences(command) => training_data::run_sentences(client, command).await,
        Command::Words(command) => training_data::run_words(client, command).await,
        Command::Slots(command) => training_data::run_slots(client, command).await,
        Command::Lookup { word, count } => training_data::run_lookup(client, &word, count).await,
        Command::Profile(command) => training_data::run_profile(client, command).await,
        Command::Servers { command } => servers::run_servers(command),
    }
}

fn build_client(global: &GlobalArgs, command: &Command) -> Result<RhasspyClient> {
    let config_file = ConfigManager::new()?.load_or_default()?;

    let options = ResolveOptions {
        api_url: global.api_url.clone(),
        server: global.server.clone(),
        timeout_secs: global.timeout,
        chunk_size: match command {
            Command::StreamToText { chunk_size } => *chunk_size,
            _ => None,
        },
    };
    let resolved = resolve_config(&options, &config_file)?;

    tracing::debug!(api_url = %resolved.api_url, server = ?resolved.server_name, "resolved server");

    Ok(RhasspyClient::with_sink(
        &resolved.api_url,
        resolved.client_options(),
        Arc::new(TracingSink),
    ))
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("rhasspy_client=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!output::is_no_color())
        .init();
}

fn exit_code(err: &anyhow::Error) -> exitcode::ExitCode {
    if let Some(client_error) = err.downcast_ref::<ClientError>() {
        return match client_error {
            ClientError::Format(_) => exitcode::DATAERR,
            ClientError::Transport { .. } => exitcode::UNAVAILABLE,
            ClientError::Status { .. } | ClientError::Decode { .. } => exitcode::PROTOCOL,
        };
    }
    if err.downcast_ref::<TaskFailed>().is_some() {
        return exitcode::SOFTWARE;
    }
    FAILURE
}

fn exit_with(err: &anyhow::Error, code: exitcode::ExitCode) -> ! {
    eprintln!("{} {err:#}", Style::error("Error:"));
    std::process::exit(code)
}
