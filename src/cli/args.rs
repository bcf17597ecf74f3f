use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rhasspy-client")]
#[command(about = "Remote control for a Rhasspy voice assistant server")]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// URL of the Rhasspy HTTP API (with /api)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Named server from the config file
    #[arg(short = 's', long, global = true)]
    pub server: Option<String>,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print DEBUG messages to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress status messages
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get the server version
    Version,
    /// Restart the Rhasspy server
    Restart,
    /// Train the Rhasspy profile
    TrainProfile {
        /// Clear the training cache first
        #[arg(long)]
        no_cache: bool,
    },
    /// Transcribe WAV file(s) (reads stdin if none given)
    SpeechToText {
        /// WAV file paths
        wavs: Vec<PathBuf>,
    },
    /// Transcribe a raw audio stream from stdin (16-bit 16kHz mono)
    StreamToText {
        /// Number of bytes to read/send at a time
        #[arg(long)]
        chunk_size: Option<usize>,
    },
    /// Recognize intents from sentences (reads stdin lines if none given)
    TextToIntent {
        /// Sentences to recognize
        text: Vec<String>,

        /// Let the server handle the intent (e.g. forward to Home Assistant)
        #[arg(long)]
        handle: bool,
    },
    /// Speak sentences (reads stdin lines if none given)
    TextToSpeech {
        /// Sentences to speak
        text: Vec<String>,

        /// Repeat the last spoken sentence
        #[arg(long)]
        repeat: bool,

        /// Write the WAV audio to this file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Wake the server and wait for one voice command
    Listen {
        /// Let the server handle the intent
        #[arg(long)]
        handle: bool,
    },
    /// Get or replace the intent grammar (sentences.ini)
    #[command(subcommand)]
    Sentences(TextFileCommand),
    /// Get or replace the custom word pronunciations
    #[command(subcommand)]
    Words(TextFileCommand),
    /// Get or replace slot values
    #[command(subcommand)]
    Slots(SlotsCommand),
    /// Look up pronunciations for a word
    Lookup {
        /// The word to look up
        word: String,

        /// Number of pronunciations to guess
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },
    /// Get or replace the profile
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Manage configured servers
    Servers {
        #[command(subcommand)]
        command: Option<ServersCommand>,
    },
}

/// Training data kept on the server as a text file.
#[derive(Subcommand, Debug)]
pub enum TextFileCommand {
    /// Download and print as JSON
    Get {
        /// Write the server's text format to this file instead
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Validate and upload a text file (reads stdin if not given)
    Set {
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SlotsCommand {
    /// Print slot values as JSON
    Get,
    /// Upload slot values from a JSON file (reads stdin if not given)
    Set {
        file: Option<PathBuf>,

        /// Append to existing slots instead of replacing them
        #[arg(long)]
        append: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Print the profile as JSON
    Get {
        /// Only show settings overridden by the profile
        #[arg(long)]
        profile_only: bool,
    },
    /// Upload a profile from a JSON file (reads stdin if not given)
    Set {
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ServersCommand {
    /// List configured servers
    List,
    /// Add or replace a named server
    Add {
        name: String,
        api_url: String,

        #[arg(long)]
        description: Option<String>,

        /// Make this the default server
        #[arg(long)]
        default: bool,
    },
    /// Remove a named server
    Remove { name: String },
}
