//! # rhasspy-client - Remote control for a Rhasspy server
//!
//! Typed access to a Rhasspy voice assistant's HTTP API: manage the intent
//! grammar, custom pronunciations, slots and profile, trigger training,
//! transcribe speech (whole files or live streams), recognize intents and
//! synthesize speech.
//!
//! ## Library
//!
//! ```no_run
//! use rhasspy_client::client::RhasspyClient;
//!
//! # async fn demo() -> Result<(), rhasspy_client::error::ClientError> {
//! let client = RhasspyClient::new("http://localhost:12101/api");
//!
//! let mut grammar = client.get_sentences().await?;
//! grammar
//!     .entry("GetTime".to_string())
//!     .or_default()
//!     .push("what time is it".to_string());
//! client.set_sentences(&grammar).await?;
//!
//! if !client.train(false).await.is_success() {
//!     eprintln!("training failed");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Command line
//!
//! ```bash
//! rhasspy-client version
//! rhasspy-client sentences get --output sentences.ini
//! rhasspy-client sentences set sentences.ini && rhasspy-client train-profile
//! arecord -r 16000 -f S16_LE -c 1 -t raw | rhasspy-client stream-to-text
//! rhasspy-client text-to-speech "hello world" > hello.wav
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/rhasspy-client/config.toml`:
//!
//! ```toml
//! [client]
//! server = "kitchen"
//! timeout_secs = 30
//!
//! [servers.kitchen]
//! api_url = "http://kitchen.local:12101/api"
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// HTTP client for the Rhasspy API.
pub mod client;

/// Configuration file management and server selection.
pub mod config;

/// Library error type.
pub mod error;

/// File system utilities.
pub mod fs;

/// Grammar and pronunciation text formats.
pub mod format;

/// Input reading from files and stdin.
pub mod input;

/// Success/failure outcomes of transcription and training.
pub mod outcome;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Terminal UI components (spinner, colors).
pub mod ui;

/// Chunked streaming of live audio.
pub mod upload;
