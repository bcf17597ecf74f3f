//! Outcomes of server tasks that can fail after a successful exchange.
//!
//! Transcription and training are expected to fail now and then (silence,
//! a broken profile). Those failures come back as values, not errors, so a
//! caller can tell "the server ran the task and it failed" apart from "the
//! server could not be reached".

use reqwest::StatusCode;
use serde::Serialize;

/// Result of transcribing audio.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum Transcription {
    Success {
        /// Recognized text, never empty.
        text: String,
        likelihood: f64,
        transcribe_seconds: f64,
        wav_seconds: f64,
    },
    Failure,
}

impl Transcription {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The transcript, when there is one.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success { text, .. } => Some(text),
            Self::Failure => None,
        }
    }
}

/// Result of training a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum Training {
    Success,
    Failure {
        /// Error text reported by the server (or the transport).
        errors: String,
    },
}

impl Training {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Classifies a speech-to-text response.
///
/// Only plain text comes back, so the metrics stay at zero.
pub fn classify_transcription(status: StatusCode, body: &str) -> Transcription {
    if !status.is_success() || body.is_empty() {
        return Transcription::Failure;
    }

    Transcription::Success {
        text: body.to_string(),
        likelihood: 0.0,
        transcribe_seconds: 0.0,
        wav_seconds: 0.0,
    }
}

/// Classifies a training response. Any 2xx is a success, whatever the body.
pub fn classify_training(status: StatusCode, body: &str) -> Training {
    if status.is_success() {
        Training::Success
    } else {
        Training::Failure {
            errors: body.to_string(),
        }
    }
}
