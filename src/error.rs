use reqwest::StatusCode;
use thiserror::Error;

use crate::format::FormatError;

/// Errors returned by [`RhasspyClient`](crate::client::RhasspyClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// Grammar or pronunciation text could not be parsed.
    #[error("malformed server text")]
    Format(#[from] FormatError),

    /// The request never produced a response (refused, timed out, reset).
    #[error("failed to reach {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("unexpected response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    pub const fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    /// `true` when the server could not be reached at all.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
