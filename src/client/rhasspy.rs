use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Body, Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncRead;

use super::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use super::endpoint::{Endpoint, ProfileLayers, Slots, WordLookup, normalize_base};
use crate::error::{ClientError, Result};
use crate::format::{
    Grammar, PronunciationSet, decode_grammar, decode_pronunciations, encode_grammar,
    encode_pronunciations,
};
use crate::outcome::{Training, Transcription, classify_training, classify_transcription};
use crate::upload::{DEFAULT_CHUNK_SIZE, chunk_source};

/// Tunables for [`RhasspyClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Per-request time limit. Streaming uploads and `listen_for_command`
    /// wait on the user and are never limited.
    pub timeout: Option<Duration>,
    /// Bytes per chunk for `stream_to_text`.
    pub chunk_size: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Client for a remote Rhasspy server's HTTP API.
///
/// Every method performs exactly one request and never retries.
pub struct RhasspyClient {
    http: Client,
    api_url: String,
    options: ClientOptions,
    sink: Arc<dyn DiagnosticSink>,
}

impl RhasspyClient {
    /// Creates a client for `api_url` (for example `http://localhost:12101/api`)
    /// that reports to `tracing`.
    pub fn new(api_url: &str) -> Self {
        Self::with_sink(api_url, ClientOptions::default(), Arc::new(TracingSink))
    }

    pub fn with_options(api_url: &str, options: ClientOptions) -> Self {
        Self::with_sink(api_url, options, Arc::new(TracingSink))
    }

    pub fn with_sink(api_url: &str, options: ClientOptions, sink: Arc<dyn DiagnosticSink>) -> Self {
        let options = ClientOptions {
            chunk_size: if options.chunk_size == 0 {
                DEFAULT_CHUNK_SIZE
            } else {
                options.chunk_size
            },
            ..options
        };

        Self {
            http: Client::new(),
            api_url: normalize_base(api_url),
            options,
            sink,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub const fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.api_url, endpoint.path())
    }

    // ------------------------------------------------------------------
    // Server

    /// Server version string.
    pub async fn version(&self) -> Result<String> {
        let (url, request) = self.request(Method::GET, Endpoint::Version);
        let response = self.send_checked(&url, request).await?;
        read_text(&url, response).await
    }

    /// Asks the server to restart.
    pub async fn restart(&self) -> Result<String> {
        let (url, request) = self.request(Method::POST, Endpoint::Restart);
        let response = self.send_checked(&url, request).await?;
        read_text(&url, response).await
    }

    /// Trains the profile, clearing the training cache first when `no_cache`
    /// is set.
    ///
    /// Never fails: an unreachable server or a non-success status both come
    /// back as [`Training::Failure`].
    pub async fn train(&self, no_cache: bool) -> Training {
        let (url, mut request) = self.request(Method::POST, Endpoint::Train);
        if no_cache {
            request = request.query(&[("no_cache", "true")]);
        }

        let outcome = match self.send(&url, request).await {
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Ok(body) => classify_training(status, &body),
                    Err(e) => Training::Failure {
                        errors: error_chain(&e),
                    },
                }
            }
            Err(e) => Training::Failure {
                errors: error_chain(&e),
            },
        };

        if let Training::Failure { errors } = &outcome {
            self.sink.emit(&Diagnostic::OutcomeFailure {
                operation: "train",
                detail: errors,
            });
        }

        outcome
    }

    // ------------------------------------------------------------------
    // Training data

    /// Downloads the grammar, grouped by intent.
    pub async fn get_sentences(&self) -> Result<Grammar> {
        let (url, request) = self.request(Method::GET, Endpoint::Sentences);
        let response = self.send_checked(&url, request).await?;
        let text = read_text(&url, response).await?;
        Ok(decode_grammar(&text)?)
    }

    /// Replaces the grammar on the server.
    pub async fn set_sentences(&self, grammar: &Grammar) -> Result<String> {
        let (url, request) = self.request(Method::POST, Endpoint::Sentences);
        let response = self
            .send_checked(&url, request.body(encode_grammar(grammar)))
            .await?;
        read_text(&url, response).await
    }

    /// Downloads the custom pronunciations, grouped by word.
    pub async fn get_custom_words(&self) -> Result<PronunciationSet> {
        let (url, request) = self.request(Method::GET, Endpoint::CustomWords);
        let response = self.send_checked(&url, request).await?;
        let text = read_text(&url, response).await?;
        Ok(decode_pronunciations(&text)?)
    }

    /// Replaces the custom pronunciations on the server.
    pub async fn set_custom_words(&self, pronunciations: &PronunciationSet) -> Result<String> {
        let (url, request) = self.request(Method::POST, Endpoint::CustomWords);
        let response = self
            .send_checked(&url, request.body(encode_pronunciations(pronunciations)))
            .await?;
        read_text(&url, response).await
    }

    pub async fn get_slots(&self) -> Result<Slots> {
        let (url, request) = self.request(Method::GET, Endpoint::Slots);
        let response = self.send_checked(&url, request).await?;
        read_json(&url, response).await
    }

    /// Uploads slot values. With `overwrite` unset the values are appended to
    /// the existing slots.
    pub async fn set_slots(&self, slots: &Slots, overwrite: bool) -> Result<String> {
        let (url, request) = self.request(Method::POST, Endpoint::Slots);
        let request = request
            .query(&[("overwrite_all", bool_param(overwrite))])
            .json(slots);
        let response = self.send_checked(&url, request).await?;
        read_text(&url, response).await
    }

    /// Looks a word up in the base dictionary and guesses up to `count`
    /// pronunciations.
    pub async fn lookup_word(&self, word: &str, count: usize) -> Result<WordLookup> {
        let (url, request) = self.request(Method::POST, Endpoint::Lookup);
        let request = request
            .query(&[("n", count.to_string())])
            .body(word.to_string());
        let response = self.send_checked(&url, request).await?;
        read_json(&url, response).await
    }

    // ------------------------------------------------------------------
    // Profile

    pub async fn get_profile(&self, layers: ProfileLayers) -> Result<serde_json::Value> {
        let (url, request) = self.request(Method::GET, Endpoint::Profile);
        let request = request.query(&[("layers", layers.as_str())]);
        let response = self.send_checked(&url, request).await?;
        read_json(&url, response).await
    }

    pub async fn set_profile<T>(&self, profile: &T) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        let (url, request) = self.request(Method::POST, Endpoint::Profile);
        let response = self.send_checked(&url, request.json(profile)).await?;
        read_text(&url, response).await
    }

    // ------------------------------------------------------------------
    // Speech

    /// Transcribes a complete WAV file.
    ///
    /// Never fails: transport errors, error statuses and empty transcripts
    /// all come back as [`Transcription::Failure`].
    pub async fn speech_to_text(&self, wav: impl Into<Bytes>) -> Transcription {
        let (url, request) = self.request(Method::POST, Endpoint::SpeechToText);
        let request = request.header(CONTENT_TYPE, "audio/wav").body(wav.into());

        let (outcome, detail) = match self.send(&url, request).await {
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Ok(body) => (
                        classify_transcription(status, &body),
                        format!("status {status}: {body:?}"),
                    ),
                    Err(e) => (Transcription::Failure, error_chain(&e)),
                }
            }
            Err(e) => (Transcription::Failure, error_chain(&e)),
        };

        if !outcome.is_success() {
            self.sink.emit(&Diagnostic::OutcomeFailure {
                operation: "speech_to_text",
                detail: &detail,
            });
        }

        outcome
    }

    /// Streams headerless 16-bit 16 kHz mono audio from `reader` and returns
    /// the transcript.
    ///
    /// Chunks are read and sent one at a time. Dropping the returned future
    /// aborts the upload and drops `reader`.
    pub async fn stream_to_text<R>(&self, reader: R) -> Result<String>
    where
        R: AsyncRead + Send + 'static,
    {
        let url = self.url(Endpoint::SpeechToText);
        let sink = Arc::clone(&self.sink);
        let chunks = chunk_source(reader, self.options.chunk_size)
            .enumerate()
            .map(move |(index, chunk)| {
                if let Ok(bytes) = &chunk {
                    sink.emit(&Diagnostic::ChunkSent {
                        index,
                        len: bytes.len(),
                    });
                }
                chunk
            });

        let request = self
            .http
            .post(&url)
            .query(&[("noheader", "true")])
            .body(Body::wrap_stream(chunks));
        let response = self.send_checked(&url, request).await?;
        read_text(&url, response).await
    }

    /// Recognizes an intent from text. With `handle_intent` set the server
    /// also forwards the intent to its handler (e.g. Home Assistant).
    pub async fn text_to_intent(&self, text: &str, handle_intent: bool) -> Result<serde_json::Value> {
        let (url, request) = self.request(Method::POST, Endpoint::TextToIntent);
        let request = request
            .query(&[("nohass", bool_param(!handle_intent))])
            .body(text.to_string());
        let response = self.send_checked(&url, request).await?;
        read_json(&url, response).await
    }

    /// Wakes the server up, waits for one spoken command and returns the
    /// recognized intent.
    pub async fn listen_for_command(&self, handle_intent: bool) -> Result<serde_json::Value> {
        let url = self.url(Endpoint::ListenForCommand);
        let request = self
            .http
            .post(&url)
            .query(&[("nohass", bool_param(!handle_intent))]);
        let response = self.send_checked(&url, request).await?;
        read_json(&url, response).await
    }

    /// Synthesizes `text` and returns WAV audio. With `repeat` set the server
    /// speaks its previous sentence again.
    pub async fn text_to_speech(&self, text: &str, repeat: bool) -> Result<Bytes> {
        let (url, request) = self.request(Method::POST, Endpoint::TextToSpeech);
        let request = request
            .query(&[("repeat", bool_param(repeat))])
            .body(text.to_string());
        let response = self.send_checked(&url, request).await?;
        response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport { url, source })
    }

    // ------------------------------------------------------------------

    fn request(&self, method: Method, endpoint: Endpoint) -> (String, RequestBuilder) {
        let url = self.url(endpoint);
        let mut request = self.http.request(method, &url);
        if let Some(timeout) = self.options.timeout {
            request = request.timeout(timeout);
        }
        (url, request)
    }

    async fn send(&self, url: &str, request: RequestBuilder) -> Result<Response> {
        let request = request.build().map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;

        self.sink.emit(&Diagnostic::Request {
            method: request.method(),
            url,
        });

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|source| ClientError::Transport {
                url: url.to_string(),
                source,
            })?;

        self.sink.emit(&Diagnostic::Response {
            url,
            status: response.status(),
        });

        Ok(response)
    }

    async fn send_checked(&self, url: &str, request: RequestBuilder) -> Result<Response> {
        let response = self.send(url, request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        Ok(response)
    }
}

async fn read_text(url: &str, response: Response) -> Result<String> {
    response.text().await.map_err(|source| ClientError::Transport {
        url: url.to_string(),
        source,
    })
}

async fn read_json<T: DeserializeOwned>(url: &str, response: Response) -> Result<T> {
    response.json().await.map_err(|source| ClientError::Decode {
        url: url.to_string(),
        source,
    })
}

const fn bool_param(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// An error and all its sources, joined with `: `.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
