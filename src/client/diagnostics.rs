//! Diagnostic events emitted by the client.
//!
//! The sink is handed to the client when it is built; nothing here touches
//! process-wide logging configuration.

use reqwest::{Method, StatusCode};

/// Something the client observed while talking to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic<'a> {
    Request { method: &'a Method, url: &'a str },
    Response { url: &'a str, status: StatusCode },
    ChunkSent { index: usize, len: usize },
    /// A task the server ran failed; the call still returns normally.
    OutcomeFailure { operation: &'a str, detail: &'a str },
}

pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, event: &Diagnostic<'_>);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, event: &Diagnostic<'_>) {
        match event {
            Diagnostic::Request { method, url } => {
                tracing::debug!(%method, url, "sending request");
            }
            Diagnostic::Response { url, status } => {
                tracing::debug!(url, status = status.as_u16(), "received response");
            }
            Diagnostic::ChunkSent { index, len } => {
                tracing::trace!(index, len, "sent audio chunk");
            }
            Diagnostic::OutcomeFailure { operation, detail } => {
                tracing::warn!(operation, detail, "server task failed");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _event: &Diagnostic<'_>) {}
}
