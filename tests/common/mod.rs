//! In-process stand-in for a Rhasspy server.
//!
//! Every request is recorded; each path answers with a canned status and
//! body (404 for anything not configured).

#![allow(dead_code, clippy::unwrap_used)]

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rhasspy_client::client::{Diagnostic, DiagnosticSink};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn body_text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

#[derive(Default)]
struct Shared {
    routes: HashMap<String, (StatusCode, Vec<u8>)>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct MockServer {
    shared: Arc<Shared>,
    pub api_url: String,
}

impl MockServer {
    /// Starts a server answering `path -> (status, body)` under `/api/`.
    pub async fn start(routes: &[(&str, u16, &[u8])]) -> Self {
        let shared = Arc::new(Shared {
            routes: routes
                .iter()
                .map(|(path, status, body)| {
                    (
                        format!("/api/{path}"),
                        (StatusCode::from_u16(*status).unwrap(), body.to_vec()),
                    )
                })
                .collect(),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(handle).with_state(Arc::clone(&shared));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            shared,
            api_url: format!("http://{addr}/api"),
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().unwrap().clone()
    }

    /// The only request received so far.
    pub fn single_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected one request, got {requests:?}");
        requests.into_iter().next().unwrap()
    }
}

async fn handle(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    shared.requests.lock().unwrap().push(Recorded {
        method,
        path: path.clone(),
        query,
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.to_vec(),
    });

    match shared.routes.get(&path) {
        Some((status, body)) => (*status, body.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

/// A URL nothing listens on.
pub async fn unreachable_api_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

/// Keeps a one-line summary of every diagnostic event.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, event: &Diagnostic<'_>) {
        let line = match event {
            Diagnostic::Request { method, .. } => format!("request {method}"),
            Diagnostic::Response { status, .. } => format!("response {}", status.as_u16()),
            Diagnostic::ChunkSent { index, len } => format!("chunk {index} {len}"),
            Diagnostic::OutcomeFailure { operation, .. } => format!("failure {operation}"),
        };
        self.events.lock().unwrap().push(line);
    }
}
