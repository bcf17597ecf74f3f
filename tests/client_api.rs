#![allow(clippy::unwrap_used)]
//! Client contract tests against an in-process mock server.
//!
//! Each test checks the request the client sends (method, path, query,
//! body) and how the response is mapped to a value, an error or an outcome.

mod common;

use axum::http::Method;
use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::Arc;

use common::{MockServer, RecordingSink, unreachable_api_url};
use rhasspy_client::client::{ClientOptions, ProfileLayers, RhasspyClient, Slots, WordLookup};
use rhasspy_client::error::ClientError;
use rhasspy_client::format::{Grammar, PronunciationSet};
use rhasspy_client::outcome::{Training, Transcription};

fn client_with_sink(api_url: &str) -> (RhasspyClient, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let client = RhasspyClient::with_sink(api_url, ClientOptions::default(), sink.clone());
    (client, sink)
}

// ---------------------------------------------------------------------------
// Plain endpoints

#[tokio::test]
async fn test_version() {
    let server = MockServer::start(&[("version", 200, b"2.5.11")]).await;
    let client = RhasspyClient::new(&server.api_url);

    assert_eq!(client.version().await.unwrap(), "2.5.11");

    let request = server.single_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "/api/version");
}

#[tokio::test]
async fn test_base_url_with_trailing_slash() {
    let server = MockServer::start(&[("version", 200, b"2.5.11")]).await;
    let client = RhasspyClient::new(&format!("{}/", server.api_url));

    client.version().await.unwrap();

    assert_eq!(server.single_request().path, "/api/version");
}

#[tokio::test]
async fn test_error_status_is_surfaced() {
    let server = MockServer::start(&[("restart", 503, b"busy")]).await;
    let client = RhasspyClient::new(&server.api_url);

    let err = client.restart().await.unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(503));
    match err {
        ClientError::Status { body, .. } => assert_eq!(body, "busy"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(server.single_request().method, Method::POST);
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = RhasspyClient::new(&unreachable_api_url().await);

    let err = client.version().await.unwrap_err();

    assert!(err.is_transport());
    assert!(!err.is_format());
}

#[tokio::test]
async fn test_diagnostics_record_request_and_response() {
    let server = MockServer::start(&[("version", 200, b"2.5.11")]).await;
    let (client, sink) = client_with_sink(&server.api_url);

    client.version().await.unwrap();

    assert_eq!(sink.events(), vec!["request GET", "response 200"]);
}

// ---------------------------------------------------------------------------
// Grammar and pronunciations

#[tokio::test]
async fn test_get_sentences_decodes_grammar() {
    let server = MockServer::start(&[(
        "sentences",
        200,
        b"[GetTime]\nwhat time is it\ntell me the time\n\n[ChangeLightState]\nstate = (on | off)\n\\[the] light <state>\n",
    )])
    .await;
    let client = RhasspyClient::new(&server.api_url);

    let grammar = client.get_sentences().await.unwrap();

    assert_eq!(grammar["GetTime"], vec!["what time is it", "tell me the time"]);
    assert_eq!(
        grammar["ChangeLightState"],
        vec!["state = (on | off)", "[the] light <state>"]
    );
}

#[tokio::test]
async fn test_get_sentences_malformed_is_format_error() {
    let server = MockServer::start(&[("sentences", 200, b"no header here\n")]).await;
    let client = RhasspyClient::new(&server.api_url);

    let err = client.get_sentences().await.unwrap_err();

    assert!(err.is_format());
}

#[tokio::test]
async fn test_set_sentences_posts_encoded_grammar() {
    let server = MockServer::start(&[("sentences", 200, b"Wrote 1 file(s)")]).await;
    let client = RhasspyClient::new(&server.api_url);

    let mut grammar = Grammar::new();
    grammar.insert(
        "GetTime".to_string(),
        vec!["what time is it".to_string(), "tell me the time".to_string()],
    );

    let reply = client.set_sentences(&grammar).await.unwrap();

    assert_eq!(reply, "Wrote 1 file(s)");
    let request = server.single_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/api/sentences");
    assert_eq!(
        request.body_text(),
        "[GetTime]\ntell me the time\nwhat time is it\n\n"
    );
}

#[tokio::test]
async fn test_get_custom_words_groups_pronunciations() {
    let server = MockServer::start(&[(
        "custom-words",
        200,
        b"cat K AE T\ndog D AO G\ncat K AE T2\n\n",
    )])
    .await;
    let client = RhasspyClient::new(&server.api_url);

    let words = client.get_custom_words().await.unwrap();

    assert_eq!(words.len(), 2);
    assert_eq!(
        words["cat"].iter().collect::<Vec<_>>(),
        vec!["K AE T", "K AE T2"]
    );
    assert!(words["dog"].contains("D AO G"));
}

#[tokio::test]
async fn test_get_custom_words_malformed_is_format_error() {
    let server = MockServer::start(&[("custom-words", 200, b"cat K AE T\norphan\n")]).await;
    let client = RhasspyClient::new(&server.api_url);

    assert!(client.get_custom_words().await.unwrap_err().is_format());
}

#[tokio::test]
async fn test_set_custom_words_posts_sorted_lines() {
    let server = MockServer::start(&[("custom-words", 200, b"ok")]).await;
    let client = RhasspyClient::new(&server.api_url);

    let mut words = PronunciationSet::new();
    words.entry("dog".to_string()).or_default().insert("D AO G".to_string());
    words.entry("cat".to_string()).or_default().insert("K AE T2".to_string());
    words.entry("cat".to_string()).or_default().insert("K AE T".to_string());

    client.set_custom_words(&words).await.unwrap();

    assert_eq!(
        server.single_request().body_text(),
        "cat K AE T\ncat K AE T2\ndog D AO G\n"
    );
}

#[tokio::test]
async fn test_lookup_word() {
    let server = MockServer::start(&[(
        "lookup",
        200,
        br#"{"in_dictionary": false, "pronunciations": ["R AE S P IY", "R AA S P IY"]}"#,
    )])
    .await;
    let client = RhasspyClient::new(&server.api_url);

    let lookup = client.lookup_word("rhasspy", 3).await.unwrap();

    assert_eq!(
        lookup,
        WordLookup {
            in_dictionary: false,
            pronunciations: vec!["R AE S P IY".to_string(), "R AA S P IY".to_string()],
        }
    );
    let request = server.single_request();
    assert_eq!(request.query["n"], "3");
    assert_eq!(request.body_text(), "rhasspy");
}

// ---------------------------------------------------------------------------
// Slots and profile

#[tokio::test]
async fn test_get_slots() {
    let server = MockServer::start(&[(
        "slots",
        200,
        br#"{"color": ["red", "green"], "room": ["kitchen"]}"#,
    )])
    .await;
    let client = RhasspyClient::new(&server.api_url);

    let slots = client.get_slots().await.unwrap();

    assert_eq!(slots["color"], vec!["red", "green"]);
    assert_eq!(slots["room"], vec!["kitchen"]);
}

#[tokio::test]
async fn test_get_slots_wrong_shape_is_decode_error() {
    let server = MockServer::start(&[("slots", 200, b"<html>oops</html>")]).await;
    let client = RhasspyClient::new(&server.api_url);

    let err = client.get_slots().await.unwrap_err();

    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn test_set_slots_sends_json_and_overwrite_flag() {
    let server = MockServer::start(&[("slots", 200, b"ok")]).await;
    let client = RhasspyClient::new(&server.api_url);

    let mut slots = Slots::new();
    slots.insert("color".to_string(), vec!["red".to_string(), "blue".to_string()]);

    client.set_slots(&slots, false).await.unwrap();

    let request = server.single_request();
    assert_eq!(request.query["overwrite_all"], "false");
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    let sent: BTreeMap<String, Vec<String>> = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(sent, slots);
}

#[tokio::test]
async fn test_get_profile_layers() {
    let server = MockServer::start(&[("profile", 200, br#"{"language": "en"}"#)]).await;
    let client = RhasspyClient::new(&server.api_url);

    let profile = client.get_profile(ProfileLayers::Profile).await.unwrap();

    assert_eq!(profile["language"], "en");
    assert_eq!(server.single_request().query["layers"], "profile");
}

#[tokio::test]
async fn test_set_profile() {
    let server = MockServer::start(&[("profile", 200, b"Wrote profile")]).await;
    let client = RhasspyClient::new(&server.api_url);
    let profile = serde_json::json!({"speech_to_text": {"system": "kaldi"}});

    assert_eq!(client.set_profile(&profile).await.unwrap(), "Wrote profile");

    let sent: serde_json::Value = serde_json::from_slice(&server.single_request().body).unwrap();
    assert_eq!(sent, profile);
}

// ---------------------------------------------------------------------------
// Training

#[tokio::test]
async fn test_train_success_ignores_body() {
    let server = MockServer::start(&[("train", 200, b"Training completed in 2.1 second(s)")]).await;
    let client = RhasspyClient::new(&server.api_url);

    assert_eq!(client.train(false).await, Training::Success);

    let request = server.single_request();
    assert_eq!(request.method, Method::POST);
    assert!(!request.query.contains_key("no_cache"));
}

#[tokio::test]
async fn test_train_no_cache_flag() {
    let server = MockServer::start(&[("train", 200, b"")]).await;
    let client = RhasspyClient::new(&server.api_url);

    client.train(true).await;

    assert_eq!(server.single_request().query["no_cache"], "true");
}

#[tokio::test]
async fn test_train_failure_carries_server_text() {
    let server = MockServer::start(&[("train", 400, b"bad profile")]).await;
    let (client, sink) = client_with_sink(&server.api_url);

    let outcome = client.train(false).await;

    assert_eq!(
        outcome,
        Training::Failure {
            errors: "bad profile".to_string()
        }
    );
    assert!(sink.events().contains(&"failure train".to_string()));
}

#[tokio::test]
async fn test_train_unreachable_is_failure_not_error() {
    let (client, sink) = client_with_sink(&unreachable_api_url().await);

    match client.train(false).await {
        Training::Failure { errors } => assert!(errors.contains("failed to reach")),
        Training::Success => panic!("training cannot succeed without a server"),
    }
    assert_eq!(sink.events(), vec!["request POST", "failure train"]);
}

// ---------------------------------------------------------------------------
// Speech

#[tokio::test]
async fn test_speech_to_text_success() {
    let server = MockServer::start(&[("speech-to-text", 200, b"turn on the lights")]).await;
    let client = RhasspyClient::new(&server.api_url);
    let wav = b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec();

    let transcription = client.speech_to_text(wav.clone()).await;

    assert_eq!(transcription.text(), Some("turn on the lights"));
    let request = server.single_request();
    assert_eq!(request.content_type.as_deref(), Some("audio/wav"));
    assert_eq!(request.body, wav);
    assert!(request.query.is_empty());
}

#[tokio::test]
async fn test_speech_to_text_empty_transcript_is_failure() {
    let server = MockServer::start(&[("speech-to-text", 200, b"")]).await;
    let (client, sink) = client_with_sink(&server.api_url);

    assert_eq!(client.speech_to_text(vec![0u8; 44]).await, Transcription::Failure);
    assert!(sink.events().contains(&"failure speech_to_text".to_string()));
}

#[tokio::test]
async fn test_speech_to_text_error_status_is_failure() {
    let server = MockServer::start(&[("speech-to-text", 500, b"err")]).await;
    let client = RhasspyClient::new(&server.api_url);

    assert_eq!(client.speech_to_text(vec![0u8; 44]).await, Transcription::Failure);
}

#[tokio::test]
async fn test_speech_to_text_unreachable_is_failure() {
    let client = RhasspyClient::new(&unreachable_api_url().await);

    assert_eq!(client.speech_to_text(vec![0u8; 44]).await, Transcription::Failure);
}

#[tokio::test]
async fn test_stream_to_text_sends_chunks_and_headerless_flag() {
    let server = MockServer::start(&[("speech-to-text", 200, b"what time is it")]).await;
    let (client, sink) = client_with_sink(&server.api_url);
    let audio: Vec<u8> = (0..2500u32).map(|i| (i % 251) as u8).collect();

    let text = client.stream_to_text(Cursor::new(audio.clone())).await.unwrap();

    assert_eq!(text, "what time is it");
    let request = server.single_request();
    assert_eq!(request.query["noheader"], "true");
    assert_eq!(request.body, audio);

    let chunks: Vec<String> = sink
        .events()
        .into_iter()
        .filter(|e| e.starts_with("chunk"))
        .collect();
    assert_eq!(
        chunks,
        vec!["chunk 0 1024", "chunk 1 1024", "chunk 2 452", "chunk 3 0"]
    );
}

#[tokio::test]
async fn test_stream_to_text_uses_configured_chunk_size() {
    let server = MockServer::start(&[("speech-to-text", 200, b"ok")]).await;
    let sink = Arc::new(RecordingSink::default());
    let options = ClientOptions {
        timeout: None,
        chunk_size: 4096,
    };
    let client = RhasspyClient::with_sink(&server.api_url, options, sink.clone());

    client.stream_to_text(Cursor::new(vec![0u8; 5000])).await.unwrap();

    let chunks: Vec<String> = sink
        .events()
        .into_iter()
        .filter(|e| e.starts_with("chunk"))
        .collect();
    assert_eq!(chunks, vec!["chunk 0 4096", "chunk 1 904", "chunk 2 0"]);
}

#[tokio::test]
async fn test_stream_to_text_error_status_is_surfaced() {
    let server = MockServer::start(&[("speech-to-text", 500, b"decoder crashed")]).await;
    let client = RhasspyClient::new(&server.api_url);

    let err = client.stream_to_text(Cursor::new(vec![0u8; 10])).await.unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
}

#[tokio::test]
async fn test_text_to_intent() {
    let server = MockServer::start(&[(
        "text-to-intent",
        200,
        br#"{"intent": {"name": "GetTime", "confidence": 1.0}, "text": "what time is it"}"#,
    )])
    .await;
    let client = RhasspyClient::new(&server.api_url);

    let intent = client.text_to_intent("what time is it", false).await.unwrap();

    assert_eq!(intent["intent"]["name"], "GetTime");
    let request = server.single_request();
    assert_eq!(request.query["nohass"], "true");
    assert_eq!(request.body_text(), "what time is it");
}

#[tokio::test]
async fn test_text_to_intent_forwards_when_handled() {
    let server = MockServer::start(&[("text-to-intent", 200, b"{}")]).await;
    let client = RhasspyClient::new(&server.api_url);

    client.text_to_intent("turn on the light", true).await.unwrap();

    assert_eq!(server.single_request().query["nohass"], "false");
}

#[tokio::test]
async fn test_listen_for_command() {
    let server = MockServer::start(&[(
        "listen-for-command",
        200,
        br#"{"intent": {"name": "GetTime"}}"#,
    )])
    .await;
    let client = RhasspyClient::new(&server.api_url);

    let intent = client.listen_for_command(true).await.unwrap();

    assert_eq!(intent["intent"]["name"], "GetTime");
    let request = server.single_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.query["nohass"], "false");
}

#[tokio::test]
async fn test_text_to_speech_returns_audio() {
    let wav: &[u8] = b"RIFF\x00\x00\x00\x00WAVE\x00\xff";
    let server = MockServer::start(&[("text-to-speech", 200, wav)]).await;
    let client = RhasspyClient::new(&server.api_url);

    let audio = client.text_to_speech("hello world", true).await.unwrap();

    assert_eq!(&audio[..], wav);
    let request = server.single_request();
    assert_eq!(request.query["repeat"], "true");
    assert_eq!(request.body_text(), "hello world");
}
