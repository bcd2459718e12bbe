//! Integration test: fetch layer against a local HTTP server.

mod common;

use common::host_server;
use linkcheck_core::fetch::{self, FetchError, Timeouts};
use std::time::Duration;

fn quick() -> Timeouts {
    Timeouts {
        connect: Duration::from_secs(2),
        total: Duration::from_secs(5),
    }
}

#[test]
fn get_page_returns_status_and_body() {
    let server = host_server::start(|req| match req.path.as_str() {
        "/ok" => (200, "hello".to_string()),
        _ => (404, "missing".to_string()),
    });

    let page = fetch::get_page(&server.url("/ok"), quick()).unwrap();
    assert!(page.is_ok());
    assert_eq!(page.body, "hello");

    let page = fetch::get_page(&server.url("/nope"), quick()).unwrap();
    assert_eq!(page.status, 404);
    assert!(!page.is_ok());
}

#[test]
fn get_page_connection_refused_is_curl_error() {
    let url = format!("http://127.0.0.1:{}/x", host_server::closed_port());
    let err = fetch::get_page(&url, quick()).unwrap_err();
    assert!(matches!(err, FetchError::Curl(_)));
}

#[test]
fn post_json_sends_body_and_parses_reply() {
    let server = host_server::start(|req| {
        if req.method == "POST" && req.body.contains("\"p\":\"AbC\"") {
            (200, "[{\"s\":42}]".to_string())
        } else {
            (200, "[-2]".to_string())
        }
    });
    let reply = fetch::post_json(
        &server.url("/cs"),
        &serde_json::json!([{ "a": "g", "p": "AbC" }]),
        quick(),
    )
    .unwrap();
    assert_eq!(reply[0]["s"], 42);
}

#[test]
fn post_json_non_2xx_is_http_error() {
    let server = host_server::start(|_| (500, "oops".to_string()));
    let err = fetch::post_json(&server.url("/cs"), &serde_json::json!([]), quick()).unwrap_err();
    assert!(matches!(err, FetchError::Http(500)));
}

#[test]
fn post_json_garbage_reply_is_json_error() {
    let server = host_server::start(|_| (200, "<html>".to_string()));
    let err = fetch::post_json(&server.url("/cs"), &serde_json::json!([]), quick()).unwrap_err();
    assert!(matches!(err, FetchError::Json(_)));
}
