// roach-client/tests/flush.rs
// Flush protocol integration tests against an in-process service

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use roach_client::{PrintError, Printer, TableCell, TableOptions};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct ServiceState {
    received: Arc<Mutex<Vec<Value>>>,
    reply: Value,
}

async fn print_endpoint(State(state): State<ServiceState>, Json(body): Json<Value>) -> Json<Value> {
    state.received.lock().unwrap().push(body);
    Json(state.reply.clone())
}

/// Spawn a service that records every payload and answers with `reply`.
/// Returns the printer address and the recorded payloads.
async fn spawn_service(reply: Value) -> (String, Arc<Mutex<Vec<Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = ServiceState {
        received: received.clone(),
        reply,
    };
    let app = Router::new()
        .route("/", post(print_endpoint))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), received)
}

#[tokio::test]
async fn test_flush_sends_commands_in_call_order() {
    let (address, received) = spawn_service(json!({ "error": false })).await;

    let mut printer = Printer::new(&address);
    printer.text("Hello").feed(2).cut();
    printer.flush().await.unwrap();

    let payloads = received.lock().unwrap();
    assert_eq!(payloads.len(), 1);
    assert_eq!(
        payloads[0],
        json!({
            "opts": [
                ["text", ["Hello", null]],
                ["feed", [2]],
                ["cut", [null, null]],
                ["flush", []]
            ]
        })
    );
}

#[tokio::test]
async fn test_flush_empty_queue_sends_marker_only() {
    let (address, received) = spawn_service(json!({ "error": false })).await;

    let mut printer = Printer::new(&address);
    printer.flush().await.unwrap();

    let payloads = received.lock().unwrap();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0], json!({ "opts": [["flush", []]] }));
}

#[tokio::test]
async fn test_sequential_flushes_are_disjoint_batches() {
    let (address, received) = spawn_service(json!({ "error": false })).await;

    let mut printer = Printer::new(&address);
    printer.text("first");
    printer.flush().await.unwrap();

    assert_eq!(printer.queued(), 0);
    printer.text("second").beep(1, 2);
    printer.flush().await.unwrap();

    let payloads = received.lock().unwrap();
    assert_eq!(payloads.len(), 2);
    assert_eq!(
        payloads[0],
        json!({ "opts": [["text", ["first", null]], ["flush", []]] })
    );
    assert_eq!(
        payloads[1],
        json!({
            "opts": [
                ["text", ["second", null]],
                ["beep", [1, 2]],
                ["flush", []]
            ]
        })
    );
}

#[tokio::test]
async fn test_rejected_with_service_message() {
    let (address, _received) =
        spawn_service(json!({ "error": true, "message": "out of paper" })).await;

    let mut printer = Printer::new(&address);
    printer.text("Hello");
    let err = printer.flush().await.unwrap_err();

    match err {
        PrintError::Rejected(message) => assert_eq!(message, "out of paper"),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_without_message_uses_fallback() {
    let (address, _received) = spawn_service(json!({ "error": true })).await;

    let mut printer = Printer::new(&address);
    let err = printer.flush().await.unwrap_err();

    match err {
        PrintError::Rejected(message) => assert_eq!(message, "unexpected error"),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_error_field_means_success() {
    let (address, _received) = spawn_service(json!({})).await;

    let mut printer = Printer::new(&address);
    printer.text("Hello");
    assert!(printer.flush().await.is_ok());
}

#[tokio::test]
async fn test_non_success_status_is_transport_error() {
    let app = Router::new().route(
        "/",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut printer = Printer::new(format!("http://{addr}"));
    let err = printer.flush().await.unwrap_err();

    match err {
        PrintError::Status { status, body } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_address_is_transport_error() {
    // Port 9 (discard) is assumed closed on loopback.
    let mut printer = Printer::new("http://127.0.0.1:9");
    let err = printer.flush().await.unwrap_err();
    assert!(matches!(err, PrintError::Http(_)));
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let app = Router::new().route("/", post(|| async { "not json" }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut printer = Printer::new(format!("http://{addr}"));
    let err = printer.flush().await.unwrap_err();
    assert!(matches!(err, PrintError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_failed_flush_does_not_requeue_commands() {
    let (address, received) = spawn_service(json!({ "error": true })).await;

    let mut printer = Printer::new(&address);
    printer.text("lost");
    assert!(printer.flush().await.is_err());
    assert_eq!(printer.queued(), 0);

    // A retry has to rebuild the batch; the next flush carries only the
    // marker.
    printer.flush().await.unwrap_err();
    let payloads = received.lock().unwrap();
    assert_eq!(payloads[1], json!({ "opts": [["flush", []]] }));
}

#[tokio::test]
async fn test_full_receipt_payload() {
    let (address, received) = spawn_service(json!({ "error": false })).await;

    let mut printer = Printer::new(&address);
    printer
        .font("a")
        .align("ct")
        .style("bu")
        .size(0, 0)
        .text("The quick brown fox jumps over the lazy dog")
        .table(["One", "Two", "Three"])
        .table_custom_with(
            vec![
                TableCell::new("Left")
                    .with_align("LEFT")
                    .with_width(0.33)
                    .with_style("B"),
                TableCell::new("Center").with_align("CENTER").with_width(0.33),
                TableCell::new("Right").with_align("RIGHT").with_width(0.33),
            ],
            TableOptions::new().with_encoding("cp857").with_size(1, 1),
        )
        .qrimage("https://github.com/song940/node-escpos")
        .cut();
    printer.close().await.unwrap();

    let payloads = received.lock().unwrap();
    assert_eq!(payloads.len(), 1);
    assert_eq!(
        payloads[0],
        json!({
            "opts": [
                ["font", ["a"]],
                ["align", ["ct"]],
                ["style", ["bu"]],
                ["size", [0, 0]],
                ["text", ["The quick brown fox jumps over the lazy dog", null]],
                ["table", [["One", "Two", "Three"], null]],
                ["tableCustom", [
                    [
                        { "text": "Left", "align": "LEFT", "width": 0.33, "style": "B" },
                        { "text": "Center", "align": "CENTER", "width": 0.33 },
                        { "text": "Right", "align": "RIGHT", "width": 0.33 }
                    ],
                    { "encoding": "cp857", "size": [1, 1] }
                ]],
                ["qrimage", ["https://github.com/song940/node-escpos", null]],
                ["cut", [null, null]],
                ["flush", []]
            ]
        })
    );
}

#[tokio::test]
async fn test_raw_bytes_travel_as_base64() {
    let (address, received) = spawn_service(json!({ "error": false })).await;

    let mut printer = Printer::new(&address);
    printer.raw(vec![0x1D, 0x77, 0x06]);
    printer.flush().await.unwrap();

    let payloads = received.lock().unwrap();
    assert_eq!(
        payloads[0],
        json!({ "opts": [["raw", ["HXcG"]], ["flush", []]] })
    );
}
