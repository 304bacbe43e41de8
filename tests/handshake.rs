//! Opening handshake behavior for both roles.

mod common;

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use common::MockTransport;
use websock::protocol::handshake::compute_accept_key;
use websock::{Request, Response, Transport, WebSocket};

fn upgrade_request(key: &str) -> Request {
    let mut request = Request::get("/chat");
    request.headers.set("Host", "server.example.com");
    request.headers.set("Upgrade", "websocket");
    request.headers.set("Connection", "Upgrade");
    request.headers.set("Sec-WebSocket-Key", key);
    request.headers.set("Sec-WebSocket-Version", "13");
    request
}

fn accepting_response(key: &str) -> Response {
    let mut response = Response {
        status_code: 101,
        status: "Switching Protocols".into(),
        ..Response::default()
    };
    response.headers.set("Upgrade", "websocket");
    response.headers.set("Connection", "Upgrade");
    response
        .headers
        .set("Sec-WebSocket-Accept", compute_accept_key(key));
    response
}

const SAMPLE_KEY: &str = "dGhlIHNhbXBsZSBub25jZQ==";

// ---------------------------------------------------------------------------
// Client side
// ---------------------------------------------------------------------------

#[test]
fn test_start_open_as_client_sets_headers() {
    let ws = WebSocket::new();
    let mut request = Request::get("/chat");
    request.headers.set("Connection", "keep-alive");

    ws.start_open_as_client(&mut request);

    assert_eq!(request.headers.value("Sec-WebSocket-Version"), Some("13"));
    assert!(request
        .headers
        .value("Upgrade")
        .unwrap()
        .eq_ignore_ascii_case("websocket"));

    // The key is canonical base64 of a 16-byte nonce.
    let key = request.headers.value("Sec-WebSocket-Key").unwrap();
    let decoded = BASE64.decode(key).unwrap();
    assert_eq!(decoded.len(), 16);
    assert_eq!(BASE64.encode(decoded), key);

    // Existing Connection values are preserved alongside the new token.
    let tokens = request.headers.tokens("Connection");
    assert!(tokens.contains(&"keep-alive".to_string()));
    assert!(tokens.contains(&"upgrade".to_string()));
}

#[test]
fn test_start_open_generates_fresh_keys() {
    let ws = WebSocket::new();
    let mut first = Request::get("/");
    let mut second = Request::get("/");
    ws.start_open_as_client(&mut first);
    ws.start_open_as_client(&mut second);
    assert_ne!(
        first.headers.value("Sec-WebSocket-Key"),
        second.headers.value("Sec-WebSocket-Key")
    );
}

#[test]
fn test_complete_open_as_client_succeeds() {
    let ws = WebSocket::new();
    let mut request = Request::get("/chat");
    ws.start_open_as_client(&mut request);

    let key = request.headers.value("Sec-WebSocket-Key").unwrap().to_string();
    let transport = MockTransport::new();
    ws.complete_open_as_client(Arc::clone(&transport) as Arc<dyn Transport>, &accepting_response(&key))
        .unwrap();

    // Bound as client: outgoing frames are masked.
    ws.ping(b"Hello!");
    let sent = transport.sent();
    assert_eq!(&sent[..2], &[0x89, 0x86]);
    for (i, byte) in b"Hello!".iter().enumerate() {
        assert_eq!(sent[6 + i], byte ^ sent[2 + (i % 4)]);
    }
}

#[test]
fn test_complete_open_rejects_wrong_status() {
    let ws = WebSocket::new();
    let mut request = Request::get("/chat");
    ws.start_open_as_client(&mut request);
    let key = request.headers.value("Sec-WebSocket-Key").unwrap().to_string();

    let mut response = accepting_response(&key);
    response.status_code = 200;

    let transport = MockTransport::new();
    assert!(ws
        .complete_open_as_client(Arc::clone(&transport) as Arc<dyn Transport>, &response)
        .is_err());

    // Failure binds nothing: sends are dropped.
    ws.ping(b"x");
    assert!(transport.sent().is_empty());
}

#[test]
fn test_complete_open_rejects_bad_upgrade_header() {
    let ws = WebSocket::new();
    let mut request = Request::get("/chat");
    ws.start_open_as_client(&mut request);
    let key = request.headers.value("Sec-WebSocket-Key").unwrap().to_string();
    let transport = MockTransport::new();

    let mut response = accepting_response(&key);
    response.headers.remove("Upgrade");
    assert!(ws
        .complete_open_as_client(Arc::clone(&transport) as Arc<dyn Transport>, &response)
        .is_err());

    let mut response = accepting_response(&key);
    response.headers.set("Upgrade", "foobar");
    assert!(ws
        .complete_open_as_client(Arc::clone(&transport) as Arc<dyn Transport>, &response)
        .is_err());
}

#[test]
fn test_complete_open_rejects_bad_connection_header() {
    let ws = WebSocket::new();
    let mut request = Request::get("/chat");
    ws.start_open_as_client(&mut request);
    let key = request.headers.value("Sec-WebSocket-Key").unwrap().to_string();
    let transport = MockTransport::new();

    let mut response = accepting_response(&key);
    response.headers.remove("Connection");
    assert!(ws
        .complete_open_as_client(Arc::clone(&transport) as Arc<dyn Transport>, &response)
        .is_err());

    let mut response = accepting_response(&key);
    response.headers.set("Connection", "close");
    assert!(ws
        .complete_open_as_client(Arc::clone(&transport) as Arc<dyn Transport>, &response)
        .is_err());
}

#[test]
fn test_complete_open_rejects_bad_accept() {
    let ws = WebSocket::new();
    let mut request = Request::get("/chat");
    ws.start_open_as_client(&mut request);
    let key = request.headers.value("Sec-WebSocket-Key").unwrap().to_string();
    let transport = MockTransport::new();

    let mut response = accepting_response(&key);
    response
        .headers
        .set("Sec-WebSocket-Accept", "bm90IHRoZSByaWdodCBhbnN3ZXI=");
    assert!(ws
        .complete_open_as_client(Arc::clone(&transport) as Arc<dyn Transport>, &response)
        .is_err());

    let mut response = accepting_response(&key);
    response.headers.remove("Sec-WebSocket-Accept");
    assert!(ws
        .complete_open_as_client(Arc::clone(&transport) as Arc<dyn Transport>, &response)
        .is_err());
}

#[test]
fn test_complete_open_rejects_unrequested_negotiation() {
    let ws = WebSocket::new();
    let mut request = Request::get("/chat");
    ws.start_open_as_client(&mut request);
    let key = request.headers.value("Sec-WebSocket-Key").unwrap().to_string();
    let transport = MockTransport::new();

    let mut response = accepting_response(&key);
    response
        .headers
        .set("Sec-WebSocket-Extensions", "permessage-deflate");
    assert!(ws
        .complete_open_as_client(Arc::clone(&transport) as Arc<dyn Transport>, &response)
        .is_err());

    let mut response = accepting_response(&key);
    response.headers.set("Sec-WebSocket-Protocol", "chat");
    assert!(ws
        .complete_open_as_client(Arc::clone(&transport) as Arc<dyn Transport>, &response)
        .is_err());
}

// ---------------------------------------------------------------------------
// Server side
// ---------------------------------------------------------------------------

#[test]
fn test_open_as_server_populates_response() {
    let ws = WebSocket::new();
    let transport = MockTransport::new();
    let request = upgrade_request(SAMPLE_KEY);
    let mut response = Response::default();

    ws.open_as_server(
        Arc::clone(&transport) as Arc<dyn Transport>,
        &request,
        &mut response,
        b"",
    )
    .unwrap();

    assert_eq!(response.status_code, 101);
    assert_eq!(response.status, "Switching Protocols");
    assert!(response
        .headers
        .value("Upgrade")
        .unwrap()
        .eq_ignore_ascii_case("websocket"));
    assert!(response
        .headers
        .tokens("Connection")
        .contains(&"upgrade".to_string()));
    // RFC 6455 Section 1.3 sample key and accept value.
    assert_eq!(
        response.headers.value("Sec-WebSocket-Accept"),
        Some("s3pPLMBiTxaQ9kYGzzhZRbK+xOo=")
    );

    // Bound as server: outgoing frames are unmasked.
    ws.ping(b"hi");
    assert_eq!(transport.sent(), vec![0x89, 0x02, b'h', b'i']);
}

#[test]
fn test_open_as_server_accepts_capitalized_tokens() {
    let ws = WebSocket::new();
    let transport = MockTransport::new();
    let mut request = upgrade_request(SAMPLE_KEY);
    request.headers.set("Connection", "Keep-Alive, UPGRADE");
    request.headers.set("Upgrade", "WebSocket");
    let mut response = Response::default();

    assert!(ws
        .open_as_server(
            Arc::clone(&transport) as Arc<dyn Transport>,
            &request,
            &mut response,
            b"",
        )
        .is_ok());
}

#[test]
fn test_open_as_server_feeds_trailer() {
    let ws = WebSocket::new();
    let transport = MockTransport::new();
    let request = upgrade_request(SAMPLE_KEY);
    let mut response = Response::default();

    // Trailer holds a masked ping that arrived pipelined after the
    // upgrade request.
    let trailer = [0x89u8, 0x84, 0x00, 0x00, 0x00, 0x00, b'p', b'i', b'n', b'g'];
    ws.open_as_server(
        Arc::clone(&transport) as Arc<dyn Transport>,
        &request,
        &mut response,
        &trailer,
    )
    .unwrap();

    assert_eq!(transport.sent(), vec![0x8A, 0x04, b'p', b'i', b'n', b'g']);
}

#[test]
fn test_open_as_server_empty_trailer_sends_nothing() {
    let ws = WebSocket::new();
    let transport = MockTransport::new();
    let request = upgrade_request(SAMPLE_KEY);
    let mut response = Response::default();

    ws.open_as_server(
        Arc::clone(&transport) as Arc<dyn Transport>,
        &request,
        &mut response,
        b"",
    )
    .unwrap();
    assert!(transport.sent().is_empty());
}

fn assert_server_rejects(request: &Request) {
    let ws = WebSocket::new();
    let transport = MockTransport::new();
    let mut response = Response::default();
    assert!(ws
        .open_as_server(
            Arc::clone(&transport) as Arc<dyn Transport>,
            request,
            &mut response,
            b"",
        )
        .is_err());
    // Neither the response nor the session is touched on failure.
    assert_eq!(response, Response::default());
    ws.ping(b"x");
    assert!(transport.sent().is_empty());
}

#[test]
fn test_open_as_server_rejects_non_get() {
    let mut request = upgrade_request(SAMPLE_KEY);
    request.method = "POST".into();
    assert_server_rejects(&request);
}

#[test]
fn test_open_as_server_rejects_bad_version() {
    let mut request = upgrade_request(SAMPLE_KEY);
    request.headers.set("Sec-WebSocket-Version", "12");
    assert_server_rejects(&request);

    let mut request = upgrade_request(SAMPLE_KEY);
    request.headers.remove("Sec-WebSocket-Version");
    assert_server_rejects(&request);
}

#[test]
fn test_open_as_server_rejects_bad_connection() {
    let mut request = upgrade_request(SAMPLE_KEY);
    request.headers.set("Connection", "close");
    assert_server_rejects(&request);

    let mut request = upgrade_request(SAMPLE_KEY);
    request.headers.remove("Connection");
    assert_server_rejects(&request);
}

#[test]
fn test_open_as_server_rejects_bad_upgrade() {
    let mut request = upgrade_request(SAMPLE_KEY);
    request.headers.set("Upgrade", "foobar");
    assert_server_rejects(&request);

    let mut request = upgrade_request(SAMPLE_KEY);
    request.headers.remove("Upgrade");
    assert_server_rejects(&request);
}

#[test]
fn test_open_as_server_rejects_bad_key() {
    // "short" decodes to five bytes, not sixteen.
    let mut request = upgrade_request("c2hvcnQ=");
    assert_server_rejects(&request);

    request = upgrade_request(SAMPLE_KEY);
    request.headers.remove("Sec-WebSocket-Key");
    assert_server_rejects(&request);

    request = upgrade_request("not valid base64!");
    assert_server_rejects(&request);
}

// ---------------------------------------------------------------------------
// Both sides together
// ---------------------------------------------------------------------------

#[test]
fn test_full_handshake_roundtrip() {
    let client_ws = WebSocket::new();
    let mut request = Request::get("/chat");
    request.headers.set("Host", "server.example.com");
    client_ws.start_open_as_client(&mut request);

    let server_ws = WebSocket::new();
    let server_transport = MockTransport::new();
    let mut response = Response::default();
    server_ws
        .open_as_server(
            Arc::clone(&server_transport) as Arc<dyn Transport>,
            &request,
            &mut response,
            b"",
        )
        .unwrap();

    let client_transport = MockTransport::new();
    client_ws
        .complete_open_as_client(Arc::clone(&client_transport) as Arc<dyn Transport>, &response)
        .unwrap();

    // Client's masked text arrives intact at the server.
    client_ws.send_text("Hello", true);
    let texts = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = std::sync::Arc::clone(&texts);
    server_ws.on_text(move |text| sink.lock().unwrap().push(text.to_string()));
    server_transport.feed(&client_transport.sent());
    assert_eq!(texts.lock().unwrap().as_slice(), ["Hello"]);
}
