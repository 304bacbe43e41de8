//! The WebSocket session: handshake entry points, receive dispatch, send
//! path, and the closing handshake.
//!
//! A [`WebSocket`] is a cheap-to-clone handle over shared session state.
//! It is bound to a [`Transport`] either directly through [`WebSocket::open`]
//! or by one of the handshake operations, after which every byte the
//! transport receives flows through the frame decoder and out through the
//! registered delegates.
//!
//! Delegates are invoked after the internal state lock has been released,
//! so a delegate may call back into the session (for example, echoing a
//! received text message with [`WebSocket::send_text`]).

use std::sync::{Arc, Mutex, MutexGuard};

use bytes::{Buf, BytesMut};

use crate::config::Config;
use crate::diagnostics::{DiagnosticsSender, Subscription, LEVEL_INFO};
use crate::error::{Error, Result};
use crate::http::{Request, Response};
use crate::protocol::close_code;
use crate::protocol::frame::{parse_header, Frame, MAX_CONTROL_FRAME_PAYLOAD};
use crate::protocol::handshake::{
    compute_accept_key, generate_nonce, nonce_is_well_formed, SUPPORTED_VERSION,
};
use crate::protocol::mask::random_masking_key;
use crate::protocol::validation::FrameValidator;
use crate::protocol::OpCode;
use crate::session::{FragmentKind, Role};
use crate::transport::Transport;

/// Delegate receiving ping, pong, or binary payloads.
pub type PayloadDelegate = Arc<dyn Fn(&[u8]) + Send + Sync>;

/// Delegate receiving complete text messages.
pub type TextDelegate = Arc<dyn Fn(&str) + Send + Sync>;

/// Delegate receiving the close status code and reason.
pub type CloseDelegate = Arc<dyn Fn(u16, &str) + Send + Sync>;

#[derive(Default)]
struct Delegates {
    ping: Option<PayloadDelegate>,
    pong: Option<PayloadDelegate>,
    text: Option<TextDelegate>,
    binary: Option<PayloadDelegate>,
    close: Option<CloseDelegate>,
}

/// Work queued while the state lock is held, performed after release so
/// delegates can re-enter the session.
enum Event {
    Ping(Vec<u8>),
    Pong(Vec<u8>),
    Text(String),
    Binary(Vec<u8>),
    Close { code: u16, reason: String },
    Shutdown { clean: bool },
    Diagnostic { level: usize, message: String },
}

struct Binding {
    transport: Arc<dyn Transport>,
    role: Role,
    validator: FrameValidator,
}

#[derive(Default)]
struct Core {
    binding: Option<Binding>,
    close_sent: bool,
    close_received: bool,
    failed: bool,
    sending: FragmentKind,
    receiving: FragmentKind,
    rx_buffer: BytesMut,
    fragment_buffer: BytesMut,
    handshake_key: String,
}

struct Shared {
    core: Mutex<Core>,
    delegates: Mutex<Delegates>,
    diagnostics: DiagnosticsSender,
    config: Config,
}

/// A WebSocket endpoint bound to a byte-level transport.
#[derive(Clone)]
pub struct WebSocket {
    shared: Arc<Shared>,
}

impl Default for WebSocket {
    fn default() -> Self {
        Self::new()
    }
}

impl WebSocket {
    /// Create an idle session with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an idle session with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            shared: Arc::new(Shared {
                core: Mutex::new(Core::default()),
                delegates: Mutex::new(Delegates::default()),
                diagnostics: DiagnosticsSender::new("websock::session"),
                config,
            }),
        }
    }

    /// Subscribe to diagnostic messages at or above `min_level`.
    pub fn subscribe_to_diagnostics<F>(&self, delegate: F, min_level: usize) -> Subscription
    where
        F: Fn(&str, usize, &str) + Send + Sync + 'static,
    {
        self.shared.diagnostics.subscribe(delegate, min_level)
    }

    /// Set the delegate invoked with each received ping payload.
    pub fn on_ping<F>(&self, delegate: F)
    where
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        self.shared.lock_delegates().ping = Some(Arc::new(delegate));
    }

    /// Set the delegate invoked with each received pong payload.
    pub fn on_pong<F>(&self, delegate: F)
    where
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        self.shared.lock_delegates().pong = Some(Arc::new(delegate));
    }

    /// Set the delegate invoked with each complete text message.
    pub fn on_text<F>(&self, delegate: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.shared.lock_delegates().text = Some(Arc::new(delegate));
    }

    /// Set the delegate invoked with each complete binary message.
    pub fn on_binary<F>(&self, delegate: F)
    where
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        self.shared.lock_delegates().binary = Some(Arc::new(delegate));
    }

    /// Set the delegate invoked when the session closes, with the status
    /// code and reason.
    pub fn on_close<F>(&self, delegate: F)
    where
        F: Fn(u16, &str) + Send + Sync + 'static,
    {
        self.shared.lock_delegates().close = Some(Arc::new(delegate));
    }

    /// Bind the session to a transport in the given role.
    ///
    /// The handshake operations call this on success; it is public so a
    /// connection whose upgrade was negotiated elsewhere can still be
    /// driven by this session.
    pub fn open(&self, transport: Arc<dyn Transport>, role: Role) {
        let validator = FrameValidator::new(role, self.shared.config.limits.clone())
            .with_accept_unmasked(self.shared.config.accept_unmasked_frames);
        {
            let mut core = self.shared.lock_core();
            core.binding = Some(Binding {
                transport: Arc::clone(&transport),
                role,
                validator,
            });
        }

        let shared = Arc::clone(&self.shared);
        transport.set_data_received(Box::new(move |bytes| Shared::receive_data(&shared, bytes)));

        let shared = Arc::clone(&self.shared);
        transport.set_connection_broken(Box::new(move |_graceful| {
            Shared::connection_broken(&shared);
        }));
    }

    /// Prepare `request` for the client side of the opening handshake.
    ///
    /// Generates a fresh nonce, sets the `Sec-WebSocket-Version`,
    /// `Sec-WebSocket-Key` and `Upgrade` headers, and appends the
    /// `upgrade` token to `Connection`, preserving existing values.
    pub fn start_open_as_client(&self, request: &mut Request) {
        let key = generate_nonce();
        request.headers.set("Sec-WebSocket-Version", SUPPORTED_VERSION);
        request.headers.set("Sec-WebSocket-Key", key.as_str());
        request.headers.set("Upgrade", "websocket");
        let mut connection: Vec<String> = request
            .headers
            .multi_values("Connection")
            .iter()
            .map(|v| (*v).to_string())
            .collect();
        connection.push("upgrade".into());
        request.headers.set_multi("Connection", connection);
        self.shared.lock_core().handshake_key = key;
    }

    /// Validate the server's upgrade `response` and, on success, bind the
    /// session to `transport` as a client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHandshake`] naming the first failed check.
    /// No session state is mutated on failure.
    pub fn complete_open_as_client(
        &self,
        transport: Arc<dyn Transport>,
        response: &Response,
    ) -> Result<()> {
        if response.status_code != 101 {
            return Err(Error::InvalidHandshake(format!(
                "expected status 101, got {}",
                response.status_code
            )));
        }
        require_upgrade_headers(&response.headers)?;
        let expected = compute_accept_key(&self.shared.lock_core().handshake_key);
        if response.headers.value("Sec-WebSocket-Accept") != Some(expected.as_str()) {
            return Err(Error::InvalidHandshake(
                "Sec-WebSocket-Accept does not match the key".into(),
            ));
        }
        if !response.headers.tokens("Sec-WebSocket-Extensions").is_empty() {
            return Err(Error::InvalidHandshake(
                "server negotiated an unrequested extension".into(),
            ));
        }
        if !response.headers.tokens("Sec-WebSocket-Protocol").is_empty() {
            return Err(Error::InvalidHandshake(
                "server negotiated an unrequested subprotocol".into(),
            ));
        }
        self.open(transport, Role::Client);
        Ok(())
    }

    /// Validate the client's upgrade `request`, populate `response` with
    /// the accepting handshake, and bind the session to `transport` as a
    /// server.
    ///
    /// `trailer` holds any bytes the embedding server read past the end of
    /// the request; they are fed to the receive pipeline as if they had
    /// arrived on the freshly opened session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHandshake`] naming the first failed check.
    /// Neither session state nor `response` is mutated on failure.
    pub fn open_as_server(
        &self,
        transport: Arc<dyn Transport>,
        request: &Request,
        response: &mut Response,
        trailer: &[u8],
    ) -> Result<()> {
        if request.method != "GET" {
            return Err(Error::InvalidHandshake(format!(
                "upgrade requires GET, got {}",
                request.method
            )));
        }
        if request.headers.value("Sec-WebSocket-Version") != Some(SUPPORTED_VERSION) {
            return Err(Error::InvalidHandshake(
                "unsupported Sec-WebSocket-Version".into(),
            ));
        }
        require_upgrade_headers(&request.headers)?;
        let key = request
            .headers
            .value("Sec-WebSocket-Key")
            .ok_or_else(|| Error::InvalidHandshake("missing Sec-WebSocket-Key header".into()))?
            .to_string();
        if !nonce_is_well_formed(&key) {
            return Err(Error::InvalidHandshake(
                "Sec-WebSocket-Key must decode to 16 bytes".into(),
            ));
        }

        let mut connection: Vec<String> = request
            .headers
            .multi_values("Connection")
            .iter()
            .map(|v| (*v).to_string())
            .collect();
        connection.push("upgrade".into());
        response.status_code = 101;
        response.status = "Switching Protocols".into();
        response.headers.set_multi("Connection", connection);
        response.headers.set("Upgrade", "websocket");
        response
            .headers
            .set("Sec-WebSocket-Accept", compute_accept_key(&key));

        self.shared.lock_core().handshake_key = key;
        self.open(transport, Role::Server);
        if !trailer.is_empty() {
            Shared::receive_data(&self.shared, trailer);
        }
        Ok(())
    }

    /// Send a text message, or one fragment of one.
    ///
    /// Silently ignored after a close was sent, before the session is
    /// bound, or while a fragmented binary message is outstanding.
    pub fn send_text(&self, text: &str, last_fragment: bool) {
        let mut core = self.shared.lock_core();
        if core.close_sent || core.binding.is_none() || core.sending == FragmentKind::Binary {
            return;
        }
        let opcode = if core.sending == FragmentKind::Text {
            OpCode::Continuation
        } else {
            OpCode::Text
        };
        core.send_frame(Frame::new(last_fragment, opcode, text.as_bytes().to_vec()));
        core.sending = if last_fragment {
            FragmentKind::None
        } else {
            FragmentKind::Text
        };
    }

    /// Send a binary message, or one fragment of one.
    ///
    /// Silently ignored after a close was sent, before the session is
    /// bound, or while a fragmented text message is outstanding.
    pub fn send_binary(&self, data: &[u8], last_fragment: bool) {
        let mut core = self.shared.lock_core();
        if core.close_sent || core.binding.is_none() || core.sending == FragmentKind::Text {
            return;
        }
        let opcode = if core.sending == FragmentKind::Binary {
            OpCode::Continuation
        } else {
            OpCode::Binary
        };
        core.send_frame(Frame::new(last_fragment, opcode, data.to_vec()));
        core.sending = if last_fragment {
            FragmentKind::None
        } else {
            FragmentKind::Binary
        };
    }

    /// Send a ping. Silently ignored after a close was sent or if `data`
    /// exceeds 125 bytes.
    pub fn ping(&self, data: &[u8]) {
        self.send_control(OpCode::Ping, data);
    }

    /// Send an unsolicited pong. Same constraints as [`WebSocket::ping`].
    pub fn pong(&self, data: &[u8]) {
        self.send_control(OpCode::Pong, data);
    }

    fn send_control(&self, opcode: OpCode, data: &[u8]) {
        let mut core = self.shared.lock_core();
        if core.close_sent || core.binding.is_none() || data.len() > MAX_CONTROL_FRAME_PAYLOAD {
            return;
        }
        core.send_frame(Frame::new(true, opcode, data.to_vec()));
    }

    /// Initiate the closing handshake.
    ///
    /// With code 1005 the close frame carries no payload; with 1006 no
    /// frame is sent at all and the closure is reported locally. A second
    /// call is a no-op.
    pub fn close(&self, code: u16, reason: &str) {
        let mut events = Vec::new();
        self.shared
            .lock_core()
            .initiate_close(code, reason, false, &mut events);
        Shared::dispatch(&self.shared, events);
    }
}

impl std::fmt::Debug for WebSocket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let core = self.shared.lock_core();
        f.debug_struct("WebSocket")
            .field("bound", &core.binding.is_some())
            .field("close_sent", &core.close_sent)
            .field("close_received", &core.close_received)
            .finish_non_exhaustive()
    }
}

/// Check the `Connection` and `Upgrade` headers common to both handshake
/// directions.
fn require_upgrade_headers(headers: &crate::http::Headers) -> Result<()> {
    if !headers.tokens("Connection").iter().any(|t| t == "upgrade") {
        return Err(Error::InvalidHandshake(
            "Connection header lacks the upgrade token".into(),
        ));
    }
    match headers.value("Upgrade") {
        Some(value) if value.eq_ignore_ascii_case("websocket") => Ok(()),
        Some(_) => Err(Error::InvalidHandshake(
            "Upgrade header is not websocket".into(),
        )),
        None => Err(Error::InvalidHandshake("missing Upgrade header".into())),
    }
}

impl Shared {
    fn lock_core(&self) -> MutexGuard<'_, Core> {
        self.core.lock().expect("session state poisoned")
    }

    fn lock_delegates(&self) -> MutexGuard<'_, Delegates> {
        self.delegates.lock().expect("session delegates poisoned")
    }

    /// Transport data-received callback: buffer, decode, dispatch.
    fn receive_data(shared: &Arc<Self>, bytes: &[u8]) {
        let mut events = Vec::new();
        {
            let mut core = shared.lock_core();
            core.rx_buffer.extend_from_slice(bytes);
            core.process_buffer(&shared.config, &mut events);
        }
        Self::dispatch(shared, events);
    }

    /// Transport connection-broken callback.
    fn connection_broken(shared: &Arc<Self>) {
        let mut events = Vec::new();
        {
            let mut core = shared.lock_core();
            let peer = core.peer_id();
            core.initiate_close(
                close_code::ABNORMAL,
                "connection broken by peer",
                true,
                &mut events,
            );
            events.push(Event::Diagnostic {
                level: LEVEL_INFO,
                message: format!("connection to {peer} broken by peer"),
            });
        }
        Self::dispatch(shared, events);
    }

    /// Perform queued work with the state lock released.
    fn dispatch(shared: &Arc<Self>, events: Vec<Event>) {
        for event in events {
            // Delegates are cloned out before invocation so no session
            // lock is held while user code runs.
            match event {
                Event::Ping(data) => {
                    let delegate = shared.lock_delegates().ping.clone();
                    if let Some(delegate) = delegate {
                        delegate(&data);
                    }
                }
                Event::Pong(data) => {
                    let delegate = shared.lock_delegates().pong.clone();
                    if let Some(delegate) = delegate {
                        delegate(&data);
                    }
                }
                Event::Text(text) => {
                    let delegate = shared.lock_delegates().text.clone();
                    if let Some(delegate) = delegate {
                        delegate(&text);
                    }
                }
                Event::Binary(data) => {
                    let delegate = shared.lock_delegates().binary.clone();
                    if let Some(delegate) = delegate {
                        delegate(&data);
                    }
                }
                Event::Close { code, reason } => {
                    let delegate = shared.lock_delegates().close.clone();
                    if let Some(delegate) = delegate {
                        delegate(code, &reason);
                    }
                }
                Event::Shutdown { clean } => {
                    let transport = shared
                        .lock_core()
                        .binding
                        .as_ref()
                        .map(|b| Arc::clone(&b.transport));
                    if let Some(transport) = transport {
                        transport.shutdown(clean);
                    }
                }
                Event::Diagnostic { level, message } => {
                    shared.diagnostics.send(level, &message);
                }
            }
        }
    }
}

impl Core {
    fn peer_id(&self) -> String {
        self.binding
            .as_ref()
            .map(|b| b.transport.peer_id())
            .unwrap_or_else(|| "(unbound)".into())
    }

    /// Encode and hand one frame to the transport, masking per role.
    fn send_frame(&mut self, frame: Frame) {
        if let Some(binding) = &self.binding {
            let mask = binding.role.must_mask().then(random_masking_key);
            binding.transport.send_bytes(&frame.encode(mask));
        }
    }

    /// Decode as many complete frames as the buffer holds.
    fn process_buffer(&mut self, config: &Config, events: &mut Vec<Event>) {
        loop {
            if self.failed {
                // The connection is being torn down; whatever else the
                // peer pipelined is not worth dispatching.
                self.rx_buffer.clear();
                return;
            }
            if self.binding.is_none() {
                return;
            }

            let header = match parse_header(&self.rx_buffer) {
                Ok(header) => header,
                Err(Error::IncompleteFrame { .. }) => return,
                Err(error) => {
                    self.fail_with(&error, events);
                    continue;
                }
            };

            let validation = self
                .binding
                .as_ref()
                .map(|b| {
                    b.validator.validate_incoming(
                        header.mask.is_some(),
                        header.rsv1,
                        header.rsv2,
                        header.rsv3,
                        header.payload_len,
                    )
                })
                .unwrap_or(Ok(()));
            if let Err(violation) = validation {
                self.fail_with(&violation, events);
                continue;
            }

            match header.header_len.checked_add(header.payload_len) {
                Some(total) if self.rx_buffer.len() >= total => {}
                Some(_) => return,
                None => {
                    self.fail_with(
                        &Error::FrameTooLarge {
                            size: header.payload_len,
                            max: usize::MAX - header.header_len,
                        },
                        events,
                    );
                    continue;
                }
            }

            let (frame, consumed) = match Frame::parse(&self.rx_buffer) {
                Ok(parsed) => parsed,
                Err(Error::IncompleteFrame { .. }) => return,
                Err(error) => {
                    self.fail_with(&error, events);
                    continue;
                }
            };
            self.rx_buffer.advance(consumed);
            self.receive_frame(frame, config, events);
        }
    }

    /// Dispatch one decoded frame per its opcode.
    fn receive_frame(&mut self, frame: Frame, config: &Config, events: &mut Vec<Event>) {
        if frame.opcode.is_control() {
            if let Err(violation) = frame.validate() {
                self.fail_with(&violation, events);
                return;
            }
        }

        match frame.opcode {
            OpCode::Ping => {
                events.push(Event::Ping(frame.payload().to_vec()));
                if !self.close_sent {
                    self.send_frame(Frame::pong(frame.payload().to_vec()));
                }
            }

            OpCode::Pong => {
                events.push(Event::Pong(frame.into_payload()));
            }

            OpCode::Close => {
                let payload = frame.payload();
                if payload.len() >= 2 {
                    let code = u16::from_be_bytes([payload[0], payload[1]]);
                    match std::str::from_utf8(&payload[2..]) {
                        Ok(reason) => {
                            let reason = reason.to_string();
                            self.note_peer_close(code, events);
                            self.on_close_receipt(code, reason, events);
                        }
                        Err(_) => {
                            self.fail_with(&Error::InvalidCloseReason, events);
                        }
                    }
                } else {
                    self.note_peer_close(close_code::NO_STATUS, events);
                    self.on_close_receipt(close_code::NO_STATUS, String::new(), events);
                }
            }

            OpCode::Continuation => match self.receiving {
                FragmentKind::None => {
                    self.fail_with(&Error::UnexpectedContinuation, events);
                }
                kind => {
                    if self.append_fragment(frame.payload(), config, events) && frame.fin {
                        let message = self.fragment_buffer.split().to_vec();
                        self.receiving = FragmentKind::None;
                        match kind {
                            FragmentKind::Text => self.deliver_text(message, events),
                            FragmentKind::Binary => events.push(Event::Binary(message)),
                            FragmentKind::None => unreachable!(),
                        }
                    }
                }
            },

            OpCode::Text => {
                if !self.receiving.is_none() {
                    self.fail_with(&Error::MessageInProgress, events);
                } else if frame.fin {
                    self.deliver_text(frame.into_payload(), events);
                } else if self.append_fragment(frame.payload(), config, events) {
                    self.receiving = FragmentKind::Text;
                }
            }

            OpCode::Binary => {
                if !self.receiving.is_none() {
                    self.fail_with(&Error::MessageInProgress, events);
                } else if frame.fin {
                    events.push(Event::Binary(frame.into_payload()));
                } else if self.append_fragment(frame.payload(), config, events) {
                    self.receiving = FragmentKind::Binary;
                }
            }
        }
    }

    /// Grow the fragment reassembly buffer, enforcing the message limit.
    /// Returns false if the limit was exceeded and the connection failed.
    fn append_fragment(&mut self, payload: &[u8], config: &Config, events: &mut Vec<Event>) -> bool {
        let new_size = self.fragment_buffer.len() + payload.len();
        if let Err(violation) = config.limits.check_message_size(new_size) {
            self.fail_with(&violation, events);
            return false;
        }
        self.fragment_buffer.extend_from_slice(payload);
        true
    }

    /// Validate a complete text message and queue its delivery.
    fn deliver_text(&mut self, payload: Vec<u8>, events: &mut Vec<Event>) {
        match String::from_utf8(payload) {
            Ok(text) => events.push(Event::Text(text)),
            Err(_) => self.fail_with(&Error::InvalidUtf8, events),
        }
    }

    /// Record a closure initiated by the remote peer.
    fn note_peer_close(&self, code: u16, events: &mut Vec<Event>) {
        events.push(Event::Diagnostic {
            level: LEVEL_INFO,
            message: format!("close received from {} (code {code})", self.peer_id()),
        });
    }

    /// A close frame (or its local equivalent) has been received.
    fn on_close_receipt(&mut self, code: u16, reason: String, events: &mut Vec<Event>) {
        let close_was_sent = self.close_sent;
        self.close_received = true;
        events.push(Event::Close { code, reason });
        if close_was_sent {
            events.push(Event::Shutdown { clean: false });
        }
    }

    /// Send a close frame and drive the closing state machine.
    ///
    /// With `fail` set the closure is also reported locally and the
    /// transport torn down without waiting for the peer's close frame.
    fn initiate_close(&mut self, code: u16, reason: &str, fail: bool, events: &mut Vec<Event>) {
        if self.close_sent {
            return;
        }
        self.close_sent = true;
        if code == close_code::ABNORMAL {
            // 1006 must never appear on the wire.
            self.on_close_receipt(code, reason.to_string(), events);
        } else {
            let frame = if code == close_code::NO_STATUS {
                Frame::close(None, "")
            } else {
                Frame::close(Some(code), reason)
            };
            self.send_frame(frame);
            if fail {
                self.on_close_receipt(code, reason.to_string(), events);
            } else if self.close_received {
                events.push(Event::Shutdown { clean: true });
            }
        }
    }

    /// Fail the connection: close with the given code and reason, report
    /// locally, tear down, and stop decoding.
    fn fail(&mut self, code: u16, reason: &str, events: &mut Vec<Event>) {
        self.failed = true;
        self.initiate_close(code, reason, true, events);
    }

    fn fail_with(&mut self, error: &Error, events: &mut Vec<Event>) {
        let (code, reason) = violation_args(error);
        self.fail(code, reason, events);
    }
}

/// Map a frame-level violation onto its close code and wire reason.
fn violation_args(error: &Error) -> (u16, &'static str) {
    match error {
        Error::ReservedBitsSet => (close_code::PROTOCOL_ERROR, "reserved bits set"),
        Error::ReservedOpcode(_) => (close_code::PROTOCOL_ERROR, "unknown opcode"),
        Error::UnexpectedContinuation => {
            (close_code::PROTOCOL_ERROR, "unexpected continuation frame")
        }
        Error::MessageInProgress => (close_code::PROTOCOL_ERROR, "last message incomplete"),
        Error::UnmaskedClientFrame => (close_code::PROTOCOL_ERROR, "unmasked frame from client"),
        Error::MaskedServerFrame => (close_code::PROTOCOL_ERROR, "masked frame from server"),
        Error::FragmentedControlFrame => (close_code::PROTOCOL_ERROR, "fragmented control frame"),
        Error::ControlFrameTooLarge(_) => {
            (close_code::PROTOCOL_ERROR, "control frame payload too long")
        }
        Error::FrameTooLarge { .. } => (close_code::MESSAGE_TOO_BIG, "frame too large"),
        Error::MessageTooLarge { .. } => (close_code::MESSAGE_TOO_BIG, "message too large"),
        Error::InvalidUtf8 => (
            close_code::INVALID_PAYLOAD,
            "text message with invalid UTF-8 encoding",
        ),
        Error::InvalidCloseReason => (
            close_code::INVALID_PAYLOAD,
            "invalid UTF-8 encoding in close reason",
        ),
        _ => (close_code::PROTOCOL_ERROR, "protocol violation"),
    }
}
