//! # websock — RFC 6455 WebSocket endpoint core
//!
//! A callback-driven implementation of the WebSocket protocol (version 13):
//! the opening handshake for both roles, the binary frame codec with
//! role-correct masking, fragmented-message reassembly, and the connection
//! state machine that coordinates the closing handshake.
//!
//! The crate owns the protocol layer only. The byte transport, the HTTP
//! parser that produced the upgrade request or response, and the embedding
//! application all sit behind narrow interfaces ([`Transport`], the
//! [`http`] message objects, and the session delegates).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use websock::{close_code, Request, Response, WebSocket};
//!
//! let ws = WebSocket::new();
//! ws.on_text({
//!     let echo = ws.clone();
//!     move |text| echo.send_text(text, true)
//! });
//!
//! // transport: Arc<dyn websock::Transport> from the embedding server
//! let mut response = Response::default();
//! ws.open_as_server(transport, &request, &mut response, b"")?;
//! // ... serve traffic; later:
//! ws.close(close_code::NORMAL, "done");
//! ```
//!
//! The session is single-threaded cooperative: the transport must invoke
//! its callbacks serially, and all public operations complete
//! synchronously. A mutex inside the session keeps state consistent if
//! the embedding chooses to call in from several threads anyway.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod http;
pub mod protocol;
pub mod session;
pub mod transport;

pub use config::{Config, Limits};
pub use diagnostics::{DiagnosticsSender, Subscription};
pub use error::{Error, Result};
pub use http::{Headers, Request, Response};
pub use protocol::close_code;
pub use protocol::{Frame, OpCode};
pub use session::{FragmentKind, Role, WebSocket};
pub use transport::Transport;
