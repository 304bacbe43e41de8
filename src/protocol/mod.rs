//! Wire-level protocol layer: opcodes, frame codec, masking, handshake
//! primitives, close codes, and incoming-frame validation.

pub mod close_code;
pub mod frame;
pub mod handshake;
pub mod mask;
pub mod opcode;
pub mod validation;

pub use frame::{Frame, MAX_CONTROL_FRAME_PAYLOAD};
pub use handshake::{compute_accept_key, ACCEPT_KEY_SALT, SUPPORTED_VERSION};
pub use mask::apply_mask;
pub use opcode::OpCode;
pub use validation::FrameValidator;
