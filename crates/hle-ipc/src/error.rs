//! Protocol errors.
//!
//! These are transport-level faults: the request could not be parsed far
//! enough to reach a handler, or a handler ran out of argument words.
//! They are never folded into a [`ResultCode`](crate::ResultCode).

/// Errors that can occur while decoding a request or its arguments.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// Message is too short to contain the header or a requested field.
    #[error("message too short: needed {needed} bytes, only {available} available")]
    TooShort { needed: usize, available: usize },

    /// Header magic does not identify a request.
    #[error("bad magic: expected 0x{expected:08x}, got 0x{got:08x}")]
    BadMagic { expected: u32, got: u32 },

    /// Protocol version is not recognized.
    #[error("unknown protocol version: {0}")]
    UnknownVersion(u32),

    /// Command id does not fit the 32-bit command id space.
    #[error("command id out of range: 0x{0:x}")]
    CommandIdOutOfRange(u64),
}
