//! Wire Format
//!
//! Binary encoding/decoding for service requests and responses.
//!
//! All multi-byte values are little-endian. Raw payloads are a sequence of
//! 32-bit words; values narrower than a word (booleans) occupy a full word
//! and raw blobs are zero-padded to the next word boundary.

use crate::error::ProtocolError;
use crate::result::ResultCode;

/// Request header magic (`"SFCI"`)
pub const REQUEST_MAGIC: u32 = 0x4943_4653;

/// Response header magic (`"SFCO"`)
pub const RESPONSE_MAGIC: u32 = 0x4F43_4653;

/// Protocol version written in both headers
pub const PROTOCOL_VERSION: u32 = 0;

/// Size of the request header: magic, version, command id
pub const REQUEST_HEADER_SIZE: usize = 16;

/// Size of the response header: magic, version, result, padding
pub const RESPONSE_HEADER_SIZE: usize = 16;

const WORD: usize = 4;

fn padded_len(len: usize) -> usize {
    (len + WORD - 1) / WORD * WORD
}

// ============================================================================
// Request
// ============================================================================

/// A decoded request addressed to one interface object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    /// Command id selecting the handler
    pub command_id: u32,
    /// Raw argument words following the header
    pub data: Vec<u8>,
}

impl Request {
    /// Create a request with pre-encoded argument words.
    pub fn new(command_id: u32, data: Vec<u8>) -> Self {
        Self { command_id, data }
    }

    /// Append a `u32` argument.
    pub fn arg_u32(mut self, value: u32) -> Self {
        self.data.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Append a `u64` argument.
    pub fn arg_u64(mut self, value: u64) -> Self {
        self.data.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Append a `u128` argument (user ids).
    pub fn arg_u128(mut self, value: u128) -> Self {
        self.data.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Decode a request from raw message bytes.
    ///
    /// Fails on a truncated header, a foreign magic or version, and on a
    /// command id that does not fit in 32 bits.
    pub fn parse(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = PayloadReader::new(bytes);

        if bytes.len() < REQUEST_HEADER_SIZE {
            return Err(ProtocolError::TooShort {
                needed: REQUEST_HEADER_SIZE,
                available: bytes.len(),
            });
        }

        let magic = reader.pop_u32()?;
        if magic != REQUEST_MAGIC {
            return Err(ProtocolError::BadMagic {
                expected: REQUEST_MAGIC,
                got: magic,
            });
        }

        let version = reader.pop_u32()?;
        if version != PROTOCOL_VERSION {
            return Err(ProtocolError::UnknownVersion(version));
        }

        let raw_command_id = reader.pop_u64()?;
        let command_id = u32::try_from(raw_command_id)
            .map_err(|_| ProtocolError::CommandIdOutOfRange(raw_command_id))?;

        Ok(Self {
            command_id,
            data: bytes[REQUEST_HEADER_SIZE..].to_vec(),
        })
    }

    /// Encode the request to message bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(REQUEST_HEADER_SIZE + self.data.len());
        bytes.extend_from_slice(&REQUEST_MAGIC.to_le_bytes());
        bytes.extend_from_slice(&PROTOCOL_VERSION.to_le_bytes());
        bytes.extend_from_slice(&u64::from(self.command_id).to_le_bytes());
        bytes.extend_from_slice(&self.data);
        bytes
    }

    /// Cursor over the argument words.
    pub fn reader(&self) -> PayloadReader<'_> {
        PayloadReader::new(&self.data)
    }
}

// ============================================================================
// Payload Reader
// ============================================================================

/// Sequential reader over raw payload words.
#[derive(Clone, Debug)]
pub struct PayloadReader<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> PayloadReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], ProtocolError> {
        if self.remaining() < len {
            return Err(ProtocolError::TooShort {
                needed: self.cursor + len,
                available: self.data.len(),
            });
        }
        let bytes = &self.data[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(bytes)
    }

    pub fn pop_u32(&mut self) -> Result<u32, ProtocolError> {
        let mut word = [0u8; 4];
        word.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(word))
    }

    pub fn pop_u64(&mut self) -> Result<u64, ProtocolError> {
        let mut value = [0u8; 8];
        value.copy_from_slice(self.take(8)?);
        Ok(u64::from_le_bytes(value))
    }

    pub fn pop_u128(&mut self) -> Result<u128, ProtocolError> {
        let mut value = [0u8; 16];
        value.copy_from_slice(self.take(16)?);
        Ok(u128::from_le_bytes(value))
    }

    /// Booleans occupy a full word; any non-zero value is `true`.
    pub fn pop_bool(&mut self) -> Result<bool, ProtocolError> {
        Ok(self.pop_u32()? != 0)
    }

    /// Pop `len` raw bytes plus their word padding.
    pub fn pop_raw(&mut self, len: usize) -> Result<&'a [u8], ProtocolError> {
        let bytes = self.take(padded_len(len))?;
        Ok(&bytes[..len])
    }
}

// ============================================================================
// Response
// ============================================================================

/// A response produced by exactly one handler invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Response {
    /// Result code at the head of the response
    pub result: ResultCode,
    /// Raw output words following the result
    pub data: Vec<u8>,
    /// Output buffer contents (the guest's receive buffer)
    pub buffer: Vec<u8>,
    /// Handles of interface objects moved to the caller
    pub moved_handles: Vec<u32>,
}

impl Response {
    /// A response carrying only a result code.
    pub fn from_result(result: ResultCode) -> Self {
        Self {
            result,
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }

    /// Cursor over the raw output words.
    pub fn reader(&self) -> PayloadReader<'_> {
        PayloadReader::new(&self.data)
    }

    /// Encode the header and raw output words.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(RESPONSE_HEADER_SIZE + self.data.len());
        bytes.extend_from_slice(&RESPONSE_MAGIC.to_le_bytes());
        bytes.extend_from_slice(&PROTOCOL_VERSION.to_le_bytes());
        bytes.extend_from_slice(&self.result.raw().to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&self.data);
        bytes
    }
}

/// Builder for responses, in push order.
#[derive(Clone, Debug)]
pub struct ResponseBuilder {
    response: Response,
}

impl ResponseBuilder {
    pub fn new(result: ResultCode) -> Self {
        Self {
            response: Response::from_result(result),
        }
    }

    pub fn success() -> Self {
        Self::new(ResultCode::SUCCESS)
    }

    pub fn push_u32(mut self, value: u32) -> Self {
        self.response.data.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn push_u64(mut self, value: u64) -> Self {
        self.response.data.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn push_u128(mut self, value: u128) -> Self {
        self.response.data.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn push_bool(self, value: bool) -> Self {
        self.push_u32(u32::from(value))
    }

    /// Push a raw structure, zero-padded to the next word.
    pub fn push_raw(mut self, bytes: &[u8]) -> Self {
        self.response.data.extend_from_slice(bytes);
        let padding = padded_len(bytes.len()) - bytes.len();
        self.response.data.extend(core::iter::repeat(0).take(padding));
        self
    }

    /// Write the output buffer.
    pub fn write_buffer(mut self, bytes: &[u8]) -> Self {
        self.response.buffer = bytes.to_vec();
        self
    }

    pub fn build(self) -> Response {
        self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(magic: u32, version: u32, command_id: u64) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&magic.to_le_bytes());
        bytes.extend_from_slice(&version.to_le_bytes());
        bytes.extend_from_slice(&command_id.to_le_bytes());
        bytes
    }

    #[test]
    fn test_request_parse_with_arguments() {
        let request = Request::new(5, Vec::new()).arg_u128(0xAABB);
        let decoded = Request::parse(&request.encode()).unwrap();

        assert_eq!(decoded.command_id, 5);
        assert_eq!(decoded.reader().pop_u128().unwrap(), 0xAABB);
    }

    #[test]
    fn test_request_too_short() {
        let err = Request::parse(&[0x53, 0x46]).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::TooShort {
                needed: REQUEST_HEADER_SIZE,
                available: 2
            }
        );
    }

    #[test]
    fn test_request_bad_magic() {
        let err = Request::parse(&header(RESPONSE_MAGIC, PROTOCOL_VERSION, 0)).unwrap_err();
        assert!(matches!(err, ProtocolError::BadMagic { .. }));
    }

    #[test]
    fn test_request_unknown_version() {
        let err = Request::parse(&header(REQUEST_MAGIC, 7, 0)).unwrap_err();
        assert_eq!(err, ProtocolError::UnknownVersion(7));
    }

    #[test]
    fn test_request_command_id_out_of_range() {
        let raw = u64::from(u32::MAX) + 1;
        let err = Request::parse(&header(REQUEST_MAGIC, PROTOCOL_VERSION, raw)).unwrap_err();
        assert_eq!(err, ProtocolError::CommandIdOutOfRange(raw));
    }

    #[test]
    fn test_reader_reports_truncated_argument() {
        let request = Request::new(1, Vec::new()).arg_u64(9);
        let err = request.reader().pop_u128().unwrap_err();
        assert!(matches!(err, ProtocolError::TooShort { needed: 16, available: 8 }));
    }

    #[test]
    fn test_push_raw_pads_to_word() {
        let response = ResponseBuilder::success().push_raw(&[1, 2, 3, 4, 5]).push_u32(9).build();
        assert_eq!(response.data.len(), 12);

        let mut reader = response.reader();
        assert_eq!(reader.pop_raw(5).unwrap(), &[1, 2, 3, 4, 5]);
        assert_eq!(reader.pop_u32().unwrap(), 9);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_bool_occupies_word() {
        let response = ResponseBuilder::success().push_bool(true).push_bool(false).build();
        let mut reader = response.reader();
        assert!(reader.pop_bool().unwrap());
        assert!(!reader.pop_bool().unwrap());
    }

    #[test]
    fn test_response_encode_header() {
        let response = Response::from_result(ResultCode::UNKNOWN_COMMAND_ID);
        let bytes = response.encode();

        assert_eq!(bytes.len(), RESPONSE_HEADER_SIZE);
        assert_eq!(&bytes[0..4], &RESPONSE_MAGIC.to_le_bytes());
        assert_eq!(&bytes[8..12], &0x1BA0Au32.to_le_bytes());
    }
}
