//! Helpers for driving account interfaces in tests.
//!
//! These build requests and decode responses without a service manager
//! or session table in the way.

use hle_framework::{HleRequestContext, ProtocolError, Request, Response, ServiceFramework};

use crate::types::{ProfileBase, UserId, PROFILE_BASE_SIZE};

/// Request with no arguments.
pub fn request(command_id: u32) -> Request {
    Request::new(command_id, Vec::new())
}

/// Request carrying a single user id argument.
pub fn user_request(command_id: u32, user_id: UserId) -> Request {
    request(command_id).arg_u128(user_id.0)
}

/// Run an argument-less command directly against a service object.
pub fn call(service: &mut dyn ServiceFramework, command_id: u32) -> Result<Response, ProtocolError> {
    call_with(service, &request(command_id))
}

/// Run `request` directly against a service object.
///
/// Interface objects the handler moves out are dropped.
pub fn call_with(
    service: &mut dyn ServiceFramework,
    request: &Request,
) -> Result<Response, ProtocolError> {
    let mut ctx = HleRequestContext::new(request);
    service.handle_request(&mut ctx)
}

/// Decode the raw `ProfileBase` at the head of a response.
pub fn decode_profile_base(response: &Response) -> Result<ProfileBase, ProtocolError> {
    let raw = response.reader().pop_raw(PROFILE_BASE_SIZE)?;
    let mut bytes = [0u8; PROFILE_BASE_SIZE];
    bytes.copy_from_slice(raw);
    Ok(ProfileBase::from_bytes(&bytes))
}

/// Decode a user id list written to an output buffer.
pub fn decode_user_ids(buffer: &[u8]) -> Vec<UserId> {
    buffer
        .chunks_exact(16)
        .map(|chunk| {
            let mut bytes = [0u8; 16];
            bytes.copy_from_slice(chunk);
            UserId::from_le_bytes(bytes)
        })
        .collect()
}
