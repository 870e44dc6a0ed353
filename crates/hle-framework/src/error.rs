//! Error Types for the Service Framework
//!
//! Defines the faults that stop a request before or outside a handler.

use hle_ipc::ProtocolError;

use crate::session::SessionHandle;

/// Errors raised by the framework itself.
///
/// A guest-visible failure is never a `ServiceError`: handlers fold those
/// into the result code of their response.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// No service is registered under the requested port name.
    #[error("unknown service: {0}")]
    UnknownService(String),

    /// A service is already registered under this port name.
    #[error("service already registered: {0}")]
    AlreadyRegistered(String),

    /// The handle does not name a live session.
    #[error("invalid session handle: {0}")]
    InvalidHandle(SessionHandle),

    /// The request could not be decoded.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}
