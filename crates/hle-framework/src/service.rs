//! ServiceFramework trait and request context.

use hle_ipc::{PayloadReader, ProtocolError, Request, Response};

/// Per-call context handed to a handler.
///
/// Holds the decoded request and collects the interface objects the handler
/// moves to the caller. The session table registers those objects after the
/// handler returns and appends their handles to the response, in push order.
pub struct HleRequestContext<'a> {
    request: &'a Request,
    new_sessions: Vec<Box<dyn ServiceFramework>>,
}

impl<'a> HleRequestContext<'a> {
    pub fn new(request: &'a Request) -> Self {
        Self {
            request,
            new_sessions: Vec::new(),
        }
    }

    pub fn request(&self) -> &'a Request {
        self.request
    }

    pub fn command_id(&self) -> u32 {
        self.request.command_id
    }

    /// Cursor over the request's argument words.
    pub fn reader(&self) -> PayloadReader<'a> {
        self.request.reader()
    }

    /// Move a new interface object to the caller.
    pub fn push_interface(&mut self, object: Box<dyn ServiceFramework>) {
        self.new_sessions.push(object);
    }

    /// Take the objects pushed so far.
    pub fn take_new_sessions(&mut self) -> Vec<Box<dyn ServiceFramework>> {
        core::mem::take(&mut self.new_sessions)
    }
}

/// The interface every service object implements.
///
/// # Invariants
///
/// - `handle_request()` produces exactly one response per call
/// - A `ProtocolError` means the request was malformed; a guest-visible
///   failure is a successful `Response` carrying an error result code
/// - Objects run single-threaded: the owning session table serializes calls
///
/// Implementations usually forward to a static [`CommandTable`](crate::CommandTable).
pub trait ServiceFramework: Send {
    /// Interface name used in log lines.
    fn name(&self) -> &str;

    /// Handle one request addressed to this object.
    fn handle_request(&mut self, ctx: &mut HleRequestContext<'_>)
        -> Result<Response, ProtocolError>;
}
