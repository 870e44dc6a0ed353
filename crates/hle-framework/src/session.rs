//! Session handle table.
//!
//! Each interface object handed to the guest lives in a `SessionTable`
//! under an opaque handle. Requests name the handle; the table looks the
//! object up and lets it dispatch on its own command table.
//!
//! # Properties
//!
//! 1. **No forged sessions**: only handles returned by `insert` resolve
//! 2. **Exclusive ownership**: the table owns every object; closing a handle
//!    drops the object and whatever it holds (open files included)
//! 3. **Fail closed**: an unknown or closed handle is a `ServiceError`

use std::collections::BTreeMap;
use std::fmt;

use hle_ipc::{Request, Response};
use log::debug;

use crate::error::ServiceError;
use crate::service::{HleRequestContext, ServiceFramework};

/// Opaque handle naming one session in a [`SessionTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionHandle(pub u32);

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// Per-client table of open sessions.
pub struct SessionTable {
    sessions: BTreeMap<SessionHandle, Box<dyn ServiceFramework>>,
    /// Next handle to allocate (never 0)
    next_handle: u32,
}

impl SessionTable {
    pub fn new() -> Self {
        Self {
            sessions: BTreeMap::new(),
            next_handle: 1,
        }
    }

    /// Allocate a fresh handle, skipping 0 and any handle still in use.
    fn alloc_handle(&mut self) -> SessionHandle {
        loop {
            let handle = SessionHandle(self.next_handle);
            self.next_handle = self.next_handle.wrapping_add(1);
            if self.next_handle == 0 {
                self.next_handle = 1;
            }
            if !self.sessions.contains_key(&handle) {
                return handle;
            }
        }
    }

    /// Insert a session object, returning its handle.
    pub fn insert(&mut self, object: Box<dyn ServiceFramework>) -> SessionHandle {
        let handle = self.alloc_handle();
        debug!("SessionTable: opened {} as {}", object.name(), handle);
        self.sessions.insert(handle, object);
        handle
    }

    /// Close a session, dropping its object.
    pub fn close(&mut self, handle: SessionHandle) -> Result<(), ServiceError> {
        match self.sessions.remove(&handle) {
            Some(object) => {
                debug!("SessionTable: closed {} ({})", handle, object.name());
                Ok(())
            }
            None => Err(ServiceError::InvalidHandle(handle)),
        }
    }

    /// Interface name of the session behind `handle`.
    pub fn name_of(&self, handle: SessionHandle) -> Option<&str> {
        self.sessions.get(&handle).map(|object| object.name())
    }

    pub fn contains(&self, handle: SessionHandle) -> bool {
        self.sessions.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Decode raw message bytes and dispatch them to `handle`.
    pub fn process(&mut self, handle: SessionHandle, bytes: &[u8]) -> Result<Response, ServiceError> {
        let request = Request::parse(bytes)?;
        self.dispatch(handle, &request)
    }

    /// Dispatch a decoded request to the session behind `handle`.
    ///
    /// Interface objects the handler moved to the caller are registered
    /// here and their handles appended to the response in push order.
    pub fn dispatch(
        &mut self,
        handle: SessionHandle,
        request: &Request,
    ) -> Result<Response, ServiceError> {
        let object = self
            .sessions
            .get_mut(&handle)
            .ok_or(ServiceError::InvalidHandle(handle))?;

        let mut ctx = HleRequestContext::new(request);
        let mut response = object.handle_request(&mut ctx)?;

        for new_object in ctx.take_new_sessions() {
            let new_handle = self.insert(new_object);
            response.moved_handles.push(new_handle.0);
        }

        Ok(response)
    }
}

impl Default for SessionTable {
    fn default() -> Self {
        Self::new()
    }
}
